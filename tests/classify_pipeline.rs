//! End-to-end classification against a mock inference server.

use llm_classify::structured::{PARSE_FAILED, UNEXPECTED_FORMAT};
use llm_classify::{
    classify_file, ClassificationTarget, Classifier, ClassifierConfig, ContentKind,
};
use mockito::{Matcher, Server};
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

const CHAT_PATH: &str = "/v1/chat/completions";

fn completion(content: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}]
    })
    .to_string()
}

fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn config_for(server: &Server) -> ClassifierConfig {
    ClassifierConfig::default().with_server_url(server.url())
}

#[test]
fn text_file_is_classified() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", CHAT_PATH)
        .match_header("x-request-id", Matcher::Any)
        .match_body(Matcher::PartialJson(json!({
            "model": "local-model",
            "temperature": 0.2,
            "max_tokens": 512,
            "stream": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(
            r#"{"category_path":"Finance/Invoices","suggested_filename":"invoice_acme_corp_2024-03-15","confidence":0.92}"#,
        ))
        .create();

    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "inv.txt", b"ACME Corp invoice dated 2024-03-15, total $120");
    let outcome = classify_file(&ClassificationTarget::new(&path), &config_for(&server)).unwrap();

    mock.assert();
    let c = outcome.classification().expect("classified");
    assert_eq!(c.category_path(), Some("Finance/Invoices"));
    assert_eq!(c.suggested_filename(), Some("invoice_acme_corp_2024-03-15"));
    assert_eq!(c.confidence(), Some(0.92));
    assert_eq!(outcome.exit_code(), 0);
}

#[test]
fn fenced_json_answer_is_unwrapped() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", CHAT_PATH)
        .with_status(200)
        .with_body(completion(
            "```json\n{\"category_path\":\"Work/Reports\",\"suggested_filename\":\"q3_report\",\"confidence\":0.9}\n```",
        ))
        .create();

    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "q3.md", b"# Q3 report");
    let outcome = classify_file(&ClassificationTarget::new(&path), &config_for(&server)).unwrap();

    assert_eq!(
        outcome.classification().unwrap().as_value(),
        &json!({"category_path": "Work/Reports", "suggested_filename": "q3_report", "confidence": 0.9})
    );
}

#[test]
fn prose_answer_becomes_parse_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", CHAT_PATH)
        .with_status(200)
        .with_body(completion("I think this is a report."))
        .create();

    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "r.txt", b"report");
    let outcome = classify_file(&ClassificationTarget::new(&path), &config_for(&server)).unwrap();

    let err = outcome.error().expect("failed");
    assert_eq!(err.error, PARSE_FAILED);
    assert_eq!(err.raw_response.as_deref(), Some("I think this is a report."));
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(
        outcome.to_json(false).unwrap(),
        r#"{"error":"Failed to parse JSON","raw_response":"I think this is a report."}"#
    );
}

#[test]
fn empty_object_body_is_unexpected_format() {
    let mut server = Server::new();
    let _mock = server.mock("POST", CHAT_PATH).with_status(200).with_body("{}").create();

    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "a.txt", b"abc");
    let outcome = classify_file(&ClassificationTarget::new(&path), &config_for(&server)).unwrap();

    let err = outcome.error().unwrap();
    assert_eq!(err.error, UNEXPECTED_FORMAT);
    assert_eq!(err.raw_response.as_deref(), Some("{}"));
}

#[test]
fn server_error_is_recovered_into_error_result() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", CHAT_PATH)
        .with_status(500)
        .with_body("model crashed")
        .create();

    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "a.txt", b"abc");
    let outcome = classify_file(&ClassificationTarget::new(&path), &config_for(&server)).unwrap();

    let err = outcome.error().unwrap();
    assert!(err.error.starts_with("Request failed: "), "{}", err.error);
    assert!(err.error.contains("500"));
    assert!(err.raw_response.is_none());
}

#[test]
fn unreachable_server_is_recovered_into_error_result() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "a.txt", b"abc");
    // Port 9 (discard) is closed on test machines.
    let config = ClassifierConfig::default().with_server_url("http://127.0.0.1:9");
    let outcome = classify_file(&ClassificationTarget::new(&path), &config).unwrap();
    assert!(outcome.error().unwrap().error.starts_with("Request failed: "));
}

#[test]
fn missing_file_never_reaches_the_server() {
    let mut server = Server::new();
    let mock = server.mock("POST", CHAT_PATH).expect(0).create();

    let dir = TempDir::new().unwrap();
    let target = ClassificationTarget::new(dir.path().join("gone.txt"));
    let err = classify_file(&target, &config_for(&server)).unwrap_err();

    assert!(err.is_not_found());
    mock.assert();
}

#[test]
fn image_with_vision_is_sent_as_data_uri() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", CHAT_PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""type":"image_url""#.to_string()),
            Matcher::Regex(r#"data:image/png;base64,iVBORw0KGgo="#.to_string()),
        ]))
        .with_status(200)
        .with_body(completion(r#"{"category_path":"Personal/Photos","suggested_filename":"photo","confidence":0.5}"#))
        .create();

    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "photo.png", &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    let config = config_for(&server).with_supports_vision(true);
    let outcome = classify_file(&ClassificationTarget::new(&path), &config).unwrap();

    mock.assert();
    assert!(outcome.is_classified());
}

#[test]
fn image_without_vision_degrades_to_text_request() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "photo.jpg", &[0xff, 0xd8, 0xff, 0xe0]);
    let classifier = Classifier::new(ClassifierConfig::default()).unwrap();

    let (content, request) = classifier.prepare(&ClassificationTarget::new(&path)).unwrap();

    assert_eq!(content.kind(), ContentKind::Image);
    assert!(!request.contains_image());
    let user = request.messages[1].content.as_text().unwrap();
    assert!(user.ends_with("[Image data - see attached image]"));
    assert!(!user.contains("/9j/"));
}
