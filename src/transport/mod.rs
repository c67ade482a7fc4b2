//! Blocking HTTP transport to the inference server.

mod http;

pub use http::{HttpTransport, RawResponse, TransportError, CHAT_COMPLETIONS_PATH, REQUEST_ID_HEADER};
