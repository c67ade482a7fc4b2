//! Classification prompt rendering.
//!
//! [`build_prompt`] is pure: the same display name, content and length limit
//! always render the same bytes.

use crate::content::{truncate_chars, ContentKind, ExtractedContent};
use std::fmt::Write as _;

/// Allowed first-level categories.
pub const TOP_LEVEL_CATEGORIES: [&str; 17] = [
    "Business",
    "Personal",
    "Finance",
    "Health",
    "Education",
    "Entertainment",
    "Work",
    "Travel",
    "Legal",
    "Technology",
    "Science",
    "Art",
    "Music",
    "Sports",
    "Media",
    "Documents",
    "Archives",
];

/// Example second-level categories shown to the model.
pub const SUBCATEGORY_EXAMPLES: [&str; 10] = [
    "Invoices",
    "Reports",
    "Photos",
    "Recipes",
    "Projects",
    "Research",
    "Contracts",
    "Receipts",
    "Presentations",
    "Notes",
];

pub const FALLBACK_CATEGORY: &str = "Uncategorized/General";
pub const MAX_FILENAME_LENGTH: usize = 50;
pub const IMAGE_MARKER: &str = "[Image data - see attached image]";

/// The three keys the model must return.
pub const RESULT_KEYS: [&str; 3] = ["category_path", "suggested_filename", "confidence"];

/// Render the classification instructions for one file.
pub fn build_prompt(display_name: &str, content: &ExtractedContent, max_text_length: usize) -> String {
    let is_image = content.kind() == ContentKind::Image;
    let subject = if is_image { "image" } else { "text content" };

    let mut prompt = String::with_capacity(2048 + max_text_length.min(16 * 1024));

    // `write!` into a String cannot fail.
    let _ = write!(
        prompt,
        "You are a file organizer. Analyze the {subject} and provide classification and naming suggestions.

  **Task 1: Category Classification**
  - Create a category path with EXACTLY 2 levels separated by forward slash (/)
  - Use Title Case for all category levels (e.g., \"Personal/Medical Records\")
  - First level should be ONE of these broad categories:
    {top_level}
  - Second level should be a specific subcategory relevant to content:
    Examples: {sub_examples}
  - If content doesn't fit clearly, use \"{fallback}\"
  - Never create categories deeper than 2 levels

  **Task 2: Filename Suggestion**
  - Provide a descriptive filename base (no file extension) using lowercase with underscores
  - Format: {{primary_topic}}_{{entity}}_{{date_or_identifier}}
    - primary_topic: main subject (1-2 words, e.g., \"invoice\", \"meeting_notes\", \"project_proposal\")
    - entity: company/person/organization if identifiable (e.g., \"acme_corp\", \"john_smith\")
    - date_or_identifier: date in YYYY-MM-DD or unique identifier if present
  - If any component is missing, omit it (minimum: just primary_topic)
  - Examples: \"invoice_acme_corp_2024-03-15\", \"recipe_chocolate_cake\", \"contract_freelance_2024\"
  - Keep total length under {max_len} characters
",
        top_level = TOP_LEVEL_CATEGORIES.join(", "),
        sub_examples = SUBCATEGORY_EXAMPLES.join(", "),
        fallback = FALLBACK_CATEGORY,
        max_len = MAX_FILENAME_LENGTH,
    );

    if is_image {
        prompt.push_str(
            "  **For images**: Describe visible content, text, objects, or documents to determine category and filename.\n",
        );
    }

    let _ = write!(
        prompt,
        "
  **Output Format**: Return ONLY valid JSON with these exact keys:
  {{
    \"{}\": \"Category/Subcategory\",
    \"{}\": \"descriptive_name_here\",
    \"{}\": 0.85
  }}

  Original filename: {display_name}",
        RESULT_KEYS[0], RESULT_KEYS[1], RESULT_KEYS[2],
    );

    if is_image {
        prompt.push_str("\n\n");
        prompt.push_str(IMAGE_MARKER);
    } else if let Some(text) = content
        .text_content()
        .filter(|t| !t.is_empty() || content.is_truncated())
    {
        let _ = write!(
            prompt,
            "\n\nContent (truncated to {max_text_length} chars):\n{}",
            truncate_chars(text, max_text_length)
        );
    }

    prompt
}
