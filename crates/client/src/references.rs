//! Citation reference extraction from generated answers.
//!
//! Answers cite sources inline as `[document name, page: 12]` or
//! `[document name, section: "Results"]`. This module scans the text,
//! parses every citation, and resolves each one against the documents
//! the answer was grounded in.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Citation pattern as requested in the generation prompt.
///
/// Lazy groups let document names contain commas; the optional quotes
/// around the value are stripped by the match itself.
static CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[(.*?), (page|section): ?"?(.*?)"?\]"#).expect("citation pattern compiles")
});

/// Where inside a document a reference points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Locator {
    Page { page_number: u32 },
    Section { section_name: String },
    Paragraph { paragraph_index: usize },
}

/// A resolved citation from a generated answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Reference {
    #[serde(flatten)]
    pub locator: Locator,
    /// Document name exactly as cited.
    pub document_name: String,
    /// Resolved document id; empty when the cited name is unknown.
    pub document_id: String,
    /// Supporting excerpt, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A candidate document a citation can resolve against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentRef {
    pub id: String,
    pub name: String,
}

/// Extract every well-formed citation from the answer text.
///
/// Resolution is lenient: a cited name with no matching document yields a
/// reference with an empty id, and a page citation whose value isn't a
/// number is skipped. Extraction itself never fails.
pub fn extract_references(text: &str, documents: &[DocumentRef]) -> Vec<Reference> {
    let mut references = Vec::new();

    for caps in CITATION.captures_iter(text) {
        let document_name = caps[1].to_string();
        let value = caps[3].trim();

        let locator = match &caps[2] {
            "page" => match value.parse::<u32>() {
                Ok(page_number) => Locator::Page { page_number },
                Err(_) => {
                    tracing::debug!("skipping citation with non-numeric page: {value}");
                    continue;
                }
            },
            _ => Locator::Section { section_name: value.to_string() },
        };

        let document_id = documents
            .iter()
            .find(|d| d.name == document_name)
            .map(|d| d.id.clone())
            .unwrap_or_default();

        references.push(Reference { locator, document_name, document_id, content: None });
    }

    references
}
