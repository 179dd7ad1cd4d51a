//! Note model
//!
//! A note is an id plus an HTML fragment. The backup payload is a plain JSON
//! array of these records, so the struct must serialize to exactly
//! `{ "id": ..., "content": ... }` with no extra fields.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a derived note title
const TITLE_MAX_CHARS: usize = 30;

/// A single note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: String,

    /// Note body as an HTML fragment
    pub content: String,
}

impl Note {
    /// Create a new note with a fresh id
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
        }
    }

    /// Check whether the note has any visible text left
    pub fn is_blank(&self) -> bool {
        plain_text(&self.content).trim().is_empty()
    }

    /// Derive a short title from the first non-empty line of content
    pub fn title(&self) -> String {
        match text_lines(&self.content).next() {
            Some(line) => line.chars().take(TITLE_MAX_CHARS).collect(),
            None => "New note".to_string(),
        }
    }

    /// Derive a one-line preview from the second non-empty line of content
    pub fn preview(&self) -> String {
        text_lines(&self.content)
            .nth(1)
            .unwrap_or_else(|| "No preview".to_string())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Strip an HTML fragment down to plain text with line breaks
///
/// `<br>`, `</div>`, and `</p>` become newlines; every other tag is dropped.
/// This mirrors how the sidebar renders titles and previews.
fn plain_text(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let after = &rest[lt..];
        let gt = match after.find('>') {
            Some(gt) => gt,
            None => return out, // unterminated tag: drop the remainder
        };
        let tag = after[1..gt].trim().to_ascii_lowercase();
        let name = tag.trim_start_matches('/').trim_end_matches('/').trim();
        if name == "br" || tag == "/div" || tag == "/p" {
            out.push('\n');
        }
        rest = &after[gt + 1..];
    }

    out.push_str(rest);
    out
}

/// Iterate the non-empty trimmed lines of a note's plain text
fn text_lines(content: &str) -> impl Iterator<Item = String> {
    plain_text(content)
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_note_has_unique_id() {
        let a = Note::new("<p>hello</p>");
        let b = Note::new("<p>hello</p>");
        assert_ne!(a.id, b.id);
        assert_eq!(a.content, "<p>hello</p>");
    }

    #[test]
    fn test_serializes_to_two_fields_only() {
        let note = Note {
            id: "1".into(),
            content: "<p>hello</p>".into(),
        };
        let json = serde_json::to_value(&note).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["id"], "1");
        assert_eq!(obj["content"], "<p>hello</p>");
    }

    #[test]
    fn test_title_from_first_line() {
        let note = Note::new("<div>Shopping list</div><div>milk</div>");
        assert_eq!(note.title(), "Shopping list");
        assert_eq!(note.preview(), "milk");
    }

    #[test]
    fn test_title_truncated_to_30_chars() {
        let long = "a".repeat(50);
        let note = Note::new(long.clone());
        assert_eq!(note.title(), "a".repeat(30));
    }

    #[test]
    fn test_br_tags_split_lines() {
        let note = Note::new("first line<br>second line<br/>third");
        assert_eq!(note.title(), "first line");
        assert_eq!(note.preview(), "second line");
    }

    #[test]
    fn test_missing_preview() {
        let note = Note::new("<p>only one line</p>");
        assert_eq!(note.preview(), "No preview");
    }

    #[test]
    fn test_blank_note() {
        assert!(Note::new("").is_blank());
        assert!(Note::new("<p><br></p>").is_blank());
        assert!(Note::new("   ").is_blank());
        assert!(!Note::new("<p>x</p>").is_blank());
    }

    #[test]
    fn test_empty_content_title_fallback() {
        let note = Note::new("");
        assert_eq!(note.title(), "New note");
    }
}
