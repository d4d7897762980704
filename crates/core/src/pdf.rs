//! PDF parsing: document metadata, page count, and text preview
//! extraction using lopdf.

use booknook_common::{AppError, AppResult};
use lopdf::{Document, Object};
use tracing::{debug, warn};

/// Pages scanned when building the text preview.
pub const MAX_PREVIEW_PAGES: usize = 5;

/// Character cap on the extracted text preview.
pub const MAX_PREVIEW_CHARS: usize = 10_000;

/// Metadata pulled out of an uploaded PDF.
#[derive(Debug, Clone)]
pub struct PdfMetadata {
    /// Title from the Info dictionary, if present.
    pub title: Option<String>,
    /// Author from the Info dictionary, if present.
    pub author: Option<String>,
    /// Total page count.
    pub page_count: i32,
}

/// A parsed PDF document.
pub struct ParsedPdf {
    doc: Document,
}

impl ParsedPdf {
    /// Parse PDF bytes. Fails with a metadata-extraction error when the
    /// bytes are not a well-formed PDF.
    pub fn parse(bytes: &[u8]) -> AppResult<Self> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| AppError::MetadataExtraction(format!("Failed to parse PDF: {e}")))?;
        Ok(Self { doc })
    }

    /// Read title, author and page count.
    #[must_use]
    pub fn metadata(&self) -> PdfMetadata {
        let page_count = i32::try_from(self.doc.get_pages().len()).unwrap_or(i32::MAX);

        PdfMetadata {
            title: self.info_string(b"Title"),
            author: self.info_string(b"Author"),
            page_count,
        }
    }

    /// Extract a text preview: at most [`MAX_PREVIEW_PAGES`] pages,
    /// truncated to [`MAX_PREVIEW_CHARS`] characters, stopping early once
    /// the cap is reached.
    #[must_use]
    pub fn extract_preview(&self) -> String {
        let mut preview = String::new();

        for (index, page_id) in self.doc.page_iter().take(MAX_PREVIEW_PAGES).enumerate() {
            match self.doc.get_page_content(page_id) {
                Ok(content) => {
                    preview.push_str(&extract_text_from_content(&content));
                    preview.push(' ');
                }
                Err(e) => {
                    warn!(page = index + 1, error = %e, "Failed to read page content, skipping");
                }
            }

            if preview.chars().count() >= MAX_PREVIEW_CHARS {
                break;
            }
        }

        let cleaned = clean_text(&preview);
        let truncated: String = cleaned.chars().take(MAX_PREVIEW_CHARS).collect();

        debug!(chars = truncated.len(), "Extracted PDF preview");
        truncated
    }

    /// Look up a string value in the trailer's Info dictionary.
    fn info_string(&self, key: &[u8]) -> Option<String> {
        let info = match self.doc.trailer.get(b"Info").ok()? {
            Object::Reference(id) => self.doc.get_object(*id).ok()?.as_dict().ok()?,
            Object::Dictionary(dict) => dict,
            _ => return None,
        };

        match info.get(key).ok()? {
            Object::String(bytes, _) => {
                let value = decode_text_string(bytes);
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            _ => None,
        }
    }
}

/// Decode a PDF text string, handling the UTF-16BE BOM form.
fn decode_text_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&utf16)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// Pull showable text out of a page content stream by scanning the
/// BT..ET text blocks for Tj/TJ operators.
fn extract_text_from_content(content: &[u8]) -> String {
    let content_str = String::from_utf8_lossy(content);
    let mut text = String::new();
    let mut in_text_block = false;

    for line in content_str.lines() {
        let trimmed = line.trim();

        match trimmed {
            "BT" => in_text_block = true,
            "ET" => {
                in_text_block = false;
                text.push(' ');
            }
            _ if in_text_block => {
                if let Some(shown) = text_from_operator(trimmed) {
                    text.push_str(&shown);
                }
            }
            _ => {}
        }
    }

    text
}

/// Decode the argument of a text-showing operator (`Tj`, `'`, `"`, `TJ`).
fn text_from_operator(line: &str) -> Option<String> {
    if line.ends_with("Tj") || line.ends_with('\'') || line.ends_with('"') {
        let start = line.find('(')?;
        let end = line.rfind(')')?;
        if start < end {
            return Some(decode_literal_string(&line[start + 1..end]));
        }
        return None;
    }

    // [(text) kern (text)] TJ
    if line.ends_with("TJ") {
        let mut result = String::new();
        let mut in_paren = false;
        let mut current = String::new();

        for ch in line.chars() {
            match ch {
                '(' if !in_paren => in_paren = true,
                ')' if in_paren => {
                    in_paren = false;
                    result.push_str(&decode_literal_string(&current));
                    current.clear();
                }
                _ if in_paren => current.push(ch),
                _ => {}
            }
        }

        if !result.is_empty() {
            return Some(result);
        }
    }

    None
}

/// Resolve backslash escapes inside a literal PDF string.
fn decode_literal_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some(c) => result.push(c),
                None => {}
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Collapse runs of whitespace into single spaces.
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_literal_string() {
        assert_eq!(decode_literal_string("Hello\\nWorld"), "Hello\nWorld");
        assert_eq!(decode_literal_string("a\\(b\\)c"), "a(b)c");
        assert_eq!(decode_literal_string("plain"), "plain");
    }

    #[test]
    fn test_decode_utf16_text_string() {
        // "Hi" with a UTF-16BE BOM
        let bytes = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_string(&bytes), "Hi");
    }

    #[test]
    fn test_text_from_tj_operator() {
        assert_eq!(
            text_from_operator("(Hello World) Tj").as_deref(),
            Some("Hello World")
        );
        assert_eq!(
            text_from_operator("[(Hel) -20 (lo)] TJ").as_deref(),
            Some("Hello")
        );
        assert!(text_from_operator("1 0 0 1 72 720 Tm").is_none());
    }

    #[test]
    fn test_extract_text_from_content() {
        let content = b"BT\n(First) Tj\nET\nBT\n(Second) Tj\nET\n";
        let text = extract_text_from_content(content);
        assert!(text.contains("First"));
        assert!(text.contains("Second"));
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("a   b\n\nc"), "a b c");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let result = ParsedPdf::parse(b"not a pdf at all");
        assert!(matches!(result, Err(AppError::MetadataExtraction(_))));
    }
}
