//! INI text parsing.
//!
//! # Grammar
//! ```text
//! ; comment            # comment
//! key = value          (before any header: DEFAULT section)
//! [section]
//! key = value
//! key : value
//! quoted = "  kept verbatim  "
//! ```
//!
//! Parsing is strict: a line that is neither blank, a comment, a header nor
//! a key/value pair fails the whole file.

use thiserror::Error;

use crate::config::document::{Document, DEFAULT_SECTION};

/// A syntax error at a specific line (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unclosed section header")]
    UnclosedSection,

    #[error("empty section name")]
    EmptySection,

    #[error("key-value delimiter not found: {0:?}")]
    MissingDelimiter(String),

    #[error("empty key name")]
    EmptyKey,
}

/// Parse INI text into a [`Document`] with no recorded sources.
pub fn parse(input: &str) -> Result<Document, ParseError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut doc = Document::new();
    let mut current = DEFAULT_SECTION.to_string();

    for (idx, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim();
        let fail = |kind: ParseErrorKind| ParseError { line: idx + 1, kind };

        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let end = header
                .find(']')
                .ok_or_else(|| fail(ParseErrorKind::UnclosedSection))?;
            let name = header[..end].trim();
            if name.is_empty() {
                return Err(fail(ParseErrorKind::EmptySection));
            }
            current = name.to_string();
            // headers with no keys still count as sections
            doc.section_mut(&current);
            continue;
        }

        let delim = line
            .find(['=', ':'])
            .ok_or_else(|| fail(ParseErrorKind::MissingDelimiter(line.to_string())))?;
        let key = line[..delim].trim();
        if key.is_empty() {
            return Err(fail(ParseErrorKind::EmptyKey));
        }
        let value = parse_value(line[delim + 1..].trim());

        doc.section_mut(&current).insert(key, value);
    }

    Ok(doc)
}

/// A value opening with a quote runs to the matching closing quote; anything
/// after it (typically an inline comment) is dropped. An unterminated quote
/// is treated as a plain value.
fn parse_value(raw: &str) -> &str {
    if let Some(quote) = raw.chars().next().filter(|c| matches!(c, '"' | '\'' | '`')) {
        if let Some(end) = raw[1..].find(quote) {
            return &raw[1..1 + end];
        }
    }
    strip_inline_comment(raw)
}

/// Cut `value ; note` / `value # note`. The marker must follow whitespace so
/// values such as `http://host/#frag` survive.
fn strip_inline_comment(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    for (idx, &b) in bytes.iter().enumerate() {
        if (b == b';' || b == b'#') && idx > 0 && bytes[idx - 1].is_ascii_whitespace() {
            return raw[..idx].trim_end();
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_sections() {
        let doc = parse(
            "[test]\nval_string = test\nval_int = 5\nval_bool = true\nval_float = 5.5\n",
        )
        .unwrap();

        assert_eq!(doc.get("test", "val_string", "none"), "test");
        assert_eq!(doc.get_int("test", "val_int", -5), 5);
        assert!(doc.get_bool("test", "val_bool", false));
        assert_eq!(doc.get_float64("test", "val_float", 9.2), 5.5);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let doc = parse("; header\n\n# another\n[a]\n  ; indented\nk = v ; trailing\n").unwrap();
        assert_eq!(doc.section("a").unwrap().len(), 1);
        assert_eq!(doc.get("a", "k", ""), "v");
    }

    #[test]
    fn test_keys_before_header_go_to_default() {
        let doc = parse("name = root\n[s]\nx = 1\n").unwrap();
        assert_eq!(doc.get(DEFAULT_SECTION, "name", ""), "root");
        assert_eq!(doc.get("s", "name", "none"), "none");
    }

    #[test]
    fn test_colon_delimiter_and_first_delimiter_wins() {
        let doc = parse("[s]\nurl = http://example.com:8080/#top\nport: 9000\n").unwrap();
        assert_eq!(doc.get("s", "url", ""), "http://example.com:8080/#top");
        assert_eq!(doc.get_int("s", "port", 0), 9000);
    }

    #[test]
    fn test_quoted_values_are_verbatim() {
        let doc = parse("[s]\na = \"  padded ; not a comment \"\nb = 'x'\nc = `y`\nd = \"\n").unwrap();
        assert_eq!(doc.get("s", "a", ""), "  padded ; not a comment ");
        assert_eq!(doc.get("s", "b", ""), "x");
        assert_eq!(doc.get("s", "c", ""), "y");
        assert_eq!(doc.get("s", "d", ""), "\"");
    }

    #[test]
    fn test_quoted_values_with_trailing_comment() {
        let doc = parse(
            "[s]\na = \"x y\" ; note\nb = `z` # c\nc = 'a;b' ; tail\nd = \"open ; cut\n",
        )
        .unwrap();
        assert_eq!(doc.get("s", "a", ""), "x y");
        assert_eq!(doc.get("s", "b", ""), "z");
        assert_eq!(doc.get("s", "c", ""), "a;b");
        assert_eq!(doc.get("s", "d", ""), "\"open");
    }

    #[test]
    fn test_repeated_section_merges() {
        let doc = parse("[s]\na = 1\n[t]\nz = 0\n[s]\nb = 2\na = 3\n").unwrap();
        let s = doc.section("s").unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(s.get("a"), Some("3"));
    }

    #[test]
    fn test_empty_header_section_exists() {
        let doc = parse("[empty]\n").unwrap();
        assert!(doc.has_section("empty"));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_bom_is_ignored() {
        let doc = parse("\u{feff}[s]\nk = v\n").unwrap();
        assert!(doc.has_section("s"));
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse("[s]\nk = v\n[broken\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.kind, ParseErrorKind::UnclosedSection);

        let err = parse("[s]\njust a line\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(err.kind, ParseErrorKind::MissingDelimiter(_)));

        assert_eq!(parse("[ ]\n").unwrap_err().kind, ParseErrorKind::EmptySection);
        assert_eq!(parse("[s]\n = v\n").unwrap_err().kind, ParseErrorKind::EmptyKey);
    }
}
