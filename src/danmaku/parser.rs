//! XML danmaku payload parser
//!
//! Payloads look like:
//! ```xml
//! <i>
//!   <d p="12.5,1,25,16777215,1700000000,0,abcd,123">hello</d>
//! </i>
//! ```
//! The `p` attribute is `time,mode,size,color,...`; only the first four
//! fields are used.

use std::fmt;
use std::io::BufRead;

use quick_xml::Reader;
use quick_xml::events::Event;

use super::types::{Comment, CommentKind, Rgb};

/// Danmaku payload errors
#[derive(Debug)]
pub enum DanmakuParseError {
    /// Malformed XML
    Xml(String),
    /// A `<d>` element with an unreadable attribute list
    Attribute(String),
}

impl fmt::Display for DanmakuParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DanmakuParseError::Xml(e) => write!(f, "Danmaku XML error: {}", e),
            DanmakuParseError::Attribute(e) => write!(f, "Danmaku attribute error: {}", e),
        }
    }
}

impl std::error::Error for DanmakuParseError {}

/// Parsed `p` attribute, before the text is known
#[derive(Debug, Clone, Copy, PartialEq)]
struct CommentAttrs {
    time: f64,
    kind: CommentKind,
    color: Rgb,
}

/// Parse the `time,mode,size,color,...` attribute
///
/// Returns `None` for unsupported modes or unreadable numbers, so that a
/// single bad entry never rejects a whole payload.
fn parse_p_attr(value: &str) -> Option<CommentAttrs> {
    let mut fields = value.split(',');
    let time: f64 = fields.next()?.trim().parse().ok()?;
    let mode: u32 = fields.next()?.trim().parse().ok()?;
    let _size = fields.next();
    let color: u32 = fields
        .next()
        .and_then(|c| c.trim().parse().ok())
        .unwrap_or(0xffffff);

    if !time.is_finite() || time < 0.0 {
        return None;
    }

    Some(CommentAttrs {
        time,
        kind: CommentKind::from_mode(mode)?,
        color: Rgb::from_packed(color),
    })
}

/// Parse an XML danmaku document into comments sorted by appearance time
pub fn parse_danmaku_xml(data: impl BufRead) -> Result<Vec<Comment>, DanmakuParseError> {
    let mut reader = Reader::from_reader(data);
    let mut buf = Vec::with_capacity(256);
    let mut comments = Vec::new();

    // Attributes of the `<d>` we are inside, if supported
    let mut current: Option<CommentAttrs> = None;
    let mut in_d = false;
    let mut text = String::new();
    let mut skipped = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"d" {
                    in_d = true;
                    text.clear();
                    current = None;
                    for attr in e.attributes() {
                        let attr =
                            attr.map_err(|e| DanmakuParseError::Attribute(e.to_string()))?;
                        if attr.key.as_ref() == b"p" {
                            current = parse_p_attr(&String::from_utf8_lossy(&attr.value));
                        }
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if in_d {
                    let decoded = e
                        .unescape()
                        .map_err(|e| DanmakuParseError::Xml(e.to_string()))?;
                    text.push_str(&decoded);
                }
            }
            Ok(Event::CData(e)) => {
                if in_d {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"d" && in_d {
                    in_d = false;
                    let content = text.trim();
                    match current.take() {
                        Some(attrs) if !content.is_empty() => {
                            comments.push(Comment::new(content, attrs.kind, attrs.time, attrs.color));
                        }
                        _ => skipped += 1,
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                return Err(DanmakuParseError::Xml(format!(
                    "at position {}: {}",
                    reader.error_position(),
                    e
                )));
            }
        }
        buf.clear();
    }

    if skipped > 0 {
        tracing::debug!("Skipped {} unsupported danmaku entries", skipped);
    }

    // Stable, so equal timestamps keep payload order
    comments.sort_by(|a, b| a.time.total_cmp(&b.time));
    Ok(comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::danmaku::types::CommentState;

    #[test]
    fn test_parse_basic_document() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<i>
  <chatserver>chat.example.com</chatserver>
  <d p="12.5,1,25,16777215,1700000000,0,abcd,1">second</d>
  <d p="3.0,5,25,16711680,1700000000,0,abcd,2">first</d>
  <d p="20,4,25,0,1700000000,0,abcd,3">third</d>
</i>"#;
        let comments = parse_danmaku_xml(xml.as_bytes()).unwrap();
        assert_eq!(comments.len(), 3);

        assert_eq!(comments[0].text, "first");
        assert_eq!(comments[0].kind, CommentKind::Top);
        assert_eq!(comments[0].color, Rgb(0xff, 0, 0));
        assert_eq!(comments[0].border_color, Rgb::BLACK);

        assert_eq!(comments[1].time, 12.5);
        assert_eq!(comments[1].kind, CommentKind::Scroll);

        assert_eq!(comments[2].kind, CommentKind::Bottom);
        assert_eq!(comments[2].color, Rgb::BLACK);
        assert_eq!(comments[2].border_color, Rgb::WHITE);

        assert!(comments.iter().all(|c| c.state == CommentState::Pending));
    }

    #[test]
    fn test_skips_unsupported_entries() {
        let xml = r#"<i>
  <d p="1.0,7,25,16777215">[advanced]</d>
  <d p="2.0,8,25,16777215">script()</d>
  <d p="bad,1,25,16777215">nan time</d>
  <d p="4.0,1,25,16777215">   </d>
  <d p="5.0,1,25,16777215">kept</d>
</i>"#;
        let comments = parse_danmaku_xml(xml.as_bytes()).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "kept");
    }

    #[test]
    fn test_unescapes_text() {
        let xml = r#"<i><d p="1,1,25,16777215">a &lt;3 b &amp; c</d></i>"#;
        let comments = parse_danmaku_xml(xml.as_bytes()).unwrap();
        assert_eq!(comments[0].text, "a <3 b & c");
    }

    #[test]
    fn test_equal_times_keep_order() {
        let xml = r#"<i>
  <d p="5,1,25,16777215">a</d>
  <d p="5,1,25,16777215">b</d>
  <d p="1,1,25,16777215">c</d>
</i>"#;
        let comments = parse_danmaku_xml(xml.as_bytes()).unwrap();
        let texts: Vec<_> = comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["c", "a", "b"]);
    }

    #[test]
    fn test_malformed_xml_is_error() {
        let xml = r#"<i><d p="1,1,25,16777215">open</i>"#;
        let result = parse_danmaku_xml(xml.as_bytes());
        assert!(matches!(result, Err(DanmakuParseError::Xml(_))));
    }

    #[test]
    fn test_missing_color_defaults_to_white() {
        assert_eq!(
            parse_p_attr("1.5,1").map(|a| a.color),
            Some(Rgb::WHITE)
        );
        assert_eq!(parse_p_attr("-1,1,25,0"), None);
    }
}
