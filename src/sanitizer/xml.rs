//! Structure-preserving XML rewriter
//!
//! Walks the token stream of a buffered document and writes every token
//! back out. Only content is touched: text, CDATA, attribute values and
//! comment bodies go through [`Sanitizer::sanitize_value`]; tag names,
//! nesting, attribute names, the declaration, processing instructions and
//! doctype are written as they were read. A token whose content did not
//! change is written from its original bytes.

use super::Sanitizer;
use crate::domain::{Result, SanitizerError};
use once_cell::sync::Lazy;
use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Context used for words found in comments
pub const COMMENT_CONTEXT: &str = "comment";

static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("word regex is valid"));

// Punctuation peeled off comment words before classification
const WORD_PUNCTUATION: &[char] = &[
    ',', ';', '(', ')', '[', ']', '{', '}', '<', '>', '"', '\'', '!', '?', '.',
];

/// Rewrite a whole document, returning the sanitized bytes
pub(crate) fn rewrite(sanitizer: &mut Sanitizer, input: &[u8]) -> Result<Vec<u8>> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().check_end_names = false;

    let mut writer = Writer::new(Vec::with_capacity(input.len()));
    let mut path: Vec<String> = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            let position = reader.buffer_position() as u64;
            tracing::warn!(position, "Unrecoverable XML structure error");
            SanitizerError::Parse {
                position,
                message: e.to_string(),
            }
        })?;

        let output = match event {
            Event::Eof => break,
            Event::Start(e) => {
                let rewritten = rewrite_attributes(sanitizer, &e, reader.buffer_position() as u64)?;
                path.push(tag_name(&e));
                match rewritten {
                    Some(start) => Event::Start(start),
                    None => Event::Start(e),
                }
            }
            Event::Empty(e) => {
                match rewrite_attributes(sanitizer, &e, reader.buffer_position() as u64)? {
                    Some(start) => Event::Empty(start),
                    None => Event::Empty(e),
                }
            }
            Event::End(e) => {
                path.pop();
                Event::End(e)
            }
            Event::Text(e) => match rewrite_text(sanitizer, &e, &path) {
                Some(text) => Event::Text(BytesText::from_escaped(partial_escape(&text).into_owned())),
                None => Event::Text(e),
            },
            Event::CData(e) => match rewrite_cdata(sanitizer, &e, &path) {
                Some(content) => Event::CData(BytesCData::new(content)),
                None => Event::CData(e),
            },
            Event::Comment(e) => match rewrite_comment(sanitizer, &e) {
                Some(comment) => Event::Comment(BytesText::from_escaped(comment)),
                None => Event::Comment(e),
            },
            other => other,
        };

        writer
            .write_event(output)
            .map_err(|e| SanitizerError::io("write output", std::io::Error::other(e.to_string())))?;
    }

    Ok(writer.into_inner())
}

fn tag_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

/// Sanitize attribute values; `None` when nothing changed
fn rewrite_attributes(
    sanitizer: &mut Sanitizer,
    e: &BytesStart<'_>,
    position: u64,
) -> Result<Option<BytesStart<'static>>> {
    let tag = tag_name(e);
    let mut attributes: Vec<(Attribute<'_>, Option<String>)> = Vec::new();
    let mut changed = false;

    let mut iter = e.attributes();
    iter.with_checks(false);
    for attr in iter {
        let attr = attr.map_err(|err| SanitizerError::Parse {
            position,
            message: err.to_string(),
        })?;
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        if value.trim().is_empty() {
            attributes.push((attr, None));
            continue;
        }

        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let context = format!("{tag}.{name}");
        let sanitized = sanitizer.sanitize_value(&context, &value);
        if sanitized == value {
            attributes.push((attr, None));
        } else {
            changed = true;
            attributes.push((attr, Some(sanitized)));
        }
    }

    if !changed {
        return Ok(None);
    }

    let mut rebuilt = e.clone().into_owned();
    rebuilt.clear_attributes();
    for (attr, replacement) in attributes {
        match replacement {
            Some(value) => rebuilt.push_attribute(Attribute {
                key: attr.key,
                value: Cow::Owned(escape(&value).into_owned().into_bytes()),
            }),
            // Rebuilt attributes are always double-quoted
            None if attr.value.contains(&b'"') => {
                let raw = String::from_utf8_lossy(&attr.value).replace('"', "&quot;");
                rebuilt.push_attribute(Attribute {
                    key: attr.key,
                    value: Cow::Owned(raw.into_bytes()),
                });
            }
            None => rebuilt.push_attribute(attr),
        }
    }
    Ok(Some(rebuilt))
}

/// Sanitize text content; `None` when whitespace-only or unchanged
fn rewrite_text(sanitizer: &mut Sanitizer, e: &BytesText<'_>, path: &[String]) -> Option<String> {
    let text = match e.unescape() {
        Ok(text) => text.into_owned(),
        Err(err) => {
            tracing::debug!(error = %err, "Unescape failed, using raw text");
            String::from_utf8_lossy(e).into_owned()
        }
    };
    if text.trim().is_empty() {
        return None;
    }

    let context = path.join(".");
    let sanitized = sanitizer.sanitize_value(&context, &text);
    (sanitized != text).then_some(sanitized)
}

/// Sanitize CDATA content as text; `None` when whitespace-only or unchanged
fn rewrite_cdata(sanitizer: &mut Sanitizer, e: &BytesCData<'_>, path: &[String]) -> Option<String> {
    let content = String::from_utf8_lossy(e).into_owned();
    if content.trim().is_empty() {
        return None;
    }

    let context = path.join(".");
    let sanitized = sanitizer.sanitize_value(&context, &content);
    (sanitized != content).then_some(sanitized)
}

/// Sanitize a comment word by word, keeping spacing and punctuation
fn rewrite_comment(sanitizer: &mut Sanitizer, e: &BytesText<'_>) -> Option<String> {
    let body = String::from_utf8_lossy(e);
    if body.trim().is_empty() {
        return None;
    }

    let rewritten = WORD_REGEX.replace_all(&body, |caps: &Captures<'_>| {
        let word = &caps[0];
        let core = word.trim_matches(WORD_PUNCTUATION);
        if core.is_empty() {
            return word.to_string();
        }
        let start = word.len() - word.trim_start_matches(WORD_PUNCTUATION).len();
        let end = start + core.len();
        let sanitized = sanitizer.sanitize_value(COMMENT_CONTEXT, core);
        format!("{}{}{}", &word[..start], sanitized, &word[end..])
    });

    match rewritten {
        Cow::Owned(text) if text != body => Some(text),
        _ => None,
    }
}
