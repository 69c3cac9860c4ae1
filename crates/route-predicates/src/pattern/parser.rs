//! Tokenizer for Ant-style segment patterns.
//!
//! A pattern is split on the delimiter into segments. Placeholders are
//! scanned as a unit, so a delimiter or a regex quantifier such as `{1,3}`
//! inside `{name:regex}` never breaks a segment apart.

use crate::error::PatternError;

/// One delimiter-separated piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// `**`: zero or more whole segments
    Any,
    /// Everything else: a sequence of parts matched within one segment
    Parts(Vec<Part>),
}

/// A piece of a single segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Part {
    Literal(String),
    /// `?`
    AnyChar,
    /// `*`
    AnyRun,
    /// `{name}` or `{name:regex}`
    Variable { name: String, regex: Option<String> },
}

/// Split `pattern` into segments using `delimiter`.
///
/// Consecutive `**` segments are collapsed into one. An empty segment (from a
/// leading, trailing or doubled delimiter) is kept as an empty literal so the
/// delimiter itself is still required at that position.
pub(crate) fn parse(pattern: &str, delimiter: char) -> Result<Vec<Segment>, PatternError> {
    if pattern.is_empty() {
        return Err(PatternError::Empty);
    }

    let mut segments = Vec::new();
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut segment_start = 0;
    let mut pos = 0;

    while let Some(ch) = pattern[pos..].chars().next() {
        if ch == delimiter {
            flush_literal(&mut literal, &mut parts);
            push_segment(
                &mut segments,
                &pattern[segment_start..pos],
                std::mem::take(&mut parts),
            );
            pos += ch.len_utf8();
            segment_start = pos;
            continue;
        }

        match ch {
            '*' => {
                flush_literal(&mut literal, &mut parts);
                if parts.last() != Some(&Part::AnyRun) {
                    parts.push(Part::AnyRun);
                }
                pos += 1;
            }
            '?' => {
                flush_literal(&mut literal, &mut parts);
                parts.push(Part::AnyChar);
                pos += 1;
            }
            '{' => {
                flush_literal(&mut literal, &mut parts);
                let end = placeholder_end(pattern, pos)?;
                parts.push(parse_placeholder(pattern, &pattern[pos + 1..end])?);
                pos = end + 1;
            }
            _ => {
                literal.push(ch);
                pos += ch.len_utf8();
            }
        }
    }

    flush_literal(&mut literal, &mut parts);
    push_segment(&mut segments, &pattern[segment_start..], parts);

    Ok(segments)
}

fn flush_literal(literal: &mut String, parts: &mut Vec<Part>) {
    if !literal.is_empty() {
        parts.push(Part::Literal(std::mem::take(literal)));
    }
}

fn push_segment(segments: &mut Vec<Segment>, raw: &str, parts: Vec<Part>) {
    if raw == "**" {
        if segments.last() != Some(&Segment::Any) {
            segments.push(Segment::Any);
        }
    } else {
        segments.push(Segment::Parts(parts));
    }
}

/// Byte index of the `}` closing the placeholder opened at `open`.
fn placeholder_end(pattern: &str, open: usize) -> Result<usize, PatternError> {
    let mut depth = 0usize;
    let mut escaped = false;

    for (offset, ch) in pattern[open..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(open + offset);
                }
            }
            _ => {}
        }
    }

    Err(PatternError::UnclosedPlaceholder {
        pattern: pattern.to_string(),
        position: open,
    })
}

fn parse_placeholder(pattern: &str, body: &str) -> Result<Part, PatternError> {
    let (name, regex) = match body.split_once(':') {
        Some((name, regex)) if !regex.is_empty() => (name, Some(regex.to_string())),
        Some((name, _)) => (name, None),
        None => (body, None),
    };

    if name.is_empty() {
        return Err(PatternError::EmptyVariableName {
            pattern: pattern.to_string(),
        });
    }

    Ok(Part::Variable {
        name: name.to_string(),
        regex,
    })
}

/// Whether `text` contains any wildcard or placeholder syntax.
pub(crate) fn has_wildcards(text: &str) -> bool {
    let mut open = false;
    for ch in text.chars() {
        match ch {
            '*' | '?' => return true,
            '{' => open = true,
            '}' if open => return true,
            _ => {}
        }
    }
    false
}
