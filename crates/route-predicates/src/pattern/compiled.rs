//! Compilation of a segment pattern into a single anchored regex.
//!
//! The whole pattern becomes one regular expression with a named group per
//! placeholder. The `regex` crate runs in time linear in the input, so no
//! pattern/host combination can trigger catastrophic backtracking.

use super::options::MatcherOptions;
use super::parser::{self, Part, Segment};
use super::UriVariables;
use crate::error::PatternError;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

const GROUP_PREFIX: &str = "__var";

/// A pattern compiled for repeated matching.
///
/// Immutable after construction and safe to share between threads.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    options: MatcherOptions,
    regex: Regex,
    /// (capture group index, variable name) in declaration order
    variables: Vec<(usize, String)>,
    literal: bool,
}

impl CompiledPattern {
    /// Compile a pattern string.
    ///
    /// Fails on an empty pattern, an unclosed or unnamed placeholder, a
    /// variable bound twice, or an invalid placeholder regex.
    pub fn compile(pattern: &str, options: MatcherOptions) -> Result<Self, PatternError> {
        let segments = parser::parse(pattern, options.delimiter)?;
        let (expression, names) = build_expression(pattern, &segments, options.delimiter)?;

        let regex = RegexBuilder::new(&expression)
            .case_insensitive(!options.case_sensitive)
            .build()
            .map_err(|source| PatternError::Compile {
                pattern: pattern.to_string(),
                source,
            })?;

        let variables = names
            .into_iter()
            .enumerate()
            .filter_map(|(i, name)| {
                let group = format!("{GROUP_PREFIX}{i}");
                regex
                    .capture_names()
                    .position(|n| n == Some(group.as_str()))
                    .map(|index| (index, name))
            })
            .collect();

        Ok(Self {
            source: pattern.to_string(),
            options,
            regex,
            variables,
            literal: !parser::has_wildcards(pattern),
        })
    }

    /// The pattern text as configured.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn options(&self) -> MatcherOptions {
        self.options
    }

    /// Names of the placeholders, in the order they appear.
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|(_, name)| name.as_str())
    }

    /// Whether the pattern has no wildcards or placeholders.
    pub fn is_literal(&self) -> bool {
        self.literal
    }

    /// Check if a candidate matches. Empty candidates never match.
    pub fn matches(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }
        if self.literal && self.options.case_sensitive {
            return candidate == self.source;
        }
        self.regex.is_match(candidate)
    }

    /// Match a candidate and return the bound variables on success.
    pub fn match_and_extract(&self, candidate: &str) -> Option<UriVariables> {
        if self.variables.is_empty() {
            return self.matches(candidate).then(UriVariables::new);
        }
        if candidate.is_empty() {
            return None;
        }

        let captures = self.regex.captures(candidate)?;
        let variables = self
            .variables
            .iter()
            .filter_map(|(index, name)| {
                captures
                    .get(*index)
                    .map(|m| (name.clone(), m.as_str().to_string()))
            })
            .collect();

        Some(variables)
    }

    /// Variables bound by a candidate; empty when it does not match.
    pub fn extract_variables(&self, candidate: &str) -> UriVariables {
        self.match_and_extract(candidate).unwrap_or_default()
    }
}

impl std::fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

/// Build the anchored expression and the variable names in group order.
fn build_expression(
    pattern: &str,
    segments: &[Segment],
    delimiter: char,
) -> Result<(String, Vec<String>), PatternError> {
    let delim = regex::escape(delimiter.encode_utf8(&mut [0u8; 4]));
    let segment_char = format!("[^{delim}]");

    let mut expression = String::from("^");
    let mut names: Vec<String> = Vec::new();
    let mut seen = HashSet::new();
    let last = segments.len() - 1;

    for (i, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Any if last == 0 => expression.push_str("(?s:.*)"),
            // Trailing `**` also matches the bare prefix.
            Segment::Any if i == last => {
                expression.push_str(&format!("(?s:{delim}.*)?"));
            }
            Segment::Any => {
                expression.push_str(&format!("(?:{segment_char}+{delim})*"));
            }
            Segment::Parts(parts) => {
                for part in parts {
                    match part {
                        Part::Literal(text) => expression.push_str(&regex::escape(text)),
                        Part::AnyChar => expression.push_str(&segment_char),
                        // A lone `*` still needs a non-empty segment.
                        Part::AnyRun if parts.len() == 1 => {
                            expression.push_str(&segment_char);
                            expression.push('+');
                        }
                        Part::AnyRun => {
                            expression.push_str(&segment_char);
                            expression.push('*');
                        }
                        Part::Variable { name, regex } => {
                            if !seen.insert(name.clone()) {
                                return Err(PatternError::DuplicateVariable {
                                    pattern: pattern.to_string(),
                                    name: name.clone(),
                                });
                            }
                            let group = format!("{GROUP_PREFIX}{}", names.len());
                            let body = match regex {
                                Some(regex) => {
                                    let regex = strip_anchors(regex);
                                    Regex::new(regex).map_err(|source| {
                                        PatternError::InvalidVariableRegex {
                                            pattern: pattern.to_string(),
                                            name: name.clone(),
                                            source,
                                        }
                                    })?;
                                    format!("(?:{regex})")
                                }
                                None => format!("{segment_char}+"),
                            };
                            expression.push_str(&format!("(?P<{group}>{body})"));
                            names.push(name.clone());
                        }
                    }
                }

                let next_is_trailing_any = i + 1 == last && segments[last] == Segment::Any;
                if i < last && !next_is_trailing_any {
                    expression.push_str(&delim);
                }
            }
        }
    }

    expression.push('$');
    Ok((expression, names))
}

/// Drop a leading `^` and an unescaped trailing `$` from a placeholder regex.
///
/// The placeholder is embedded in the middle of the whole-pattern expression,
/// where such anchors could never match.
fn strip_anchors(regex: &str) -> &str {
    let regex = regex.strip_prefix('^').unwrap_or(regex);
    match regex.strip_suffix('$') {
        Some(body) => {
            let escapes = body.chars().rev().take_while(|&c| c == '\\').count();
            if escapes % 2 == 0 {
                body
            } else {
                regex
            }
        }
        None => regex,
    }
}
