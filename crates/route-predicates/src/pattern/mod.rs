//! Ant-style segment patterns with named placeholders.
//!
//! Patterns are split on a configurable delimiter (`.` for host names, `/`
//! for paths) and support:
//!
//! | Syntax          | Matches                                              |
//! |-----------------|------------------------------------------------------|
//! | `text`          | the literal text                                     |
//! | `?`             | exactly one character inside a segment               |
//! | `*`             | zero or more characters inside a segment             |
//! | `**`            | zero or more whole segments                          |
//! | `{name}`        | one or more characters inside a segment, bound to `name` |
//! | `{name:regex}`  | text matching `regex` (may span segments), bound to `name` |
//!
//! # Module Structure
//!
//! - `options` - Delimiter and case sensitivity
//! - `parser` - Pattern tokenizer
//! - `compiled` - Single-pattern compilation to an anchored regex
//! - `matcher` - String-level matcher with a compiled-pattern cache

mod compiled;
mod matcher;
mod options;
mod parser;

use std::collections::HashMap;

pub use compiled::CompiledPattern;
pub use matcher::{AntPathMatcher, CACHE_TURNOFF_THRESHOLD};
pub use options::MatcherOptions;

/// Placeholder name to captured text.
pub type UriVariables = HashMap<String, String>;
