//! Options that shape how a segment pattern is compiled.

use serde::{Deserialize, Serialize};

/// Segment delimiter and case handling for a pattern matcher.
///
/// Host names are split on `.`, request paths on `/`. Everything else about
/// the matching rules is shared between the two.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatcherOptions {
    /// Character separating segments (default: `.`)
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Whether literal text is compared case-sensitively (default: true)
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,
}

impl MatcherOptions {
    /// Dot-delimited, case-sensitive matching for host names.
    pub const fn host() -> Self {
        Self {
            delimiter: '.',
            case_sensitive: true,
        }
    }

    /// Slash-delimited, case-sensitive matching for request paths.
    pub const fn path() -> Self {
        Self {
            delimiter: '/',
            case_sensitive: true,
        }
    }

    pub const fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self::host()
    }
}

fn default_delimiter() -> char {
    '.'
}

fn default_case_sensitive() -> bool {
    true
}
