//! Configuration for the built-in predicates.

use super::shortcut::{split_args, FieldBinding, ShortcutConfig, ShortcutType, ShortcutValue};
use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize};

fn default_case_sensitive() -> bool {
    true
}

/// Accepts `patterns: a.com` or `patterns: [a.com, b.com]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(text) => split_args(&text),
        OneOrMany::Many(list) => list,
    })
}

/// Host predicate configuration.
///
/// ```yaml
/// patterns:
///   - "{tenant}.example.com"
///   - "**.example.org"
/// caseSensitive: false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    #[serde(default, alias = "pattern", deserialize_with = "one_or_many")]
    patterns: Vec<String>,

    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            case_sensitive: true,
        }
    }
}

impl HostConfig {
    pub fn new(patterns: Vec<String>) -> Self {
        Self {
            patterns,
            ..Self::default()
        }
    }

    /// Patterns in evaluation order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn set_patterns(&mut self, patterns: Vec<String>) -> &mut Self {
        self.patterns = patterns;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// The first configured pattern.
    #[deprecated(note = "use `patterns()`")]
    pub fn pattern(&self) -> Option<&str> {
        self.patterns.first().map(String::as_str)
    }

    /// Replace all patterns with a single one.
    #[deprecated(note = "use `set_patterns()`")]
    pub fn set_pattern(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.patterns = vec![pattern.into()];
        self
    }
}

fn set_host_patterns(config: &mut HostConfig, value: ShortcutValue) -> Result<(), ConfigError> {
    config.patterns = value.into_list();
    Ok(())
}

static HOST_BINDINGS: [FieldBinding<HostConfig>; 1] = [FieldBinding {
    name: "patterns",
    apply: set_host_patterns,
}];

impl ShortcutConfig for HostConfig {
    const NAME: &'static str = "Host";

    fn shortcut_type() -> ShortcutType {
        ShortcutType::GatherList
    }

    fn bindings() -> &'static [FieldBinding<Self>] {
        &HOST_BINDINGS
    }
}

/// Path predicate configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathConfig {
    #[serde(default, alias = "pattern", deserialize_with = "one_or_many")]
    pub patterns: Vec<String>,

    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            case_sensitive: true,
        }
    }
}

fn set_path_patterns(config: &mut PathConfig, value: ShortcutValue) -> Result<(), ConfigError> {
    config.patterns = value.into_list();
    Ok(())
}

fn set_path_case_sensitive(
    config: &mut PathConfig,
    value: ShortcutValue,
) -> Result<(), ConfigError> {
    config.case_sensitive = value.into_bool("caseSensitive")?;
    Ok(())
}

static PATH_BINDINGS: [FieldBinding<PathConfig>; 2] = [
    FieldBinding {
        name: "patterns",
        apply: set_path_patterns,
    },
    FieldBinding {
        name: "caseSensitive",
        apply: set_path_case_sensitive,
    },
];

impl ShortcutConfig for PathConfig {
    const NAME: &'static str = "Path";

    fn shortcut_type() -> ShortcutType {
        ShortcutType::GatherListTailFlag
    }

    fn bindings() -> &'static [FieldBinding<Self>] {
        &PATH_BINDINGS
    }
}
