//! Error types for pattern compilation and predicate configuration.
//!
//! Every error here is raised while building a route, never while evaluating
//! a request. Evaluation itself only ever answers `true` or `false`.

/// Failure to compile a single segment pattern.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("pattern must not be empty")]
    Empty,

    #[error("unclosed placeholder starting at byte {position} in pattern '{pattern}'")]
    UnclosedPlaceholder { pattern: String, position: usize },

    #[error("placeholder with empty name in pattern '{pattern}'")]
    EmptyVariableName { pattern: String },

    #[error("variable '{name}' is bound more than once in pattern '{pattern}'")]
    DuplicateVariable { pattern: String, name: String },

    #[error("invalid regex for variable '{name}' in pattern '{pattern}': {source}")]
    InvalidVariableRegex {
        pattern: String,
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to compile pattern '{pattern}': {source}")]
    Compile {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure to turn a predicate or route definition into a runnable predicate.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown predicate '{0}'")]
    UnknownPredicate(String),

    #[error("malformed shortcut '{0}': expected NAME=ARG[,ARG...]")]
    MalformedShortcut(String),

    #[error("predicate '{predicate}' takes {expected} shortcut argument(s), got {actual}")]
    ShortcutArity {
        predicate: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid value for field '{field}': {message}")]
    InvalidField { field: &'static str, message: String },

    #[error("invalid arguments for predicate '{predicate}': {source}")]
    Arguments {
        predicate: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("route '{route}': {source}")]
    Pattern {
        route: String,
        #[source]
        source: PatternError,
    },

    #[error(transparent)]
    InvalidPattern(#[from] PatternError),
}
