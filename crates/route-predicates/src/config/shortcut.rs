//! Shortcut argument binding.
//!
//! A shortcut such as `Host=**.example.org,**.example.net` carries positional
//! arguments only. Each predicate config declares how those arguments map to
//! its fields through an explicit, ordered list of [`FieldBinding`]s.

use crate::error::ConfigError;

/// How positional shortcut arguments are distributed over the fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutType {
    /// One argument per field, in field order
    Default,
    /// Every argument collected into the first field as a list
    GatherList,
    /// Like `GatherList`, but a trailing `true`/`false` sets the second field
    GatherListTailFlag,
}

/// Value handed to a field setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutValue {
    Single(String),
    List(Vec<String>),
}

impl ShortcutValue {
    pub fn into_list(self) -> Vec<String> {
        match self {
            ShortcutValue::Single(value) => vec![value],
            ShortcutValue::List(values) => values,
        }
    }

    pub fn into_bool(self, field: &'static str) -> Result<bool, ConfigError> {
        let text = match self {
            ShortcutValue::Single(value) => value,
            ShortcutValue::List(values) => values.join(","),
        };
        match text.trim() {
            t if t.eq_ignore_ascii_case("true") => Ok(true),
            t if t.eq_ignore_ascii_case("false") => Ok(false),
            other => Err(ConfigError::InvalidField {
                field,
                message: format!("expected true or false, got '{other}'"),
            }),
        }
    }
}

/// Named setter for one config field.
pub struct FieldBinding<C> {
    pub name: &'static str,
    pub apply: fn(&mut C, ShortcutValue) -> Result<(), ConfigError>,
}

impl<C> std::fmt::Debug for FieldBinding<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBinding")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Config types that can be populated from shortcut arguments.
pub trait ShortcutConfig: Default + Sized + 'static {
    /// Predicate name used in shortcut form, e.g. `Host`.
    const NAME: &'static str;

    fn shortcut_type() -> ShortcutType {
        ShortcutType::Default
    }

    /// Field setters in shortcut order.
    fn bindings() -> &'static [FieldBinding<Self>];

    fn shortcut_field_order() -> Vec<&'static str> {
        Self::bindings().iter().map(|b| b.name).collect()
    }
}

/// Build a config from positional shortcut arguments.
pub fn bind_shortcut<C: ShortcutConfig>(args: Vec<String>) -> Result<C, ConfigError> {
    let bindings = C::bindings();
    let mut config = C::default();

    match C::shortcut_type() {
        ShortcutType::Default => {
            if args.len() > bindings.len() {
                return Err(ConfigError::ShortcutArity {
                    predicate: C::NAME,
                    expected: bindings.len(),
                    actual: args.len(),
                });
            }
            for (binding, arg) in bindings.iter().zip(args) {
                (binding.apply)(&mut config, ShortcutValue::Single(arg))?;
            }
        }
        ShortcutType::GatherList => {
            let binding = first_binding::<C>(bindings, args.len())?;
            (binding.apply)(&mut config, ShortcutValue::List(args))?;
        }
        ShortcutType::GatherListTailFlag => {
            let mut args = args;
            let has_flag = bindings.len() > 1 && args.last().is_some_and(|last| is_flag(last));
            let flag = if has_flag { args.pop() } else { None };
            let binding = first_binding::<C>(bindings, args.len())?;
            (binding.apply)(&mut config, ShortcutValue::List(args))?;
            if let Some(flag) = flag {
                (bindings[1].apply)(&mut config, ShortcutValue::Single(flag))?;
            }
        }
    }

    Ok(config)
}

fn first_binding<C: ShortcutConfig>(
    bindings: &'static [FieldBinding<C>],
    actual: usize,
) -> Result<&'static FieldBinding<C>, ConfigError> {
    bindings.first().ok_or(ConfigError::ShortcutArity {
        predicate: C::NAME,
        expected: 0,
        actual,
    })
}

/// Split shortcut arguments on commas outside `{...}` placeholders.
///
/// Arguments are trimmed and empty ones dropped, so `a, b,,c` yields three.
pub fn split_args(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    args.push(&text[start..]);

    args.into_iter()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_flag(arg: &str) -> bool {
    arg.eq_ignore_ascii_case("true") || arg.eq_ignore_ascii_case("false")
}
