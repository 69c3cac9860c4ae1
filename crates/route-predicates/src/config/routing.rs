//! Route and predicate definitions.

use super::predicates::{HostConfig, PathConfig};
use super::shortcut::{bind_shortcut, split_args, ShortcutConfig};
use crate::error::ConfigError;
use crate::predicate::{HostRoutePredicate, PathRoutePredicate, RoutePredicate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One route: an id, a target URI and the predicates that must all match.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteDefinition {
    pub id: String,
    pub uri: String,
    /// Lower values are evaluated first; ties keep file order
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub predicates: Vec<PredicateDefinition>,
}

/// Arguments of a predicate definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredicateArgs {
    /// From the shortcut form, bound through the config's field order
    Positional(Vec<String>),
    /// From the expanded form, deserialized into the config type
    Named(serde_yaml::Value),
}

/// A predicate reference, written either as a shortcut string
/// (`Host=**.example.org,**.example.net`) or expanded:
///
/// ```yaml
/// name: Host
/// args:
///   patterns: ["**.example.org"]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "RawPredicate")]
pub struct PredicateDefinition {
    pub name: String,
    pub args: PredicateArgs,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPredicate {
    Shortcut(String),
    Expanded {
        name: String,
        #[serde(default)]
        args: serde_yaml::Value,
    },
}

impl TryFrom<RawPredicate> for PredicateDefinition {
    type Error = ConfigError;

    fn try_from(raw: RawPredicate) -> Result<Self, Self::Error> {
        match raw {
            RawPredicate::Shortcut(text) => text.parse(),
            RawPredicate::Expanded { name, args } => Ok(Self {
                name,
                args: PredicateArgs::Named(args),
            }),
        }
    }
}

impl FromStr for PredicateDefinition {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (name, args) = text
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedShortcut(text.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::MalformedShortcut(text.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            args: PredicateArgs::Positional(split_args(args)),
        })
    }
}

impl PredicateDefinition {
    /// Parse the shortcut form `NAME=ARG[,ARG...]`.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        text.parse()
    }

    /// Compile into a runnable predicate.
    pub fn build(&self) -> Result<Box<dyn RoutePredicate>, ConfigError> {
        match self.name.as_str() {
            HostRoutePredicate::NAME => {
                let config: HostConfig = self.bind()?;
                Ok(Box::new(HostRoutePredicate::new(&config)?))
            }
            PathRoutePredicate::NAME => {
                let config: PathConfig = self.bind()?;
                Ok(Box::new(PathRoutePredicate::new(&config)?))
            }
            other => Err(ConfigError::UnknownPredicate(other.to_string())),
        }
    }

    fn bind<C: ShortcutConfig + DeserializeOwned>(&self) -> Result<C, ConfigError> {
        match &self.args {
            PredicateArgs::Positional(args) => bind_shortcut(args.clone()),
            PredicateArgs::Named(value) if value.is_null() => Ok(C::default()),
            PredicateArgs::Named(value) => {
                serde_yaml::from_value(value.clone()).map_err(|source| ConfigError::Arguments {
                    predicate: self.name.clone(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{Exchange, RequestAttributes};
    use hyper::Request;

    fn test_host(predicate: &dyn RoutePredicate, host: &str) -> bool {
        let request = Request::builder()
            .uri("/")
            .header("Host", host)
            .body(())
            .unwrap();
        let mut attributes = RequestAttributes::new();
        predicate.test(&mut Exchange::new(&request, &mut attributes))
    }

    #[test]
    fn test_parse_shortcut() {
        let definition = PredicateDefinition::parse("Host= **.example.org , **.example.net").unwrap();
        assert_eq!(definition.name, "Host");
        assert_eq!(
            definition.args,
            PredicateArgs::Positional(vec![
                "**.example.org".to_string(),
                "**.example.net".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_malformed_shortcut() {
        assert!(matches!(
            PredicateDefinition::parse("Host"),
            Err(ConfigError::MalformedShortcut(_))
        ));
        assert!(matches!(
            PredicateDefinition::parse("=a.com"),
            Err(ConfigError::MalformedShortcut(_))
        ));
    }

    #[test]
    fn test_build_from_shortcut() {
        let predicate = PredicateDefinition::parse("Host={sub}.example.com,**.example.org")
            .unwrap()
            .build()
            .unwrap();
        assert!(test_host(predicate.as_ref(), "www.example.com"));
        assert!(test_host(predicate.as_ref(), "a.b.example.org"));
        assert!(!test_host(predicate.as_ref(), "example.com"));
    }

    #[test]
    fn test_deserialize_both_forms() {
        let yaml = r#"
- "Host=**.example.org"
- name: Host
  args:
    patterns: ["{sub}.example.com"]
    caseSensitive: false
- name: Path
  args:
    pattern: /api/**
"#;
        let definitions: Vec<PredicateDefinition> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(definitions.len(), 3);
        assert!(matches!(definitions[0].args, PredicateArgs::Positional(_)));
        assert!(matches!(definitions[1].args, PredicateArgs::Named(_)));

        let host = definitions[1].build().unwrap();
        assert!(test_host(host.as_ref(), "WWW.Example.COM"));
        definitions[2].build().unwrap();
    }

    #[test]
    fn test_unknown_predicate() {
        let definition = PredicateDefinition::parse("Cookie=session,abc").unwrap();
        assert!(matches!(
            definition.build(),
            Err(ConfigError::UnknownPredicate(name)) if name == "Cookie"
        ));
    }

    #[test]
    fn test_bad_named_arguments() {
        let definition: PredicateDefinition =
            serde_yaml::from_str("name: Host\nargs:\n  caseSensitive: maybe\n").unwrap();
        assert!(matches!(
            definition.build(),
            Err(ConfigError::Arguments { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern_surfaces_at_build() {
        let definition = PredicateDefinition::parse("Host={id:[0-9}.example.com").unwrap();
        assert!(matches!(
            definition.build(),
            Err(ConfigError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_route_defaults() {
        let route: RouteDefinition =
            serde_yaml::from_str("id: web\nuri: http://localhost:8080\n").unwrap();
        assert_eq!(route.order, 0);
        assert!(route.predicates.is_empty());
    }
}
