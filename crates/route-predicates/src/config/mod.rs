//! Configuration types for routes and predicates.
//!
//! ```yaml
//! routes:
//!   - id: tenants
//!     uri: http://tenants.internal:8080
//!     predicates:
//!       - Host={tenant}.example.com
//!   - id: docs
//!     uri: http://docs.internal:8080
//!     order: 10
//!     predicates:
//!       - name: Host
//!         args:
//!           patterns: ["docs.**", "**.readthedocs.io"]
//!           caseSensitive: false
//! ```

mod predicates;
mod routing;
pub mod shortcut;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub use predicates::{HostConfig, PathConfig};
pub use routing::{PredicateArgs, PredicateDefinition, RouteDefinition};
pub use shortcut::{bind_shortcut, FieldBinding, ShortcutConfig, ShortcutType, ShortcutValue};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,
}

impl GatewayConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, anyhow::Error> {
        let config: GatewayConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate route ids. Patterns are checked when a router is built.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let mut seen = HashSet::new();
        for route in &self.routes {
            if route.id.trim().is_empty() {
                anyhow::bail!("route with uri '{}' has an empty id", route.uri);
            }
            if !seen.insert(route.id.as_str()) {
                anyhow::bail!("duplicate route id '{}'", route.id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gateway_config() {
        let yaml = r#"
routes:
  - id: tenants
    uri: http://tenants.internal:8080
    predicates:
      - Host={tenant}.example.com
  - id: docs
    uri: http://docs.internal:8080
    order: -1
    predicates:
      - name: Host
        args:
          patterns: ["docs.**"]
"#;
        let config = GatewayConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[1].order, -1);
        assert_eq!(config.routes[0].predicates[0].name, "Host");
    }

    #[test]
    fn test_duplicate_route_ids_rejected() {
        let yaml = r#"
routes:
  - id: web
    uri: http://a
  - id: web
    uri: http://b
"#;
        let err = GatewayConfig::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate route id 'web'"));
    }

    #[test]
    fn test_empty_route_id_rejected() {
        let err = GatewayConfig::from_yaml_str("routes:\n  - id: ' '\n    uri: http://a\n")
            .unwrap_err();
        assert!(err.to_string().contains("empty id"));
    }

    #[test]
    fn test_malformed_shortcut_is_a_parse_error() {
        let yaml = "routes:\n  - id: web\n    uri: http://a\n    predicates: [Host]\n";
        assert!(GatewayConfig::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn test_empty_document() {
        let config = GatewayConfig::from_yaml_str("routes: []").unwrap();
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_from_file_missing() {
        let err = GatewayConfig::from_file("/nonexistent/routes.yaml").unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
