//! # Redirect Map
//!
//! Declarative route and redirect tables loaded from YAML.
//!
//! ```yaml
//! application_path: /
//! routes:
//!   - name: new_item
//!     path: /new/{id}
//!   - name: localized_item
//!     path: /{locale}/items/{id}
//! redirects:
//!   - from: /old/{id}
//!     to: new_item
//!     include_query_string: true
//!   - from: /legacy/items/{id}
//!     to: localized_item
//!     permanent: true
//!     values: { locale: en }
//! ```
//!
//! Redirects are registered ahead of the named routes, so an old URL that
//! also fits a target pattern still redirects. Targets are bound by name once
//! every route is registered; a redirect naming an unknown route fails the
//! whole load.

use anyhow::{Context, Result};
use http::Method;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::redirect::RedirectRoute;
use crate::router::{PatternRoute, RouteTable, RouteValues};

/// A named target route.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

/// A redirect from a source pattern to a named route.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RedirectEntry {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub permanent: bool,
    #[serde(default)]
    pub include_query_string: bool,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

/// Top-level redirect map document.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RedirectMap {
    #[serde(default)]
    pub application_path: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    #[serde(default)]
    pub redirects: Vec<RedirectEntry>,
}

impl RedirectMap {
    /// Parse a redirect map from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse redirect map YAML")
    }

    /// Read and parse a redirect map file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read redirect map {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid redirect map {}", path.display()))
    }

    /// Build a route table from this map.
    ///
    /// `application_path` in the file wins over `default_application_path`.
    pub fn build_table(&self, default_application_path: &str) -> Result<RouteTable> {
        let application_path = self
            .application_path
            .as_deref()
            .unwrap_or(default_application_path);
        let mut table = RouteTable::new().with_application_path(application_path);

        let mut pending = Vec::with_capacity(self.redirects.len());
        for entry in &self.redirects {
            let mut source = PatternRoute::new(&entry.from)
                .with_context(|| format!("Redirect from '{}'", entry.from))?;
            if let Some(method) = &entry.method {
                source = source.with_method(parse_method(method)?);
            }
            let redirect = RedirectRoute::new(Arc::new(source), entry.permanent)
                .include_query_string(entry.include_query_string);
            pending.push((table.add_redirect(redirect), entry));
        }

        for entry in &self.routes {
            let mut route = PatternRoute::new(&entry.path)
                .with_context(|| format!("Route '{}'", entry.name))?
                .with_defaults(&entry.defaults);
            if let Some(method) = &entry.method {
                route = route.with_method(parse_method(method)?);
            }
            table.map_route(&entry.name, Arc::new(route));
        }

        for (redirect, entry) in pending {
            let values: RouteValues = entry.values.iter().collect();
            redirect
                .to_with_values(table.route(&entry.to), Some(values))
                .with_context(|| {
                    format!(
                        "Redirect from '{}' targets unknown route '{}'",
                        entry.from, entry.to
                    )
                })?;
        }

        info!(
            routes_count = self.routes.len(),
            redirects_count = self.redirects.len(),
            application_path = %application_path,
            "Redirect map loaded"
        );
        Ok(table)
    }
}

fn parse_method(raw: &str) -> Result<Method> {
    Method::from_bytes(raw.trim().to_uppercase().as_bytes())
        .with_context(|| format!("Invalid HTTP method '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_optional_fields() {
        let map = RedirectMap::from_yaml_str(
            r#"
routes:
  - name: home
    path: /home
redirects:
  - from: /
    to: home
"#,
        )
        .unwrap();
        assert_eq!(map.application_path, None);
        let redirect = &map.redirects[0];
        assert!(!redirect.permanent);
        assert!(!redirect.include_query_string);
        assert!(redirect.values.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = RedirectMap::from_yaml_str("redirects:\n  - from: /a\n    to: b\n    code: 307\n");
        assert!(err.is_err());
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("get").unwrap(), Method::GET);
        assert!(parse_method("NOT A METHOD").is_err());
    }
}
