// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Declarative route manifests (`app.routes.toml`).
//!
//! A manifest is the serializable form of a route file. Components and
//! loaders are referenced by name and bound through a [`Registry`]; the
//! breadcrumb is a label template.
//!
//! # Example Manifest
//!
//! ```toml
//! [[routes]]
//! path = "/"
//! entry = "InvoicesPage"
//! crumb = "Invoices"
//!
//! [[routes]]
//! path = ":id"
//! entry = "InvoicePage"
//! crumb = "Invoice {number}"
//! payload = "invoices.detail"
//!
//! [[routes.children]]
//! path = "edit"
//! entry = "EditInvoicePage"
//! crumb = "Edit"
//!
//! [routes.children.metadata]
//! mode = "edit"
//! ```
//!
//! # Crumb Templates
//!
//! `{key}` placeholders are replaced with `metadata[key]`: strings verbatim,
//! other values in their JSON form. Placeholders without a matching key are
//! kept as written.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use regex::{Captures, Regex};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::definition::RouteDefinition;
use crate::error::{RoutingError, RoutingResult};
use crate::loader::static_payload;
use crate::registry::Registry;
use crate::types::{CrumbFn, Metadata};

/// Parsed contents of a route manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteManifest {
    /// Routes exported by the file, in authored order.
    #[serde(default)]
    pub routes: Vec<ManifestRoute>,
}

/// One route entry of a manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestRoute {
    /// Relative path segment, `"/"` for the parent's exact match.
    pub path: String,

    /// Registry name of the page component.
    pub entry: String,

    /// Breadcrumb label template.
    pub crumb: String,

    /// Registry name of the payload loader.
    #[serde(default)]
    pub payload: Option<String>,

    /// Static metadata served as the route's payload.
    #[serde(default)]
    pub metadata: Option<Metadata>,

    /// Nested routes.
    #[serde(default)]
    pub children: Option<Vec<ManifestRoute>>,
}

impl RouteManifest {
    /// Parses manifest source. `path` is only used for error reporting.
    pub fn parse(source: &str, path: &Path) -> RoutingResult<Self> {
        toml::from_str(source).map_err(|e| RoutingError::InvalidManifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Reads and parses a manifest file.
    pub fn load(path: &Path) -> RoutingResult<Self> {
        let source = fs::read_to_string(path)?;
        Self::parse(&source, path)
    }

    /// Binds the manifest to concrete functions, producing route definitions.
    ///
    /// # Errors
    ///
    /// Fails when an `entry` or `payload` name is unknown to the registry,
    /// when a route declares both `payload` and `metadata`, or when two
    /// siblings share a path.
    pub fn bind<C: Send + 'static>(
        &self,
        registry: &Registry<C>,
        path: &Path,
    ) -> RoutingResult<Vec<RouteDefinition<C>>> {
        let binder = Binder {
            registry,
            path,
            placeholder: placeholder_pattern(),
        };
        binder.bind_all(&self.routes)
    }
}

struct Binder<'a, C> {
    registry: &'a Registry<C>,
    path: &'a Path,
    placeholder: Regex,
}

impl<C: Send + 'static> Binder<'_, C> {
    fn bind_all(&self, routes: &[ManifestRoute]) -> RoutingResult<Vec<RouteDefinition<C>>> {
        let mut seen = HashSet::new();
        routes
            .iter()
            .map(|route| {
                if !seen.insert(route.path.as_str()) {
                    return Err(RoutingError::DuplicatePath {
                        route: route.path.clone(),
                        path: self.path.to_path_buf(),
                    });
                }
                self.bind_route(route)
            })
            .collect()
    }

    fn bind_route(&self, route: &ManifestRoute) -> RoutingResult<RouteDefinition<C>> {
        if route.path != "/" && route.path.starts_with('/') {
            tracing::warn!(
                "Route '{}' in {} starts with '/'; nested paths should be relative",
                route.path,
                self.path.display()
            );
        }

        let entry = self
            .registry
            .entry(&route.entry)
            .ok_or_else(|| RoutingError::UnknownComponent {
                name: route.entry.clone(),
                path: self.path.to_path_buf(),
            })?;

        let payload = match (&route.payload, &route.metadata) {
            (Some(_), Some(_)) => {
                return Err(RoutingError::InvalidManifest {
                    path: self.path.to_path_buf(),
                    message: format!(
                        "route '{}' declares both `payload` and `metadata`",
                        route.path
                    ),
                });
            }
            (Some(name), None) => Some(self.registry.payload(name).ok_or_else(|| {
                RoutingError::UnknownLoader {
                    name: name.clone(),
                    path: self.path.to_path_buf(),
                }
            })?),
            (None, Some(metadata)) => Some(static_payload(metadata.clone())),
            (None, None) => None,
        };

        let crumb = crumb_template(&route.crumb, self.placeholder.clone());
        let mut definition =
            RouteDefinition::from_parts(route.path.clone(), entry, crumb).with_payload_fn(payload);

        if let Some(children) = &route.children {
            definition = definition.with_children(self.bind_all(children)?);
        }

        Ok(definition)
    }
}

fn placeholder_pattern() -> Regex {
    Regex::new(r"\{([A-Za-z0-9_.\-]+)\}").unwrap()
}

/// Builds a crumb function from a label template.
fn crumb_template(template: &str, placeholder: Regex) -> CrumbFn {
    let template = template.to_string();

    if !placeholder.is_match(&template) {
        return Arc::new(move |_: &Metadata| template.clone());
    }

    Arc::new(move |metadata: &Metadata| {
        placeholder
            .replace_all(&template, |caps: &Captures| match metadata.get(&caps[1]) {
                Some(JsonValue::String(s)) => s.clone(),
                Some(JsonValue::Null) | None => caps[0].to_string(),
                Some(other) => other.to_string(),
            })
            .into_owned()
    })
}

/// Renders a label template against metadata.
pub fn render_crumb(template: &str, metadata: &Metadata) -> String {
    crumb_template(template, placeholder_pattern())(metadata)
}
