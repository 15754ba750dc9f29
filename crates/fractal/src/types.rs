// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Shared types for the routing system.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde::Deserialize;

use crate::error::RoutingResult;

/// Resolved route metadata, as returned by payloads and consumed by crumbs.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Lazy entry: produces the module holding a route's component.
pub type EntryFn<C> = Arc<dyn Fn() -> BoxFuture<'static, RoutingResult<EntryModule<C>>> + Send + Sync>;

/// Breadcrumb label function, evaluated by the consumer with loader data.
pub type CrumbFn = Arc<dyn Fn(&Metadata) -> String + Send + Sync>;

/// Pre-render data function as authored on a route definition.
pub type PayloadFn = Arc<dyn Fn(LoaderContext) -> BoxFuture<'static, RoutingResult<PayloadResponse>> + Send + Sync>;

/// Loader in the router's native shape: resolves straight to the route's data.
pub type LoaderFn = Arc<dyn Fn(LoaderContext) -> BoxFuture<'static, RoutingResult<Metadata>> + Send + Sync>;

/// Lazy-loading descriptor of a resolved node.
pub type LazyFn<C> = Arc<dyn Fn() -> BoxFuture<'static, RoutingResult<LazyRoute<C>>> + Send + Sync>;

/// What an entry resolves to: a module whose default export is the component.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryModule<C> {
    /// The default-exported component.
    pub default: C,
}

impl<C> EntryModule<C> {
    /// Wraps a component as a module's default export.
    pub fn new(default: C) -> Self {
        Self { default }
    }
}

/// What a node's `lazy` resolves to, keyed the way the router expects.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyRoute<C> {
    /// The renderable unit for the route.
    pub component: C,
}

/// Response of a payload function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadResponse {
    /// Metadata for the route, if the payload produced any.
    pub metadata: Option<Metadata>,
}

impl PayloadResponse {
    /// A response carrying the given metadata.
    pub fn with_metadata(metadata: Metadata) -> Self {
        Self {
            metadata: Some(metadata),
        }
    }
}

/// Context passed to loaders by the router.
#[derive(Debug, Clone, Default)]
pub struct LoaderContext {
    /// The full request URL
    pub url: String,

    /// URL parameters extracted from the route
    pub params: HashMap<String, String>,

    /// Query parameters
    pub query: HashMap<String, String>,
}

impl LoaderContext {
    /// Creates a new loader context with URL and route parameters.
    pub fn new(url: impl Into<String>, params: Vec<(String, String)>) -> Self {
        Self {
            url: url.into(),
            params: params.into_iter().collect(),
            query: HashMap::new(),
        }
    }

    /// Adds query parameters to the context.
    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }

    /// Get a route parameter by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// Ordering of file modules inside a bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketOrder {
    /// Keep the order the discovery facility enumerated files in.
    #[default]
    Discovery,

    /// Sort by file identifier, for identical trees across environments.
    Path,
}

/// Configuration for the routing system
#[derive(Debug, Clone, Deserialize)]
pub struct RoutingConfig {
    /// Directory scanned for route manifests (default: "src/pages")
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Glob pattern, relative to `pages_dir`, selecting route manifests
    /// (default: "**/app.routes.toml")
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Directory name whose next segment names the module bucket (default: "pages")
    #[serde(default = "default_anchor")]
    pub anchor: String,

    /// Ordering of files within a bucket
    #[serde(default)]
    pub order: BucketOrder,
}

fn default_pages_dir() -> String {
    "src/pages".to_string()
}

fn default_pattern() -> String {
    "**/app.routes.toml".to_string()
}

fn default_anchor() -> String {
    "pages".to_string()
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            pattern: default_pattern(),
            anchor: default_anchor(),
            order: BucketOrder::default(),
        }
    }
}
