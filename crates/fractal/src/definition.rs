// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Declarative route definitions.
//!
//! A [`RouteDefinition`] decouples a route from the router's internal node
//! shape. It names a relative path, a lazy `entry` producing the page
//! component, a `crumb` label function and, optionally, a `payload` that
//! fetches metadata before the page renders.
//!
//! Route files group definitions: each [`RouteFileModule`] exposes one
//! ordered list, its default export.
//!
//! ```rust,ignore
//! use fractal::{EntryModule, PayloadResponse, RouteDefinition};
//!
//! let invoices = RouteDefinition::new(
//!     "invoices",
//!     || async { Ok(EntryModule::new(Page::Invoices)) },
//!     |_| "Invoices".to_string(),
//! )
//! .with_children(vec![RouteDefinition::new(
//!     ":id",
//!     || async { Ok(EntryModule::new(Page::Invoice)) },
//!     |meta| format!("Invoice {}", meta["number"]),
//! )
//! .with_payload(|ctx| async move { Ok(PayloadResponse::default()) })]);
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::FutureExt;

use crate::error::RoutingResult;
use crate::loader::payload_fn;
use crate::types::{CrumbFn, EntryFn, EntryModule, LoaderContext, Metadata, PayloadFn, PayloadResponse};

/// The core configuration object for a single route.
pub struct RouteDefinition<C> {
    /// The relative URL path for this route (e.g. "create", ":id").
    ///
    /// `"/"` marks the route matching its parent exactly; nested entries
    /// should not otherwise start with a separator.
    pub path: String,

    /// Lazy loading function producing the route's component.
    pub entry: EntryFn<C>,

    /// Breadcrumb label function, given the metadata resolved by `payload`.
    pub crumb: CrumbFn,

    /// Asynchronous data resolver executed before the route renders.
    pub payload: Option<PayloadFn>,

    /// Nested child routes.
    pub children: Option<Vec<RouteDefinition<C>>>,
}

impl<C: Send + 'static> RouteDefinition<C> {
    /// Creates a definition from a path, a lazy entry and a crumb function.
    pub fn new<E, Fut, L>(path: impl Into<String>, entry: E, crumb: L) -> Self
    where
        E: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RoutingResult<EntryModule<C>>> + Send + 'static,
        L: Fn(&Metadata) -> String + Send + Sync + 'static,
    {
        Self {
            path: path.into(),
            entry: Arc::new(move || entry().boxed()),
            crumb: Arc::new(crumb),
            payload: None,
            children: None,
        }
    }

    /// Creates a definition from already-shared function handles.
    pub fn from_parts(path: impl Into<String>, entry: EntryFn<C>, crumb: CrumbFn) -> Self {
        Self {
            path: path.into(),
            entry,
            crumb,
            payload: None,
            children: None,
        }
    }

    /// Attaches a payload function.
    pub fn with_payload<P, Fut>(mut self, payload: P) -> Self
    where
        P: Fn(LoaderContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RoutingResult<PayloadResponse>> + Send + 'static,
    {
        self.payload = Some(payload_fn(payload));
        self
    }

    /// Attaches an already-shared payload function, or clears it.
    pub fn with_payload_fn(mut self, payload: Option<PayloadFn>) -> Self {
        self.payload = payload;
        self
    }

    /// Sets the nested child routes.
    pub fn with_children(mut self, children: Vec<RouteDefinition<C>>) -> Self {
        self.children = Some(children);
        self
    }
}

impl<C> RouteDefinition<C> {
    /// Returns true if this definition marks its parent's exact match.
    pub fn is_root(&self) -> bool {
        self.path == "/"
    }
}

impl<C> Clone for RouteDefinition<C> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            entry: Arc::clone(&self.entry),
            crumb: Arc::clone(&self.crumb),
            payload: self.payload.clone(),
            children: self.children.clone(),
        }
    }
}

impl<C> fmt::Debug for RouteDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("path", &self.path)
            .field("payload", &self.payload.is_some())
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

/// The contents of one route file.
///
/// Every route file exposes exactly one ordered list of definitions, its
/// default export, so the scanner can consume any file the same way.
pub struct RouteFileModule<C> {
    default: Vec<RouteDefinition<C>>,
}

impl<C> RouteFileModule<C> {
    /// Creates a route file exporting the given definitions.
    pub fn new(routes: Vec<RouteDefinition<C>>) -> Self {
        Self { default: routes }
    }

    /// The file's default-exported definitions, in authored order.
    pub fn routes(&self) -> &[RouteDefinition<C>] {
        &self.default
    }
}

impl<C> Clone for RouteFileModule<C> {
    fn clone(&self) -> Self {
        Self {
            default: self.default.clone(),
        }
    }
}

impl<C> fmt::Debug for RouteFileModule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RouteFileModule").field(&self.default).finish()
    }
}

impl<C> From<Vec<RouteDefinition<C>>> for RouteFileModule<C> {
    fn from(routes: Vec<RouteDefinition<C>>) -> Self {
        Self::new(routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(path: &str) -> RouteDefinition<&'static str> {
        RouteDefinition::new(path, || async { Ok(EntryModule::new("page")) }, |_| "Page".to_string())
    }

    #[test]
    fn test_is_root() {
        assert!(page("/").is_root());
        assert!(!page("create").is_root());
    }

    #[test]
    fn test_clone_shares_functions() {
        let def = page("stats").with_payload(|_| async { Ok(PayloadResponse::default()) });
        let copy = def.clone();

        assert!(Arc::ptr_eq(&def.entry, &copy.entry));
        assert!(Arc::ptr_eq(&def.crumb, &copy.crumb));
        assert!(copy.payload.is_some());
    }

    #[tokio::test]
    async fn test_entry_is_invoked_on_demand() {
        let def = page("stats");
        let module = (def.entry)().await.unwrap();
        assert_eq!(module.default, "page");
    }

    #[test]
    fn test_file_module_routes_keep_order() {
        let module = RouteFileModule::new(vec![page("a"), page("b"), page("c")]);
        let paths: Vec<&str> = module.routes().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["a", "b", "c"]);
    }
}
