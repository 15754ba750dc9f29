// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Conversion of route definitions into router-native nodes.
//!
//! [`resolve`] turns a [`RouteDefinition`] and its children into a
//! [`RouteNode`]:
//!
//! - `"/"` becomes the empty segment (matches the parent exactly)
//! - the crumb function is attached, unevaluated, as the node's handle
//! - the payload is adapted into a loader (see [`apply`])
//! - the entry is wrapped into a `lazy` function the router calls on demand
//!
//! The definition is only read; resolving the same definition twice yields
//! structurally identical nodes.

use std::fmt;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use serde::Serialize;

use crate::definition::RouteDefinition;
use crate::error::RoutingResult;
use crate::loader::apply;
use crate::types::{CrumbFn, EntryModule, LazyFn, LazyRoute, LoaderFn, Metadata};

/// Router-specific data attached to a node.
#[derive(Clone)]
pub struct RouteHandle {
    /// The breadcrumb label function of the source definition.
    pub crumb: CrumbFn,
}

impl RouteHandle {
    /// Evaluates the breadcrumb label against the given metadata.
    pub fn crumb(&self, metadata: &Metadata) -> String {
        (self.crumb)(metadata)
    }
}

impl fmt::Debug for RouteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteHandle").finish_non_exhaustive()
    }
}

/// A route in the shape the router consumes.
pub struct RouteNode<C> {
    /// Path segment, relative to the parent.
    pub path: String,

    /// Resolved child routes, `None` when the definition had none.
    pub children: Option<Vec<RouteNode<C>>>,

    /// Breadcrumb handle.
    pub handle: RouteHandle,

    /// Pre-render loader, `None` when the route needs no data.
    pub loader: Option<LoaderFn>,

    /// Resolves the route's component when invoked.
    pub lazy: LazyFn<C>,
}

impl<C> RouteNode<C> {
    /// Returns true if the node matches its parent's path exactly.
    pub fn is_index(&self) -> bool {
        self.path.is_empty()
    }

    /// Structural summary of the node and its subtree.
    ///
    /// Function handles are reduced to what can be compared: whether a
    /// loader exists and the crumb label for empty metadata.
    pub fn shape(&self) -> NodeShape {
        NodeShape {
            path: self.path.clone(),
            crumb: self.handle.crumb(&Metadata::new()),
            has_loader: self.loader.is_some(),
            children: self
                .children
                .as_ref()
                .map(|children| children.iter().map(RouteNode::shape).collect()),
        }
    }
}

impl<C> Clone for RouteNode<C> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            children: self.children.clone(),
            handle: self.handle.clone(),
            loader: self.loader.clone(),
            lazy: Arc::clone(&self.lazy),
        }
    }
}

impl<C> fmt::Debug for RouteNode<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteNode")
            .field("path", &self.path)
            .field("children", &self.children)
            .field("loader", &self.loader.is_some())
            .finish_non_exhaustive()
    }
}

/// Comparable, serializable view of a resolved node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeShape {
    /// Path segment.
    pub path: String,
    /// Crumb label evaluated with empty metadata.
    pub crumb: String,
    /// Whether the node has a loader.
    pub has_loader: bool,
    /// Child shapes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeShape>>,
}

/// Rewrites the root marker to the empty segment.
pub fn normalize_path(path: &str) -> String {
    if path == "/" {
        String::new()
    } else {
        path.to_string()
    }
}

/// Converts a definition, recursively, into a router node.
pub fn resolve<C: Send + 'static>(definition: &RouteDefinition<C>) -> RouteNode<C> {
    let entry = Arc::clone(&definition.entry);

    let lazy: LazyFn<C> = Arc::new(move || -> BoxFuture<'static, RoutingResult<LazyRoute<C>>> {
        let pending = entry();
        async move {
            let EntryModule { default } = pending.await?;
            Ok(LazyRoute { component: default })
        }
        .boxed()
    });

    RouteNode {
        path: normalize_path(&definition.path),
        children: definition
            .children
            .as_ref()
            .map(|children| children.iter().map(resolve).collect()),
        handle: RouteHandle {
            crumb: Arc::clone(&definition.crumb),
        },
        loader: apply(definition.payload.clone()),
        lazy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RoutingError;
    use crate::types::PayloadResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq)]
    enum Page {
        Home,
        Create,
    }

    fn page(path: &str, component: Page, label: &'static str) -> RouteDefinition<Page> {
        RouteDefinition::new(
            path,
            move || {
                let component = component.clone();
                async move { Ok(EntryModule::new(component)) }
            },
            move |_| label.to_string(),
        )
    }

    #[test]
    fn test_root_path_normalized() {
        let node = resolve(&page("/", Page::Home, "Home"));
        assert_eq!(node.path, "");
        assert!(node.is_index());
    }

    #[test]
    fn test_relative_path_unchanged() {
        let node = resolve(&page("create", Page::Create, "Create"));
        assert_eq!(node.path, "create");
        assert!(!node.is_index());
    }

    #[test]
    fn test_handle_keeps_original_crumb() {
        let def = page("create", Page::Create, "Create");
        let node = resolve(&def);

        assert!(Arc::ptr_eq(&node.handle.crumb, &def.crumb));
        assert_eq!(node.handle.crumb(&Metadata::new()), "Create");
    }

    #[test]
    fn test_no_payload_no_loader() {
        let node = resolve(&page("create", Page::Create, "Create"));
        assert!(node.loader.is_none());
    }

    #[test]
    fn test_payload_becomes_loader() {
        let def = page("create", Page::Create, "Create")
            .with_payload(|_| async { Ok(PayloadResponse::default()) });
        assert!(resolve(&def).loader.is_some());
    }

    #[test]
    fn test_two_children_without_grandchildren() {
        let def = page("/", Page::Home, "Home").with_children(vec![
            page("a", Page::Create, "A"),
            page("b", Page::Create, "B"),
        ]);

        let node = resolve(&def);
        let children = node.children.as_ref().unwrap();

        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|child| child.children.is_none()));
        assert_eq!(children[0].path, "a");
        assert_eq!(children[1].path, "b");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let def = page("/", Page::Home, "Home")
            .with_children(vec![page("create", Page::Create, "Create")
                .with_payload(|_| async { Ok(PayloadResponse::default()) })]);

        let first = resolve(&def);
        let second = resolve(&def);

        assert_eq!(first.shape(), second.shape());
        assert_eq!(def.path, "/");
    }

    #[test]
    fn test_entry_not_invoked_eagerly() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let def: RouteDefinition<Page> = RouteDefinition::new(
            "lazy",
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok(EntryModule::new(Page::Home)) }
            },
            |_| "Lazy".to_string(),
        );

        let _node = resolve(&def);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_lazy_exposes_default_as_component() {
        let node = resolve(&page("/", Page::Home, "Home"));
        let lazy = (node.lazy)().await.unwrap();
        assert_eq!(lazy.component, Page::Home);
    }

    #[tokio::test]
    async fn test_lazy_propagates_entry_failure() {
        let def: RouteDefinition<Page> = RouteDefinition::new(
            "broken",
            || async { Err(RoutingError::EntryError("chunk failed to load".to_string())) },
            |_| "Broken".to_string(),
        );

        let node = resolve(&def);
        let err = (node.lazy)().await.unwrap_err();
        assert!(matches!(err, RoutingError::EntryError(_)));
    }
}
