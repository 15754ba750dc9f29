// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Flattens a module bucket into one ordered list of route definitions.

use std::sync::Arc;

use crate::definition::RouteDefinition;
use crate::index::ModuleIndex;
use crate::resolver::{resolve, RouteNode};

/// Reads route definitions out of a prebuilt [`ModuleIndex`].
pub struct Collector<C> {
    index: Arc<ModuleIndex<C>>,
}

impl<C> Collector<C> {
    /// Creates a collector over a shared index.
    pub fn new(index: Arc<ModuleIndex<C>>) -> Self {
        Self { index }
    }

    /// The underlying index.
    pub fn index(&self) -> &ModuleIndex<C> {
        &self.index
    }

    /// Bucket keys known to the index.
    pub fn modules(&self) -> Vec<&str> {
        self.index.keys().collect()
    }

    /// Every definition contributed to `module`, file by file in discovery
    /// order, each file's definitions in authored order.
    ///
    /// Unknown modules yield an empty list. Nothing is deduplicated or
    /// sorted; sibling paths must be kept disjoint by the route authors.
    pub fn collapse(&self, module: &str) -> Vec<&RouteDefinition<C>> {
        self.index
            .modules(module)
            .flat_map(|file| file.routes())
            .collect()
    }
}

impl<C: Send + 'static> Collector<C> {
    /// Collapses `module` and resolves each definition into a router node,
    /// ready to be used as the children of the module's layout route.
    pub fn build(&self, module: &str) -> Vec<RouteNode<C>> {
        let nodes: Vec<RouteNode<C>> = self.collapse(module).into_iter().map(resolve).collect();
        tracing::debug!("Built {} route(s) for module '{}'", nodes.len(), module);
        nodes
    }
}

impl<C> Clone for Collector<C> {
    fn clone(&self) -> Self {
        Self {
            index: Arc::clone(&self.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::MemoryDiscovery;
    use crate::types::{EntryModule, RoutingConfig};

    fn page(path: &str) -> RouteDefinition<String> {
        let name = path.to_string();
        RouteDefinition::new(
            path,
            move || {
                let name = name.clone();
                async move { Ok(EntryModule::new(name)) }
            },
            |_| String::new(),
        )
    }

    fn collector(discovery: &MemoryDiscovery<String>) -> Collector<String> {
        let index = ModuleIndex::scan(discovery, &RoutingConfig::default()).unwrap();
        Collector::new(Arc::new(index))
    }

    fn paths(defs: &[&RouteDefinition<String>]) -> Vec<String> {
        defs.iter().map(|d| d.path.clone()).collect()
    }

    #[test]
    fn test_unknown_module_is_empty() {
        let discovery = MemoryDiscovery::new()
            .with_module("src/pages/dashboard/app.routes.rs", vec![page("/")]);
        let collector = collector(&discovery);

        assert!(collector.collapse("settings").is_empty());
        assert!(collector.build("settings").is_empty());
    }

    #[test]
    fn test_concatenates_in_discovery_order() {
        let discovery = MemoryDiscovery::new()
            .with_module("src/pages/dashboard/app.routes.rs", vec![page("/"), page("profile")])
            .with_module("src/pages/auth/app.routes.rs", vec![page("login")])
            .with_module("src/pages/dashboard/stats/app.routes.rs", vec![page("stats")])
            .with_module(
                "src/pages/dashboard/invoices/app.routes.rs",
                vec![page("invoices"), page("invoices/new")],
            );
        let collector = collector(&discovery);

        assert_eq!(
            paths(&collector.collapse("dashboard")),
            vec!["/", "profile", "stats", "invoices", "invoices/new"]
        );
        assert_eq!(paths(&collector.collapse("auth")), vec!["login"]);
    }

    #[test]
    fn test_no_deduplication() {
        let discovery = MemoryDiscovery::new()
            .with_module("src/pages/dashboard/a/app.routes.rs", vec![page("stats")])
            .with_module("src/pages/dashboard/b/app.routes.rs", vec![page("stats")]);
        let collector = collector(&discovery);

        assert_eq!(paths(&collector.collapse("dashboard")), vec!["stats", "stats"]);
    }

    #[test]
    fn test_build_resolves_each_definition() {
        let discovery = MemoryDiscovery::new()
            .with_module("src/pages/dashboard/app.routes.rs", vec![page("/")])
            .with_module("src/pages/dashboard/stats/app.routes.rs", vec![page("stats")]);
        let collector = collector(&discovery);

        let nodes = collector.build("dashboard");
        let paths: Vec<&str> = nodes.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["", "stats"]);
        assert_eq!(collector.modules(), vec!["dashboard"]);
    }
}
