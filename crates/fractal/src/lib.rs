// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! # Fractal
//!
//! File-convention route-tree builder for single-page applications.
//!
//! Route files live next to the pages they describe. Fractal gathers them
//! into per-module buckets, concatenates each bucket into one ordered list
//! of route definitions and converts every definition into a router node
//! with a lazily resolved component, a pre-render data loader and a
//! breadcrumb handle.
//!
//! ## Pipeline
//!
//! ```text
//! Discovery ──> ModuleIndex ──> Collector::collapse ──> resolve ──> RouteTree
//!  (files)       (buckets)      (definitions)          (nodes)     (navigation)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fractal::{Collector, MemoryDiscovery, ModuleIndex, RouteTree, RoutingConfig};
//!
//! let discovery = MemoryDiscovery::new()
//!     .with_module("src/pages/dashboard/app.routes.rs", dashboard::routes())
//!     .with_module("src/pages/dashboard/stats/app.routes.rs", stats::routes());
//!
//! let index = ModuleIndex::scan(&discovery, &RoutingConfig::default())?;
//! let collector = Collector::new(Arc::new(index));
//!
//! let tree = RouteTree::new().with_mount("/dashboard", collector.build("dashboard"));
//! let navigation = tree.navigate("/dashboard/stats").await?;
//! for crumb in navigation.breadcrumbs() {
//!     println!("{} -> {}", crumb.label, crumb.pathname);
//! }
//! ```

/// Error types.
pub mod error;
/// Shared types: function handles, loader context, configuration.
pub mod types;
/// Route definitions as authored in route files.
pub mod definition;
/// Payload to loader adaptation.
pub mod loader;
/// Definition to router node conversion.
pub mod resolver;
/// Named components and loaders for manifests.
pub mod registry;
/// Declarative `app.routes.toml` manifests.
pub mod manifest;
/// Route file discovery.
pub mod discovery;
/// Module bucket index.
pub mod index;
/// Per-module route collection.
pub mod collector;
/// URL matching and navigation over resolved nodes.
pub mod navigation;
/// Breadcrumb trails.
pub mod breadcrumb;

pub use breadcrumb::{breadcrumbs, Breadcrumb};
pub use collector::Collector;
pub use definition::{RouteDefinition, RouteFileModule};
pub use discovery::{DiscoveredModule, Discovery, ManifestDiscovery, MemoryDiscovery};
pub use error::{RoutingError, RoutingResult};
pub use index::{BucketMatcher, ModuleIndex};
pub use loader::{apply, payload_fn, static_payload};
pub use manifest::{render_crumb, ManifestRoute, RouteManifest};
pub use navigation::{Navigation, RouteMatch, RouteTree};
pub use registry::Registry;
pub use resolver::{normalize_path, resolve, NodeShape, RouteHandle, RouteNode};
pub use types::*;
