// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! A fractal project opened from disk.
//!
//! The CLI has no access to the application's components or data
//! loaders, so manifests are bound with stand-ins: every component is its
//! own registry name, and named payloads resolve to empty metadata. Static
//! `metadata` tables in manifests are served as written.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fractal::{
    static_payload, Collector, ManifestDiscovery, Metadata, ModuleIndex, Registry, RouteTree,
};

use crate::config::{Config, MountConfig};

/// Configuration plus the route index built from it.
pub struct Project {
    /// Directory containing the configuration file.
    pub root: PathBuf,
    /// Loaded configuration.
    pub config: Config,
    collector: Collector<String>,
}

impl Project {
    /// Loads the configuration at `config_path` and scans the project's
    /// route manifests once.
    pub fn open(config_path: &Path) -> anyhow::Result<Self> {
        let config = Config::load(config_path)?;
        let root = match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let pages_dir = root.join(&config.routing.pages_dir);
        let discovery = ManifestDiscovery::new(&pages_dir, inspection_registry())
            .with_pattern(config.routing.pattern.clone());
        let index = ModuleIndex::scan(&discovery, &config.routing)?;

        tracing::debug!(
            "Opened project '{}' with {} module(s) from {}",
            config.project.name,
            index.len(),
            pages_dir.display()
        );

        Ok(Self {
            root,
            config,
            collector: Collector::new(Arc::new(index)),
        })
    }

    /// The collector over the project's index.
    pub fn collector(&self) -> &Collector<String> {
        &self.collector
    }

    /// Configured mounts, or one mount per discovered module.
    pub fn mounts(&self) -> Vec<MountConfig> {
        if !self.config.mount.is_empty() {
            return self.config.mount.clone();
        }

        self.collector
            .modules()
            .into_iter()
            .map(|module| MountConfig {
                module: module.to_string(),
                prefix: None,
            })
            .collect()
    }

    /// Builds the navigable route tree for all mounts.
    pub fn tree(&self) -> RouteTree<String> {
        let mut tree = RouteTree::new();
        for mount in self.mounts() {
            if !self.collector.index().contains(&mount.module) {
                tracing::warn!("Mounted module '{}' has no route files", mount.module);
            }
            tree.mount(&mount.prefix(), self.collector.build(&mount.module));
        }
        tree
    }
}

fn inspection_registry() -> Registry<String> {
    Registry::new()
        .with_fallback_component(|name| name.to_string())
        .with_fallback_loader(|name| {
            tracing::debug!("Standing in empty metadata for loader '{}'", name);
            Some(static_payload(Metadata::new()))
        })
}
