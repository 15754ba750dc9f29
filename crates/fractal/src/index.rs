// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! The module bucket index.
//!
//! Route files are grouped by the directory right after the anchor
//! directory in their identifier: with the default `pages` anchor,
//! `src/pages/dashboard/invoices/app.routes.toml` belongs to the
//! `dashboard` bucket. Files outside the anchor are ignored.
//!
//! The index is built once from a single discovery pass and never changes
//! afterwards; share it through an `Arc`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path};

use regex::Regex;

use crate::definition::RouteFileModule;
use crate::discovery::{DiscoveredModule, Discovery};
use crate::error::{RoutingError, RoutingResult};
use crate::types::{BucketOrder, RoutingConfig};

/// Joins a path's components with forward slashes, on every platform.
///
/// A Windows prefix is kept as written (`C:\a` becomes `C:/a`).
pub fn path_to_string<P: AsRef<Path>>(path: P) -> String {
    let mut out = String::new();
    for component in path.as_ref().components() {
        match component {
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::RootDir => out.push('/'),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

/// Extracts bucket keys from file identifiers.
#[derive(Debug, Clone)]
pub struct BucketMatcher {
    pattern: Regex,
}

impl BucketMatcher {
    /// Creates a matcher for the given anchor directory name.
    pub fn new(anchor: &str) -> RoutingResult<Self> {
        let pattern = Regex::new(&format!(r"(?:^|/){}/([^/]+)/", regex::escape(anchor)))
            .map_err(|e| RoutingError::DiscoveryFailed(e.to_string()))?;
        Ok(Self { pattern })
    }

    /// The bucket a file identifier belongs to, if any.
    pub fn bucket<'a>(&self, id: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(id)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Mapping from bucket key to the route files registered under it.
pub struct ModuleIndex<C> {
    buckets: BTreeMap<String, Vec<DiscoveredModule<C>>>,
}

impl<C> ModuleIndex<C> {
    /// Groups discovered files into buckets.
    ///
    /// Files keep their enumeration order within a bucket unless `order`
    /// is [`BucketOrder::Path`].
    pub fn build(
        modules: Vec<DiscoveredModule<C>>,
        anchor: &str,
        order: BucketOrder,
    ) -> RoutingResult<Self> {
        let matcher = BucketMatcher::new(anchor)?;
        let mut buckets: BTreeMap<String, Vec<DiscoveredModule<C>>> = BTreeMap::new();

        for module in modules {
            let id = module.id.replace('\\', "/");
            let Some(key) = matcher.bucket(&id) else {
                tracing::debug!("Skipping route file outside '{}/': {}", anchor, module.id);
                continue;
            };

            buckets.entry(key.to_string()).or_default().push(module);
        }

        if order == BucketOrder::Path {
            for files in buckets.values_mut() {
                files.sort_by(|a, b| a.id.cmp(&b.id));
            }
        }

        tracing::debug!(
            "Indexed {} route file(s) into {} bucket(s)",
            buckets.values().map(Vec::len).sum::<usize>(),
            buckets.len()
        );

        Ok(Self { buckets })
    }

    /// Runs the discovery once and indexes its result.
    pub fn scan<D>(discovery: &D, config: &RoutingConfig) -> RoutingResult<Self>
    where
        D: Discovery<C> + ?Sized,
    {
        Self::build(discovery.discover()?, &config.anchor, config.order)
    }

    /// The files registered under `key`, empty when the key is unknown.
    pub fn files(&self, key: &str) -> &[DiscoveredModule<C>] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The route files registered under `key`.
    pub fn modules<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a RouteFileModule<C>> + 'a {
        self.files(key).iter().map(|file| &file.module)
    }

    /// Bucket keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Returns true if `key` names a bucket.
    pub fn contains(&self, key: &str) -> bool {
        self.buckets.contains_key(key)
    }

    /// Number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if no route file was indexed.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl<C> fmt::Debug for ModuleIndex<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.buckets
                    .iter()
                    .map(|(key, files)| (key, files.iter().map(|m| &m.id).collect::<Vec<_>>())),
            )
            .finish()
    }
}
