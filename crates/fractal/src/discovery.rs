// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Route file discovery.
//!
//! A [`Discovery`] eagerly enumerates every route file once, at startup,
//! returning each file's identifier together with its loaded contents.
//!
//! # Implementations
//!
//! - [`MemoryDiscovery`]: route files registered in code
//! - [`ManifestDiscovery`]: `app.routes.toml` manifests globbed from disk

use std::fmt;
use std::path::{Component, Path, PathBuf};

use glob::glob;

use crate::definition::{RouteDefinition, RouteFileModule};
use crate::error::{RoutingError, RoutingResult};
use crate::manifest::RouteManifest;
use crate::registry::Registry;
use crate::index::path_to_string;

/// A route file found by a discovery facility.
pub struct DiscoveredModule<C> {
    /// File identifier, e.g. `pages/dashboard/app.routes.toml`.
    pub id: String,

    /// The file's contents.
    pub module: RouteFileModule<C>,
}

impl<C> DiscoveredModule<C> {
    /// Pairs a file identifier with its contents.
    pub fn new(id: impl Into<String>, module: RouteFileModule<C>) -> Self {
        Self {
            id: id.into(),
            module,
        }
    }
}

impl<C> Clone for DiscoveredModule<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            module: self.module.clone(),
        }
    }
}

impl<C> fmt::Debug for DiscoveredModule<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveredModule")
            .field("id", &self.id)
            .field("module", &self.module)
            .finish()
    }
}

/// Eager enumeration of route files.
pub trait Discovery<C> {
    /// Returns every route file, in the facility's enumeration order.
    fn discover(&self) -> RoutingResult<Vec<DiscoveredModule<C>>>;
}

/// Route files registered in code.
///
/// Enumerates modules in registration order.
///
/// # Examples
///
/// ```rust,ignore
/// let discovery = MemoryDiscovery::new()
///     .with_module("src/pages/dashboard/app.routes.rs", dashboard::routes())
///     .with_module("src/pages/dashboard/stats/app.routes.rs", stats::routes());
/// ```
pub struct MemoryDiscovery<C> {
    modules: Vec<DiscoveredModule<C>>,
}

impl<C> MemoryDiscovery<C> {
    /// Creates an empty discovery.
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    /// Registers a route file under `id`.
    pub fn add_module(&mut self, id: &str, routes: Vec<RouteDefinition<C>>) {
        self.modules
            .push(DiscoveredModule::new(id, RouteFileModule::new(routes)));
    }

    /// Registers a route file under `id`, builder style.
    pub fn with_module(mut self, id: &str, routes: Vec<RouteDefinition<C>>) -> Self {
        self.add_module(id, routes);
        self
    }

    /// Number of registered files.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns true if no file is registered.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<C> Default for MemoryDiscovery<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Discovery<C> for MemoryDiscovery<C> {
    fn discover(&self) -> RoutingResult<Vec<DiscoveredModule<C>>> {
        Ok(self.modules.clone())
    }
}

/// Route manifests found on disk.
///
/// Globs `root/pattern`, parses each match as a [`RouteManifest`] and binds
/// it through the registry. File identifiers are relative to the root's
/// parent directory, so a root of `/srv/app/src/pages` yields ids such as
/// `pages/dashboard/app.routes.toml`. Directories above the root never
/// take part in bucket matching.
pub struct ManifestDiscovery<C> {
    root: PathBuf,
    pattern: String,
    registry: Registry<C>,
}

impl<C: Send + 'static> ManifestDiscovery<C> {
    /// Creates a discovery over `root` using the default `**/app.routes.toml` pattern.
    pub fn new<P: AsRef<Path>>(root: P, registry: Registry<C>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            pattern: "**/app.routes.toml".to_string(),
            registry,
        }
    }

    /// Overrides the glob pattern, relative to the root.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// The directory being scanned.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load(&self, path: &Path) -> RoutingResult<DiscoveredModule<C>> {
        let manifest = RouteManifest::load(path)?;
        let routes = manifest.bind(&self.registry, path)?;
        tracing::debug!("Loaded {} route(s) from {}", routes.len(), path.display());
        Ok(DiscoveredModule::new(self.file_id(path), RouteFileModule::new(routes)))
    }

    /// Identifier of a matched file: the root's last component followed by
    /// the path below the root.
    fn file_id(&self, path: &Path) -> String {
        let root = without_cur_dir(&self.root);
        let path = without_cur_dir(path);

        match path.strip_prefix(&root) {
            Ok(relative) => match root.file_name() {
                Some(name) => path_to_string(Path::new(name).join(relative)),
                None => path_to_string(relative),
            },
            Err(_) => {
                tracing::debug!("{} is outside {}", path.display(), root.display());
                path_to_string(&path)
            }
        }
    }
}

impl<C: Send + 'static> Discovery<C> for ManifestDiscovery<C> {
    fn discover(&self) -> RoutingResult<Vec<DiscoveredModule<C>>> {
        let pattern = format!("{}/{}", path_to_string(&self.root), self.pattern);
        let paths = glob(&pattern).map_err(|e| RoutingError::DiscoveryFailed(e.to_string()))?;

        let mut modules = Vec::new();
        for path in paths.flatten() {
            if path.is_file() {
                modules.push(self.load(&path)?);
            }
        }

        if modules.is_empty() {
            tracing::debug!("No route manifests matched {}", pattern);
        }

        Ok(modules)
    }
}

/// Drops `.` components so `./src/pages` and `src/pages` compare equal.
fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
