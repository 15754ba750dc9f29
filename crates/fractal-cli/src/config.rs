// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Fractal project configuration.
//!
//! Configuration is loaded from `fractal.toml` at the project root.
//!
//! # Example Configuration
//!
//! ```toml
//! [project]
//! name = "my-app"
//!
//! [routing]
//! pages_dir = "src/pages"
//! pattern = "**/app.routes.toml"
//! anchor = "pages"
//! order = "path"
//!
//! [[mount]]
//! module = "dashboard"
//! prefix = "/dashboard"
//! ```
//!
//! Without any `[[mount]]` table every discovered module is mounted at
//! `/<module>`.

use fractal::RoutingConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure loaded from `fractal.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Project metadata.
    #[serde(default)]
    pub project: ProjectConfig,
    /// Route discovery settings.
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Where each module's routes are mounted.
    #[serde(default)]
    pub mount: Vec<MountConfig>,
}

/// Project metadata configuration.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Project name.
    #[serde(default = "default_name")]
    pub name: String,
}

/// Mount point of one module.
#[derive(Debug, Clone, Deserialize)]
pub struct MountConfig {
    /// Module bucket key.
    pub module: String,
    /// URL prefix (default: "/<module>").
    #[serde(default)]
    pub prefix: Option<String>,
}

impl MountConfig {
    /// The effective URL prefix.
    pub fn prefix(&self) -> String {
        self.prefix
            .clone()
            .unwrap_or_else(|| format!("/{}", self.module))
    }
}

fn default_name() -> String {
    "unnamed".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            routing: RoutingConfig::default(),
            mount: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`.
    ///
    /// If no configuration file exists, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
