// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

// Warn on missing documentation for public items
#![warn(missing_docs)]

//! Fractal CLI library.
//!
//! Command-line tooling for inspecting the route trees a fractal project
//! declares in `app.routes.toml` manifests.
//!
//! # Usage
//!
//! This crate is primarily used through the `fractal` binary:
//!
//! ```bash
//! fractal init my-app                   # Scaffold a new project
//! fractal modules                       # List module buckets
//! fractal routes dashboard              # Print a module's route tree
//! fractal crumbs /dashboard/invoices/7  # Print a breadcrumb trail
//! ```
//!
//! # Configuration
//!
//! Projects are configured via `fractal.toml` at the project root.

/// CLI commands (init, modules, routes, crumbs).
pub mod commands;
/// Project configuration from `fractal.toml`.
pub mod config;
/// Project loading and route tree assembly.
pub mod project;
