// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Error types for route collection and resolution.
//!
//! Most of the routing pipeline is lenient by construction: unknown
//! module buckets collapse to an empty list, a missing payload simply
//! means "no loader", and files outside the anchor directory are skipped.
//! [`RoutingError`] covers what is left:
//!
//! - **Discovery errors**: the scan itself could not run
//! - **Manifest errors**: a route manifest is malformed or references
//!   names the [`Registry`](crate::Registry) does not know
//! - **Navigation errors**: no route matches a URL
//! - **Load / entry errors**: failures raised by user payloads and
//!   lazy entries, propagated unchanged to the caller

use std::path::PathBuf;
use thiserror::Error;

/// Error types for routing operations.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Route discovery failed during filesystem scanning.
    #[error("Route discovery failed: {0}")]
    DiscoveryFailed(String),

    /// A route manifest could not be parsed or validated.
    #[error("Invalid route manifest {path:?}: {message}")]
    InvalidManifest {
        /// The manifest file.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// A manifest `entry` names a component the registry does not provide.
    #[error("Unknown component '{name}' referenced in {path:?}")]
    UnknownComponent {
        /// The component name.
        name: String,
        /// The manifest file.
        path: PathBuf,
    },

    /// A manifest `payload` names a loader the registry does not provide.
    #[error("Unknown loader '{name}' referenced in {path:?}")]
    UnknownLoader {
        /// The loader name.
        name: String,
        /// The manifest file.
        path: PathBuf,
    },

    /// Two sibling routes share the same path segment.
    #[error("Duplicate route path '{route}' among siblings in {path:?}")]
    DuplicatePath {
        /// The duplicated segment.
        route: String,
        /// The manifest file.
        path: PathBuf,
    },

    /// No route matches the requested URL.
    #[error("Route not found: {0}")]
    NotFound(String),

    /// A payload (loader) failed.
    #[error("Load function error: {0}")]
    LoadError(String),

    /// A lazy entry failed to produce its component.
    #[error("Entry error: {0}")]
    EntryError(String),

    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for routing operations.
pub type RoutingResult<T> = Result<T, RoutingError>;
