// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! CLI command implementations.
//!
//! - `init`: Scaffold a new fractal project
//! - `modules`: List discovered module buckets
//! - `routes`: Print resolved route trees
//! - `crumbs`: Navigate to a URL and print its breadcrumb trail

/// Breadcrumb trail command.
pub mod crumbs;
/// Project initialization command.
pub mod init;
/// Module listing command.
pub mod modules;
/// Route tree command.
pub mod routes;
