// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Breadcrumb trails built from matched routes.

use serde::Serialize;

use crate::navigation::RouteMatch;

/// One entry of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Label returned by the route's crumb function.
    pub label: String,

    /// Concrete path the crumb links to.
    pub pathname: String,
}

/// Evaluates each match's crumb against the data its loader returned.
///
/// Matches whose crumb evaluates to an empty label are left out of the
/// trail.
pub fn breadcrumbs<C>(matches: &[RouteMatch<C>]) -> Vec<Breadcrumb> {
    matches
        .iter()
        .map(|m| Breadcrumb {
            label: m.handle.crumb(&m.data),
            pathname: m.pathname.clone(),
        })
        .filter(|crumb| !crumb.label.is_empty())
        .collect()
}
