// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! A minimal host router for resolved route trees.
//!
//! [`RouteTree`] mounts resolved nodes under URL prefixes and drives them the
//! way a client-side router does on navigation:
//!
//! 1. the URL is matched to a chain of nodes, root to leaf
//! 2. every loader on the chain runs, concurrently, and all are awaited
//! 3. only then is each node's `lazy` resolved into its component
//!
//! Failures from loaders or entries are returned unchanged; there is no
//! retry and no fallback content.
//!
//! Route segments use the `:param` and `*` conventions and are registered
//! with matchit as `{param}` and `{*splat}`.

use std::collections::HashMap;

use futures_util::future::{try_join_all, BoxFuture, FutureExt};
use matchit::Router as MatchitRouter;

use crate::breadcrumb::{breadcrumbs, Breadcrumb};
use crate::error::{RoutingError, RoutingResult};
use crate::resolver::{RouteHandle, RouteNode};
use crate::types::{LoaderContext, Metadata};

/// One matched node of a navigation.
#[derive(Debug, Clone)]
pub struct RouteMatch<C> {
    /// The matchit pattern of the node (e.g. "/dashboard/invoices/{id}").
    pub pattern: String,

    /// The concrete path the node matched (e.g. "/dashboard/invoices/42").
    pub pathname: String,

    /// Data returned by the node's loader, empty when it has none.
    pub data: Metadata,

    /// The component resolved through the node's `lazy`.
    pub component: C,

    /// The node's handle, for breadcrumbs.
    pub handle: RouteHandle,
}

/// Result of navigating to a URL.
#[derive(Debug, Clone)]
pub struct Navigation<C> {
    /// The requested URL.
    pub url: String,

    /// URL parameters extracted from the path.
    pub params: HashMap<String, String>,

    /// Matched nodes, root to leaf.
    pub matches: Vec<RouteMatch<C>>,
}

impl<C> Navigation<C> {
    /// The deepest matched node.
    pub fn leaf(&self) -> Option<&RouteMatch<C>> {
        self.matches.last()
    }

    /// Breadcrumb trail for the matched chain.
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        breadcrumbs(&self.matches)
    }
}

struct Mount<C> {
    nodes: Vec<RouteNode<C>>,
}

/// A registered URL pattern and the node chain it leads to.
#[derive(Debug, Clone)]
struct Entry {
    pattern: String,
    mount: usize,
    trail: Vec<usize>,
}

/// Resolved route trees mounted under URL prefixes.
pub struct RouteTree<C> {
    matcher: MatchitRouter<usize>,
    mounts: Vec<Mount<C>>,
    prefixes: Vec<String>,
    entries: Vec<Entry>,
}

impl<C> RouteTree<C> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            matcher: MatchitRouter::new(),
            mounts: Vec::new(),
            prefixes: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Mounts nodes under `prefix`, typically the children a module's
    /// layout route receives from [`Collector::build`](crate::Collector::build).
    ///
    /// When a node and its index child share a pattern, the index child
    /// wins. Any other repeated pattern, within this mount or against an
    /// earlier one, keeps its first declaration and logs a warning.
    pub fn mount(&mut self, prefix: &str, nodes: Vec<RouteNode<C>>) {
        let mount = self.mounts.len();
        let base = join_pattern("", prefix);

        let mut collected: Vec<Entry> = Vec::new();
        collect_entries(&nodes, &base, mount, &mut Vec::new(), &mut collected);

        // Index children replace their ancestors with the same pattern.
        let mut by_pattern: Vec<Entry> = Vec::new();
        for entry in collected {
            match by_pattern.iter_mut().find(|e| e.pattern == entry.pattern) {
                Some(existing) if is_index_of(&existing.trail, &entry.trail) => *existing = entry,
                Some(_) => {
                    tracing::warn!(
                        "Route {} is declared more than once under {}; keeping the first",
                        entry.pattern,
                        base
                    );
                }
                None => by_pattern.push(entry),
            }
        }

        for entry in by_pattern {
            let index = self.entries.len();
            if let Err(e) = self.matcher.insert(entry.pattern.clone(), index) {
                tracing::warn!("Could not register route {}: {}", entry.pattern, e);
                continue;
            }
            self.entries.push(entry);
        }

        self.mounts.push(Mount { nodes });
        self.prefixes.push(base);
    }

    /// Builder-style [`mount`](Self::mount).
    pub fn with_mount(mut self, prefix: &str, nodes: Vec<RouteNode<C>>) -> Self {
        self.mount(prefix, nodes);
        self
    }

    /// All registered patterns, in registration order.
    pub fn patterns(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.pattern.as_str()).collect()
    }

    /// Matches a URL path, returning the leaf pattern and its parameters.
    pub fn match_url(&self, path: &str) -> Option<(&str, Vec<(String, String)>)> {
        let normalized_path = normalize(path);

        match self.matcher.at(normalized_path) {
            Ok(matched) => {
                let entry = &self.entries[*matched.value];
                let params: Vec<(String, String)> = matched
                    .params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();

                Some((entry.pattern.as_str(), params))
            }
            Err(_) => None,
        }
    }

    /// Node chain for an entry, with the pattern of each node.
    fn chain(&self, entry: &Entry) -> Vec<(&RouteNode<C>, String)> {
        let mut chain = Vec::with_capacity(entry.trail.len());
        let mut pattern = self.prefixes[entry.mount].clone();
        let mut nodes: &[RouteNode<C>] = &self.mounts[entry.mount].nodes;

        for &i in &entry.trail {
            let node = &nodes[i];
            pattern = join_pattern(&pattern, &node.path);
            chain.push((node, pattern.clone()));
            nodes = node.children.as_deref().unwrap_or(&[]);
        }

        chain
    }
}

impl<C: Send + 'static> RouteTree<C> {
    /// Navigates to `url`: runs the matched loaders, then resolves the
    /// matched components.
    ///
    /// # Errors
    ///
    /// [`RoutingError::NotFound`] when no route matches; otherwise the
    /// first error raised by a loader or an entry.
    pub async fn navigate(&self, url: &str) -> RoutingResult<Navigation<C>> {
        let (path, query) = split_url(url);
        let normalized_path = normalize(path);

        let matched = self
            .matcher
            .at(normalized_path)
            .map_err(|_| RoutingError::NotFound(path.to_string()))?;
        let entry = &self.entries[*matched.value];
        let params: Vec<(String, String)> = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let ctx = LoaderContext::new(url, params).with_query(query);
        let chain = self.chain(entry);
        tracing::debug!("Navigating to {} through {} route(s)", url, chain.len());

        let data = try_join_all(chain.iter().map(|(node, _)| run_loader(node, ctx.clone()))).await?;
        let components = try_join_all(chain.iter().map(|(node, _)| (node.lazy)())).await?;

        let matches = chain
            .into_iter()
            .zip(data)
            .zip(components)
            .map(|(((node, pattern), data), lazy)| RouteMatch {
                pathname: fill_pattern(&pattern, &ctx.params),
                pattern,
                data,
                component: lazy.component,
                handle: node.handle.clone(),
            })
            .collect();

        Ok(Navigation {
            url: url.to_string(),
            params: ctx.params,
            matches,
        })
    }
}

impl<C> Default for RouteTree<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn run_loader<C>(node: &RouteNode<C>, ctx: LoaderContext) -> BoxFuture<'static, RoutingResult<Metadata>> {
    match &node.loader {
        Some(loader) => loader(ctx),
        None => async { Ok(Metadata::new()) }.boxed(),
    }
}

/// Returns true if `child` lies below `parent` in the same subtree.
fn is_index_of(parent: &[usize], child: &[usize]) -> bool {
    child.len() > parent.len() && child.starts_with(parent)
}

fn collect_entries<C>(
    nodes: &[RouteNode<C>],
    base: &str,
    mount: usize,
    trail: &mut Vec<usize>,
    out: &mut Vec<Entry>,
) {
    for (i, node) in nodes.iter().enumerate() {
        trail.push(i);
        let pattern = join_pattern(base, &node.path);

        out.push(Entry {
            pattern: pattern.clone(),
            mount,
            trail: trail.clone(),
        });

        if let Some(children) = &node.children {
            collect_entries(children, &pattern, mount, trail, out);
        }
        trail.pop();
    }
}

fn normalize(path: &str) -> &str {
    if path.is_empty() || path == "/" {
        "/"
    } else {
        path.trim_end_matches('/')
    }
}

/// Splits a URL into its path and decoded query parameters.
fn split_url(url: &str) -> (&str, HashMap<String, String>) {
    let without_fragment = url.split('#').next().unwrap_or(url);
    match without_fragment.split_once('?') {
        Some((path, query)) => (
            path,
            form_urlencoded::parse(query.as_bytes()).into_owned().collect(),
        ),
        None => (without_fragment, HashMap::new()),
    }
}

/// Converts one route segment to matchit syntax.
fn segment_to_pattern(segment: &str) -> String {
    if let Some(name) = segment.strip_prefix(':') {
        format!("{{{}}}", name)
    } else if segment == "*" {
        "{*splat}".to_string()
    } else {
        segment.to_string()
    }
}

/// Appends a relative route path to a pattern.
fn join_pattern(base: &str, path: &str) -> String {
    let mut pattern = base.trim_end_matches('/').to_string();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        pattern.push('/');
        pattern.push_str(&segment_to_pattern(segment));
    }

    if pattern.is_empty() {
        "/".to_string()
    } else {
        pattern
    }
}

/// Substitutes parameters back into a pattern.
fn fill_pattern(pattern: &str, params: &HashMap<String, String>) -> String {
    let filled: Vec<String> = pattern
        .split('/')
        .map(|segment| {
            let name = segment
                .strip_prefix("{*")
                .or_else(|| segment.strip_prefix('{'))
                .and_then(|s| s.strip_suffix('}'));
            match name.and_then(|n| params.get(n)) {
                Some(value) => value.clone(),
                None => segment.to_string(),
            }
        })
        .collect();

    filled.join("/")
}
