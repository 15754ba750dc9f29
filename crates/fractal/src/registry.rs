// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Named components and loaders that route manifests refer to.
//!
//! Manifests are plain TOML, so they name their entry component and payload
//! loader by string. A [`Registry`] maps those names to the Rust functions
//! that implement them.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};

use crate::error::RoutingResult;
use crate::loader::payload_fn;
use crate::types::{EntryFn, EntryModule, LoaderContext, PayloadFn, PayloadResponse};

type FallbackEntry<C> = Arc<dyn Fn(&str) -> Option<EntryFn<C>> + Send + Sync>;
type FallbackLoader = Arc<dyn Fn(&str) -> Option<PayloadFn> + Send + Sync>;

/// Name-to-function table used when binding manifests.
pub struct Registry<C> {
    components: HashMap<String, EntryFn<C>>,
    loaders: HashMap<String, PayloadFn>,
    fallback_component: Option<FallbackEntry<C>>,
    fallback_loader: Option<FallbackLoader>,
}

impl<C: Send + 'static> Registry<C> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
            loaders: HashMap::new(),
            fallback_component: None,
            fallback_loader: None,
        }
    }

    /// Registers a lazily loaded component under `name`.
    pub fn component<E, Fut>(mut self, name: impl Into<String>, entry: E) -> Self
    where
        E: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RoutingResult<EntryModule<C>>> + Send + 'static,
    {
        let entry: EntryFn<C> = Arc::new(move || entry().boxed());
        self.components.insert(name.into(), entry);
        self
    }

    /// Registers an already-available component value under `name`.
    pub fn component_value(self, name: impl Into<String>, component: C) -> Self
    where
        C: Clone + Sync,
    {
        self.component(name, move || {
            let component = component.clone();
            async move { Ok(EntryModule::new(component)) }
        })
    }

    /// Registers a payload loader under `name`.
    pub fn loader<P, Fut>(mut self, name: impl Into<String>, payload: P) -> Self
    where
        P: Fn(LoaderContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = RoutingResult<PayloadResponse>> + Send + 'static,
    {
        self.loaders.insert(name.into(), payload_fn(payload));
        self
    }

    /// Builds components for names that were not registered explicitly.
    ///
    /// Tools that only inspect route trees use this to stand in a
    /// placeholder for every component a manifest mentions.
    pub fn with_fallback_component<F>(mut self, factory: F) -> Self
    where
        F: Fn(&str) -> C + Send + Sync + 'static,
    {
        let factory = Arc::new(factory);
        self.fallback_component = Some(Arc::new(move |name: &str| {
            let factory = Arc::clone(&factory);
            let name = name.to_string();
            let entry: EntryFn<C> = Arc::new(move || -> BoxFuture<'static, RoutingResult<EntryModule<C>>> {
                let component = factory(name.as_str());
                async move { Ok(EntryModule::new(component)) }.boxed()
            });
            Some(entry)
        }));
        self
    }

    /// Provides loaders for names that were not registered explicitly.
    pub fn with_fallback_loader<F>(mut self, resolve: F) -> Self
    where
        F: Fn(&str) -> Option<PayloadFn> + Send + Sync + 'static,
    {
        self.fallback_loader = Some(Arc::new(resolve));
        self
    }
}

impl<C> Registry<C> {
    /// Looks up the entry function for a component name.
    pub fn entry(&self, name: &str) -> Option<EntryFn<C>> {
        self.components
            .get(name)
            .cloned()
            .or_else(|| self.fallback_component.as_ref().and_then(|f| f(name)))
    }

    /// Looks up the payload function for a loader name.
    pub fn payload(&self, name: &str) -> Option<PayloadFn> {
        self.loaders
            .get(name)
            .cloned()
            .or_else(|| self.fallback_loader.as_ref().and_then(|f| f(name)))
    }
}

impl<C: Send + 'static> Default for Registry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for Registry<C> {
    fn clone(&self) -> Self {
        Self {
            components: self.components.clone(),
            loaders: self.loaders.clone(),
            fallback_component: self.fallback_component.clone(),
            fallback_loader: self.fallback_loader.clone(),
        }
    }
}

impl<C> fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut components: Vec<&String> = self.components.keys().collect();
        components.sort();
        let mut loaders: Vec<&String> = self.loaders.keys().collect();
        loaders.sort();

        f.debug_struct("Registry")
            .field("components", &components)
            .field("loaders", &loaders)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metadata;

    #[tokio::test]
    async fn test_registered_component_resolves() {
        let registry = Registry::new().component_value("HomePage", "home");
        let entry = registry.entry("HomePage").unwrap();
        assert_eq!(entry().await.unwrap().default, "home");
    }

    #[test]
    fn test_unknown_names() {
        let registry: Registry<&'static str> = Registry::new();
        assert!(registry.entry("Missing").is_none());
        assert!(registry.payload("missing").is_none());
    }

    #[tokio::test]
    async fn test_fallback_component_uses_name() {
        let registry: Registry<String> = Registry::new().with_fallback_component(|name| name.to_string());
        let entry = registry.entry("AnyPage").unwrap();
        assert_eq!(entry().await.unwrap().default, "AnyPage");
    }

    #[tokio::test]
    async fn test_registered_loader() {
        let registry: Registry<String> = Registry::new().loader("greeting", |_ctx| async {
            let mut metadata = Metadata::new();
            metadata.insert("hello".to_string(), "world".into());
            Ok(PayloadResponse::with_metadata(metadata))
        });

        let payload = registry.payload("greeting").unwrap();
        let response = payload(LoaderContext::default()).await.unwrap();
        assert_eq!(response.metadata.unwrap()["hello"], "world");
    }
}
