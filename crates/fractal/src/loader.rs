// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Adapts route payloads to the router's loader signature.

use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};

use crate::error::RoutingResult;
use crate::types::{LoaderContext, LoaderFn, Metadata, PayloadFn, PayloadResponse};

/// Wraps an optional payload into a router loader.
///
/// No payload means no loader: the router will not wait for any data
/// before rendering the route. Otherwise the loader forwards the context to
/// the payload, awaits it and returns its `metadata`, or an empty mapping
/// when the payload returned none. Failures are passed through untouched.
pub fn apply(payload: Option<PayloadFn>) -> Option<LoaderFn> {
    let payload = payload?;

    let loader: LoaderFn = Arc::new(move |ctx: LoaderContext| -> BoxFuture<'static, RoutingResult<Metadata>> {
        let pending = payload(ctx);
        async move {
            let PayloadResponse { metadata } = pending.await?;
            Ok(metadata.unwrap_or_default())
        }
        .boxed()
    });

    Some(loader)
}

/// Shares a payload closure as a [`PayloadFn`].
pub fn payload_fn<P, Fut>(payload: P) -> PayloadFn
where
    P: Fn(LoaderContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RoutingResult<PayloadResponse>> + Send + 'static,
{
    Arc::new(move |ctx: LoaderContext| payload(ctx).boxed())
}

/// A payload that always resolves to the same metadata.
///
/// Used for routes whose manifest declares static metadata instead of
/// naming a loader.
pub fn static_payload(metadata: Metadata) -> PayloadFn {
    payload_fn(move |_ctx: LoaderContext| {
        let response = PayloadResponse::with_metadata(metadata.clone());
        async move { Ok(response) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RoutingError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn metadata(value: serde_json::Value) -> Metadata {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_absent_payload_gives_no_loader() {
        assert!(apply(None).is_none());
    }

    #[tokio::test]
    async fn test_loader_returns_payload_metadata() {
        let payload = payload_fn(|ctx: LoaderContext| {
            let id = ctx.param("id").unwrap_or_default().to_string();
            async move { Ok(PayloadResponse::with_metadata(metadata(json!({ "id": id })))) }
        });

        let loader = apply(Some(payload)).unwrap();
        let ctx = LoaderContext::new("/invoices/7", vec![("id".to_string(), "7".to_string())]);
        let data = loader(ctx).await.unwrap();

        assert_eq!(data, metadata(json!({ "id": "7" })));
    }

    #[tokio::test]
    async fn test_missing_metadata_defaults_to_empty() {
        let payload = payload_fn(|_ctx: LoaderContext| async { Ok(PayloadResponse::default()) });

        let loader = apply(Some(payload)).unwrap();
        let data = loader(LoaderContext::default()).await.unwrap();

        assert!(data.is_empty());
    }

    #[tokio::test]
    async fn test_payload_error_propagates() {
        let payload = payload_fn(|_ctx: LoaderContext| async {
            Err(RoutingError::LoadError("backend unavailable".to_string()))
        });

        let loader = apply(Some(payload)).unwrap();
        let err = loader(LoaderContext::default()).await.unwrap_err();

        assert!(matches!(err, RoutingError::LoadError(msg) if msg == "backend unavailable"));
    }

    #[tokio::test]
    async fn test_payload_invoked_once_per_call_without_caching() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let payload = payload_fn(move |_ctx: LoaderContext| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok(PayloadResponse::default()) }
        });

        let loader = apply(Some(payload)).unwrap();
        loader(LoaderContext::default()).await.unwrap();
        loader(LoaderContext::default()).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_static_payload() {
        let loader = apply(Some(static_payload(metadata(json!({ "title": "Home" }))))).unwrap();
        let data = loader(LoaderContext::default()).await.unwrap();
        assert_eq!(data.get("title"), Some(&json!("Home")));
    }
}
