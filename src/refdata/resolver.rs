//! Read-through resolver for reference data.
//!
//! Every kind goes through [`resolve_with`]: read the store, and if the read
//! fails or comes back empty, serve the kind's fallback collection instead.
//! The caller always gets a populated list; only the logs and
//! [`Resolved::source`] tell the two paths apart.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use super::defaults;
use super::models::{FallbackReason, ReferenceItem, ReferenceKind, ReferencePatch, Resolved, Source};
use crate::config::{FallbackConfig, FallbackPolicy};
use crate::errors::{ResolveError, StoreError};

/// Storage capability consumed by the resolver and the admin API.
#[async_trait]
pub trait ReferenceStore: Send + Sync {
    /// All rows of `kind`, ascending by id.
    async fn list(&self, kind: ReferenceKind) -> Result<Vec<ReferenceItem>, StoreError>;

    /// Apply `patch` to row `id`. `Ok(None)` when the row does not exist.
    async fn update(
        &self,
        kind: ReferenceKind,
        id: i64,
        patch: ReferencePatch,
    ) -> Result<Option<ReferenceItem>, StoreError>;
}

/// Resolve one kind: primary read, then fallback on error or empty result.
///
/// `fallback` of `None` means the kind has no fallback; an empty or failed
/// read then yields [`ResolveError::FallbackDisabled`].
pub async fn resolve_with<F, Fut>(
    kind: ReferenceKind,
    read: F,
    fallback: Option<&[ReferenceItem]>,
) -> Result<Resolved, ResolveError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<ReferenceItem>, StoreError>>,
{
    let reason = match read().await {
        Ok(rows) if !rows.is_empty() => {
            tracing::debug!(%kind, count = rows.len(), "served reference data from store");
            return Ok(Resolved {
                rows,
                source: Source::Primary,
            });
        }
        Ok(_) => {
            tracing::warn!(%kind, "reference table is empty, serving fallback collection");
            FallbackReason::StorageEmpty
        }
        Err(e) => {
            tracing::error!(%kind, error = %e, "reference read failed, serving fallback collection");
            FallbackReason::StorageUnavailable
        }
    };

    let rows = fallback.ok_or(ResolveError::FallbackDisabled { kind })?;
    if rows.is_empty() {
        return Err(ResolveError::EmptyFallback { kind });
    }
    Ok(Resolved {
        rows: rows.to_vec(),
        source: Source::Fallback(reason),
    })
}

/// Resolver bound to a store and a per-kind fallback table.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn ReferenceStore>,
    fallbacks: Arc<HashMap<ReferenceKind, Vec<ReferenceItem>>>,
}

impl Resolver {
    /// Kinds whose policy is `Builtin` fall back to the built-in collections.
    pub fn new(store: Arc<dyn ReferenceStore>, config: &FallbackConfig) -> Self {
        let fallbacks = ReferenceKind::ALL
            .into_iter()
            .filter(|kind| config.policy_for(*kind) == FallbackPolicy::Builtin)
            .map(|kind| (kind, defaults::builtin(kind)))
            .collect();
        Self::with_fallbacks(store, fallbacks)
    }

    /// Use an explicit fallback table. Kinds missing from the map have no fallback.
    pub fn with_fallbacks(
        store: Arc<dyn ReferenceStore>,
        fallbacks: HashMap<ReferenceKind, Vec<ReferenceItem>>,
    ) -> Self {
        Self {
            store,
            fallbacks: Arc::new(fallbacks),
        }
    }

    pub async fn resolve(&self, kind: ReferenceKind) -> Result<Resolved, ResolveError> {
        let fallback = self.fallbacks.get(&kind).map(Vec::as_slice);
        resolve_with(kind, || self.store.list(kind), fallback).await
    }

    pub fn store(&self) -> &Arc<dyn ReferenceStore> {
        &self.store
    }
}
