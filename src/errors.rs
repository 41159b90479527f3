//! Typed error hierarchy for plantdesk.
//!
//! - `StoreError` — failures reading or writing the reference store
//! - `ResolveError` — the resolver could not produce any rows at all

use thiserror::Error;

use crate::refdata::models::ReferenceKind;

/// Errors from a `ReferenceStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(#[source] anyhow::Error),

    #[error("Database lock poisoned")]
    LockPoisoned,

    #[error("Storage task failed: {0}")]
    TaskFailed(String),
}

/// Errors surfaced by the resolver. Storage failures never appear here; they
/// are recovered by falling back. Only a fallback path that cannot produce
/// rows is fatal.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No rows for {kind} and fallback is disabled")]
    FallbackDisabled { kind: ReferenceKind },

    #[error("Fallback collection for {kind} is empty")]
    EmptyFallback { kind: ReferenceKind },
}
