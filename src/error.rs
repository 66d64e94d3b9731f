//! Error types for gateway calls and mutations.
//!
//! Listing failures are not represented here: they are recorded per cache key
//! as a `Failed` slot status and never propagate across keys.

use thiserror::Error;

/// Errors surfaced by the remote entity gateway.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The remote call failed (transport or server-side rejection).
    #[error("gateway request failed: {0}")]
    Request(String),

    /// The addressed entity does not exist on the server.
    #[error("entity not found: {0}")]
    NotFound(String),

    /// The call did not resolve within the configured timeout.
    #[error("gateway request timed out after {0}ms")]
    Timeout(u64),
}

/// Errors returned by `submit_*` mutation calls.
///
/// Validation errors are caught before any gateway call. Gateway errors leave
/// the cache untouched; the stale listing is still accurate because the
/// mutation did not take effect.
#[derive(Debug, Clone, Error)]
pub enum MutationError {
    /// A required field was missing or malformed; the gateway was not called.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The gateway rejected or failed the mutation.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
