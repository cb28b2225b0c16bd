//! Shared error types for the services crate.

use std::time::Duration;

use thiserror::Error;

use quiz_core::model::CheckoutLinkError;

/// Errors emitted while validating a `FunnelConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("single-select delay of {0:?} is below the minimum of 300ms")]
    SelectDelayTooShort(Duration),
    #[error("single-select delay of {0:?} exceeds the maximum of 2s")]
    SelectDelayTooLong(Duration),
    #[error("analysis duration must be greater than zero")]
    ZeroAnalysisDuration,
    #[error("unknown funnel variant: {0}")]
    UnknownVariant(String),
    #[error(transparent)]
    Checkout(#[from] CheckoutLinkError),
}

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session has been shut down")]
    Closed,
    #[error(transparent)]
    Config(#[from] ConfigError),
}
