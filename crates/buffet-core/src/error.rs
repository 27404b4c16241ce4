//! Framework error type.
//!
//! Sub-crates define their own error enums and convert `CoreError` upward
//! via `#[from]` where they wrap it.

use thiserror::Error;

use crate::StationKind;

/// The top-level error type for `buffet-core`.
///
/// Everything here is a *configuration* error: the engine itself has no
/// runtime failure paths — abandonment and re-queue are domain outcomes,
/// not faults.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("required station '{0}' missing from scenario")]
    MissingStation(StationKind),

    #[error("station '{0}' configured more than once")]
    DuplicateStation(StationKind),
}

/// Shorthand result type for all `buffet-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
