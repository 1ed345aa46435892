//! Unified error type for the facade.
//!
//! Layout stages never fail; everything here comes from a boundary:
//! configuration, strict widget checks, engine lookups, or loading a
//! persisted snapshot.

use dashgrid_core::WidgetError;
use dashgrid_layout::{ConfigError, EngineError, SnapshotError};
use thiserror::Error;

/// Top-level error type for dashgrid callers.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Widget(#[from] WidgetError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    /// Snapshot JSON could not be encoded or decoded.
    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Standard result type for dashgrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Error type label for metrics and tracing.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::Engine(EngineError::Config(_)) => "config",
            Self::Widget(_) => "widget",
            Self::Engine(_) => "engine",
            Self::Snapshot(_) => "snapshot",
            Self::Json(_) => "json",
        }
    }

    /// Whether the caller can retry with corrected input while keeping the
    /// last committed layout. Only configuration problems are fatal.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.error_type(), "config")
    }
}
