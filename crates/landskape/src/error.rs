//! Error types for Landskape diagram operations.
//!
//! This module provides the main error type [`LandskapeError`] which wraps
//! every failure a diagram request can run into, from storage lookups to the
//! external renderer.

use std::{io, path::PathBuf, process::ExitStatus, time::Duration};

use thiserror::Error;

use landskape_core::store::StoreError;

use crate::export::SerializeError;

/// The main error type for Landskape operations.
///
/// Every variant fails the whole request; no partial diagram is produced.
#[derive(Debug, Error)]
pub enum LandskapeError {
    #[error("Retrieval failed: {0}")]
    Store(#[from] StoreError),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] SerializeError),

    #[error("Scratch artifact {path} failed: {source}")]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Renderer failed: {0}")]
    RenderProcess(#[from] RenderProcessError),

    #[error("Invalid output format: {0:?}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Rendering cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl LandskapeError {
    /// Create a new `ArtifactIo` error for the given scratch path.
    pub fn artifact_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ArtifactIo {
            path: path.into(),
            source,
        }
    }
}

/// Failure of the external rendering process itself.
///
/// Kept apart from [`LandskapeError::ArtifactIo`] so a missing or broken
/// renderer can be told apart from a storage problem.
#[derive(Debug, Error)]
pub enum RenderProcessError {
    #[error("renderer binary {binary:?} not found")]
    NotFound { binary: String },

    #[error("failed to start renderer {binary:?}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: io::Error,
    },

    #[error("failed waiting for renderer {binary:?}: {source}")]
    Wait {
        binary: String,
        #[source]
        source: io::Error,
    },

    #[error("renderer exited with {status}: {stderr}")]
    Exit { status: ExitStatus, stderr: String },

    #[error("renderer did not finish within {after:?}")]
    TimedOut { after: Duration },
}
