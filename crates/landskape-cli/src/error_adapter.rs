//! Error adapter for converting LandskapeError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Every error gets
//! a stable code; errors with an obvious remedy also get a help line.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use landskape::{LandskapeError, RenderProcessError};

/// Adapter presenting a [`LandskapeError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a LandskapeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            LandskapeError::Store(_) => "landskape::store",
            LandskapeError::Serialize(_) => "landskape::serialize",
            LandskapeError::ArtifactIo { .. } => "landskape::artifact",
            LandskapeError::RenderProcess(_) => "landskape::render",
            LandskapeError::InvalidFormat(_) => "landskape::format",
            LandskapeError::Config(_) => "landskape::config",
            LandskapeError::Cancelled => "landskape::cancelled",
            LandskapeError::Io(_) => "landskape::io",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            LandskapeError::RenderProcess(RenderProcessError::NotFound { .. }) => {
                "install Graphviz or set `renderer.binary` in the configuration"
            }
            LandskapeError::RenderProcess(RenderProcessError::Wait { .. }) => {
                "the renderer was started but could not be awaited; retry the request"
            }
            LandskapeError::RenderProcess(RenderProcessError::TimedOut { .. }) => {
                "narrow the selection or raise `renderer.timeout_secs`"
            }
            LandskapeError::InvalidFormat(_) => {
                "use `dot` or a renderer format such as `svg`, `png` or `png:cairo`"
            }
            LandskapeError::ArtifactIo { .. } => {
                "check that `renderer.scratch_dir` exists and is writable"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}
