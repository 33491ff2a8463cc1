//! Configuration types for Landskape diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are serialized and handed to the external renderer. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining renderer and style settings.
//! - [`RendererConfig`] - Renderer binary, scratch directory, and timeout.
//! - [`StyleConfig`] - Graph-wide visual attributes written into the description.
//!
//! # Example
//!
//! ```
//! # use landskape::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r#"
//!     [renderer]
//!     binary = "/usr/local/bin/dot"
//!     timeout_secs = 10
//!     "#,
//! ).unwrap();
//! assert_eq!(config.renderer().binary(), "/usr/local/bin/dot");
//! assert_eq!(config.style().node_shape(), Some("box"));
//! ```

use std::{env, path::PathBuf, time::Duration};

use serde::Deserialize;

/// Top-level configuration combining renderer and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Renderer configuration section.
    #[serde(default)]
    renderer: RendererConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given renderer and style configurations.
    pub fn new(renderer: RendererConfig, style: StyleConfig) -> Self {
        Self { renderer, style }
    }

    /// Returns the renderer configuration.
    pub fn renderer(&self) -> &RendererConfig {
        &self.renderer
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Settings for the external renderer process.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Path or name of the renderer binary.
    binary: String,

    /// Extra arguments placed before the format, output, and input arguments.
    args: Vec<String>,

    /// Directory holding request-scoped scratch artifacts.
    scratch_dir: Option<PathBuf>,

    /// Upper bound on a single renderer run, in seconds.
    timeout_secs: u64,

    /// Image format used when a request names none.
    default_format: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            binary: "dot".to_string(),
            args: Vec::new(),
            scratch_dir: None,
            timeout_secs: 30,
            default_format: "svg".to_string(),
        }
    }
}

impl RendererConfig {
    /// Creates a renderer configuration for the given binary with defaults
    /// for everything else.
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            ..Self::default()
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn with_default_format(mut self, format: impl Into<String>) -> Self {
        self.default_format = format.into();
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the scratch directory, falling back to the system temp directory.
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir.clone().unwrap_or_else(env::temp_dir)
    }

    /// Returns the renderer timeout, never shorter than one second.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn default_format(&self) -> &str {
        &self.default_format
    }
}

/// Graph-wide visual attributes emitted at the top of every description.
///
/// Fields that are not set are left to the renderer's defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Graph `rankdir`, e.g. `LR` or `TB`.
    rank_direction: Option<String>,

    /// Node `shape`.
    node_shape: Option<String>,

    /// Node and edge `fontname`.
    font_name: Option<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            rank_direction: None,
            node_shape: Some("box".to_string()),
            font_name: None,
        }
    }
}

impl StyleConfig {
    /// Creates a style without any attribute set.
    pub fn plain() -> Self {
        Self {
            rank_direction: None,
            node_shape: None,
            font_name: None,
        }
    }

    pub fn with_rank_direction(mut self, rank_direction: impl Into<String>) -> Self {
        self.rank_direction = Some(rank_direction.into());
        self
    }

    pub fn with_node_shape(mut self, node_shape: impl Into<String>) -> Self {
        self.node_shape = Some(node_shape.into());
        self
    }

    pub fn with_font_name(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = Some(font_name.into());
        self
    }

    pub fn rank_direction(&self) -> Option<&str> {
        self.rank_direction.as_deref()
    }

    pub fn node_shape(&self) -> Option<&str> {
        self.node_shape.as_deref()
    }

    pub fn font_name(&self) -> Option<&str> {
        self.font_name.as_deref()
    }
}
