//! Requested output formats and rendered results.

use std::fmt;

use crate::error::LandskapeError;

/// Format name requesting the raw description instead of an image.
const DOT_FORMAT: &str = "dot";

/// Output requested for a diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// The graph description text itself; no renderer is involved.
    Dot,
    /// An image format understood by the renderer, e.g. `svg` or `png:cairo`.
    Image(String),
}

impl OutputFormat {
    /// Parses a requested format name.
    ///
    /// An empty name selects `default_image`. The name `dot` selects the raw
    /// description. Anything else must be an image format name made of ASCII
    /// letters, digits, `_` and `:`.
    ///
    /// # Errors
    ///
    /// Returns [`LandskapeError::InvalidFormat`] for names that could not be
    /// passed safely to the renderer.
    ///
    /// # Examples
    ///
    /// ```
    /// use landskape::render::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::parse("", "svg").unwrap(), OutputFormat::Image("svg".into()));
    /// assert_eq!(OutputFormat::parse("dot", "svg").unwrap(), OutputFormat::Dot);
    /// assert!(OutputFormat::parse("../svg", "svg").is_err());
    /// ```
    pub fn parse(name: &str, default_image: &str) -> Result<Self, LandskapeError> {
        let name = name.trim();
        let name = if name.is_empty() { default_image } else { name };
        if name == DOT_FORMAT {
            return Ok(Self::Dot);
        }
        Self::image(name)
    }

    /// Creates an image format after validating its name.
    pub fn image(name: &str) -> Result<Self, LandskapeError> {
        let valid = !name.is_empty()
            && !name.starts_with(':')
            && name
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == ':');
        if !valid {
            return Err(LandskapeError::InvalidFormat(name.to_string()));
        }
        Ok(Self::Image(name.to_string()))
    }

    /// Returns the format name as requested.
    pub fn name(&self) -> &str {
        match self {
            Self::Dot => DOT_FORMAT,
            Self::Image(name) => name,
        }
    }

    /// File extension of artifacts in this format.
    ///
    /// Renderer variants such as `png:cairo` keep the base format's extension.
    pub(crate) fn extension(&self) -> &str {
        let name = self.name();
        name.split(':').next().unwrap_or(name)
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Image("svg".to_string())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rendered diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagram {
    /// The graph description text.
    Text(String),
    /// Image bytes produced by the renderer.
    Image { format: String, data: Vec<u8> },
}

impl Diagram {
    /// Returns the media type matching the content.
    pub fn media_type(&self) -> &'static str {
        let format = match self {
            Self::Text(_) => return "text/vnd.graphviz",
            Self::Image { format, .. } => format.split(':').next().unwrap_or_default(),
        };
        match format {
            "svg" => "image/svg+xml",
            "png" => "image/png",
            "pdf" => "application/pdf",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            _ => "application/octet-stream",
        }
    }

    /// Returns the content as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Image { data, .. } => data,
        }
    }

    /// Consumes the diagram, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Image { data, .. } => data,
        }
    }
}
