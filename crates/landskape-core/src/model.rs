//! Systems and the directed connections between them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attributes::Attributes;

/// An IT landscape object such as a web service, a database schema, an FTP
/// server or a third party solution.
///
/// The identifier is unique and doubles as the display key of the system in
/// diagrams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct System {
    id: String,
    #[serde(default)]
    attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    modified: Option<DateTime<Utc>>,
}

impl System {
    /// Creates a system without attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Attributes::new(),
            modified: None,
        }
    }

    /// Replaces the attribute set.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Sets a single attribute, see [`Attributes::with`].
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes = self.attributes.with(name, value);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns the last-modified timestamp, if the system was ever saved.
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    /// Stamps the system as modified now.
    pub fn touch(&mut self) {
        self.modified = Some(Utc::now());
    }
}

/// A directed, typed link from one system to another.
///
/// Typical connection types are `http`, `https`, `jdbc`, `ftp` or `smtp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    from: String,
    to: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    attributes: Attributes,
}

impl Connection {
    /// Creates a connection without attributes.
    ///
    /// # Arguments
    ///
    /// * `from` - Identifier of the source system.
    /// * `to` - Identifier of the target system.
    /// * `kind` - Connection type tag, e.g. a protocol name.
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind: kind.into(),
            attributes: Attributes::new(),
        }
    }

    /// Replaces the attribute set.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Sets a single attribute, see [`Attributes::with`].
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes = self.attributes.with(name, value);
        self
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    /// Returns the connection type tag.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
