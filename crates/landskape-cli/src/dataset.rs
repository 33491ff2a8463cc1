//! Landscape dataset files.
//!
//! A dataset is a TOML document listing systems and connections:
//!
//! ```toml
//! [[systems]]
//! id = "web"
//! modified = "2024-05-01T10:00:00Z"
//! attributes = { team = "frontend" }
//!
//! [[connections]]
//! from = "web"
//! to = "db"
//! type = "jdbc"
//! ```
//!
//! Connections may name systems the dataset does not list; those systems
//! simply carry no attributes.

use std::{fs, path::Path};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use landskape::LandskapeError;
use landskape_core::{
    model::{Connection, System},
    store::{InMemoryStore, StoreError},
};

/// Dataset-related errors for CLI
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to parse dataset: {0}")]
    Parse(String),

    #[error("System with empty id")]
    EmptyId,

    #[error("System {0:?} is listed more than once")]
    DuplicateSystem(String),
}

impl From<DatasetError> for LandskapeError {
    fn from(err: DatasetError) -> Self {
        LandskapeError::Store(StoreError::Backend(Box::new(err)))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Dataset {
    systems: Vec<System>,
    connections: Vec<Connection>,
}

/// Parses dataset text into an in-memory store.
///
/// # Errors
///
/// Returns [`DatasetError`] for malformed TOML, empty system ids, and
/// duplicate systems.
pub fn parse_dataset(content: &str) -> Result<InMemoryStore, DatasetError> {
    let dataset: Dataset =
        toml::from_str(content).map_err(|err| DatasetError::Parse(err.to_string()))?;

    let mut store = InMemoryStore::new();
    for system in dataset.systems {
        if system.id().is_empty() {
            return Err(DatasetError::EmptyId);
        }
        if store.system_exists(system.id()) {
            return Err(DatasetError::DuplicateSystem(system.id().to_string()));
        }
        store.insert_system(system);
    }
    for connection in dataset.connections {
        store.add_connection(connection);
    }

    debug!(
        systems_count = store.systems_count(),
        connections_count = store.connections_count();
        "Dataset parsed"
    );
    Ok(store)
}

/// Reads and parses a dataset file.
///
/// # Errors
///
/// Returns [`LandskapeError::Io`] if the file cannot be read and
/// [`LandskapeError::Store`] if its content is not a valid dataset.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<InMemoryStore, LandskapeError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading landscape dataset");

    let content = fs::read_to_string(path)?;
    Ok(parse_dataset(&content)?)
}
