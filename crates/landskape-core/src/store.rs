//! Storage collaborators for systems and connections.
//!
//! The diagram engine only consumes these traits. [`InMemoryStore`] backs the
//! command-line tool and the tests.

use indexmap::IndexMap;
use log::{debug, trace};
use thiserror::Error;

use crate::{
    filter::ConnectionsFilter,
    model::{Connection, System},
};

/// Failure reported by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store backend error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

/// Source of connections for a diagram.
///
/// Implementations may apply the filter, or part of it, at the storage layer.
/// They are also allowed to ignore it and return everything.
pub trait ConnectionStore {
    fn connections(&self, filter: &ConnectionsFilter) -> Result<Vec<Connection>, StoreError>;
}

/// Lookup of systems by identifier.
pub trait SystemStore {
    /// Returns the system with the given identifier, or `None` if unknown.
    fn system(&self, id: &str) -> Result<Option<System>, StoreError>;
}

/// Store keeping systems and connections in memory.
///
/// Systems are keyed by identifier; saving a system with an existing
/// identifier replaces it. Connections are kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    systems: IndexMap<String, System>,
    connections: Vec<Connection>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a system, stamping its modification time.
    pub fn save_system(&mut self, mut system: System) {
        system.touch();
        trace!(id = system.id(); "Saving system");
        self.systems.insert(system.id().to_string(), system);
    }

    /// Stores a system as-is, keeping whatever timestamp it carries.
    pub fn insert_system(&mut self, system: System) {
        self.systems.insert(system.id().to_string(), system);
    }

    pub fn add_connection(&mut self, connection: Connection) {
        trace!(from = connection.from(), to = connection.to(); "Adding connection");
        self.connections.push(connection);
    }

    pub fn systems(&self) -> impl Iterator<Item = &System> {
        self.systems.values()
    }

    pub fn system_exists(&self, id: &str) -> bool {
        self.systems.contains_key(id)
    }

    pub fn systems_count(&self) -> usize {
        self.systems.len()
    }

    pub fn connections_count(&self) -> usize {
        self.connections.len()
    }
}

impl ConnectionStore for InMemoryStore {
    fn connections(&self, filter: &ConnectionsFilter) -> Result<Vec<Connection>, StoreError> {
        let matching: Vec<Connection> = self
            .connections
            .iter()
            .filter(|connection| filter.admits(connection))
            .cloned()
            .collect();
        debug!(
            total = self.connections.len(),
            matching = matching.len();
            "Connections queried"
        );
        Ok(matching)
    }
}

impl SystemStore for InMemoryStore {
    fn system(&self, id: &str) -> Result<Option<System>, StoreError> {
        Ok(self.systems.get(id).cloned())
    }
}

impl<T: ConnectionStore + ?Sized> ConnectionStore for &T {
    fn connections(&self, filter: &ConnectionsFilter) -> Result<Vec<Connection>, StoreError> {
        (**self).connections(filter)
    }
}

impl<T: SystemStore + ?Sized> SystemStore for &T {
    fn system(&self, id: &str) -> Result<Option<System>, StoreError> {
        (**self).system(id)
    }
}
