//! Node and edge model of a landscape diagram.

use indexmap::IndexSet;
use log::{debug, trace};

use landskape_core::model::Connection;

/// Nodes and edges of one diagram.
///
/// Nodes are system identifiers in first-seen order. Edges are the admitted
/// connections in admission order. Every edge endpoint is a node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphModel {
    nodes: IndexSet<String>,
    edges: Vec<Connection>,
}

impl GraphModel {
    /// Builds the graph from admitted connections in a single pass.
    pub fn from_connections(connections: Vec<Connection>) -> Self {
        let mut graph = Self::default();
        for connection in connections {
            graph.add_edge(connection);
        }
        debug!(
            nodes_count = graph.nodes.len(),
            edges_count = graph.edges.len();
            "Graph model built"
        );
        graph
    }

    /// Appends an edge, registering its endpoints as nodes if unseen.
    fn add_edge(&mut self, connection: Connection) {
        if !self.nodes.contains(connection.from()) {
            self.nodes.insert(connection.from().to_string());
        }
        if !self.nodes.contains(connection.to()) {
            self.nodes.insert(connection.to().to_string());
        }
        trace!(
            from = connection.from(),
            to = connection.to(),
            kind = connection.kind();
            "Edge added"
        );
        self.edges.push(connection);
    }

    /// Returns node identifiers in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Returns edges in admission order.
    pub fn edges(&self) -> &[Connection] {
        &self.edges
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
