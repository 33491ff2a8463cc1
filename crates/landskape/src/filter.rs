//! Admission of connections into a diagram.
//!
//! The connection store may or may not have applied the filter already, so
//! every criterion is applied again here before the graph is built.

use log::debug;

use landskape_core::{filter::ConnectionsFilter, model::Connection};

/// How the `center` criterion selects connections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum CenterScope {
    /// Admit connections with at least one endpoint among the centers.
    #[default]
    Touching,
    // An ego-graph scope (one-hop neighborhood of the centers, including the
    // edges between neighbors) would be added here. It needs the whole
    // connection set, which `admit` already receives.
}

/// Keeps the connections admitted by `filter`, in input order.
///
/// An empty or unmatched filter gives an empty result; filtering never fails.
pub fn admit(
    connections: Vec<Connection>,
    filter: &ConnectionsFilter,
    scope: CenterScope,
) -> Vec<Connection> {
    let total = connections.len();
    let admitted: Vec<Connection> = match scope {
        CenterScope::Touching => connections
            .into_iter()
            .filter(|connection| filter.admits(connection))
            .collect(),
    };
    debug!(total = total, admitted = admitted.len(); "Connections admitted");
    admitted
}
