//! Graph structure built for a single diagram request.
//!
//! The module is organized into two layers:
//! - **Graph model**: nodes and edges built from admitted connections [`GraphModel`]
//! - **Clusters**: optional grouping of nodes by an attribute value [`ClusterAssignment`]
//!
//! Both are request-scoped values; nothing here is shared between requests.

mod cluster;
mod graph;

pub use cluster::{ClusterAssignment, ClusterGroup};
pub use graph::GraphModel;
