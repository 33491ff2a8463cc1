//! Serialization of diagrams into graph-description text.

pub mod dot;

pub use dot::{DotWriter, SerializeError};
