//! Landskape Core Types and Definitions
//!
//! This crate provides the data model shared by the Landskape crates:
//!
//! - **Attributes**: Ordered, immutable name/value sets ([`attributes::Attributes`])
//! - **Model**: Systems and the directed connections between them ([`model`] module)
//! - **Filter**: Per-request connection criteria ([`filter::ConnectionsFilter`])
//! - **Store**: Storage collaborator traits and an in-memory store ([`store`] module)

pub mod attributes;
pub mod filter;
pub mod model;
pub mod store;
