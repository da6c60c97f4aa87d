//! Pairing of contract and implementation elements into a mapping tree.

pub mod mapper;
pub mod node;

pub use mapper::{build_mapping, MAX_FORWARDER_HOPS};
pub use node::{Correspondence, MappingNode, MappingState};
