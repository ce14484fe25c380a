//! Host boundary: the primitives the host engine exposes to world-entity code.
//!
//! # Invariants
//! - Every host call is synchronous and returns immediately.
//! - Handles are owned by the host; releasing them is always an explicit call.
//! - `SimulatedWorld` logs every mutation, including ones on released handles.

pub mod service;
pub mod world;

pub use service::{CheckpointSpawn, GroundQuery, NodeProperties, WorldService};
pub use world::{CheckpointRecord, Cylinder, HostEvent, RoadNode, SimulatedTerrain, SimulatedWorld};

/// Crate name and version.
pub fn crate_info() -> &'static str {
    concat!("waymark-host v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("host"));
    }
}
