//! Spatial layer: vector math and parsing, the shared spatial contract,
//! path-node predicates.
//!
//! The world is Z-up. The ground plane is (x, y) and z is the vertical axis.
//!
//! # Invariants
//! - Vector parsing accepts exactly three comma-separated numbers.
//! - Every distance query is derivable from `Spatial::position` alone.
//! - An unresolved node is never considered unsafe.

pub mod contract;
pub mod node;
pub mod vector;

pub use contract::Spatial;
pub use node::{
    DEFAULT_BLACKLISTED_NODE_TYPES, NodeSafety, NodeSafetyConfig, NodeSafetyError,
    UNRESOLVED_NODE_TYPE, closest_major_road_node, is_point_on_water, nearest_node_type,
};
pub use vector::{
    ParseVectorError, SpatialVec3, direction_to_heading, format_vector, parse_vector,
    try_parse_vector,
};

/// Crate name and version.
pub fn crate_info() -> &'static str {
    concat!("waymark-spatial v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("spatial"));
    }
}
