use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use waymark_host::WorldService;

/// Node types where spawning is unsafe: off-road, water, and similar routes.
pub const DEFAULT_BLACKLISTED_NODE_TYPES: [i32; 8] = [0, 8, 9, 10, 12, 40, 42, 136];

/// Node type reported when the host resolves no node at a position.
pub const UNRESOLVED_NODE_TYPE: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum NodeSafetyError {
    #[error("node type {0} is reserved for unresolved nodes and cannot be blacklisted")]
    ReservedNodeType(i32),
}

/// Blacklist section of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSafetyConfig {
    pub blacklisted_node_types: Vec<i32>,
}

impl Default for NodeSafetyConfig {
    fn default() -> Self {
        Self {
            blacklisted_node_types: DEFAULT_BLACKLISTED_NODE_TYPES.to_vec(),
        }
    }
}

/// Immutable set of node types considered unsafe.
///
/// Built once at startup and shared by reference afterwards. The unresolved
/// sentinel can never be a member, so a position without a node is safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSafety {
    blacklist: BTreeSet<i32>,
}

impl Default for NodeSafety {
    fn default() -> Self {
        Self {
            blacklist: DEFAULT_BLACKLISTED_NODE_TYPES.into_iter().collect(),
        }
    }
}

impl NodeSafety {
    /// Build a blacklist; fails if it names the unresolved sentinel.
    pub fn new(node_types: impl IntoIterator<Item = i32>) -> Result<Self, NodeSafetyError> {
        let blacklist: BTreeSet<i32> = node_types.into_iter().collect();
        if blacklist.contains(&UNRESOLVED_NODE_TYPE) {
            return Err(NodeSafetyError::ReservedNodeType(UNRESOLVED_NODE_TYPE));
        }
        Ok(Self { blacklist })
    }

    /// Build the blacklist from a config section.
    pub fn from_config(config: &NodeSafetyConfig) -> Result<Self, NodeSafetyError> {
        Self::new(config.blacklisted_node_types.iter().copied())
    }

    /// Whether `node_type` is on the blacklist.
    pub fn is_blacklisted(&self, node_type: i32) -> bool {
        self.blacklist.contains(&node_type)
    }

    /// Blacklisted types in ascending order.
    pub fn blacklisted(&self) -> impl Iterator<Item = i32> + '_ {
        self.blacklist.iter().copied()
    }

    /// Whether the node nearest to `position` is of an allowed type.
    pub fn is_node_safe(&self, world: &dyn WorldService, position: Vec3) -> bool {
        !self.is_blacklisted(nearest_node_type(world, position))
    }
}

/// Type of the node nearest to `position`, or [`UNRESOLVED_NODE_TYPE`].
pub fn nearest_node_type(world: &dyn WorldService, position: Vec3) -> i32 {
    match world.node_properties(position) {
        Some(props) => props.node_type,
        None => {
            tracing::debug!(?position, "no path node resolved");
            UNRESOLVED_NODE_TYPE
        }
    }
}

/// True when the host reports water at `position`.
pub fn is_point_on_water(world: &dyn WorldService, position: Vec3) -> bool {
    world.water_height(position).is_some()
}

/// Closest major road node, or the zero vector when none resolves.
pub fn closest_major_road_node(world: &dyn WorldService, position: Vec3) -> Vec3 {
    world.closest_major_road_node(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_host::{RoadNode, SimulatedTerrain, SimulatedWorld};

    fn world_with_node(node_type: i32) -> SimulatedWorld {
        SimulatedWorld::new(SimulatedTerrain {
            road_nodes: vec![RoadNode {
                position: Vec3::ZERO,
                density: 1,
                node_type,
                major: true,
            }],
            ..SimulatedTerrain::default()
        })
    }

    #[test]
    fn unresolved_node_is_safe() {
        let world = SimulatedWorld::default();
        let safety = NodeSafety::default();
        assert_eq!(nearest_node_type(&world, Vec3::ZERO), UNRESOLVED_NODE_TYPE);
        assert!(safety.is_node_safe(&world, Vec3::ZERO));
    }

    #[test]
    fn blacklisted_node_is_unsafe() {
        let safety = NodeSafety::default();
        for node_type in DEFAULT_BLACKLISTED_NODE_TYPES {
            let world = world_with_node(node_type);
            assert!(!safety.is_node_safe(&world, Vec3::new(1.0, 1.0, 0.0)));
        }
    }

    #[test]
    fn other_node_types_are_safe() {
        let world = world_with_node(2);
        assert!(NodeSafety::default().is_node_safe(&world, Vec3::ZERO));
    }

    #[test]
    fn sentinel_cannot_be_blacklisted() {
        assert_eq!(
            NodeSafety::new([0, -1, 8]),
            Err(NodeSafetyError::ReservedNodeType(-1))
        );
    }

    #[test]
    fn custom_blacklist_replaces_default() {
        let safety = NodeSafety::new([2]).unwrap();
        assert!(!safety.is_node_safe(&world_with_node(2), Vec3::ZERO));
        assert!(safety.is_node_safe(&world_with_node(8), Vec3::ZERO));
        assert_eq!(safety.blacklisted().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn config_defaults_to_builtin_list() {
        let config: NodeSafetyConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(
            NodeSafety::from_config(&config).unwrap(),
            NodeSafety::default()
        );
        let config: NodeSafetyConfig =
            serde_yaml::from_str("blacklisted_node_types: [3, 4]").unwrap();
        let safety = NodeSafety::from_config(&config).unwrap();
        assert!(safety.is_blacklisted(3));
        assert!(!safety.is_blacklisted(0));
    }

    #[test]
    fn water_and_major_node_queries() {
        let world = SimulatedWorld::new(SimulatedTerrain {
            water_height: Some(0.0),
            ..SimulatedTerrain::default()
        });
        assert!(is_point_on_water(&world, Vec3::ZERO));
        assert!(!is_point_on_water(&SimulatedWorld::default(), Vec3::ZERO));
        assert_eq!(closest_major_road_node(&world, Vec3::ONE), Vec3::ZERO);

        let roads = SimulatedWorld::new(SimulatedTerrain {
            road_nodes: vec![RoadNode {
                position: Vec3::new(50.0, 0.0, 0.0),
                density: 4,
                node_type: 1,
                major: true,
            }],
            ..SimulatedTerrain::default()
        });
        assert_eq!(
            closest_major_road_node(&roads, Vec3::ONE),
            Vec3::new(50.0, 0.0, 0.0)
        );
    }
}
