use glam::Vec3;
use serde::{Deserialize, Serialize};
use waymark_common::{ResourceHandle, Rgba};

/// Flags for a ground-height probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroundQuery {
    /// Treat the water surface as ground.
    pub consider_water: bool,
    /// Return the topmost surface instead of the one below the probe.
    pub atop: bool,
}

/// Arguments for allocating a native checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckpointSpawn {
    /// Host-defined visual type.
    pub checkpoint_type: i32,
    pub position: Vec3,
    /// Where the checkpoint arrow points.
    pub target: Vec3,
    pub scale: f32,
    pub color: Rgba,
    /// Number drawn inside numbered checkpoint types.
    pub number: i32,
}

/// Properties of a path-finding node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeProperties {
    pub density: u32,
    pub node_type: i32,
}

/// Spatial queries and checkpoint lifecycle primitives of the host engine.
///
/// Production code binds an adapter over the engine's native calls; tests and
/// the CLI use [`SimulatedWorld`](crate::SimulatedWorld). All calls run on the
/// simulation thread.
pub trait WorldService {
    /// Height of the ground below (or above) `position`, if any.
    fn ground_height(&self, position: Vec3, query: GroundQuery) -> Option<f32>;

    /// Allocate a native checkpoint. Allocation is assumed to succeed.
    fn create_checkpoint(&mut self, spawn: CheckpointSpawn) -> ResourceHandle;

    fn set_checkpoint_cylinder_height(
        &mut self,
        handle: ResourceHandle,
        near_height: f32,
        far_height: f32,
        radius: f32,
    );

    fn set_checkpoint_scale(&mut self, handle: ResourceHandle, scale: f32);

    fn set_checkpoint_icon_scale(&mut self, handle: ResourceHandle, scale: f32);

    fn set_checkpoint_color(&mut self, handle: ResourceHandle, color: Rgba);

    fn set_checkpoint_icon_color(&mut self, handle: ResourceHandle, color: Rgba);

    /// Release the native checkpoint. Behavior on an already released handle
    /// is up to the host.
    fn delete_checkpoint(&mut self, handle: ResourceHandle);

    /// Water surface height at `position`, if there is water there.
    fn water_height(&self, position: Vec3) -> Option<f32>;

    /// Closest major road node. Zero vector when nothing resolves.
    fn closest_major_road_node(&self, position: Vec3) -> Vec3;

    /// Properties of the node nearest to `position`, if one resolves.
    fn node_properties(&self, position: Vec3) -> Option<NodeProperties>;

    /// Length of the navigable route between two points.
    fn travel_distance(&self, from: Vec3, to: Vec3) -> f32;
}
