use serde::{Deserialize, Serialize};

/// Host visual type used when none is given.
pub const DEFAULT_CHECKPOINT_TYPE: i32 = 47;

/// Creation parameters for [`Checkpoint::create`](crate::Checkpoint::create).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckpointOptions {
    /// Host-defined visual type.
    pub checkpoint_type: i32,
    /// Cylinder radius.
    pub radius: f32,
    /// Cylinder height while the player is inside the radius.
    pub near_height: f32,
    /// Cylinder height while the player is outside the radius.
    pub far_height: f32,
    /// Snap the vertical coordinate to the ground before creating.
    pub force_ground: bool,
    /// Number drawn inside numbered types.
    pub number: i32,
}

impl Default for CheckpointOptions {
    fn default() -> Self {
        Self {
            checkpoint_type: DEFAULT_CHECKPOINT_TYPE,
            radius: 5.0,
            near_height: 3.0,
            far_height: 3.0,
            force_ground: false,
            number: 0,
        }
    }
}
