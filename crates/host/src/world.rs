use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use waymark_common::{ResourceHandle, Rgba};

use crate::service::{CheckpointSpawn, GroundQuery, NodeProperties, WorldService};

/// A record of every mutation issued to the simulated host.
///
/// Calls on unknown or released handles are recorded too, so the log shows
/// exactly what the caller asked the host to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostEvent {
    CheckpointCreated {
        handle: ResourceHandle,
        spawn: CheckpointSpawn,
    },
    CylinderHeightSet {
        handle: ResourceHandle,
        near_height: f32,
        far_height: f32,
        radius: f32,
    },
    ScaleSet {
        handle: ResourceHandle,
        scale: f32,
    },
    IconScaleSet {
        handle: ResourceHandle,
        scale: f32,
    },
    ColorSet {
        handle: ResourceHandle,
        color: Rgba,
    },
    IconColorSet {
        handle: ResourceHandle,
        color: Rgba,
    },
    CheckpointDeleted {
        handle: ResourceHandle,
    },
}

impl HostEvent {
    /// Handle the event targets.
    pub fn handle(&self) -> ResourceHandle {
        match self {
            Self::CheckpointCreated { handle, .. }
            | Self::CylinderHeightSet { handle, .. }
            | Self::ScaleSet { handle, .. }
            | Self::IconScaleSet { handle, .. }
            | Self::ColorSet { handle, .. }
            | Self::IconColorSet { handle, .. }
            | Self::CheckpointDeleted { handle } => *handle,
        }
    }
}

/// Cylinder geometry of a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cylinder {
    pub near_height: f32,
    pub far_height: f32,
    pub radius: f32,
}

/// Host-side state of a live checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointRecord {
    pub spawn: CheckpointSpawn,
    pub cylinder: Option<Cylinder>,
    pub scale: f32,
    pub icon_scale: f32,
    pub color: Rgba,
    /// Unset until the icon is recolored.
    pub icon_color: Option<Rgba>,
}

impl CheckpointRecord {
    fn new(spawn: CheckpointSpawn) -> Self {
        Self {
            spawn,
            cylinder: None,
            scale: spawn.scale,
            icon_scale: 1.0,
            color: spawn.color,
            icon_color: None,
        }
    }
}

/// A path-finding node placed in the simulated terrain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadNode {
    pub position: Vec3,
    #[serde(default)]
    pub density: u32,
    pub node_type: i32,
    /// Major nodes are candidates for `closest_major_road_node`.
    #[serde(default)]
    pub major: bool,
}

/// Static terrain answering the simulated host's spatial queries.
///
/// The ground is a flat plane and water a flat surface; both are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedTerrain {
    pub ground_height: Option<f32>,
    pub water_height: Option<f32>,
    pub road_nodes: Vec<RoadNode>,
    /// Maximum distance at which `node_properties` resolves a node.
    pub node_search_radius: f32,
}

impl Default for SimulatedTerrain {
    fn default() -> Self {
        Self {
            ground_height: None,
            water_height: None,
            road_nodes: Vec::new(),
            node_search_radius: 30.0,
        }
    }
}

/// Deterministic in-memory host.
///
/// Allocates handles sequentially, mirrors host-side checkpoint state in a
/// BTreeMap for deterministic iteration, and keeps an append-only log of
/// every mutation it receives. Handles are never reused; allocating past
/// `i32::MAX` panics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedWorld {
    terrain: SimulatedTerrain,
    checkpoints: BTreeMap<ResourceHandle, CheckpointRecord>,
    first_handle: i32,
    /// Wider than a handle so exhaustion is representable.
    next_handle: i64,
    #[serde(skip)]
    event_log: Vec<HostEvent>,
}

impl Default for SimulatedWorld {
    fn default() -> Self {
        Self::new(SimulatedTerrain::default())
    }
}

impl SimulatedWorld {
    /// Create a host over the given terrain. Handles start at 1.
    pub fn new(terrain: SimulatedTerrain) -> Self {
        Self {
            terrain,
            checkpoints: BTreeMap::new(),
            first_handle: 1,
            next_handle: 1,
            event_log: Vec::new(),
        }
    }

    /// Start handle allocation at `first` instead of 1.
    pub fn with_first_handle(mut self, first: i32) -> Self {
        self.first_handle = first;
        self.next_handle = i64::from(first);
        self
    }

    /// Handle the allocator started from.
    pub fn first_handle(&self) -> i32 {
        self.first_handle
    }

    /// Static terrain answering the spatial queries.
    pub fn terrain(&self) -> &SimulatedTerrain {
        &self.terrain
    }

    /// Number of checkpoints not yet released.
    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }

    /// Host-side state of a live checkpoint.
    pub fn checkpoint(&self, handle: ResourceHandle) -> Option<&CheckpointRecord> {
        self.checkpoints.get(&handle)
    }

    /// All live checkpoints in handle order.
    pub fn checkpoints(&self) -> &BTreeMap<ResourceHandle, CheckpointRecord> {
        &self.checkpoints
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[HostEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Rebuild the checkpoint table from a recorded log over default terrain.
    ///
    /// `first_handle` must match the recording world's
    /// [`first_handle`](Self::first_handle) for the allocators to agree.
    pub fn replay(first_handle: i32, events: &[HostEvent]) -> Self {
        let mut world = Self::default().with_first_handle(first_handle);
        for event in events {
            world.apply(event);
        }
        world
    }

    /// FNV-1a hash of the checkpoint table, in handle order.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.next_handle.to_le_bytes());
        for (handle, record) in &self.checkpoints {
            mix(&mut h, &handle.0.to_le_bytes());
            mix(&mut h, &record.spawn.checkpoint_type.to_le_bytes());
            mix(&mut h, &record.spawn.number.to_le_bytes());
            for v in [record.spawn.position, record.spawn.target] {
                mix(&mut h, &v.x.to_le_bytes());
                mix(&mut h, &v.y.to_le_bytes());
                mix(&mut h, &v.z.to_le_bytes());
            }
            // each optional field is prefixed with a presence byte
            match record.cylinder {
                Some(c) => {
                    mix(&mut h, &[1]);
                    mix(&mut h, &c.near_height.to_le_bytes());
                    mix(&mut h, &c.far_height.to_le_bytes());
                    mix(&mut h, &c.radius.to_le_bytes());
                }
                None => mix(&mut h, &[0]),
            }
            mix(&mut h, &record.scale.to_le_bytes());
            mix(&mut h, &record.icon_scale.to_le_bytes());
            mix(&mut h, &record.color.to_array());
            match record.icon_color {
                Some(c) => {
                    mix(&mut h, &[1]);
                    mix(&mut h, &c.to_array());
                }
                None => mix(&mut h, &[0]),
            }
        }
        h
    }

    fn record(&mut self, event: HostEvent) {
        tracing::debug!(?event, "host call");
        self.apply(&event);
        self.event_log.push(event);
    }

    fn apply(&mut self, event: &HostEvent) {
        let handle = event.handle();
        if let HostEvent::CheckpointCreated { spawn, .. } = event {
            self.checkpoints.insert(handle, CheckpointRecord::new(*spawn));
            self.next_handle = self.next_handle.max(i64::from(handle.0) + 1);
            return;
        }
        if let HostEvent::CheckpointDeleted { .. } = event {
            if self.checkpoints.remove(&handle).is_none() {
                tracing::warn!(%handle, "release of unknown checkpoint handle");
            }
            return;
        }

        let Some(record) = self.checkpoints.get_mut(&handle) else {
            tracing::warn!(%handle, "checkpoint call on unknown handle ignored");
            return;
        };
        match *event {
            HostEvent::CylinderHeightSet {
                near_height,
                far_height,
                radius,
                ..
            } => {
                record.cylinder = Some(Cylinder {
                    near_height,
                    far_height,
                    radius,
                });
            }
            HostEvent::ScaleSet { scale, .. } => record.scale = scale,
            HostEvent::IconScaleSet { scale, .. } => record.icon_scale = scale,
            HostEvent::ColorSet { color, .. } => record.color = color,
            HostEvent::IconColorSet { color, .. } => record.icon_color = Some(color),
            HostEvent::CheckpointCreated { .. } | HostEvent::CheckpointDeleted { .. } => {}
        }
    }
}

impl WorldService for SimulatedWorld {
    /// `atop` has no effect: the simulated ground has a single surface.
    fn ground_height(&self, _position: Vec3, query: GroundQuery) -> Option<f32> {
        let water = if query.consider_water {
            self.terrain.water_height
        } else {
            None
        };
        match (self.terrain.ground_height, water) {
            (Some(ground), Some(water)) => Some(ground.max(water)),
            (ground, water) => ground.or(water),
        }
    }

    /// Panics once every handle up to `i32::MAX` has been handed out.
    fn create_checkpoint(&mut self, spawn: CheckpointSpawn) -> ResourceHandle {
        let Ok(next) = i32::try_from(self.next_handle) else {
            panic!("simulated host ran out of checkpoint handles");
        };
        let handle = ResourceHandle(next);
        self.record(HostEvent::CheckpointCreated { handle, spawn });
        handle
    }

    fn set_checkpoint_cylinder_height(
        &mut self,
        handle: ResourceHandle,
        near_height: f32,
        far_height: f32,
        radius: f32,
    ) {
        self.record(HostEvent::CylinderHeightSet {
            handle,
            near_height,
            far_height,
            radius,
        });
    }

    fn set_checkpoint_scale(&mut self, handle: ResourceHandle, scale: f32) {
        self.record(HostEvent::ScaleSet { handle, scale });
    }

    fn set_checkpoint_icon_scale(&mut self, handle: ResourceHandle, scale: f32) {
        self.record(HostEvent::IconScaleSet { handle, scale });
    }

    fn set_checkpoint_color(&mut self, handle: ResourceHandle, color: Rgba) {
        self.record(HostEvent::ColorSet { handle, color });
    }

    fn set_checkpoint_icon_color(&mut self, handle: ResourceHandle, color: Rgba) {
        self.record(HostEvent::IconColorSet { handle, color });
    }

    fn delete_checkpoint(&mut self, handle: ResourceHandle) {
        self.record(HostEvent::CheckpointDeleted { handle });
    }

    /// Water only counts where its surface is above the ground plane.
    fn water_height(&self, _position: Vec3) -> Option<f32> {
        match (self.terrain.water_height, self.terrain.ground_height) {
            (Some(water), Some(ground)) if ground >= water => None,
            (water, _) => water,
        }
    }

    fn closest_major_road_node(&self, position: Vec3) -> Vec3 {
        self.terrain
            .road_nodes
            .iter()
            .filter(|n| n.major)
            .min_by(|a, b| {
                a.position
                    .distance_squared(position)
                    .total_cmp(&b.position.distance_squared(position))
            })
            .map(|n| n.position)
            .unwrap_or(Vec3::ZERO)
    }

    fn node_properties(&self, position: Vec3) -> Option<NodeProperties> {
        self.terrain
            .road_nodes
            .iter()
            .filter(|n| n.position.distance(position) <= self.terrain.node_search_radius)
            .min_by(|a, b| {
                a.position
                    .distance_squared(position)
                    .total_cmp(&b.position.distance_squared(position))
            })
            .map(|n| NodeProperties {
                density: n.density,
                node_type: n.node_type,
            })
    }

    /// Streets run on a grid: L1 distance on the ground plane plus the climb.
    fn travel_distance(&self, from: Vec3, to: Vec3) -> f32 {
        let d = (to - from).abs();
        d.x + d.y + d.z
    }
}
