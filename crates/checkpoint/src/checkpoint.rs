use glam::Vec3;
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use waymark_common::{ResourceHandle, Rgba};
use waymark_host::{CheckpointSpawn, GroundQuery, WorldService};
use waymark_spatial::{Spatial, format_vector};

use crate::options::CheckpointOptions;

/// Ground probe used by `force_ground`: water counts as ground.
const GROUND_SNAP: GroundQuery = GroundQuery {
    consider_water: true,
    atop: false,
};

/// A checkpoint placed in the world.
///
/// Wraps the handle of a native checkpoint. The host keeps rendering it until
/// [`Checkpoint::delete`] is called; dropping the value does not release it.
/// Position and target are fixed at creation.
///
/// Two checkpoints are equal when their handles are equal, whatever their
/// color, tag or deleted flag.
pub struct Checkpoint {
    handle: ResourceHandle,
    position: Vec3,
    pointing_to: Vec3,
    color: Rgba,
    deleted: bool,
    tag: Option<Box<dyn Any>>,
}

impl Checkpoint {
    /// Allocate a checkpoint at `position` and set up its cylinder.
    ///
    /// With `force_ground`, the vertical coordinate is replaced by the ground
    /// height when the host reports one. The checkpoint points at its own
    /// position.
    pub fn create<W: WorldService + ?Sized>(
        world: &mut W,
        mut position: Vec3,
        color: Rgba,
        options: &CheckpointOptions,
    ) -> Self {
        if options.force_ground {
            if let Some(ground) = world.ground_height(position, GROUND_SNAP) {
                position.z = ground;
            }
        }

        let handle = world.create_checkpoint(CheckpointSpawn {
            checkpoint_type: options.checkpoint_type,
            position,
            target: position,
            scale: 1.0,
            color,
            number: options.number,
        });
        world.set_checkpoint_cylinder_height(
            handle,
            options.near_height,
            options.far_height,
            options.radius,
        );
        tracing::debug!(%handle, ?position, "checkpoint created");

        Self {
            handle,
            position,
            pointing_to: position,
            color,
            deleted: false,
            tag: None,
        }
    }

    /// Host handle identifying this checkpoint.
    pub fn handle(&self) -> ResourceHandle {
        self.handle
    }

    /// Position the checkpoint was created at, after any ground snap.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Where the checkpoint arrow points.
    pub fn pointing_to(&self) -> Vec3 {
        self.pointing_to
    }

    /// Last color set through [`Checkpoint::set_color`].
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Whether `delete` has been called.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Attach caller data. Replaces any previous tag.
    pub fn set_tag<T: Any>(&mut self, tag: T) {
        self.tag = Some(Box::new(tag));
    }

    /// The attached tag, if there is one of type `T`.
    pub fn tag<T: Any>(&self) -> Option<&T> {
        self.tag.as_deref().and_then(|t| t.downcast_ref())
    }

    /// Remove and return the tag.
    pub fn take_tag(&mut self) -> Option<Box<dyn Any>> {
        self.tag.take()
    }

    /// Resize the cylinder volume.
    pub fn set_cylinder_height<W: WorldService + ?Sized>(
        &self,
        world: &mut W,
        near_height: f32,
        far_height: f32,
        radius: f32,
    ) {
        world.set_checkpoint_cylinder_height(self.handle, near_height, far_height, radius);
    }

    /// Scale the checkpoint marker.
    pub fn set_scale<W: WorldService + ?Sized>(&self, world: &mut W, scale: f32) {
        world.set_checkpoint_scale(self.handle, scale);
    }

    /// Scale the icon drawn inside the marker.
    pub fn set_icon_scale<W: WorldService + ?Sized>(&self, world: &mut W, scale: f32) {
        world.set_checkpoint_icon_scale(self.handle, scale);
    }

    /// Recolor the checkpoint and remember the color locally.
    pub fn set_color<W: WorldService + ?Sized>(&mut self, world: &mut W, color: impl Into<Rgba>) {
        let color = color.into();
        self.color = color;
        world.set_checkpoint_color(self.handle, color);
    }

    /// Recolor the icon. Only the host tracks the icon color.
    pub fn set_icon_color<W: WorldService + ?Sized>(&self, world: &mut W, color: impl Into<Rgba>) {
        world.set_checkpoint_icon_color(self.handle, color.into());
    }

    /// Mark deleted and release the native checkpoint.
    ///
    /// Every call issues a release to the host, including repeated ones.
    pub fn delete<W: WorldService + ?Sized>(&mut self, world: &mut W) {
        if self.deleted {
            tracing::debug!(handle = %self.handle, "checkpoint released again");
        }
        self.deleted = true;
        world.delete_checkpoint(self.handle);
    }
}

impl Spatial for Checkpoint {
    fn position(&self) -> Vec3 {
        self.position
    }
}

impl PartialEq for Checkpoint {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Checkpoint {}

impl Hash for Checkpoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
    }
}

impl fmt::Debug for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkpoint")
            .field("handle", &self.handle)
            .field("position", &self.position)
            .field("pointing_to", &self.pointing_to)
            .field("color", &self.color)
            .field("deleted", &self.deleted)
            .field("tagged", &self.tag.is_some())
            .finish()
    }
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Checkpoint # {}; {}]",
            self.handle,
            format_vector(self.position)
        )
    }
}
