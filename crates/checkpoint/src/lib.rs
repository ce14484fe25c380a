//! Checkpoint entity: a marked volume in the world backed by a host handle.
//!
//! # Invariants
//! - A checkpoint is only ever built by `Checkpoint::create`.
//! - The handle is the identity; equality and hashing ignore all other state.
//! - Deletion is one-way, and releasing the handle is always explicit.

pub mod checkpoint;
pub mod options;

pub use checkpoint::Checkpoint;
pub use options::{CheckpointOptions, DEFAULT_CHECKPOINT_TYPE};

/// Crate name and version.
pub fn crate_info() -> &'static str {
    concat!("waymark-checkpoint v", env!("CARGO_PKG_VERSION"))
}
