//! Shared value types used across the waymark crates.

pub mod types;

pub use types::{ResourceHandle, Rgba};

/// Crate name and version.
pub fn crate_info() -> &'static str {
    concat!("waymark-common v", env!("CARGO_PKG_VERSION"))
}
