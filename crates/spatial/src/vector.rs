use glam::Vec3;
use waymark_host::WorldService;

/// Text did not hold exactly three comma-separated numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected three comma-separated numbers")]
pub struct ParseVectorError;

/// World-space queries on positions.
///
/// Subtraction, Euclidean distance and normalization come from glam
/// (`a - b`, `Vec3::distance`, `Vec3::normalize_or_zero`).
pub trait SpatialVec3 {
    /// Distance on the ground plane. Vertical separation is ignored.
    fn distance_2d(self, other: Vec3) -> f32;

    /// Compass heading in degrees, in `[0, 360)`, from `self` towards `target`.
    fn heading_towards(self, target: Vec3) -> f32;

    /// Length of the navigable route to `other`, as reported by the host.
    fn travel_distance(self, world: &dyn WorldService, other: Vec3) -> f32;
}

impl SpatialVec3 for Vec3 {
    fn distance_2d(self, other: Vec3) -> f32 {
        self.truncate().distance(other.truncate())
    }

    fn heading_towards(self, target: Vec3) -> f32 {
        direction_to_heading((target - self).normalize_or_zero())
    }

    fn travel_distance(self, world: &dyn WorldService, other: Vec3) -> f32 {
        world.travel_distance(self, other)
    }
}

/// Convert a direction to a compass heading in degrees.
///
/// 0 faces +y (north) and the heading grows counter-clockwise, so 90 faces -x.
/// A zero direction yields 0.
pub fn direction_to_heading(direction: Vec3) -> f32 {
    let heading = (-direction.x).atan2(direction.y).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative angles
    if heading >= 360.0 { 0.0 } else { heading }
}

/// Parse `"x, y, z"` into a vector.
///
/// Exactly three comma-separated fields are required. Whitespace around each
/// field is ignored and numbers use `.` as the decimal point regardless of
/// locale. Every failure yields the same error.
pub fn parse_vector(text: &str) -> Result<Vec3, ParseVectorError> {
    if text.is_empty() {
        return Err(ParseVectorError);
    }

    let mut parts = text.split(',');
    let mut coords = [0.0f32; 3];
    for coord in &mut coords {
        let part = parts.next().ok_or(ParseVectorError)?;
        *coord = part.trim().parse().map_err(|_| ParseVectorError)?;
    }
    if parts.next().is_some() {
        return Err(ParseVectorError);
    }

    Ok(Vec3::from_array(coords))
}

/// Permissive form of [`parse_vector`]: `(true, v)` on success, otherwise
/// `(false, Vec3::ZERO)`. `None` stands for absent text.
pub fn try_parse_vector(text: Option<&str>) -> (bool, Vec3) {
    match text.map(parse_vector) {
        Some(Ok(v)) => (true, v),
        _ => (false, Vec3::ZERO),
    }
}

/// Canonical text form, readable by [`parse_vector`].
pub fn format_vector(v: Vec3) -> String {
    format!("{}, {}, {}", v.x, v.y, v.z)
}
