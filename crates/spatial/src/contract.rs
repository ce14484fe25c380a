use glam::Vec3;
use waymark_host::WorldService;

use crate::vector::SpatialVec3;

/// Anything with a place in the world.
///
/// Implementors only supply `position`; every distance query follows from it.
/// `Vec3` implements the trait too, so each query accepts either a raw
/// position or another entity. Placement is read-only here: entities that can
/// move expose that on their own type.
pub trait Spatial {
    fn position(&self) -> Vec3;

    /// Euclidean distance to `other`.
    fn distance_to(&self, other: &dyn Spatial) -> f32 {
        self.position().distance(other.position())
    }

    /// Distance to `other` on the ground plane.
    fn distance_to_2d(&self, other: &dyn Spatial) -> f32 {
        self.position().distance_2d(other.position())
    }

    /// Route length to `other` through the host's navigable paths.
    fn travel_distance_to(&self, world: &dyn WorldService, other: &dyn Spatial) -> f32 {
        self.position().travel_distance(world, other.position())
    }

    /// Compass heading in degrees, in `[0, 360)`, towards `other`.
    /// Zero when both share a position.
    fn heading_towards(&self, other: &dyn Spatial) -> f32 {
        self.position().heading_towards(other.position())
    }
}

impl Spatial for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waymark_host::SimulatedWorld;

    struct Beacon(Vec3);

    impl Spatial for Beacon {
        fn position(&self) -> Vec3 {
            self.0
        }
    }

    #[test]
    fn entity_and_vector_targets_agree() {
        let a = Beacon(Vec3::new(0.0, 0.0, 0.0));
        let b = Beacon(Vec3::new(3.0, 4.0, 12.0));
        assert_eq!(a.distance_to(&b), a.distance_to(&b.0));
        assert_eq!(a.distance_to(&b), 13.0);
        assert_eq!(a.distance_to_2d(&b), 5.0);
        assert_eq!(a.distance_to_2d(&Vec3::new(3.0, 4.0, 0.0)), 5.0);
    }

    #[test]
    fn vector_is_its_own_position() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.position(), v);
        assert_eq!(v.distance_to(&Beacon(v)), 0.0);
    }

    #[test]
    fn travel_distance_uses_host_route() {
        let world = SimulatedWorld::default();
        let a = Beacon(Vec3::ZERO);
        assert_eq!(a.travel_distance_to(&world, &Vec3::new(3.0, 4.0, 1.0)), 8.0);
    }

    #[test]
    fn heading_accepts_entity_and_vector_targets() {
        let a = Beacon(Vec3::ZERO);
        let north = Beacon(Vec3::new(0.0, 10.0, 0.0));
        assert!((a.heading_towards(&north) - 0.0).abs() < 1e-4);
        assert!((a.heading_towards(&Vec3::new(-10.0, 0.0, 5.0)) - 90.0).abs() < 1e-4);

        let s: &dyn Spatial = &Vec3::new(0.0, 10.0, 0.0);
        assert!((s.heading_towards(&a) - 180.0).abs() < 1e-4);
        // a raw vector receiver goes through the contract explicitly
        assert!((Spatial::heading_towards(&Vec3::ZERO, &north) - 0.0).abs() < 1e-4);
    }

    #[test]
    fn heading_to_same_position_is_zero() {
        let a = Beacon(Vec3::new(2.0, 2.0, 2.0));
        assert_eq!(a.heading_towards(&Beacon(a.0)), 0.0);
        assert_eq!(a.heading_towards(&a.0), 0.0);
    }

    #[test]
    fn contract_is_object_safe() {
        let items: Vec<Box<dyn Spatial>> = vec![
            Box::new(Beacon(Vec3::new(10.0, 0.0, 0.0))),
            Box::new(Vec3::new(0.0, 2.0, 0.0)),
        ];
        let nearest = items
            .iter()
            .min_by(|a, b| a.distance_to(&Vec3::ZERO).total_cmp(&b.distance_to(&Vec3::ZERO)))
            .unwrap();
        assert_eq!(nearest.position(), Vec3::new(0.0, 2.0, 0.0));
    }
}
