// Surface detection around the character: ground, walls, ledges, ceiling

use glam::Vec2;
use log::{trace, warn};

use crate::engine::physics::{GeometryQueries, LayerMask};

/// Gap kept between the downward corner ray and the wall face
pub const CORNER_SKIN: f32 = 0.015;

/// Probe origins relative to the body center, authored for facing right.
/// The x component is mirrored when facing left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeAnchors {
    pub ground: Vec2,
    pub wall: Vec2,
    pub ledge: Vec2,
    pub ceiling: Vec2,
}

/// Result of every probe at once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceChecks {
    pub grounded: bool,
    pub touching_wall: bool,
    pub touching_wall_back: bool,
    /// The ledge-height ray still hits the wall
    pub touching_ledge: bool,
    pub touching_ceiling: bool,
}

impl SurfaceChecks {
    /// Wall at body height with open space above it
    pub fn ledge_detected(&self) -> bool {
        self.touching_wall && !self.touching_ledge
    }
}

/// Stateless set of geometry queries positioned by the character's pose
#[derive(Debug, Clone)]
pub struct GeometryProbe {
    anchors: ProbeAnchors,
    ground_check_radius: f32,
    wall_check_distance: f32,
    mask: LayerMask,
}

impl GeometryProbe {
    pub fn new(
        anchors: ProbeAnchors,
        ground_check_radius: f32,
        wall_check_distance: f32,
        mask: LayerMask,
    ) -> Self {
        Self {
            anchors,
            ground_check_radius,
            wall_check_distance,
            mask,
        }
    }

    pub fn anchors(&self) -> &ProbeAnchors {
        &self.anchors
    }

    /// World position of an anchor for the given pose
    pub fn anchor_position(anchor: Vec2, position: Vec2, facing: i32) -> Vec2 {
        position + Vec2::new(anchor.x * facing as f32, anchor.y)
    }

    pub fn is_grounded<Q: GeometryQueries + ?Sized>(
        &self,
        queries: &Q,
        position: Vec2,
        facing: i32,
    ) -> bool {
        let point = Self::anchor_position(self.anchors.ground, position, facing);
        queries.is_overlapping(point, self.ground_check_radius, self.mask)
    }

    pub fn is_touching_ceiling<Q: GeometryQueries + ?Sized>(
        &self,
        queries: &Q,
        position: Vec2,
        facing: i32,
    ) -> bool {
        let point = Self::anchor_position(self.anchors.ceiling, position, facing);
        queries.is_overlapping(point, self.ground_check_radius, self.mask)
    }

    pub fn is_touching_wall<Q: GeometryQueries + ?Sized>(
        &self,
        queries: &Q,
        position: Vec2,
        facing: i32,
    ) -> bool {
        let origin = Self::anchor_position(self.anchors.wall, position, facing);
        queries
            .raycast(origin, Vec2::new(facing as f32, 0.0), self.wall_check_distance, self.mask)
            .hit
    }

    /// Wall behind the character, probed from the mirrored wall anchor
    pub fn is_touching_wall_back<Q: GeometryQueries + ?Sized>(
        &self,
        queries: &Q,
        position: Vec2,
        facing: i32,
    ) -> bool {
        let origin = Self::anchor_position(self.anchors.wall, position, -facing);
        queries
            .raycast(origin, Vec2::new(-facing as f32, 0.0), self.wall_check_distance, self.mask)
            .hit
    }

    pub fn is_touching_ledge<Q: GeometryQueries + ?Sized>(
        &self,
        queries: &Q,
        position: Vec2,
        facing: i32,
    ) -> bool {
        let origin = Self::anchor_position(self.anchors.ledge, position, facing);
        queries
            .raycast(origin, Vec2::new(facing as f32, 0.0), self.wall_check_distance, self.mask)
            .hit
    }

    /// Run every probe
    pub fn survey<Q: GeometryQueries + ?Sized>(
        &self,
        queries: &Q,
        position: Vec2,
        facing: i32,
    ) -> SurfaceChecks {
        let checks = SurfaceChecks {
            grounded: self.is_grounded(queries, position, facing),
            touching_wall: self.is_touching_wall(queries, position, facing),
            touching_wall_back: self.is_touching_wall_back(queries, position, facing),
            touching_ledge: self.is_touching_ledge(queries, position, facing),
            touching_ceiling: self.is_touching_ceiling(queries, position, facing),
        };
        trace!("survey at {position} facing {facing}: {checks:?}");
        checks
    }

    /// Locate the top corner of the wall in front of the character.
    ///
    /// A horizontal ray from the wall anchor finds the wall face, then a
    /// downward ray just past that face, starting at ledge height, finds the
    /// top surface.
    pub fn corner_position<Q: GeometryQueries + ?Sized>(
        &self,
        queries: &Q,
        position: Vec2,
        facing: i32,
    ) -> Vec2 {
        let dir = facing as f32;
        let wall = Self::anchor_position(self.anchors.wall, position, facing);
        let ledge = Self::anchor_position(self.anchors.ledge, position, facing);

        let x_hit = queries.raycast(wall, Vec2::new(dir, 0.0), self.wall_check_distance, self.mask);
        if !x_hit.hit {
            warn!("corner probe found no wall face from {wall}");
        }
        let x_dist = x_hit.distance;

        let drop = self.anchors.ledge.y - self.anchors.wall.y;
        let y_origin = ledge + Vec2::new((x_dist + CORNER_SKIN) * dir, 0.0);
        let y_hit = queries.raycast(y_origin, Vec2::NEG_Y, drop, self.mask);
        if !y_hit.hit {
            warn!("corner probe found no ledge top below {y_origin}");
        }

        Vec2::new(wall.x + x_dist * dir, ledge.y - y_hit.distance)
    }

    /// Whether a column of `height` above the corner is free of geometry
    pub fn has_headroom<Q: GeometryQueries + ?Sized>(
        &self,
        queries: &Q,
        corner: Vec2,
        facing: i32,
        height: f32,
    ) -> bool {
        let origin = corner + Vec2::new(CORNER_SKIN * facing as f32, CORNER_SKIN);
        !queries.raycast(origin, Vec2::Y, height, self.mask).hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::player::data::DEFAULT_PLAYER_DATA;
    use crate::game::player::test_support::TestWorld;
    use approx::assert_abs_diff_eq;

    fn probe() -> GeometryProbe {
        let data = DEFAULT_PLAYER_DATA;
        GeometryProbe::new(
            data.anchors,
            data.ground_check_radius,
            data.wall_check_distance,
            data.what_is_ground,
        )
    }

    #[test]
    fn test_anchor_mirrors_with_facing() {
        let anchor = Vec2::new(0.375, 0.25);
        assert_eq!(
            GeometryProbe::anchor_position(anchor, Vec2::new(1.0, 1.0), 1),
            Vec2::new(1.375, 1.25)
        );
        assert_eq!(
            GeometryProbe::anchor_position(anchor, Vec2::new(1.0, 1.0), -1),
            Vec2::new(0.625, 1.25)
        );
    }

    #[test]
    fn test_grounded_on_floor() {
        let world = TestWorld::level();
        let probe = probe();
        assert!(probe.is_grounded(&world, Vec2::new(0.0, 0.75), 1));
        assert!(!probe.is_grounded(&world, Vec2::new(0.0, 2.0), 1));
    }

    #[test]
    fn test_wall_front_and_back() {
        let world = TestWorld::level();
        let probe = probe();
        let pos = Vec2::new(1.5, 0.75);
        assert!(probe.is_touching_wall(&world, pos, 1));
        assert!(!probe.is_touching_wall(&world, pos, -1));
        assert!(probe.is_touching_wall_back(&world, pos, -1));
        assert!(!probe.is_touching_wall_back(&world, pos, 1));
    }

    #[test]
    fn test_ledge_detection_below_top() {
        let world = TestWorld::level();
        let checks = probe().survey(&world, Vec2::new(1.5, 2.5), 1);
        assert!(checks.touching_wall);
        assert!(!checks.touching_ledge);
        assert!(checks.ledge_detected());
        assert!(!checks.grounded);
    }

    #[test]
    fn test_no_ledge_mid_wall() {
        let world = TestWorld::level();
        let checks = probe().survey(&world, Vec2::new(1.5, 1.5), 1);
        assert!(checks.touching_wall);
        assert!(checks.touching_ledge);
        assert!(!checks.ledge_detected());
    }

    #[test]
    fn test_corner_position() {
        let world = TestWorld::level();
        let corner = probe().corner_position(&world, Vec2::new(1.5, 2.5), 1);
        assert_abs_diff_eq!(corner.x, 2.0, epsilon = 1e-4);
        assert_abs_diff_eq!(corner.y, 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_corner_is_deterministic() {
        let world = TestWorld::level();
        let probe = probe();
        let pos = Vec2::new(1.5, 2.5);
        assert_eq!(
            probe.corner_position(&world, pos, 1),
            probe.corner_position(&world, pos, 1)
        );
    }

    #[test]
    fn test_ceiling_and_headroom() {
        let mut world = TestWorld::level();
        world.add_solid(Vec2::new(-1.0, 2.0), Vec2::new(1.0, 3.0), LayerMask::GROUND);
        let probe = probe();
        assert!(probe.is_touching_ceiling(&world, Vec2::new(0.0, 1.3), 1));
        assert!(!probe.is_touching_ceiling(&world, Vec2::new(0.0, 0.75), 1));

        assert!(probe.has_headroom(&world, Vec2::new(2.0, 3.0), 1, 1.5));
        world.add_solid(Vec2::new(1.5, 4.0), Vec2::new(4.0, 5.0), LayerMask::GROUND);
        assert!(!probe.has_headroom(&world, Vec2::new(2.0, 3.0), 1, 1.5));
    }

    #[test]
    fn test_mask_filters_layers() {
        let mut world = TestWorld::empty();
        world.add_solid(Vec2::new(-5.0, -1.0), Vec2::new(5.0, 0.0), LayerMask::from_bits(0b1000));
        assert!(!probe().is_grounded(&world, Vec2::new(0.0, 0.75), 1));
    }
}
