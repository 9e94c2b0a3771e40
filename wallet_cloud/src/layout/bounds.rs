//! Axis-aligned bounding volume over the laid-out points, used to fit the
//! camera to whatever the data produced.

use bevy::math::Vec3;

/// Half-extent floor so a degenerate (empty or single-point) set still
/// yields a box the camera rig can frame.
const MIN_HALF_EXTENT: f32 = 1.0;

/// Center and size of the point cloud's bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingVolume {
    pub center: Vec3,
    pub size: Vec3,
}

impl BoundingVolume {
    /// Pure min/max reduction. Non-finite positions are ignored rather than
    /// poisoning the box.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut min = Vec3::MAX;
        let mut max = Vec3::MIN;
        let mut any = false;
        for point in points {
            if !point.is_finite() {
                continue;
            }
            min = min.min(point);
            max = max.max(point);
            any = true;
        }
        if !any {
            min = Vec3::ZERO;
            max = Vec3::ZERO;
        }

        let center = (min + max) / 2.0;
        let size = (max - min).max(Vec3::splat(MIN_HALF_EXTENT * 2.0));
        Self { center, size }
    }

    pub fn max_dimension(&self) -> f32 {
        self.size.x.max(self.size.y).max(self.size.z)
    }

    /// Viewing distance that frames the whole box, floored so a sparse
    /// scene does not put the camera inside a sprite.
    pub fn camera_distance(&self, min_distance: f32, fill: f32) -> f32 {
        (self.max_dimension() * fill).max(min_distance)
    }
}
