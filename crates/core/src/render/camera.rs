use crate::{render::unit::ScreenPoint, util};
use nalgebra::{Matrix3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// One row of the viewport transform. Maps a world point to a single camera
/// space value: `offset + x * px + y * py + z * pz`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewAxis {
    pub offset: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl ViewAxis {
    pub const fn new(offset: f32, x: f32, y: f32, z: f32) -> Self {
        Self { offset, x, y, z }
    }
}

/// The affine part of the camera: rotation, translation and whatever else
/// the game bakes in, as three linear combinations of world coordinates. The
/// game recomputes this every frame, so don't hold onto one for longer than
/// that.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Distance into the screen. Must be positive for a point to be visible.
    pub depth: ViewAxis,
    pub horizontal: ViewAxis,
    pub vertical: ViewAxis,
}

impl Viewport {
    /// Get the linear part of the transform as a matrix, one row per axis in
    /// the order depth, horizontal, vertical
    fn matrix(&self) -> Matrix3<f32> {
        let (d, h, v) = (self.depth, self.horizontal, self.vertical);
        Matrix3::new(d.x, d.y, d.z, h.x, h.y, h.z, v.x, v.y, v.z)
    }

    fn offset(&self) -> Vector3<f32> {
        Vector3::new(
            self.depth.offset,
            self.horizontal.offset,
            self.vertical.offset,
        )
    }

    /// Transform a world point into camera space. The output vector holds
    /// `(depth, horizontal, vertical)`. World points are `i64` since a pose
    /// offset plus a model coordinate can overflow `i32`.
    pub fn transform(&self, point: Point3<i64>) -> Vector3<f32> {
        let point = Vector3::new(point.x as f32, point.y as f32, point.z as f32);
        self.offset() + self.matrix() * point
    }
}

/// The perspective part of the camera: where the center of the screen is and
/// how many pixels one unit of perspective-divided camera space covers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolkit {
    pub origin_x: f32,
    pub origin_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

/// A full camera for one frame. This is all you need to turn a point in world
/// space into a pixel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub viewport: Viewport,
    pub toolkit: Toolkit,
}

impl Camera {
    pub fn new(viewport: Viewport, toolkit: Toolkit) -> Self {
        Self { viewport, toolkit }
    }

    /// Project a world point onto the screen. Returns `None` if the point is
    /// outside the view frustum. Points with a depth of zero or less are never
    /// visible, since there's nothing sensible to divide by.
    ///
    /// The output can still be outside the visible screen area! This only
    /// checks against the frustum. See [crate::ScreenConfig::is_on_screen]
    /// for the screen bounds check.
    pub fn project(&self, point: Point3<i64>) -> Option<ScreenPoint> {
        let camera_space = self.viewport.transform(point);
        let depth = camera_space.x;
        let horizontal = camera_space.y;
        let vertical = camera_space.z;

        let in_frustum = depth > 0.0
            && (-depth..=depth).contains(&horizontal)
            && (-depth..=depth).contains(&vertical);
        if !in_frustum {
            return None;
        }

        let toolkit = &self.toolkit;
        let x = toolkit.origin_x + (toolkit.scale_x * horizontal) / depth;
        let y = toolkit.origin_y + (toolkit.scale_y * vertical) / depth;
        Some(ScreenPoint::new(
            util::round_half_up(x as f64) as i32,
            util::round_half_up(y as f64) as i32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    /// A camera that looks straight down +z from the origin, with a 90 degree
    /// field of view, on a 200x100 screen
    fn camera() -> Camera {
        Camera::new(
            Viewport {
                depth: ViewAxis::new(0.0, 0.0, 0.0, 1.0),
                horizontal: ViewAxis::new(0.0, 1.0, 0.0, 0.0),
                vertical: ViewAxis::new(0.0, 0.0, -1.0, 0.0),
            },
            Toolkit {
                origin_x: 100.0,
                origin_y: 50.0,
                scale_x: 100.0,
                scale_y: 50.0,
            },
        )
    }

    #[test]
    fn test_transform() {
        let viewport = Viewport {
            depth: ViewAxis::new(1.0, 1.0, 2.0, 3.0),
            horizontal: ViewAxis::new(-1.0, 0.5, 0.0, 0.0),
            vertical: ViewAxis::new(0.0, 0.0, 0.0, -2.0),
        };
        let out = viewport.transform(Point3::new(1, 2, 3));
        assert_approx_eq!(out.x, 15.0);
        assert_approx_eq!(out.y, -0.5);
        assert_approx_eq!(out.z, -6.0);
    }

    #[test]
    fn test_project() {
        let camera = camera();
        assert_eq!(
            camera.project(Point3::new(0, 0, 10)),
            Some(ScreenPoint::new(100, 50))
        );
        // 100 + 100 * 5 / 10 = 150, 50 + 50 * -5 / 10 = 25
        assert_eq!(
            camera.project(Point3::new(5, 5, 10)),
            Some(ScreenPoint::new(150, 25))
        );
        // Right on the edge of the frustum
        assert_eq!(
            camera.project(Point3::new(-10, -10, 10)),
            Some(ScreenPoint::new(0, 100))
        );
    }

    #[test]
    fn test_project_rounding() {
        let camera = camera();
        // 100 + 100 * 1 / 8 = 112.5, rounds up
        assert_eq!(
            camera.project(Point3::new(1, 0, 8)),
            Some(ScreenPoint::new(113, 50))
        );
        // 100 + 100 * -1 / 8 = 87.5, also rounds up
        assert_eq!(
            camera.project(Point3::new(-1, 0, 8)),
            Some(ScreenPoint::new(88, 50))
        );
    }

    #[test]
    fn test_project_outside_frustum() {
        let camera = camera();
        // Too far to the side
        assert_eq!(camera.project(Point3::new(11, 0, 10)), None);
        assert_eq!(camera.project(Point3::new(0, -11, 10)), None);
        // Behind the camera
        assert_eq!(camera.project(Point3::new(0, 0, -10)), None);
        // Right at the camera
        assert_eq!(camera.project(Point3::new(0, 0, 0)), None);
    }
}
