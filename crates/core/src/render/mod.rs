//! Everything related to getting from 3D world space onto the 2D screen.
//!
//! ## Coordinate Systems
//!
//! ### World Space
//!
//! World space is 3D and uses integer units that are much finer than tiles.
//! The axes are `x` (east-west), `y` (height, up is positive), and `z`
//! (north-south). Note that a mesh anchored at world position `(x, y)` is
//! offset along world `x` and world **`z`**, since world `y` is height. See
//! [crate::MeshProjector] for details.
//!
//! ### Camera Space
//!
//! The [Viewport](camera::Viewport) transforms a world point into three
//! values: depth, horizontal, and vertical. A point is inside the view frustum
//! iff both the horizontal and vertical values are within `[-depth, depth]`.
//!
//! ### Screen Space
//!
//! Integer pixel coordinates, with the origin in the top-left. The
//! [Toolkit](camera::Toolkit) maps the perspective-divided camera values onto
//! pixels.

pub mod camera;
pub mod config;
#[cfg(feature = "svg")]
pub mod svg;
pub mod unit;

/// Something that lines can be drawn onto, e.g. a debug overlay or an image.
/// All coordinates are in screen space.
pub trait LineSurface {
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);
}
