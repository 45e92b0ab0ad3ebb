//! Gridcast is a small geometry kit for reasoning about a 3D tile world from a
//! 2D screen. It has two independent halves:
//!
//! - [MeshProjector] takes a triangulated model anchored somewhere in the
//!   world and projects it onto the screen through the current camera. From
//!   there you can hit-test screen points, grab on-screen triangles, draw a
//!   wireframe, or pick a random visible face.
//! - [Region] is a polygon over the tile grid. It answers containment
//!   questions, enumerates every tile inside it, and finds central, random,
//!   and nearest tiles.
//!
//! Neither half knows anything about a live game. Everything that changes per
//! frame (camera, ground heights, screen mode, overlays) comes in through the
//! [Scene] trait, and randomness comes from whatever [rand::Rng] you hand in.
//!
//! ```
//! use gridcast::{Region, Tile};
//!
//! let region =
//!     Region::from_corners(Tile::new(0, 0, 0), Tile::new(4, 4, 0)).unwrap();
//! assert_eq!(region.len(), 25);
//! assert_eq!(region.central_tile(), Some(Tile::new(2, 2, 0)));
//! ```

mod model;
mod render;
mod scene;
mod util;
mod world;

pub use crate::{
    model::{
        mesh::{Mesh, MeshError},
        Anchor, MeshProjector, Pose, ProjectedVertex, Scene,
    },
    render::{
        camera::{Camera, Toolkit, ViewAxis, Viewport},
        config::{ScreenConfig, ScreenMode},
        unit::{ScreenPoint, ScreenRect, ScreenTriangle},
        LineSurface,
    },
    scene::{SceneConfig, StaticAnchor, StaticScene},
    world::{
        polygon::{TileBounds, TilePolygon},
        region::{Region, RegionError, TileSet},
        tile::Tile,
        Locatable,
    },
};

#[cfg(feature = "svg")]
pub use crate::render::svg::SvgSurface;
