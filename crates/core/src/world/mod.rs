//! Types that live on the tile grid: single [Tile]s, the [Locatable]
//! capability for anything standing on a tile, and polygon-backed [Region]s.
//!
//! ## Coordinate System
//!
//! The world is a flat square grid, stacked into discrete vertical levels
//! called **planes**. A tile is addressed by integer `(x, y, plane)`. Geometry
//! never mixes planes: a region lives on exactly one plane, and a tile on
//! any other plane is never inside it, even if its x/y would be.

pub mod polygon;
pub mod region;
pub mod tile;

use crate::world::tile::Tile;

/// Anything that has a current location on the tile grid, e.g. a player, an
/// NPC, or a tile itself. The location can change between calls, so callers
/// should never cache it across frames.
pub trait Locatable {
    /// The tile this thing currently occupies. Return [Tile::NIL] if it
    /// doesn't currently have a valid location.
    fn location(&self) -> Tile;
}

impl Locatable for Tile {
    fn location(&self) -> Tile {
        *self
    }
}

impl<T: Locatable + ?Sized> Locatable for &T {
    fn location(&self) -> Tile {
        (**self).location()
    }
}
