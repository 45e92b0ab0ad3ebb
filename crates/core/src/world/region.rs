use crate::{
    timed,
    world::{polygon::TilePolygon, tile::Tile, Locatable},
};
use derive_more::Display;
use fnv::FnvBuildHasher;
use indexmap::IndexSet;
use log::{debug, warn};
use nalgebra::Point2;
use rand::Rng;
use std::{cmp, sync::OnceLock};

/// An ordered set of tiles, with fast lookups. Iteration order is the order
/// the tiles were enumerated in.
pub type TileSet = IndexSet<Tile, FnvBuildHasher>;

/// Errors that can occur while building a [Region]. These are returned wrapped
/// in [anyhow::Error], so use `downcast_ref` if you need to tell them apart.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum RegionError {
    /// A region needs at least one tile to define its shape
    #[display(fmt = "region requires at least one tile")]
    Empty,
    /// Every tile in a region has to be on the same plane
    #[display(fmt = "mismatched planes {} != {}", expected, actual)]
    MismatchedPlanes { expected: i32, actual: i32 },
}

impl std::error::Error for RegionError {}

/// A polygonal area of the tile grid, on a single plane. The polygon's
/// vertices are tile coordinates, and every tile whose x/y falls inside the
/// polygon (boundary included) is part of the region.
///
/// Regions are immutable. The full list of tiles inside the region is
/// computed the first time something needs it, then cached for the life of the
/// region. The cache is behind a [OnceLock], so a region can be shared between
/// threads.
#[derive(Clone, Debug)]
pub struct Region {
    polygon: TilePolygon,
    plane: i32,
    tiles: OnceLock<TileSet>,
}

impl Region {
    /// Build a rectangular region from two opposite corners. The corners can
    /// be given in any order.
    ///
    /// The two corners that share `t1`'s minimum y use `t1`'s plane, and the
    /// other two use `t2`'s. In practice that just means both corners need to
    /// be on the same plane, otherwise this fails like [Region::new] would.
    pub fn from_corners(t1: Tile, t2: Tile) -> anyhow::Result<Self> {
        let min_x = cmp::min(t1.x(), t2.x());
        let max_x = cmp::max(t1.x(), t2.x());
        let min_y = cmp::min(t1.y(), t2.y());
        let max_y = cmp::max(t1.y(), t2.y());
        Self::new(&[
            Tile::new(min_x, min_y, t1.plane()),
            Tile::new(max_x, min_y, t1.plane()),
            Tile::new(max_x, max_y, t2.plane()),
            Tile::new(min_x, max_y, t2.plane()),
        ])
    }

    /// Build a region from the vertices of a polygon, in order. The polygon is
    /// closed automatically, so don't repeat the first tile at the end.
    ///
    /// Returns an error if no tiles are given ([RegionError::Empty]) or if the
    /// tiles aren't all on the same plane ([RegionError::MismatchedPlanes]).
    pub fn new(tiles: &[Tile]) -> anyhow::Result<Self> {
        let plane = tiles.first().ok_or(RegionError::Empty)?.plane();
        if let Some(tile) = tiles.iter().find(|tile| tile.plane() != plane) {
            return Err(RegionError::MismatchedPlanes {
                expected: plane,
                actual: tile.plane(),
            }
            .into());
        }

        let polygon =
            TilePolygon::new(tiles.iter().map(|t| Point2::new(t.x(), t.y())));
        Ok(Self {
            polygon,
            plane,
            tiles: OnceLock::new(),
        })
    }

    /// The plane that every tile in this region is on
    pub fn plane(&self) -> i32 {
        self.plane
    }

    /// The polygon that defines the shape of this region
    pub fn polygon(&self) -> &TilePolygon {
        &self.polygon
    }

    /// Is the given thing currently inside this region? It has to be on the
    /// same plane, and its x/y has to fall inside the polygon.
    pub fn contains(&self, locatable: &impl Locatable) -> bool {
        let tile = locatable.location();
        tile.plane() == self.plane && self.polygon.contains(tile.x(), tile.y())
    }

    /// Are **all** of the given things inside this region? Vacuously true if
    /// nothing is given.
    pub fn contains_all<L: Locatable>(
        &self,
        locatables: impl IntoIterator<Item = L>,
    ) -> bool {
        locatables
            .into_iter()
            .all(|locatable| self.contains(&locatable))
    }

    /// Get the tile closest to the area-weighted center of the region's
    /// polygon. Returns `None` if the polygon has zero area. See
    /// [TilePolygon::center] for a caveat about negative coordinates.
    pub fn central_tile(&self) -> Option<Tile> {
        match self.polygon.center() {
            Some(center) => Some(Tile::new(center.x, center.y, self.plane)),
            None => {
                warn!("Region {:?} has zero area, it has no center", self);
                None
            }
        }
    }

    /// Pick a tile from this region, uniformly at random. Returns `None` if
    /// the region contains no tiles.
    pub fn random_tile(&self, rng: &mut impl Rng) -> Option<Tile> {
        let tiles = self.tiles();
        if tiles.is_empty() {
            return None;
        }
        tiles.get_index(rng.gen_range(0..tiles.len())).copied()
    }

    /// Find the tile in this region that's closest to the given thing, by
    /// straight-line distance. If multiple tiles are equally close, the
    /// first one in enumeration order wins (see [Region::tiles]).
    ///
    /// Returns `None` if the locatable is missing or has no valid location,
    /// or if the region contains no tiles.
    pub fn closest_to<L: Locatable>(
        &self,
        locatable: Option<&L>,
    ) -> Option<Tile> {
        let target = locatable?.location();
        if !target.is_valid() {
            return None;
        }

        let mut closest: Option<(Tile, f64)> = None;
        for tile in self.tiles() {
            let distance = target.distance_to(*tile);
            if closest.map_or(true, |(_, best)| distance < best) {
                closest = Some((*tile, distance));
            }
        }
        closest.map(|(tile, _)| tile)
    }

    /// Get every tile inside this region. Tiles are ordered by x, then by y.
    /// This is computed on the first call, then cached.
    pub fn tiles(&self) -> &TileSet {
        self.tiles.get_or_init(|| {
            timed!("Region tile enumeration", self.enumerate_tiles())
        })
    }

    /// Number of tiles inside this region
    pub fn len(&self) -> usize {
        self.tiles().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles().is_empty()
    }

    /// Test every grid point within the polygon's bounding box for
    /// containment.
    fn enumerate_tiles(&self) -> TileSet {
        let bounds = match self.polygon.bounds() {
            Some(bounds) => bounds,
            None => return TileSet::default(),
        };

        let tiles: TileSet = bounds
            .points()
            .filter(|p| self.polygon.contains(p.x, p.y))
            .map(|p| Tile::new(p.x, p.y, self.plane))
            .collect();
        debug!(
            "Enumerated {} tiles in a {}x{} bounding box",
            tiles.len(),
            bounds.width(),
            bounds.height()
        );
        tiles
    }
}
