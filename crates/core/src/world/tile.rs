use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A single cell in the world grid, addressed by x, y and plane. Tiles are
/// immutable values. Two tiles are equal iff all three components are equal.
///
/// There's one reserved value, [Tile::NIL], that doesn't refer to any real
/// tile. Most of this crate uses [Option] to express "no tile", but `NIL`
/// sticks around for [crate::Locatable] implementors that don't currently have
/// a location.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {}, {})", x, y, plane)]
pub struct Tile {
    x: i32,
    y: i32,
    plane: i32,
}

impl Tile {
    /// The "no tile" value
    pub const NIL: Self = Self::new(-1, -1, -1);

    pub const fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn plane(&self) -> i32 {
        self.plane
    }

    /// Is this a real tile, i.e. anything but [Tile::NIL]?
    pub fn is_valid(&self) -> bool {
        *self != Self::NIL
    }

    /// Straight-line distance between the centers of two tiles, in tiles.
    /// Only x and y are considered, the plane has no effect on distance.
    pub fn distance_to(&self, other: Tile) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        dx.hypot(dy)
    }

    /// Convert an optional tile into the legacy encoding, where `None` is
    /// [Tile::NIL]
    pub fn or_nil(tile: Option<Tile>) -> Tile {
        tile.unwrap_or(Self::NIL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_distance_to() {
        let origin = Tile::new(0, 0, 0);
        assert_approx_eq!(origin.distance_to(origin), 0.0);
        assert_approx_eq!(origin.distance_to(Tile::new(3, 4, 0)), 5.0);
        assert_approx_eq!(Tile::new(3, 4, 0).distance_to(origin), 5.0);
        assert_approx_eq!(origin.distance_to(Tile::new(-1, 1, 0)), 2f64.sqrt());
        // Planes don't matter
        assert_approx_eq!(origin.distance_to(Tile::new(3, 4, 2)), 5.0);

        // Deltas that don't fit in an i32
        let far = Tile::new(i32::MAX, 0, 0);
        let near = Tile::new(-5, 0, 0);
        assert_approx_eq!(far.distance_to(near), i32::MAX as f64 + 5.0);
        assert_approx_eq!(
            Tile::new(i32::MIN, i32::MIN, 0)
                .distance_to(Tile::new(i32::MAX, i32::MAX, 0)),
            (u32::MAX as f64) * 2f64.sqrt(),
            1e-3
        );
    }

    #[test]
    fn test_nil() {
        assert!(!Tile::NIL.is_valid());
        assert!(Tile::new(-1, -1, 0).is_valid());
        assert_eq!(Tile::or_nil(None), Tile::NIL);
        assert_eq!(Tile::or_nil(Some(Tile::new(1, 2, 3))), Tile::new(1, 2, 3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Tile::new(3, -4, 1).to_string(), "(3, -4, 1)");
    }

    #[test]
    fn test_serde() {
        assert_tokens(
            &Tile::new(3, 4, 1),
            &[
                Token::Struct {
                    name: "Tile",
                    len: 3,
                },
                Token::Str("x"),
                Token::I32(3),
                Token::Str("y"),
                Token::I32(4),
                Token::Str("plane"),
                Token::I32(1),
                Token::StructEnd,
            ],
        );
    }
}
