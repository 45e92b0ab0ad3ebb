use crate::util;
use nalgebra::Point2;
use std::cmp;

/// A closed polygon with integer vertices, in tile x/y space. The last vertex
/// connects back to the first. Vertices can be in either winding order.
///
/// Points that fall exactly on an edge or vertex are considered **inside** the
/// polygon. That means a one-vertex polygon contains exactly its vertex, and a
/// two-vertex polygon contains every grid point on its segment. It also means
/// the rectangle from `(0, 0)` to `(4, 4)` contains all 25 grid points in that
/// range, not just the 16 in its half-open interior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TilePolygon {
    vertices: Vec<Point2<i32>>,
}

/// An inclusive, axis-aligned bounding box on the tile grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TileBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TileBounds {
    /// Number of columns covered, including both edges
    pub fn width(&self) -> u64 {
        (self.max_x as i64 - self.min_x as i64) as u64 + 1
    }

    /// Number of rows covered, including both edges
    pub fn height(&self) -> u64 {
        (self.max_y as i64 - self.min_y as i64) as u64 + 1
    }

    /// Every grid point in the box. Iterates column by column: x is the outer
    /// loop and y the inner one.
    pub fn points(self) -> impl Iterator<Item = Point2<i32>> {
        (self.min_x..=self.max_x).flat_map(move |x| {
            (self.min_y..=self.max_y).map(move |y| Point2::new(x, y))
        })
    }
}

impl TilePolygon {
    pub fn new(vertices: impl IntoIterator<Item = Point2<i32>>) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
        }
    }

    /// Get the smallest box that holds every vertex. `None` iff the polygon
    /// has no vertices.
    pub fn bounds(&self) -> Option<TileBounds> {
        let first = self.vertices.first()?;
        let init = TileBounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(self.vertices.iter().fold(init, |bounds, v| TileBounds {
            min_x: cmp::min(bounds.min_x, v.x),
            min_y: cmp::min(bounds.min_y, v.y),
            max_x: cmp::max(bounds.max_x, v.x),
            max_y: cmp::max(bounds.max_y, v.y),
        }))
    }

    /// Iterate over each edge as a pair of `(start, end)` vertices, including
    /// the closing edge from the last vertex back to the first.
    fn edges(&self) -> impl Iterator<Item = (Point2<i32>, Point2<i32>)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Is the grid point `(x, y)` inside the polygon or on its boundary?
    /// Interior points use even-odd crossing. All the math is done in
    /// integers so there are no rounding errors right at the edges. Products
    /// of two coordinate deltas need more than 64 bits, hence the `i128`.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let p = Point2::new(x as i128, y as i128);
        let mut inside = false;
        for (a, b) in self.edges() {
            let a = Point2::new(a.x as i128, a.y as i128);
            let b = Point2::new(b.x as i128, b.y as i128);
            if on_segment(a, b, p) {
                return true;
            }

            if (a.y > p.y) != (b.y > p.y) {
                // The ray going +x from p crosses this edge iff p is left of
                // the intersection point. Cross-multiply to stay in integers,
                // flipping the comparison if the denominator is negative.
                let lhs = (p.x - a.x) * (b.y - a.y);
                let rhs = (b.x - a.x) * (p.y - a.y);
                let crosses = if b.y > a.y { lhs < rhs } else { lhs > rhs };
                if crosses {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Twice the signed area, via the shoelace formula. Positive for
    /// counter-clockwise vertices (in a y-up space), negative for clockwise.
    fn double_signed_area(&self) -> i128 {
        self.edges().map(|(a, b)| cross_factor(a, b)).sum()
    }

    /// Unsigned area of the polygon, in square tiles
    pub fn area(&self) -> f64 {
        (self.double_signed_area() as f64 / 2.0).abs()
    }

    /// Get the area-weighted centroid of the polygon, rounded to the nearest
    /// grid point. Returns `None` if the polygon has zero area (fewer than
    /// three vertices, or all of them collinear).
    ///
    /// **Note:** the area is unsigned but the per-edge weights are signed, so
    /// for clockwise polygons the raw centroid comes out negated. Each axis is
    /// run through `abs()` after rounding to undo that. The side effect is that
    /// a polygon whose real centroid has a negative coordinate gets mirrored
    /// across that axis. Don't rely on this for polygons that straddle
    /// negative coordinates.
    pub fn center(&self) -> Option<Point2<i32>> {
        let area = self.area();
        if area == 0.0 {
            return None;
        }

        let (cx, cy) =
            self.edges().fold((0i128, 0i128), |(cx, cy), (a, b)| {
                let factor = cross_factor(a, b);
                (
                    cx + (a.x as i128 + b.x as i128) * factor,
                    cy + (a.y as i128 + b.y as i128) * factor,
                )
            });
        let factor = 1.0 / (6.0 * area);
        let cx = util::round_half_up(cx as f64 * factor).abs();
        let cy = util::round_half_up(cy as f64 * factor).abs();
        Some(Point2::new(cx as i32, cy as i32))
    }
}

/// The per-edge shoelace term, `a.x * b.y - b.x * a.y`
fn cross_factor(a: Point2<i32>, b: Point2<i32>) -> i128 {
    a.x as i128 * b.y as i128 - b.x as i128 * a.y as i128
}

/// Is `p` on the closed segment from `a` to `b`?
fn on_segment(a: Point2<i128>, b: Point2<i128>, p: Point2<i128>) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    cross == 0
        && cmp::min(a.x, b.x) <= p.x
        && p.x <= cmp::max(a.x, b.x)
        && cmp::min(a.y, b.y) <= p.y
        && p.y <= cmp::max(a.y, b.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn polygon(points: &[(i32, i32)]) -> TilePolygon {
        TilePolygon::new(points.iter().map(|&(x, y)| Point2::new(x, y)))
    }

    #[test]
    fn test_bounds() {
        assert_eq!(polygon(&[]).bounds(), None);
        let bounds = polygon(&[(1, 5), (-2, 3), (4, -1)]).bounds().unwrap();
        assert_eq!(
            bounds,
            TileBounds {
                min_x: -2,
                min_y: -1,
                max_x: 4,
                max_y: 5
            }
        );
        assert_eq!(bounds.width(), 7);
        assert_eq!(bounds.height(), 7);
        assert_eq!(bounds.points().count(), 49);
    }

    #[test]
    fn test_bounds_span_whole_axis() {
        let bounds = polygon(&[(i32::MIN, 0), (i32::MAX, 0), (0, i32::MAX)])
            .bounds()
            .unwrap();
        assert_eq!(bounds.width(), 1 << 32);
        assert_eq!(bounds.height(), (i32::MAX as u64) + 1);
    }

    #[test]
    fn test_contains_extreme_vertices() {
        let triangle =
            polygon(&[(i32::MIN, i32::MIN), (i32::MAX, i32::MIN), (0, i32::MAX)]);
        assert!(triangle.contains(0, 0));
        assert!(triangle.contains(i32::MIN, i32::MIN));
        assert!(!triangle.contains(i32::MIN, i32::MAX));
        assert!(!triangle.contains(i32::MAX, i32::MAX));
        assert!(triangle.area() > 0.0);
    }

    #[test]
    fn test_bounds_points_order() {
        let bounds = TileBounds {
            min_x: 0,
            min_y: 0,
            max_x: 1,
            max_y: 1,
        };
        assert_eq!(
            bounds.points().collect::<Vec<_>>(),
            vec![
                Point2::new(0, 0),
                Point2::new(0, 1),
                Point2::new(1, 0),
                Point2::new(1, 1)
            ]
        );
    }

    #[test]
    fn test_contains_square() {
        let square = polygon(&[(0, 0), (4, 0), (4, 4), (0, 4)]);
        // Interior
        assert!(square.contains(2, 2));
        assert!(square.contains(1, 3));
        // Edges and corners
        assert!(square.contains(0, 0));
        assert!(square.contains(4, 4));
        assert!(square.contains(4, 2));
        assert!(square.contains(2, 0));
        // Outside
        assert!(!square.contains(5, 2));
        assert!(!square.contains(-1, 0));
        assert!(!square.contains(2, 5));
    }

    #[test]
    fn test_contains_winding_independent() {
        let ccw = polygon(&[(0, 0), (6, 0), (0, 6)]);
        let cw = polygon(&[(0, 0), (0, 6), (6, 0)]);
        for x in -1..=7 {
            for y in -1..=7 {
                assert_eq!(ccw.contains(x, y), cw.contains(x, y), "({x}, {y})");
            }
        }
        assert!(ccw.contains(3, 3)); // On the hypotenuse
        assert!(!ccw.contains(4, 3));
    }

    #[test]
    fn test_contains_concave() {
        // A U shape, open at the top
        let u = polygon(&[
            (0, 0),
            (6, 0),
            (6, 6),
            (4, 6),
            (4, 2),
            (2, 2),
            (2, 6),
            (0, 6),
        ]);
        assert!(u.contains(1, 5));
        assert!(u.contains(5, 5));
        assert!(u.contains(3, 1));
        assert!(u.contains(3, 2)); // Bottom of the notch
        assert!(!u.contains(3, 4)); // Inside the notch
    }

    #[test]
    fn test_contains_degenerate() {
        assert!(!polygon(&[]).contains(0, 0));

        let point = polygon(&[(3, 3)]);
        assert!(point.contains(3, 3));
        assert!(!point.contains(3, 4));

        let line = polygon(&[(0, 0), (4, 2)]);
        assert!(line.contains(2, 1));
        assert!(!line.contains(1, 1));
    }

    #[test]
    fn test_area() {
        let ccw = polygon(&[(0, 0), (4, 0), (4, 4), (0, 4)]);
        assert_approx_eq!(ccw.area(), 16.0);
        let cw = polygon(&[(0, 0), (0, 4), (4, 4), (4, 0)]);
        assert_approx_eq!(cw.area(), 16.0);
        assert_approx_eq!(polygon(&[(0, 0), (6, 0), (0, 6)]).area(), 18.0);
        assert_approx_eq!(polygon(&[(0, 0), (4, 4)]).area(), 0.0);
    }

    #[test]
    fn test_center() {
        let square = polygon(&[(0, 0), (4, 0), (4, 4), (0, 4)]);
        assert_eq!(square.center(), Some(Point2::new(2, 2)));
        // Clockwise gives the same answer
        let square = polygon(&[(0, 0), (0, 4), (4, 4), (4, 0)]);
        assert_eq!(square.center(), Some(Point2::new(2, 2)));

        let rect = polygon(&[(10, 20), (15, 20), (15, 30), (10, 30)]);
        // (12.5, 25) rounds up
        assert_eq!(rect.center(), Some(Point2::new(13, 25)));

        let triangle = polygon(&[(0, 0), (6, 0), (0, 6)]);
        assert_eq!(triangle.center(), Some(Point2::new(2, 2)));
    }

    #[test]
    fn test_center_mirrors_negative() {
        // Real centroid is (-8, 2), but the abs() flips x
        let rect = polygon(&[(-10, 0), (-6, 0), (-6, 4), (-10, 4)]);
        assert_eq!(rect.center(), Some(Point2::new(8, 2)));
    }

    #[test]
    fn test_center_zero_area() {
        assert_eq!(polygon(&[]).center(), None);
        assert_eq!(polygon(&[(1, 1)]).center(), None);
        assert_eq!(polygon(&[(0, 0), (2, 2), (4, 4)]).center(), None);
    }
}
