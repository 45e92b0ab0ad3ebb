use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A point in screen space, in whole pixels.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", x, y)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    /// The legacy "nowhere" value. Anything that failed to project ends up
    /// here when an [Option] isn't an option.
    pub const OFF_SCREEN: Self = Self::new(-1, -1);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert an optional point into the legacy encoding, where `None` is
    /// [ScreenPoint::OFF_SCREEN]
    pub fn or_off_screen(point: Option<ScreenPoint>) -> ScreenPoint {
        point.unwrap_or(Self::OFF_SCREEN)
    }
}

/// An axis-aligned rectangle in screen space. The left and top edges are
/// inside the rectangle, the right and bottom edges are not.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        let right = self.x as i64 + self.width as i64;
        let bottom = self.y as i64 + self.height as i64;
        point.x >= self.x
            && point.y >= self.y
            && (point.x as i64) < right
            && (point.y as i64) < bottom
    }
}

/// A triangle in screen space. This is what a mesh face turns into once all
/// three of its vertices are projected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenTriangle {
    pub a: ScreenPoint,
    pub b: ScreenPoint,
    pub c: ScreenPoint,
}

impl ScreenTriangle {
    pub const fn new(a: ScreenPoint, b: ScreenPoint, c: ScreenPoint) -> Self {
        Self { a, b, c }
    }

    /// The three edges of the triangle, in order: a-b, b-c, c-a
    pub fn edges(&self) -> [(ScreenPoint, ScreenPoint); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }

    /// Hit-test a point against this triangle, using barycentric coordinates.
    ///
    /// `u` is measured along `c - a` and `v` along `b - a`. The point is
    /// inside iff `u >= 0`, `v >= 0`, and `u + v < 1`. That means the edges
    /// touching `a` are inside but the edge from `b` to `c` is **not**. A
    /// degenerate (zero-area) triangle contains nothing.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        let from_a = |p: ScreenPoint| {
            (
                p.x as i128 - self.a.x as i128,
                p.y as i128 - self.a.y as i128,
            )
        };
        let cross = |(x1, y1): (i128, i128), (x2, y2): (i128, i128)| {
            x1 * y2 - y1 * x2
        };
        let v0 = from_a(self.c);
        let v1 = from_a(self.b);
        let v2 = from_a(point);

        // In 2D, u = (v2 x v1) / (v0 x v1) and v = (v0 x v2) / (v0 x v1).
        // Flip signs so the denominator is positive, then compare the
        // numerators directly and skip floats entirely.
        let denom = cross(v0, v1);
        if denom == 0 {
            return false;
        }
        let sign = denom.signum();
        let u_num = cross(v2, v1) * sign;
        let v_num = cross(v0, v2) * sign;
        u_num >= 0 && v_num >= 0 && u_num + v_num < denom * sign
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> ScreenTriangle {
        ScreenTriangle::new(
            ScreenPoint::new(0, 0),
            ScreenPoint::new(10, 0),
            ScreenPoint::new(0, 10),
        )
    }

    #[test]
    fn test_point_display() {
        assert_eq!(ScreenPoint::new(2, 3).to_string(), "(2, 3)");
        assert_eq!(ScreenPoint::OFF_SCREEN.to_string(), "(-1, -1)");
    }

    #[test]
    fn test_or_off_screen() {
        assert_eq!(ScreenPoint::or_off_screen(None), ScreenPoint::OFF_SCREEN);
        assert_eq!(
            ScreenPoint::or_off_screen(Some(ScreenPoint::new(1, 2))),
            ScreenPoint::new(1, 2)
        );
    }

    #[test]
    fn test_rect_contains() {
        let rect = ScreenRect::new(10, 20, 5, 5);
        assert!(rect.contains(ScreenPoint::new(10, 20)));
        assert!(rect.contains(ScreenPoint::new(14, 24)));
        assert!(!rect.contains(ScreenPoint::new(15, 24)));
        assert!(!rect.contains(ScreenPoint::new(14, 25)));
        assert!(!rect.contains(ScreenPoint::new(9, 22)));
    }

    #[test]
    fn test_rect_contains_past_i32() {
        let rect = ScreenRect::new(i32::MAX - 10, 0, i32::MAX, 10);
        assert!(rect.contains(ScreenPoint::new(i32::MAX, 5)));
        assert!(!rect.contains(ScreenPoint::new(i32::MIN, 5)));
    }

    #[test]
    fn test_triangle_contains() {
        let triangle = triangle();
        assert!(triangle.contains(ScreenPoint::new(3, 3)));
        assert!(triangle.contains(ScreenPoint::new(1, 8)));
        // Edges touching a are inclusive
        assert!(triangle.contains(ScreenPoint::new(0, 0)));
        assert!(triangle.contains(ScreenPoint::new(5, 0)));
        assert!(triangle.contains(ScreenPoint::new(0, 5)));
        // The b-c edge is exclusive, including b and c themselves
        assert!(!triangle.contains(ScreenPoint::new(5, 5)));
        assert!(!triangle.contains(ScreenPoint::new(10, 0)));
        assert!(!triangle.contains(ScreenPoint::new(0, 10)));
        // Outside
        assert!(!triangle.contains(ScreenPoint::new(6, 6)));
        assert!(!triangle.contains(ScreenPoint::new(-1, 2)));
    }

    #[test]
    fn test_triangle_contains_winding() {
        // Same triangle, with b and c swapped. The exclusive edge is still b-c
        let triangle = ScreenTriangle::new(
            ScreenPoint::new(0, 0),
            ScreenPoint::new(0, 10),
            ScreenPoint::new(10, 0),
        );
        assert!(triangle.contains(ScreenPoint::new(3, 3)));
        assert!(!triangle.contains(ScreenPoint::new(5, 5)));
    }

    #[test]
    fn test_degenerate_triangle() {
        let line = ScreenTriangle::new(
            ScreenPoint::new(0, 0),
            ScreenPoint::new(5, 5),
            ScreenPoint::new(10, 10),
        );
        assert!(!line.contains(ScreenPoint::new(0, 0)));
        assert!(!line.contains(ScreenPoint::new(5, 5)));
    }

    #[test]
    fn test_triangle_contains_extreme_points() {
        let triangle = triangle();
        for point in [
            ScreenPoint::new(i32::MIN, 0),
            ScreenPoint::new(0, i32::MIN),
            ScreenPoint::new(i32::MAX, i32::MAX),
            ScreenPoint::new(i32::MIN, i32::MAX),
        ] {
            assert!(!triangle.contains(point), "{}", point);
        }

        // A triangle spanning the whole i32 range
        let huge = ScreenTriangle::new(
            ScreenPoint::new(i32::MIN, i32::MIN),
            ScreenPoint::new(i32::MAX, i32::MIN),
            ScreenPoint::new(i32::MIN, i32::MAX),
        );
        assert!(huge.contains(ScreenPoint::new(-100, -100)));
        // The hypotenuse is x + y = -1, which is excluded
        assert!(!huge.contains(ScreenPoint::new(0, -1)));
        assert!(huge.contains(ScreenPoint::new(i32::MIN, i32::MIN)));
        assert!(!huge.contains(ScreenPoint::new(i32::MAX, i32::MAX)));
    }

    #[test]
    fn test_edges() {
        let t = triangle();
        assert_eq!(t.edges(), [(t.a, t.b), (t.b, t.c), (t.c, t.a)]);
    }
}
