//! Axis-aligned rectangles - the cells of the grid.
//!
//! ## Rust Lesson #1: Validated Value Types
//!
//! A `Rectangle` can only be built through [`Rectangle::new`], which returns a
//! `Result`. The fields are private, so once you hold a `Rectangle` you KNOW
//! `x_min < x_max` and `y_min < y_max`. No other code has to re-check it.
//!
//! It's also `Copy` - four `f64`s live on the stack and get copied around
//! freely, like numbers in JS. No shared tree, no parent pointers.

use geo_types::{LineString, Polygon, Rect};

use crate::error::InvalidRectangle;

/// An immutable axis-aligned box with `min < max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl Rectangle {
    /// Build a rectangle, rejecting degenerate, inverted or non-finite bounds.
    ///
    /// Argument order is `(x_min, x_max, y_min, y_max)`, axis by axis.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, InvalidRectangle> {
        let finite = x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite();
        // `!(a < b)` also catches NaN, which `a >= b` would let through
        if !finite || !(x_min < x_max) || !(y_min < y_max) {
            return Err(InvalidRectangle { x_min, x_max, y_min, y_max });
        }
        Ok(Self { x_min, y_min, x_max, y_max })
    }

    /// Derive a rectangle from a region envelope.
    ///
    /// Fails when the envelope is flat (the region is a line or a point).
    pub fn from_envelope(envelope: Rect<f64>) -> Result<Self, InvalidRectangle> {
        let (min, max) = (envelope.min(), envelope.max());
        Self::new(min.x, max.x, min.y, max.y)
    }

    #[inline]
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    #[inline]
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    #[inline]
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    #[inline]
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Half the x extent. Refinement compares this against the minimum grid size.
    #[inline]
    pub fn half_size(&self) -> f64 {
        self.width() / 2.0
    }

    /// Render as a closed single-ring polygon.
    ///
    /// Vertex order is fixed: lower-right, upper-right, upper-left,
    /// lower-left, then lower-right again to close the ring.
    pub fn as_polygon(&self) -> Polygon<f64> {
        let ring = LineString::from(vec![
            (self.x_max, self.y_min),
            (self.x_max, self.y_max),
            (self.x_min, self.y_max),
            (self.x_min, self.y_min),
            (self.x_max, self.y_min),
        ]);
        Polygon::new(ring, Vec::new())
    }

    /// Split at the midpoint of each axis into `[NW, NE, SW, SE]`.
    ///
    /// Fails when the cell is so small that a midpoint rounds onto one of
    /// the parent's bounds - a zero-area child is never returned.
    pub fn subdivide(&self) -> Result<[Rectangle; 4], InvalidRectangle> {
        let x_mid = (self.x_min + self.x_max) / 2.0;
        let y_mid = (self.y_min + self.y_max) / 2.0;

        // ## Rust Lesson #2: `?` inside array literals
        //
        // Each `?` returns early on the first bad child, so the array is
        // only ever built from four valid rectangles.
        Ok([
            Rectangle::new(self.x_min, x_mid, y_mid, self.y_max)?,
            Rectangle::new(x_mid, self.x_max, y_mid, self.y_max)?,
            Rectangle::new(self.x_min, x_mid, self.y_min, y_mid)?,
            Rectangle::new(x_mid, self.x_max, self.y_min, y_mid)?,
        ])
    }

    /// Area of the rectangle.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

impl From<Rectangle> for Rect<f64> {
    fn from(rect: Rectangle) -> Self {
        Rect::new((rect.x_min, rect.y_min), (rect.x_max, rect.y_max))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo_types::Coord;
    use proptest::prelude::*;

    fn unit() -> Rectangle {
        Rectangle::new(0.0, 1.0, 0.0, 1.0).unwrap()
    }

    #[test]
    fn rejects_degenerate_and_inverted_bounds() {
        assert!(Rectangle::new(1.0, 1.0, 0.0, 1.0).is_err());
        assert!(Rectangle::new(0.0, 1.0, 2.0, 2.0).is_err());
        assert!(Rectangle::new(2.0, 1.0, 0.0, 1.0).is_err());
        assert!(Rectangle::new(0.0, 1.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn rejects_non_finite_bounds() {
        assert!(Rectangle::new(f64::NAN, 1.0, 0.0, 1.0).is_err());
        assert!(Rectangle::new(0.0, f64::INFINITY, 0.0, 1.0).is_err());
        assert!(Rectangle::new(0.0, 1.0, f64::NEG_INFINITY, 1.0).is_err());
    }

    #[test]
    fn error_carries_bounds() {
        let err = Rectangle::new(3.0, 1.0, 0.0, 1.0).unwrap_err();
        assert_eq!(err, InvalidRectangle { x_min: 3.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 });
    }

    #[test]
    fn from_envelope_rejects_flat_region() {
        let line = Rect::new((0.0, 5.0), (10.0, 5.0));
        assert!(Rectangle::from_envelope(line).is_err());

        let rect = Rectangle::from_envelope(Rect::new((0.0, -2.0), (12.0, 3.0))).unwrap();
        assert_eq!(rect.width(), 12.0);
        assert_eq!(rect.height(), 5.0);
    }

    #[test]
    fn polygon_ring_order_is_fixed() {
        let rect = Rectangle::new(1.0, 3.0, 2.0, 5.0).unwrap();
        let poly = rect.as_polygon();
        let coords: Vec<Coord<f64>> = poly.exterior().coords().copied().collect();
        assert_eq!(
            coords,
            vec![
                Coord { x: 3.0, y: 2.0 },
                Coord { x: 3.0, y: 5.0 },
                Coord { x: 1.0, y: 5.0 },
                Coord { x: 1.0, y: 2.0 },
                Coord { x: 3.0, y: 2.0 },
            ]
        );
        assert!(poly.interiors().is_empty());
    }

    #[test]
    fn subdivide_quadrant_order() {
        let [nw, ne, sw, se] = unit().subdivide().unwrap();
        assert_eq!(nw, Rectangle::new(0.0, 0.5, 0.5, 1.0).unwrap());
        assert_eq!(ne, Rectangle::new(0.5, 1.0, 0.5, 1.0).unwrap());
        assert_eq!(sw, Rectangle::new(0.0, 0.5, 0.0, 0.5).unwrap());
        assert_eq!(se, Rectangle::new(0.5, 1.0, 0.0, 0.5).unwrap());
    }

    #[test]
    fn subdivide_fails_at_precision_limit() {
        // Adjacent doubles: the midpoint rounds onto one of the bounds.
        let lo = 1.0_f64;
        let hi = f64::from_bits(lo.to_bits() + 1);
        let tiny = Rectangle::new(lo, hi, lo, hi).unwrap();
        assert!(tiny.subdivide().is_err());
    }

    #[test]
    fn half_size_uses_width() {
        let rect = Rectangle::new(0.0, 4.0, 0.0, 4.0).unwrap();
        assert_relative_eq!(rect.half_size(), 2.0);
    }

    proptest! {
        #[test]
        fn children_tile_the_parent(
            x in -1.0e6f64..1.0e6,
            y in -1.0e6f64..1.0e6,
            size in 1.0e-3f64..1.0e3,
        ) {
            let parent = Rectangle::new(x, x + size, y, y + size).unwrap();
            let children = parent.subdivide().unwrap();

            // Union covers the parent: the children's extents hit every parent bound
            let min_x = children.iter().map(|c| c.x_min()).fold(f64::INFINITY, f64::min);
            let max_x = children.iter().map(|c| c.x_max()).fold(f64::NEG_INFINITY, f64::max);
            let min_y = children.iter().map(|c| c.y_min()).fold(f64::INFINITY, f64::min);
            let max_y = children.iter().map(|c| c.y_max()).fold(f64::NEG_INFINITY, f64::max);
            prop_assert_eq!((min_x, max_x, min_y, max_y), (parent.x_min(), parent.x_max(), parent.y_min(), parent.y_max()));

            // Areas add up, so there is no gap and no positive-area overlap
            let total: f64 = children.iter().map(Rectangle::area).sum();
            prop_assert!((total - parent.area()).abs() <= parent.area() * 1e-9);

            // Pairwise overlap has zero area
            for i in 0..4 {
                for j in (i + 1)..4 {
                    let (a, b) = (children[i], children[j]);
                    let w = a.x_max().min(b.x_max()) - a.x_min().max(b.x_min());
                    let h = a.y_max().min(b.y_max()) - a.y_min().max(b.y_min());
                    prop_assert!(w <= 0.0 || h <= 0.0, "children {} and {} overlap", i, j);
                }
            }
        }
    }
}
