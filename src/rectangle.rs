//! Axis-aligned bounding rectangle used for quadtree node boundaries and
//! range queries.

use crate::error::{QuadTreeError, Result};
use crate::point::Locatable;
use geo::{Rect, coord};
use serde::{Deserialize, Serialize};

/// A half-open axis-aligned rectangle `[x, x + w) × [y, y + h)`.
///
/// `(x, y)` is the lower-left corner. Width and height are always finite and
/// strictly positive; this is checked once at construction.
///
/// # Examples
///
/// ```
/// use spatio_quadtree::{Location, Rectangle};
///
/// let r = Rectangle::new(0.0, 0.0, 10.0, 10.0)?;
/// assert!(r.contains(&Location::new(1u64, 0.0, 0.0)));
/// // The upper/right edge is excluded.
/// assert!(!r.contains(&Location::new(2u64, 5.0, 10.0)));
/// # Ok::<(), spatio_quadtree::QuadTreeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRectangle", into = "RawRectangle")]
pub struct Rectangle {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

#[derive(Serialize, Deserialize)]
struct RawRectangle {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl TryFrom<RawRectangle> for Rectangle {
    type Error = QuadTreeError;

    fn try_from(raw: RawRectangle) -> Result<Self> {
        Rectangle::new(raw.x, raw.y, raw.w, raw.h)
    }
}

impl From<Rectangle> for RawRectangle {
    fn from(r: Rectangle) -> Self {
        RawRectangle {
            x: r.x,
            y: r.y,
            w: r.w,
            h: r.h,
        }
    }
}

impl Rectangle {
    /// Full longitude/latitude range: `x = -180, y = -90, w = 360, h = 180`.
    pub const WORLD: Rectangle = Rectangle {
        x: -180.0,
        y: -90.0,
        w: 360.0,
        h: 180.0,
    };

    /// Create a rectangle from its lower-left corner and extent.
    ///
    /// Fails with [`QuadTreeError::InvalidRectangle`] if `w` or `h` is not
    /// strictly positive and finite, and with [`QuadTreeError::InvalidInput`]
    /// if the corner is not finite.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Result<Self> {
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(QuadTreeError::InvalidRectangle { w, h });
        }
        if !(x.is_finite() && y.is_finite()) {
            return Err(QuadTreeError::InvalidInput(format!(
                "Rectangle corner must be finite, got: ({}, {})",
                x, y
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Square-ish window centred on `(cx, cy)` extending `half_extent` in
    /// every direction.
    pub fn around(cx: f64, cy: f64, half_extent: f64) -> Result<Self> {
        Self::new(
            cx - half_extent,
            cy - half_extent,
            half_extent * 2.0,
            half_extent * 2.0,
        )
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn w(&self) -> f64 {
        self.w
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    /// Exclusive upper x bound.
    pub fn max_x(&self) -> f64 {
        self.x + self.w
    }

    /// Exclusive upper y bound.
    pub fn max_y(&self) -> f64 {
        self.y + self.h
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// True iff `x <= p.x < x + w` and `y <= p.y < y + h`.
    pub fn contains<P: Locatable + ?Sized>(&self, point: &P) -> bool {
        self.contains_xy(point.x(), point.y())
    }

    /// Coordinate form of [`Rectangle::contains`]. NaN is never contained.
    pub fn contains_xy(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.max_x() && py >= self.y && py < self.max_y()
    }

    /// True iff `other` lies entirely inside this rectangle.
    pub fn contains_rectangle(&self, other: &Rectangle) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// True iff the two regions share a positive area.
    ///
    /// Separating-axis test on both axes. Rectangles that only touch along an
    /// edge do not intersect.
    ///
    /// Edges are computed exactly as [`Rectangle::contains`] computes them,
    /// so a point contained by both rectangles always implies `true`.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    /// The four equal quarters of this rectangle in NW, NE, SW, SE order.
    pub fn quadrants(&self) -> [Rectangle; 4] {
        let (x, y) = (self.x, self.y);
        let (hw, hh) = (self.w / 2.0, self.h / 2.0);
        let quarter = |x, y| Rectangle { x, y, w: hw, h: hh };

        [
            quarter(x, y + hh),
            quarter(x + hw, y + hh),
            quarter(x, y),
            quarter(x + hw, y),
        ]
    }

    /// Convert into a closed `geo::Rect` with the same corners.
    pub fn to_geo_rect(&self) -> Rect {
        Rect::new(
            coord! { x: self.x, y: self.y },
            coord! { x: self.max_x(), y: self.max_y() },
        )
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::WORLD
    }
}

impl From<Rectangle> for Rect {
    fn from(r: Rectangle) -> Self {
        r.to_geo_rect()
    }
}

impl TryFrom<Rect> for Rectangle {
    type Error = QuadTreeError;

    fn try_from(rect: Rect) -> Result<Self> {
        Rectangle::new(rect.min().x, rect.min().y, rect.width(), rect.height())
    }
}
