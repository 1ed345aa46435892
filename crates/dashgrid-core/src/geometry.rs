#![forbid(unsafe_code)]

//! Geometric primitives for the dashboard grid.
//!
//! Grid values are in grid units (columns and rows), never pixels. Pixel
//! values only appear in [`PixelRect`], at the presentation boundary.

use serde::{Deserialize, Serialize};

/// The rectangle a widget occupies on the dashboard grid.
///
/// Uses grid coordinates (0-indexed, origin at top-left). Rows grow
/// downward without limit; columns are bounded by the dashboard config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    /// Left column (inclusive).
    pub x: u16,
    /// Top row (inclusive).
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl GridPosition {
    /// Create a new grid position.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Place a size at the given origin.
    #[inline]
    pub const fn at(x: u16, y: u16, size: GridSize) -> Self {
        Self::new(x, y, size.width, size.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Area in grid cells.
    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if the position covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when both far edges fit in `u16` without saturating.
    ///
    /// `right()` and `bottom()` saturate, so a rectangle that fails this
    /// check reports fewer cells than it claims and compares as
    /// non-overlapping with everything at the edge of the coordinate space.
    #[inline]
    pub const fn is_addressable(&self) -> bool {
        self.x.checked_add(self.width).is_some() && self.y.checked_add(self.height).is_some()
    }

    /// The size component of this position.
    #[inline]
    pub const fn size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Same size, moved to a new origin.
    #[inline]
    #[must_use]
    pub const fn with_origin(self, x: u16, y: u16) -> Self {
        Self::new(x, y, self.width, self.height)
    }

    /// Check if a cell is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Axis-aligned overlap test.
    ///
    /// Two rectangles overlap unless one lies entirely to the left, right,
    /// above or below the other. Touching edges do not overlap.
    #[inline]
    pub const fn overlaps(&self, other: &GridPosition) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &GridPosition) -> Option<GridPosition> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(GridPosition::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Iterate the cells covered by this rectangle in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u16, u16)> + use<> {
        let (x0, x1) = (self.x, self.right());
        (self.y..self.bottom()).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }
}

/// A widget footprint without an origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Clamp to at least one cell on each axis and at most `columns` wide.
    #[inline]
    #[must_use]
    pub fn clamped(self, columns: u16) -> Self {
        Self {
            width: self.width.clamp(1, columns.max(1)),
            height: self.height.max(1),
        }
    }
}

impl From<(u16, u16)> for GridSize {
    fn from((width, height): (u16, u16)) -> Self {
        Self::new(width, height)
    }
}

/// A signed grid cell, used for targets that may fall off the top-left edge
/// (a drop released left of column zero, for example).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)` and clamp into the non-negative quadrant.
    #[inline]
    pub fn offset_clamped(self, dx: i32, dy: i32) -> (u16, u16) {
        (
            clamp_to_u16(self.x.saturating_add(dx)),
            clamp_to_u16(self.y.saturating_add(dy)),
        )
    }
}

#[inline]
fn clamp_to_u16(value: i32) -> u16 {
    value.clamp(0, i32::from(u16::MAX)) as u16
}

/// A rectangle in pixels, as the rendering layer positions a widget.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}
