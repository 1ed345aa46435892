//! Drop resolution: from a pixel release point to a legal grid position.
//!
//! Resolution runs in three stages and always produces a position:
//!
//! 1. **Exact**: the widget placed at the cell under the pointer.
//! 2. **Ring**: square rings of growing Chebyshev radius around that cell,
//!    up to [`GridConfig::max_search_radius`](crate::GridConfig). Only the
//!    ring perimeter is tested at each radius; the interior was covered by
//!    smaller radii.
//! 3. **First fit**: a row-major scan of the whole grid that ignores the
//!    drop point.
//!
//! The search is anchored at the target cell pulled back onto the grid: no
//! further right than the last column and no further down than the first
//! row past the content. A release far outside the grid therefore searches
//! from the nearest edge instead of from the end of the coordinate space.
//!
//! Ring candidates are visited rows first, then columns, both ascending
//! (see [`ring_offsets`]). That order is the tie-break: the first candidate
//! that validates wins, which is not always the Euclidean nearest.

use dashgrid_core::{GridPoint, GridPosition, Widget};
use serde::{Deserialize, Serialize};

use crate::config::CellMetrics;
use crate::coords::pixel_to_cell;
use crate::occupancy::GridLayout;
use crate::placement::{find_first_available, is_valid_position};

/// A pointer release position in pixels, relative to the grid origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DropPoint {
    pub x: f64,
    pub y: f64,
}

impl DropPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which stage produced a drop position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DropStrategy {
    Exact,
    Ring { radius: u16 },
    FirstFit,
}

/// Outcome of [`resolve_drop_position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropResolution {
    /// Accepted position.
    pub position: GridPosition,
    /// Cell under the pointer, before clamping or search.
    pub target: GridPoint,
    pub strategy: DropStrategy,
}

/// Perimeter offsets of the square ring at `radius`, in scan order.
///
/// Rows (`dy`) outer and columns (`dx`) inner, both ascending; only offsets
/// with `max(|dx|, |dy|) == radius` are yielded. Radius 0 yields the origin.
pub fn ring_offsets(radius: u16) -> impl Iterator<Item = (i32, i32)> {
    let r = i32::from(radius);
    (-r..=r).flat_map(move |dy| {
        (-r..=r)
            .filter(move |dx| dx.abs().max(dy.abs()) == r)
            .map(move |dx| (dx, dy))
    })
}

/// Resolve where `widget` lands when released at `(pixel_x, pixel_y)`.
///
/// The widget is excluded from its own occupancy, so dropping a widget back
/// onto its current cell returns its current position.
pub fn resolve_drop_position(
    widget: &Widget,
    pixel_x: f64,
    pixel_y: f64,
    layout: &GridLayout,
    metrics: &CellMetrics,
) -> DropResolution {
    let target = pixel_to_cell(pixel_x, pixel_y, metrics);
    let size = widget.size().clamped(layout.columns());
    let exclude = Some(widget.id);
    let resolved = |position, strategy| DropResolution {
        position,
        target,
        strategy,
    };

    let anchor = GridPoint::new(
        target.x.min(i32::from(layout.columns()) - 1),
        target.y.min(i32::from(layout.rows())),
    );

    if let (Ok(x), Ok(y)) = (u16::try_from(anchor.x), u16::try_from(anchor.y)) {
        let exact = GridPosition::at(x, y, size);
        if is_valid_position(exact, layout, exclude) {
            return resolved(exact, DropStrategy::Exact);
        }
    }

    for radius in 1..=layout.config().max_search_radius {
        for (dx, dy) in ring_offsets(radius) {
            let (x, y) = anchor.offset_clamped(dx, dy);
            let candidate = GridPosition::at(x, y, size);
            if candidate.right() > layout.columns() {
                continue;
            }
            if is_valid_position(candidate, layout, exclude) {
                return resolved(candidate, DropStrategy::Ring { radius });
            }
        }
    }

    let position = find_first_available(size, layout, exclude);
    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "dashgrid.layout",
        widget = widget.id.get(),
        target_x = target.x,
        target_y = target.y,
        x = position.x,
        y = position.y,
        "ring search exhausted, using first fit"
    );
    resolved(position, DropStrategy::FirstFit)
}
