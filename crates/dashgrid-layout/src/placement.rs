//! Placement validation and the first-fit scan.

use dashgrid_core::{GridPosition, GridSize, WidgetId};

use crate::occupancy::GridLayout;

/// Check whether `pos` can be committed on `layout`.
///
/// The rectangle must be non-empty, addressable (its far edges must not
/// overflow `u16`) and end at or before the last column.
/// Every covered cell inside the current rows must be free or owned by
/// `exclude` (a widget validating its own move or resize). Rows at or past
/// `layout.rows()` are always free: the grid grows downward without limit.
pub fn is_valid_position(pos: GridPosition, layout: &GridLayout, exclude: Option<WidgetId>) -> bool {
    if pos.is_empty() || !pos.is_addressable() || pos.right() > layout.columns() {
        return false;
    }
    let last_row = pos.bottom().min(layout.rows());
    for y in pos.y..last_row {
        for x in pos.x..pos.right() {
            if let Some(id) = layout.occupant(x, y)
                && Some(id) != exclude
            {
                return false;
            }
        }
    }
    true
}

/// Row-major first-fit search for a free rectangle of `size`.
///
/// Scans rows `0..rows + scan_buffer_rows`, columns left to right, and
/// returns the first position that validates. Sizes wider than the grid are
/// clamped to the column count. If the scan comes up empty the widget is
/// appended below all content; that terminal position is re-validated row by
/// row rather than trusted.
pub fn find_first_available(
    size: GridSize,
    layout: &GridLayout,
    exclude: Option<WidgetId>,
) -> GridPosition {
    let size = size.clamped(layout.columns());
    let scan_end = layout.rows().saturating_add(layout.config().scan_buffer_rows);
    let last_x = layout.columns() - size.width;

    for y in 0..scan_end {
        for x in 0..=last_x {
            let candidate = GridPosition::at(x, y, size);
            if is_valid_position(candidate, layout, exclude) {
                return candidate;
            }
        }
    }

    append_below(size, layout, exclude)
}

fn append_below(size: GridSize, layout: &GridLayout, exclude: Option<WidgetId>) -> GridPosition {
    let mut y = layout.rows();
    loop {
        let candidate = GridPosition::at(0, y, size);
        if is_valid_position(candidate, layout, exclude) || y == u16::MAX {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "dashgrid.layout",
                y,
                width = size.width,
                height = size.height,
                "first-fit scan exhausted, appending below content"
            );
            return candidate;
        }
        y += 1;
    }
}
