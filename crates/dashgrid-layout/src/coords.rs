//! Grid/pixel conversion at the rendering boundary.
//!
//! Pixel widths leave out one gutter so adjacent widgets render with a gap
//! between them; the inverse adds the gutter back before rounding.

use dashgrid_core::{GridPoint, GridPosition, PixelRect};

use crate::config::CellMetrics;

/// Pixel rectangle for a grid position.
pub fn grid_to_pixels(pos: GridPosition, metrics: &CellMetrics) -> PixelRect {
    PixelRect::new(
        f64::from(pos.x) * metrics.cell_width_px,
        f64::from(pos.y) * metrics.cell_height_px,
        (f64::from(pos.width) * metrics.cell_width_px - metrics.gap_px).max(0.0),
        (f64::from(pos.height) * metrics.cell_height_px - metrics.gap_px).max(0.0),
    )
}

/// Nearest grid position for a pixel rectangle.
///
/// Origins clamp to the first row/column, sizes to at least one cell.
pub fn pixels_to_grid(rect: PixelRect, metrics: &CellMetrics) -> GridPosition {
    GridPosition::new(
        round_to_u16(rect.left / metrics.cell_width_px, 0),
        round_to_u16(rect.top / metrics.cell_height_px, 0),
        round_to_u16((rect.width + metrics.gap_px) / metrics.cell_width_px, 1),
        round_to_u16((rect.height + metrics.gap_px) / metrics.cell_height_px, 1),
    )
}

/// Grid cell nearest to a pixel point. May be negative.
pub fn pixel_to_cell(pixel_x: f64, pixel_y: f64, metrics: &CellMetrics) -> GridPoint {
    GridPoint::new(
        (pixel_x / metrics.cell_width_px).round() as i32,
        (pixel_y / metrics.cell_height_px).round() as i32,
    )
}

fn round_to_u16(value: f64, min: u16) -> u16 {
    // `as` saturates and maps NaN to zero.
    (value.round() as u16).max(min)
}
