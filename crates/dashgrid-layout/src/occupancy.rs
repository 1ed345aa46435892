//! Occupancy grid built from a widget list.
//!
//! A [`GridLayout`] is a derived, single-use view: build it from the
//! authoritative widget list, make one decision with it, drop it. It is
//! never patched in place; any positional change means a fresh build.

use std::sync::atomic::{AtomicU64, Ordering};

use dashgrid_core::{GridPosition, Widget, WidgetId};
use serde::Serialize;

use crate::config::GridConfig;

// ─── Clip counters ───────────────────────────────────────────────────────────

static CLIPPED_WIDGETS_TOTAL: AtomicU64 = AtomicU64::new(0);
static CLIPPED_CELLS_TOTAL: AtomicU64 = AtomicU64::new(0);

/// Widgets clipped by layout builds since process start.
pub fn clipped_widgets_total() -> u64 {
    CLIPPED_WIDGETS_TOTAL.load(Ordering::Relaxed)
}

/// Cells dropped by clipping since process start.
pub fn clipped_cells_total() -> u64 {
    CLIPPED_CELLS_TOTAL.load(Ordering::Relaxed)
}

/// One grid unit of the occupancy grid.
///
/// `occupant` is `Some` exactly when the cell is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub x: u16,
    pub y: u16,
    pub occupant: Option<WidgetId>,
}

impl GridCell {
    #[inline]
    pub const fn occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Occupancy snapshot of a dashboard.
///
/// `columns` is fixed by the config; `rows` is
/// `max(min_rows, max(widget.y + widget.height))`, so every widget fits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLayout {
    config: GridConfig,
    rows: u16,
    cells: Vec<GridCell>,
    clipped_widgets: usize,
    clipped_cells: usize,
}

impl GridLayout {
    /// Render `widgets` into a fresh occupancy grid.
    ///
    /// Cells outside the grid are skipped, never an error. Widgets are not
    /// checked against each other: when two overlap, the one later in the
    /// slice owns the contested cells.
    ///
    /// A zero column count is raised to one so every layout has at least one
    /// column to place into; use [`GridConfig::validate`] to reject it instead.
    pub fn build(widgets: &[Widget], config: &GridConfig) -> Self {
        let config = GridConfig {
            columns: config.columns.max(1),
            ..*config
        };
        let columns = config.columns;
        let rows = widgets
            .iter()
            .map(|w| w.position.bottom())
            .fold(config.min_rows, u16::max);

        let mut cells = Vec::with_capacity(usize::from(rows) * usize::from(columns));
        for y in 0..rows {
            for x in 0..columns {
                cells.push(GridCell {
                    x,
                    y,
                    occupant: None,
                });
            }
        }

        let mut layout = Self {
            config,
            rows,
            cells,
            clipped_widgets: 0,
            clipped_cells: 0,
        };
        for widget in widgets {
            layout.mark(widget);
        }
        layout
    }

    /// Rebuild with the same configuration from a new widget list.
    #[must_use]
    pub fn rebuild(&self, widgets: &[Widget]) -> Self {
        Self::build(widgets, &self.config)
    }

    fn mark(&mut self, widget: &Widget) {
        let pos = widget.position;
        let mut skipped = 0usize;
        for (x, y) in pos.cells() {
            match self.index(x, y) {
                Some(idx) => self.cells[idx].occupant = Some(widget.id),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            self.record_clip(widget.id, pos, skipped);
        }
    }

    fn record_clip(&mut self, id: WidgetId, pos: GridPosition, skipped: usize) {
        self.clipped_widgets += 1;
        self.clipped_cells += skipped;
        CLIPPED_WIDGETS_TOTAL.fetch_add(1, Ordering::Relaxed);
        CLIPPED_CELLS_TOTAL.fetch_add(skipped as u64, Ordering::Relaxed);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "dashgrid.layout",
            widget = id.get(),
            x = pos.x,
            y = pos.y,
            width = pos.width,
            height = pos.height,
            columns = self.config.columns,
            rows = self.rows,
            clipped_cells = skipped,
            "widget clipped to grid bounds"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (id, pos);
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.config.columns && y < self.rows {
            Some(usize::from(y) * usize::from(self.config.columns) + usize::from(x))
        } else {
            None
        }
    }

    /// Fixed column count.
    #[inline]
    pub const fn columns(&self) -> u16 {
        self.config.columns
    }

    /// Current row count.
    #[inline]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Configuration this layout was built with.
    #[inline]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Cell at `(x, y)`, or `None` off the grid.
    pub fn cell(&self, x: u16, y: u16) -> Option<&GridCell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    /// Occupant of a cell; `None` for free cells and cells off the grid.
    #[inline]
    pub fn occupant(&self, x: u16, y: u16) -> Option<WidgetId> {
        self.index(x, y).and_then(|idx| self.cells[idx].occupant)
    }

    /// One row of cells, left to right.
    pub fn row(&self, y: u16) -> Option<&[GridCell]> {
        if y >= self.rows {
            return None;
        }
        let width = usize::from(self.config.columns);
        let start = usize::from(y) * width;
        Some(&self.cells[start..start + width])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Number of cells owned by some widget.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.occupied()).count()
    }

    /// Widgets that had cells skipped during this build.
    pub const fn clipped_widgets(&self) -> usize {
        self.clipped_widgets
    }

    /// Cells skipped during this build.
    pub const fn clipped_cells(&self) -> usize {
        self.clipped_cells
    }
}

/// Build an occupancy grid with the default config and `columns` columns.
pub fn build_layout(widgets: &[Widget], columns: u16) -> GridLayout {
    GridLayout::build(widgets, &GridConfig::default().with_columns(columns))
}
