#![forbid(unsafe_code)]

//! Dashboard grid layout: occupancy, drop resolution and repack.
//!
//! # Role in dashgrid
//! This crate decides where widgets go. It never owns widget state: every
//! call takes the authoritative widget list, derives a fresh [`GridLayout`]
//! from it, and returns proposed positions.
//!
//! # Pipeline
//! 1. [`GridLayout::build`] renders widgets into an occupancy grid.
//! 2. [`resolve_drop_position`] turns a pointer release into a legal
//!    position (exact, ring search, first fit).
//! 3. [`get_displaced`] + [`reposition_displaced`] push overlapped
//!    neighbours into free space.
//!
//! [`DashboardEngine`] strings these together per user action, and
//! [`DashboardSnapshot`] is the persisted form of a committed layout.
//!
//! # Diagnostics
//! With the default `tracing` feature, layout builds that clip a widget and
//! first-fit fallbacks emit `debug` events on the `dashgrid.layout` target;
//! engine calls run inside a `dashgrid.plan` span.

pub mod config;
pub mod coords;
pub mod displacement;
pub mod drop_resolver;
pub mod engine;
pub mod occupancy;
pub mod placement;
pub mod snapshot;

pub use config::{
    CellMetrics, ConfigError, DEFAULT_COLUMNS, DEFAULT_GAP_PX, DEFAULT_MAX_SEARCH_RADIUS,
    DEFAULT_MIN_ROWS, DEFAULT_SCAN_BUFFER_ROWS, GridConfig, MAX_COLUMNS,
};
pub use coords::{grid_to_pixels, pixel_to_cell, pixels_to_grid};
pub use displacement::{WidgetMove, get_displaced, reposition_displaced};
pub use drop_resolver::{DropPoint, DropResolution, DropStrategy, resolve_drop_position, ring_offsets};
pub use engine::{DashboardEngine, EngineError, LayoutPlan, PlanAction};
pub use occupancy::{GridCell, GridLayout, build_layout, clipped_cells_total, clipped_widgets_total};
pub use placement::{find_first_available, is_valid_position};
pub use snapshot::{DASHBOARD_SCHEMA_VERSION, DashboardSnapshot, SnapshotError};
