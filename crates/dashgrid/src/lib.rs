#![forbid(unsafe_code)]

//! dashgrid public facade crate.
//!
//! Re-exports the geometry and widget model from `dashgrid-core` and the
//! engine from `dashgrid-layout`, unifies their errors in [`Error`], and adds
//! JSON load/save for persisted dashboards.
//!
//! ```
//! use dashgrid::prelude::*;
//!
//! let engine = DashboardEngine::default();
//! let metrics = CellMetrics::new(320.0, 240.0);
//! let widget = Widget::new(WidgetId::new(1), GridPosition::new(0, 0, 2, 2));
//! let plan = engine
//!     .plan_add(&[], widget, Some(DropPoint::new(0.0, 0.0)), &metrics)
//!     .unwrap();
//! assert_eq!(plan.placed.position, GridPosition::new(0, 0, 2, 2));
//! ```

pub mod error;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use dashgrid_core::{GridPoint, GridPosition, GridSize, PixelRect, Widget, WidgetError, WidgetId};

// --- Layout re-exports -----------------------------------------------------

pub use dashgrid_layout::{
    CellMetrics, ConfigError, DASHBOARD_SCHEMA_VERSION, DashboardEngine, DashboardSnapshot,
    DropPoint, DropResolution, DropStrategy, EngineError, GridCell, GridConfig, GridLayout,
    LayoutPlan, PlanAction, SnapshotError, WidgetMove, find_first_available, get_displaced,
    grid_to_pixels, is_valid_position, pixel_to_cell, pixels_to_grid, reposition_displaced,
    resolve_drop_position,
};

/// Parse and validate a persisted dashboard.
pub fn load_snapshot(json: &str) -> Result<DashboardSnapshot> {
    let snapshot: DashboardSnapshot = serde_json::from_str(json)?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// Validate and serialize a dashboard for persistence.
pub fn save_snapshot(snapshot: &DashboardSnapshot) -> Result<String> {
    snapshot.validate()?;
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Strict check of caller-supplied widgets against a column count.
///
/// The engine repairs malformed widgets on its own; this is for callers that
/// would rather reject them at the edge.
pub fn check_widgets(widgets: &[Widget], columns: u16) -> Result<()> {
    for widget in widgets {
        widget.checked(columns)?;
    }
    Ok(())
}

/// Common imports for day-to-day use.
pub mod prelude {
    pub use crate::{
        CellMetrics, DashboardEngine, DashboardSnapshot, DropPoint, DropStrategy, Error,
        GridConfig, GridPosition, GridSize, LayoutPlan, Result, Widget, WidgetId, WidgetMove,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(id: u64, x: u16, y: u16, width: u16, height: u16) -> Widget {
        Widget::new(WidgetId::new(id), GridPosition::new(x, y, width, height))
    }

    #[test]
    fn save_then_load_restores_the_dashboard() {
        let snapshot = DashboardSnapshot::new(
            GridConfig::default(),
            vec![w(1, 0, 0, 2, 2), w(2, 2, 0, 2, 1)],
        );
        let json = save_snapshot(&snapshot).expect("save");
        assert_eq!(load_snapshot(&json).expect("load"), snapshot);
    }

    #[test]
    fn load_rejects_overlapping_boards() {
        let json = r#"{"widgets":[
            {"id":1,"x":0,"y":0,"width":2,"height":2},
            {"id":2,"x":1,"y":1,"width":2,"height":1}
        ]}"#;
        let err = load_snapshot(json).unwrap_err();
        assert_eq!(err.error_type(), "snapshot");
    }

    #[test]
    fn load_rejects_future_schema() {
        let json = r#"{"schema_version":7,"widgets":[]}"#;
        let err = load_snapshot(json).unwrap_err();
        assert!(matches!(
            err,
            Error::Snapshot(SnapshotError::UnsupportedVersion {
                found: 7,
                expected: DASHBOARD_SCHEMA_VERSION
            })
        ));
    }

    #[test]
    fn load_reports_bad_json() {
        assert_eq!(load_snapshot("not json").unwrap_err().error_type(), "json");
    }

    #[test]
    fn check_widgets_surfaces_malformed_input() {
        assert!(check_widgets(&[w(1, 0, 0, 4, 1)], 4).is_ok());
        let err = check_widgets(&[w(1, 0, 0, 0, 1)], 4).unwrap_err();
        assert_eq!(err.error_type(), "widget");
        let err = check_widgets(&[w(2, 3, 0, 2, 1)], 4).unwrap_err();
        assert!(matches!(err, Error::Widget(WidgetError::TooWide { .. })));
    }
}
