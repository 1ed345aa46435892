//! Per-dashboard grid configuration.
//!
//! Both config types deserialize from partial documents: any field left out
//! takes its default, so `{"columns": 6}` is a complete [`GridConfig`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column count used when a dashboard does not choose one.
pub const DEFAULT_COLUMNS: u16 = 4;

/// Rows every layout has, even when empty.
pub const DEFAULT_MIN_ROWS: u16 = 4;

/// Largest Chebyshev radius the drop resolver searches before falling back
/// to a first-fit scan.
pub const DEFAULT_MAX_SEARCH_RADIUS: u16 = 10;

/// Extra rows the first-fit scan looks at below the current grid.
pub const DEFAULT_SCAN_BUFFER_ROWS: u16 = 10;

/// Gutter between adjacent widgets, in pixels.
pub const DEFAULT_GAP_PX: f64 = 16.0;

/// Upper bound on the column count; keeps occupancy grids small.
pub const MAX_COLUMNS: u16 = 256;

/// Grid shape and search limits for one dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Fixed column count.
    pub columns: u16,
    /// Minimum row count of every layout.
    pub min_rows: u16,
    /// Ring search bound for drop resolution.
    pub max_search_radius: u16,
    /// Rows scanned past the bottom of the grid by first-fit.
    pub scan_buffer_rows: u16,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            min_rows: DEFAULT_MIN_ROWS,
            max_search_radius: DEFAULT_MAX_SEARCH_RADIUS,
            scan_buffer_rows: DEFAULT_SCAN_BUFFER_ROWS,
        }
    }
}

impl GridConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_columns(mut self, columns: u16) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_min_rows(mut self, min_rows: u16) -> Self {
        self.min_rows = min_rows;
        self
    }

    #[must_use]
    pub fn with_max_search_radius(mut self, radius: u16) -> Self {
        self.max_search_radius = radius;
        self
    }

    #[must_use]
    pub fn with_scan_buffer_rows(mut self, rows: u16) -> Self {
        self.scan_buffer_rows = rows;
        self
    }

    /// Reject shapes the engine cannot lay out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.columns > MAX_COLUMNS {
            return Err(ConfigError::TooManyColumns {
                columns: self.columns,
                max: MAX_COLUMNS,
            });
        }
        if self.min_rows == 0 {
            return Err(ConfigError::ZeroMinRows);
        }
        Ok(())
    }
}

/// Pixel size of one grid cell plus the visual gutter, supplied by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellMetrics {
    pub cell_width_px: f64,
    pub cell_height_px: f64,
    #[serde(default = "default_gap")]
    pub gap_px: f64,
}

fn default_gap() -> f64 {
    DEFAULT_GAP_PX
}

impl CellMetrics {
    /// Cell metrics with the default gutter.
    #[must_use]
    pub const fn new(cell_width_px: f64, cell_height_px: f64) -> Self {
        Self {
            cell_width_px,
            cell_height_px,
            gap_px: DEFAULT_GAP_PX,
        }
    }

    #[must_use]
    pub const fn with_gap(mut self, gap_px: f64) -> Self {
        self.gap_px = gap_px;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, value) in [("width", self.cell_width_px), ("height", self.cell_height_px)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidCellSize { axis, value });
            }
        }
        if !self.gap_px.is_finite() || self.gap_px < 0.0 {
            return Err(ConfigError::InvalidGap { value: self.gap_px });
        }
        Ok(())
    }
}

/// Rejected grid or pixel configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one column")]
    ZeroColumns,
    #[error("grid has {columns} columns, at most {max} are supported")]
    TooManyColumns { columns: u16, max: u16 },
    #[error("minimum row count must be at least 1")]
    ZeroMinRows,
    #[error("cell {axis} must be a positive pixel size, got {value}")]
    InvalidCellSize { axis: &'static str, value: f64 },
    #[error("gap must be a non-negative pixel size, got {value}")]
    InvalidGap { value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_conventions() {
        let config = GridConfig::default();
        assert_eq!(config.columns, 4);
        assert_eq!(config.min_rows, 4);
        assert_eq!(config.max_search_radius, 10);
        assert_eq!(config.scan_buffer_rows, 10);
        assert!(config.validate().is_ok());
        assert_eq!(CellMetrics::new(320.0, 240.0).gap_px, 16.0);
    }

    #[test]
    fn validate_rejects_degenerate_grids() {
        assert_eq!(
            GridConfig::new().with_columns(0).validate(),
            Err(ConfigError::ZeroColumns)
        );
        assert_eq!(
            GridConfig::new().with_min_rows(0).validate(),
            Err(ConfigError::ZeroMinRows)
        );
        assert!(matches!(
            GridConfig::new().with_columns(MAX_COLUMNS + 1).validate(),
            Err(ConfigError::TooManyColumns { .. })
        ));
    }

    #[test]
    fn metrics_validation() {
        assert!(CellMetrics::new(100.0, 80.0).validate().is_ok());
        assert!(matches!(
            CellMetrics::new(0.0, 80.0).validate(),
            Err(ConfigError::InvalidCellSize { axis: "width", .. })
        ));
        assert!(matches!(
            CellMetrics::new(100.0, f64::NAN).validate(),
            Err(ConfigError::InvalidCellSize { axis: "height", .. })
        ));
        assert!(matches!(
            CellMetrics::new(100.0, 80.0).with_gap(-1.0).validate(),
            Err(ConfigError::InvalidGap { .. })
        ));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: GridConfig =
            serde_json::from_str(r#"{"columns": 6}"#).expect("partial config");
        assert_eq!(config, GridConfig::default().with_columns(6));

        let metrics: CellMetrics =
            serde_json::from_str(r#"{"cell_width_px": 300, "cell_height_px": 200}"#)
                .expect("metrics");
        assert_eq!(metrics, CellMetrics::new(300.0, 200.0));
    }

    #[test]
    fn error_messages_are_actionable() {
        let err = CellMetrics::new(-5.0, 10.0).validate().unwrap_err();
        assert_eq!(err.to_string(), "cell width must be a positive pixel size, got -5");
    }
}
