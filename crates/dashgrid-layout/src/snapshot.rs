//! Persisted dashboard layout with a schema version.
//!
//! A [`DashboardSnapshot`] is the committed widget list plus the grid config
//! it was laid out with. It is what callers store and reload; the engine
//! itself never persists anything.
//!
//! # Schema Versioning Policy
//!
//! - **Additive fields** may be carried in `extensions` without a version bump.
//! - **Breaking changes** require incrementing [`DASHBOARD_SCHEMA_VERSION`].
//!   [`DashboardSnapshot::validate`] rejects any other version.
//!
//! # Usage
//!
//! ```
//! use dashgrid_core::{GridPosition, Widget, WidgetId};
//! use dashgrid_layout::{DashboardSnapshot, GridConfig, DASHBOARD_SCHEMA_VERSION};
//!
//! let snapshot = DashboardSnapshot::new(
//!     GridConfig::default(),
//!     vec![Widget::new(WidgetId::new(1), GridPosition::new(0, 0, 2, 2))],
//! );
//! assert_eq!(snapshot.schema_version, DASHBOARD_SCHEMA_VERSION);
//! assert!(snapshot.validate().is_ok());
//! ```

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use dashgrid_core::{GridPosition, Widget, WidgetId};
use rustc_hash::{FxHashSet, FxHasher};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, GridConfig};
use crate::engine::LayoutPlan;
use crate::occupancy::GridLayout;

/// Current dashboard schema version.
pub const DASHBOARD_SCHEMA_VERSION: u16 = 1;

/// Committed dashboard layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    #[serde(default = "default_schema_version")]
    pub schema_version: u16,
    #[serde(default)]
    pub config: GridConfig,
    pub widgets: Vec<Widget>,
    /// Forward-compatible extension bag.
    #[serde(default)]
    pub extensions: BTreeMap<String, String>,
}

fn default_schema_version() -> u16 {
    DASHBOARD_SCHEMA_VERSION
}

impl DashboardSnapshot {
    #[must_use]
    pub fn new(config: GridConfig, widgets: Vec<Widget>) -> Self {
        Self {
            schema_version: DASHBOARD_SCHEMA_VERSION,
            config,
            widgets,
            extensions: BTreeMap::new(),
        }
    }

    /// Validate schema version, config and the committed-state invariants:
    /// unique ids, non-empty addressable in-bounds rectangles, no overlaps.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.schema_version != DASHBOARD_SCHEMA_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.schema_version,
                expected: DASHBOARD_SCHEMA_VERSION,
            });
        }
        self.config.validate()?;

        let mut seen = FxHashSet::default();
        for widget in &self.widgets {
            if !seen.insert(widget.id) {
                return Err(SnapshotError::DuplicateWidget { id: widget.id });
            }
            let pos = widget.position;
            if pos.is_empty() || !pos.is_addressable() || pos.right() > self.config.columns {
                return Err(SnapshotError::OutOfBounds {
                    id: widget.id,
                    position: widget.position,
                    columns: self.config.columns,
                });
            }
        }

        for (i, a) in self.widgets.iter().enumerate() {
            if let Some(b) = self.widgets[i + 1..]
                .iter()
                .find(|b| a.position.overlaps(&b.position))
            {
                return Err(SnapshotError::Overlap {
                    first: a.id,
                    second: b.id,
                });
            }
        }
        Ok(())
    }

    /// Occupancy grid of the committed widgets.
    pub fn layout(&self) -> GridLayout {
        GridLayout::build(&self.widgets, &self.config)
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Commit a plan produced against this snapshot's widget list.
    pub fn apply_plan(&mut self, plan: &LayoutPlan) {
        self.widgets = plan.apply(&self.widgets);
    }

    /// Sort widgets top-to-bottom, left-to-right, then by id.
    pub fn canonicalize(&mut self) {
        self.widgets
            .sort_by_key(|w| (w.position.y, w.position.x, w.id));
    }

    /// Deterministic hash for state diagnostics.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.schema_version.hash(&mut hasher);
        self.config.hash(&mut hasher);
        self.widgets.hash(&mut hasher);
        for (k, v) in &self.extensions {
            k.hash(&mut hasher);
            v.hash(&mut hasher);
        }
        hasher.finish()
    }
}

/// Structural problems found by [`DashboardSnapshot::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error("unsupported dashboard schema version {found} (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },
    #[error("invalid grid config: {0}")]
    Config(#[from] ConfigError),
    #[error("widget {id} appears more than once")]
    DuplicateWidget { id: WidgetId },
    #[error("widget {id} at {position:?} does not fit a {columns}-column grid")]
    OutOfBounds {
        id: WidgetId,
        position: GridPosition,
        columns: u16,
    },
    #[error("widgets {first} and {second} overlap")]
    Overlap { first: WidgetId, second: WidgetId },
}
