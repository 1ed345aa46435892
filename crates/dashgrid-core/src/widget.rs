//! Widget model as seen by the layout engine.
//!
//! Widgets are owned by the surrounding dashboard application. The engine
//! only reads them and proposes new [`GridPosition`]s; identity and template
//! data never change here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{GridPosition, GridSize};

/// Stable identifier for a dashboard widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(u64);

impl WidgetId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for WidgetId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A widget placed on the dashboard grid.
///
/// `min_width` / `min_height` come from the widget's template. They are
/// advisory: the engine honors them when resizing but never rejects a
/// layout because of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    #[serde(flatten)]
    pub position: GridPosition,
    #[serde(default = "default_min")]
    pub min_width: u16,
    #[serde(default = "default_min")]
    pub min_height: u16,
}

fn default_min() -> u16 {
    1
}

impl Widget {
    /// Create a widget with minimum size 1x1.
    #[must_use]
    pub const fn new(id: WidgetId, position: GridPosition) -> Self {
        Self {
            id,
            position,
            min_width: 1,
            min_height: 1,
        }
    }

    /// Set the template minimum size.
    #[must_use]
    pub const fn with_min_size(mut self, min_width: u16, min_height: u16) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    /// Same widget at a new position.
    #[must_use]
    pub const fn with_position(mut self, position: GridPosition) -> Self {
        self.position = position;
        self
    }

    #[inline]
    pub const fn size(&self) -> GridSize {
        self.position.size()
    }

    /// Smallest size this widget may be resized to.
    #[inline]
    pub fn min_size(&self) -> GridSize {
        GridSize::new(self.min_width.max(1), self.min_height.max(1))
    }

    /// Clamp malformed geometry into something the grid can hold.
    ///
    /// Width and height become at least 1, width at most `columns`, and the
    /// widget is pulled left until it fits inside the column bound. Minimum
    /// sizes are clamped the same way.
    #[must_use]
    pub fn sanitized(self, columns: u16) -> Self {
        let columns = columns.max(1);
        let size = self.size().clamped(columns);
        let x = self.position.x.min(columns - size.width);
        Self {
            id: self.id,
            position: GridPosition::at(x, self.position.y, size),
            min_width: self.min_width.clamp(1, columns),
            min_height: self.min_height.max(1),
        }
    }

    /// Strict variant of [`Widget::sanitized`]: reports bad geometry instead
    /// of repairing it.
    pub fn checked(self, columns: u16) -> Result<Self, WidgetError> {
        if self.position.is_empty() {
            return Err(WidgetError::ZeroSize {
                id: self.id,
                width: self.position.width,
                height: self.position.height,
            });
        }
        if self.position.right() > columns || self.position.width > columns {
            return Err(WidgetError::TooWide {
                id: self.id,
                right: self.position.right(),
                columns,
            });
        }
        Ok(self)
    }
}

/// Malformed widget geometry, reported by [`Widget::checked`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    #[error("widget {id} has zero size ({width}x{height})")]
    ZeroSize { id: WidgetId, width: u16, height: u16 },
    #[error("widget {id} extends to column {right}, grid has {columns}")]
    TooWide {
        id: WidgetId,
        right: u16,
        columns: u16,
    },
}
