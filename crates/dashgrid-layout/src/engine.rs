//! Action-level entry point: add, move and resize.
//!
//! [`DashboardEngine`] holds configuration only. Every call takes the
//! current widget list, builds a fresh [`GridLayout`], decides, and returns
//! a [`LayoutPlan`] describing every position change the action causes.
//! Persisting the plan is the caller's job.

use dashgrid_core::{GridPosition, GridSize, Widget, WidgetId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{CellMetrics, ConfigError, GridConfig};
use crate::displacement::{WidgetMove, get_displaced, reposition_displaced};
use crate::drop_resolver::{DropPoint, DropStrategy, resolve_drop_position};
use crate::occupancy::GridLayout;
use crate::placement::find_first_available;

/// The user action a plan answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    Add,
    Move,
    Resize,
}

impl PlanAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Move => "move",
            Self::Resize => "resize",
        }
    }
}

/// Every position change produced by one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub action: PlanAction,
    /// The widget the action targets, at its accepted position.
    pub placed: Widget,
    /// Its position before the action (`None` for adds).
    pub previous: Option<GridPosition>,
    /// How the accepted position was found; `None` for resizes.
    pub strategy: Option<DropStrategy>,
    /// Relocations of displaced widgets, in repack order.
    pub moves: Vec<WidgetMove>,
}

impl LayoutPlan {
    /// True when committing the plan would change nothing.
    pub fn is_noop(&self) -> bool {
        self.previous == Some(self.placed.position) && self.moves.iter().all(WidgetMove::is_noop)
    }

    /// `(widget, new position)` pairs to persist, target widget first.
    pub fn changes(&self) -> Vec<(WidgetId, GridPosition)> {
        let mut out = Vec::with_capacity(self.moves.len() + 1);
        if self.previous != Some(self.placed.position) {
            out.push((self.placed.id, self.placed.position));
        }
        out.extend(
            self.moves
                .iter()
                .filter(|m| !m.is_noop())
                .map(|m| (m.id, m.to)),
        );
        out
    }

    /// Commit the plan onto `widgets`, returning the new widget list.
    ///
    /// Order is preserved; an added widget is appended.
    pub fn apply(&self, widgets: &[Widget]) -> Vec<Widget> {
        let mut updates: FxHashMap<WidgetId, GridPosition> =
            self.moves.iter().map(|m| (m.id, m.to)).collect();
        updates.insert(self.placed.id, self.placed.position);

        let mut out: Vec<Widget> = widgets
            .iter()
            .map(|w| match updates.get(&w.id) {
                Some(&position) => w.with_position(position),
                None => *w,
            })
            .collect();
        if !widgets.iter().any(|w| w.id == self.placed.id) {
            out.push(self.placed);
        }
        out
    }
}

/// Rejected engine request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("widget {0} is not on the dashboard")]
    UnknownWidget(WidgetId),
    #[error("widget {0} is already on the dashboard")]
    DuplicateWidget(WidgetId),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Stateless planner over a validated [`GridConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardEngine {
    config: GridConfig,
}

impl Default for DashboardEngine {
    fn default() -> Self {
        Self {
            config: GridConfig::default(),
        }
    }
}

impl DashboardEngine {
    pub fn new(config: GridConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Sanitized copy of the widget list; see [`Widget::sanitized`].
    pub fn sanitize(&self, widgets: &[Widget]) -> Vec<Widget> {
        widgets
            .iter()
            .map(|w| w.sanitized(self.config.columns))
            .collect()
    }

    /// Occupancy grid of the sanitized widget list.
    pub fn layout(&self, widgets: &[Widget]) -> GridLayout {
        GridLayout::build(&self.sanitize(widgets), &self.config)
    }

    /// Place a new widget, near `drop` when given, else at the first free
    /// rectangle.
    pub fn plan_add(
        &self,
        widgets: &[Widget],
        widget: Widget,
        drop: Option<DropPoint>,
        metrics: &CellMetrics,
    ) -> Result<LayoutPlan, EngineError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "dashgrid.plan",
            action = "add",
            widget = widget.id.get(),
            moves = tracing::field::Empty
        )
        .entered();

        metrics.validate()?;
        let board = self.sanitize(widgets);
        if board.iter().any(|w| w.id == widget.id) {
            return Err(EngineError::DuplicateWidget(widget.id));
        }
        let widget = widget.sanitized(self.config.columns);
        let layout = GridLayout::build(&board, &self.config);

        let (position, strategy) = match drop {
            Some(point) => {
                let res = resolve_drop_position(&widget, point.x, point.y, &layout, metrics);
                (res.position, res.strategy)
            }
            None => (
                find_first_available(widget.size(), &layout, None),
                DropStrategy::FirstFit,
            ),
        };
        Ok(self.settle(
            PlanAction::Add,
            board,
            widget.with_position(position),
            None,
            Some(strategy),
        ))
    }

    /// Move an existing widget to where it was released.
    pub fn plan_move(
        &self,
        widgets: &[Widget],
        id: WidgetId,
        drop: DropPoint,
        metrics: &CellMetrics,
    ) -> Result<LayoutPlan, EngineError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "dashgrid.plan",
            action = "move",
            widget = id.get(),
            moves = tracing::field::Empty
        )
        .entered();

        metrics.validate()?;
        let board = self.sanitize(widgets);
        let widget = find(&board, id)?;
        let layout = GridLayout::build(&board, &self.config);
        let res = resolve_drop_position(&widget, drop.x, drop.y, &layout, metrics);
        Ok(self.settle(
            PlanAction::Move,
            board,
            widget.with_position(res.position),
            Some(widget.position),
            Some(res.strategy),
        ))
    }

    /// Resize a widget in place and push overlapped neighbours out of the way.
    ///
    /// The requested size is raised to the widget's template minimum and
    /// capped at the column count; the widget keeps its origin unless the new
    /// width would cross the right edge, in which case it slides left.
    pub fn plan_resize(
        &self,
        widgets: &[Widget],
        id: WidgetId,
        size: GridSize,
    ) -> Result<LayoutPlan, EngineError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "dashgrid.plan",
            action = "resize",
            widget = id.get(),
            moves = tracing::field::Empty
        )
        .entered();

        let board = self.sanitize(widgets);
        let widget = find(&board, id)?;
        let min = widget.min_size();
        let size = GridSize::new(size.width.max(min.width), size.height.max(min.height))
            .clamped(self.config.columns);
        let x = widget.position.x.min(self.config.columns - size.width);
        let resized = GridPosition::at(x, widget.position.y, size);
        Ok(self.settle(
            PlanAction::Resize,
            board,
            widget.with_position(resized),
            Some(widget.position),
            None,
        ))
    }

    /// Apply the accepted placement, then repack whatever it displaces.
    fn settle(
        &self,
        action: PlanAction,
        mut board: Vec<Widget>,
        placed: Widget,
        previous: Option<GridPosition>,
        strategy: Option<DropStrategy>,
    ) -> LayoutPlan {
        board.retain(|w| w.id != placed.id);
        let displaced = get_displaced(placed.position, &board, Some(placed.id));
        board.push(placed);

        let moves = if displaced.is_empty() {
            Vec::new()
        } else {
            let layout = GridLayout::build(&board, &self.config);
            reposition_displaced(&displaced, &layout, &board)
        };

        #[cfg(feature = "tracing")]
        tracing::Span::current().record("moves", moves.len());
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "dashgrid.layout",
            action = action.as_str(),
            widget = placed.id.get(),
            x = placed.position.x,
            y = placed.position.y,
            width = placed.position.width,
            height = placed.position.height,
            moves = moves.len(),
            "layout plan ready"
        );

        LayoutPlan {
            action,
            placed,
            previous,
            strategy,
            moves,
        }
    }
}

fn find(board: &[Widget], id: WidgetId) -> Result<Widget, EngineError> {
    board
        .iter()
        .find(|w| w.id == id)
        .copied()
        .ok_or(EngineError::UnknownWidget(id))
}
