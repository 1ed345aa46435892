//! Displacement detection and greedy repack.
//!
//! Repack is deterministic only for a given input order: displaced widgets
//! are relocated one at a time in the order they are passed, each to the
//! first free rectangle of a freshly rebuilt layout. Different orders can
//! produce different (individually valid) arrangements.

use dashgrid_core::{GridPosition, Widget, WidgetId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::occupancy::GridLayout;
use crate::placement::find_first_available;

/// A proposed position change for one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetMove {
    pub id: WidgetId,
    pub from: GridPosition,
    pub to: GridPosition,
}

impl WidgetMove {
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Widgets whose rectangles overlap `pos`, in input order.
///
/// `exclude` skips the widget that is being placed.
pub fn get_displaced(pos: GridPosition, widgets: &[Widget], exclude: Option<WidgetId>) -> Vec<Widget> {
    widgets
        .iter()
        .filter(|w| Some(w.id) != exclude && w.position.overlaps(&pos))
        .copied()
        .collect()
}

/// Relocate `displaced` widgets, in input order, into free space.
///
/// `board` is the authoritative widget list with the triggering placement
/// already applied; `layout` supplies the grid configuration. Before each
/// widget is placed the layout is rebuilt from `board` with every earlier
/// relocation applied. Widgets still waiting to move are rendered beneath
/// everything else, so a cell contested by the triggering widget never
/// reads as free for the widget being moved.
///
/// Every returned position is valid against all widgets outside
/// `displaced` and against every earlier relocation.
pub fn reposition_displaced(displaced: &[Widget], layout: &GridLayout, board: &[Widget]) -> Vec<WidgetMove> {
    let mut board: Vec<Widget> = board.to_vec();
    let mut index: FxHashMap<WidgetId, usize> = board
        .iter()
        .enumerate()
        .map(|(idx, w)| (w.id, idx))
        .collect();
    for widget in displaced {
        if !index.contains_key(&widget.id) {
            index.insert(widget.id, board.len());
            board.push(*widget);
        }
    }

    let mut moves = Vec::with_capacity(displaced.len());
    for (step, widget) in displaced.iter().enumerate() {
        let snapshot = layout.rebuild(&render_order(&board, &displaced[step..]));
        let to = find_first_available(widget.size(), &snapshot, Some(widget.id));
        moves.push(WidgetMove {
            id: widget.id,
            from: widget.position,
            to,
        });
        if let Some(&idx) = index.get(&widget.id) {
            board[idx].position = to;
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "dashgrid.layout",
        displaced = displaced.len(),
        moved = moves.iter().filter(|m| !m.is_noop()).count(),
        "repacked displaced widgets"
    );
    moves
}

/// Pending widgets first, so the rest of the board owns contested cells.
fn render_order(board: &[Widget], pending: &[Widget]) -> Vec<Widget> {
    let is_pending = |w: &Widget| pending.iter().any(|p| p.id == w.id);
    let (mut ordered, settled): (Vec<Widget>, Vec<Widget>) =
        board.iter().copied().partition(|w| is_pending(w));
    ordered.extend(settled);
    ordered
}
