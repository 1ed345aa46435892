//! Property-based invariant tests for the dashboard grid engine.
//!
//! These hold for **any** committed (non-overlapping, in-bounds) board:
//!
//! 1. Occupancy: every widget cell is owned by that widget; rows cover all
//!    widgets and never drop below `min_rows`.
//! 2. Validator soundness: a position that validates overlaps no other
//!    widget.
//! 3. First fit returns a valid position and nothing earlier in row-major
//!    order validates.
//! 4. Drop resolution always returns a valid, in-bounds position.
//! 5. Add/move/resize plans commit to a board with no overlaps and no
//!    out-of-bounds widgets.
//! 6. Planning is deterministic.
//! 7. Grid -> pixels -> grid round-trips on aligned positions.

use dashgrid_core::{GridPosition, GridSize, Widget, WidgetId};
use dashgrid_layout::{
    CellMetrics, DashboardEngine, DashboardSnapshot, DropPoint, GridConfig, GridLayout,
    find_first_available, grid_to_pixels, is_valid_position, pixels_to_grid,
    resolve_drop_position,
};
use proptest::prelude::*;

const METRICS: CellMetrics = CellMetrics::new(120.0, 90.0);

// ── Helpers ─────────────────────────────────────────────────────────────

fn config_strategy() -> impl Strategy<Value = GridConfig> {
    (1u16..=8, 1u16..=6, 0u16..=6, 0u16..=4).prop_map(|(columns, min_rows, radius, buffer)| {
        GridConfig::default()
            .with_columns(columns)
            .with_min_rows(min_rows)
            .with_max_search_radius(radius)
            .with_scan_buffer_rows(buffer)
    })
}

type RawRect = (u16, u16, u16, u16);

fn raw_rects() -> impl Strategy<Value = Vec<RawRect>> {
    proptest::collection::vec((0u16..8, 0u16..10, 1u16..=4, 1u16..=3), 0..14)
}

/// Keep each requested rectangle that fits without overlapping earlier ones.
fn committed_board(config: &GridConfig, raw: &[RawRect]) -> Vec<Widget> {
    let mut board: Vec<Widget> = Vec::new();
    for (idx, &(x, y, width, height)) in raw.iter().enumerate() {
        let size = GridSize::new(width, height).clamped(config.columns);
        let x = x.min(config.columns - size.width);
        let pos = GridPosition::at(x, y, size);
        if board.iter().all(|w| !w.position.overlaps(&pos)) {
            board.push(Widget::new(WidgetId::new(idx as u64 + 1), pos));
        }
    }
    board
}

fn assert_committed(widgets: &[Widget], columns: u16) {
    for (i, a) in widgets.iter().enumerate() {
        assert!(!a.position.is_empty(), "{a:?} is empty");
        assert!(a.position.right() <= columns, "{a:?} exceeds {columns} columns");
        for b in &widgets[i + 1..] {
            assert!(!a.position.overlaps(&b.position), "{a:?} overlaps {b:?}");
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Occupancy
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_marks_every_widget_cell(config in config_strategy(), raw in raw_rects()) {
        let board = committed_board(&config, &raw);
        let layout = GridLayout::build(&board, &config);

        prop_assert!(layout.rows() >= config.min_rows);
        prop_assert_eq!(layout.clipped_widgets(), 0);
        let mut covered = 0usize;
        for w in &board {
            prop_assert!(w.position.bottom() <= layout.rows());
            for (x, y) in w.position.cells() {
                prop_assert_eq!(layout.occupant(x, y), Some(w.id));
                covered += 1;
            }
        }
        prop_assert_eq!(layout.occupied_count(), covered);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Validator soundness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn valid_positions_overlap_nothing(
        config in config_strategy(),
        raw in raw_rects(),
        probe in (0u16..10, 0u16..14, 0u16..=5, 0u16..=4),
        exclude_first in any::<bool>(),
    ) {
        let board = committed_board(&config, &raw);
        let layout = GridLayout::build(&board, &config);
        let exclude = if exclude_first { board.first().map(|w| w.id) } else { None };
        let pos = GridPosition::new(probe.0, probe.1, probe.2, probe.3);

        if is_valid_position(pos, &layout, exclude) {
            prop_assert!(!pos.is_empty());
            prop_assert!(pos.right() <= config.columns);
            for w in board.iter().filter(|w| Some(w.id) != exclude) {
                prop_assert!(!w.position.overlaps(&pos), "{:?} overlaps {:?}", pos, w);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. First fit
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn first_fit_is_valid_and_earliest(
        config in config_strategy(),
        raw in raw_rects(),
        width in 1u16..=10,
        height in 1u16..=4,
    ) {
        let board = committed_board(&config, &raw);
        let layout = GridLayout::build(&board, &config);
        let size = GridSize::new(width, height);
        let found = find_first_available(size, &layout, None);

        prop_assert!(is_valid_position(found, &layout, None));
        prop_assert_eq!(found.size(), size.clamped(config.columns));

        let scan_end = layout.rows() + config.scan_buffer_rows;
        if found.y < scan_end {
            for y in 0..=found.y {
                for x in 0..=(config.columns - found.width) {
                    if (y, x) >= (found.y, found.x) {
                        break;
                    }
                    let earlier = GridPosition::at(x, y, found.size());
                    prop_assert!(!is_valid_position(earlier, &layout, None), "{:?} was free", earlier);
                }
            }
        } else {
            prop_assert_eq!(found.x, 0);
            prop_assert!(found.y >= layout.rows());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Drop resolution
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drops_always_land_on_valid_positions(
        config in config_strategy(),
        raw in raw_rects(),
        width in 1u16..=6,
        height in 1u16..=3,
        px in -600.0f64..1400.0,
        py in -400.0f64..1600.0,
    ) {
        let board = committed_board(&config, &raw);
        let layout = GridLayout::build(&board, &config);
        let mover = Widget::new(WidgetId::new(999), GridPosition::new(0, 0, width, height));
        let res = resolve_drop_position(&mover, px, py, &layout, &METRICS);

        prop_assert!(is_valid_position(res.position, &layout, Some(mover.id)));
        prop_assert_eq!(res.position.size(), mover.size().clamped(config.columns));
        prop_assert_eq!(res, resolve_drop_position(&mover, px, py, &layout, &METRICS));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5 & 6. Engine plans commit cleanly and deterministically
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn resize_plans_commit_without_overlap(
        config in config_strategy(),
        raw in raw_rects(),
        pick in any::<prop::sample::Index>(),
        width in 1u16..=10,
        height in 1u16..=5,
    ) {
        let board = committed_board(&config, &raw);
        prop_assume!(!board.is_empty());
        let engine = DashboardEngine::new(config).expect("valid config");
        let id = board[pick.index(board.len())].id;

        let plan = engine.plan_resize(&board, id, GridSize::new(width, height)).expect("known widget");
        let committed = plan.apply(&board);
        assert_committed(&committed, config.columns);
        prop_assert_eq!(committed.len(), board.len());
        prop_assert!(DashboardSnapshot::new(config, committed).validate().is_ok());
        prop_assert_eq!(plan, engine.plan_resize(&board, id, GridSize::new(width, height)).expect("replay"));
    }

    #[test]
    fn move_plans_commit_without_overlap(
        config in config_strategy(),
        raw in raw_rects(),
        pick in any::<prop::sample::Index>(),
        px in -300.0f64..1200.0,
        py in -300.0f64..1500.0,
    ) {
        let board = committed_board(&config, &raw);
        prop_assume!(!board.is_empty());
        let engine = DashboardEngine::new(config).expect("valid config");
        let id = board[pick.index(board.len())].id;

        let plan = engine
            .plan_move(&board, id, DropPoint::new(px, py), &METRICS)
            .expect("known widget");
        prop_assert!(plan.moves.is_empty(), "a validated drop displaces nothing");
        assert_committed(&plan.apply(&board), config.columns);
    }

    #[test]
    fn add_plans_commit_without_overlap(
        config in config_strategy(),
        raw in raw_rects(),
        width in 0u16..=9,
        height in 0u16..=3,
        drop in proptest::option::of((-200.0f64..1000.0, -200.0f64..1200.0)),
    ) {
        let board = committed_board(&config, &raw);
        let engine = DashboardEngine::new(config).expect("valid config");
        let widget = Widget::new(WidgetId::new(10_000), GridPosition::new(0, 0, width, height));
        let drop = drop.map(|(x, y)| DropPoint::new(x, y));

        let plan = engine.plan_add(&board, widget, drop, &METRICS).expect("fresh id");
        let committed = plan.apply(&board);
        prop_assert_eq!(committed.len(), board.len() + 1);
        assert_committed(&committed, config.columns);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Coordinate round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn grid_pixel_round_trip(
        x in 0u16..64,
        y in 0u16..512,
        width in 1u16..32,
        height in 1u16..32,
        cell_w in 40.0f64..400.0,
        cell_h in 40.0f64..400.0,
    ) {
        let metrics = CellMetrics::new(cell_w, cell_h);
        let pos = GridPosition::new(x, y, width, height);
        prop_assert_eq!(pixels_to_grid(grid_to_pixels(pos, &metrics), &metrics), pos);
    }
}
