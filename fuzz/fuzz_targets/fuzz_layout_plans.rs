#![no_main]

use arbitrary::Arbitrary;
use dashgrid_core::{GridPosition, GridSize, Widget, WidgetId};
use dashgrid_layout::{
    CellMetrics, DashboardEngine, DashboardSnapshot, DropPoint, GridConfig, GridLayout,
    is_valid_position,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Add {
        width: u8,
        height: u8,
        drop: Option<(i16, i16)>,
    },
    Move {
        pick: u8,
        x: i16,
        y: i16,
    },
    Resize {
        pick: u8,
        width: u8,
        height: u8,
    },
}

#[derive(Debug, Arbitrary)]
struct Input {
    columns: u8,
    min_rows: u8,
    radius: u8,
    buffer: u8,
    ops: Vec<Op>,
}

const METRICS: CellMetrics = CellMetrics::new(100.0, 80.0);

fuzz_target!(|input: Input| {
    let config = GridConfig::default()
        .with_columns(u16::from(input.columns % 16) + 1)
        .with_min_rows(u16::from(input.min_rows % 8) + 1)
        .with_max_search_radius(u16::from(input.radius % 12))
        .with_scan_buffer_rows(u16::from(input.buffer % 12));
    let engine = DashboardEngine::new(config).expect("config in range");
    let mut board: Vec<Widget> = Vec::new();
    let mut next_id = 0u64;

    // Cap the stream to keep iterations fast.
    for op in input.ops.into_iter().take(64) {
        let plan = match op {
            Op::Add {
                width,
                height,
                drop,
            } => {
                next_id += 1;
                let widget = Widget::new(
                    WidgetId::new(next_id),
                    GridPosition::new(0, 0, u16::from(width % 20), u16::from(height % 6)),
                );
                let drop = drop.map(|(x, y)| DropPoint::new(f64::from(x), f64::from(y)));
                engine.plan_add(&board, widget, drop, &METRICS)
            }
            Op::Move { pick, x, y } => {
                let Some(widget) = pick_widget(&board, pick) else {
                    continue;
                };
                let drop = DropPoint::new(f64::from(x), f64::from(y));
                engine.plan_move(&board, widget.id, drop, &METRICS)
            }
            Op::Resize {
                pick,
                width,
                height,
            } => {
                let Some(widget) = pick_widget(&board, pick) else {
                    continue;
                };
                let size = GridSize::new(u16::from(width % 20), u16::from(height % 6));
                engine.plan_resize(&board, widget.id, size)
            }
        };
        let plan = plan.expect("ids come from the board");
        board = plan.apply(&board);

        // Post-conditions that must always hold:
        let snapshot = DashboardSnapshot::new(config, board.clone());
        if let Err(err) = snapshot.validate() {
            panic!("board invalid after {plan:?}: {err}");
        }
        let layout = GridLayout::build(&board, &config);
        assert_eq!(layout.clipped_widgets(), 0, "committed widget clipped");
        for w in &board {
            assert!(
                is_valid_position(w.position, &layout, Some(w.id)),
                "{w:?} does not validate on its own board"
            );
        }
    }
});

fn pick_widget(board: &[Widget], pick: u8) -> Option<Widget> {
    if board.is_empty() {
        return None;
    }
    board.get(usize::from(pick) % board.len()).copied()
}
