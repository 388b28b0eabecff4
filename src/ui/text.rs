use std::io::{self, Write};

use super::Renderer;
use crate::trace::TraceWindow;
use crate::utils::consts::SYMBOL_DURATION;

const LEVEL_ROWS: [(f64, &str); 5] = [
    (2.0, " +2"),
    (1.0, " +1"),
    (0.0, "  0"),
    (-1.0, " -1"),
    (-2.0, " -2"),
];
const CELL_WIDTH: usize = 5;

/// Draw the visible part of the window as a small step chart.
///
/// One column of `CELL_WIDTH` characters per symbol, one row per level,
/// decoded labels underneath.
pub fn render_text(window: &TraceWindow) -> String {
    let axis = window.axis();
    let cells: Vec<_> = window
        .symbol_cells()
        .filter(|(_, label)| {
            // placeholders sit at t = 0
            label.time >= SYMBOL_DURATION / 2.0 && axis.contains(label.time)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format!("t = {:>6.1}  [{:.1}, {:.1}]\n", window.time(), axis.min, axis.max));
    for (level, tag) in LEVEL_ROWS {
        out.push_str(tag);
        out.push_str(" |");
        for (sample, _) in &cells {
            if sample.value == level {
                out.push_str(&"━".repeat(CELL_WIDTH - 1));
            } else {
                out.push_str(&" ".repeat(CELL_WIDTH - 1));
            }
            out.push(' ');
        }
        out.push('\n');
    }
    out.push_str("    |");
    for (_, label) in &cells {
        out.push_str(&format!("{:<width$}", label.text, width = CELL_WIDTH));
    }
    out.push('\n');
    out
}

pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn redraw(&mut self, window: &TraceWindow) -> io::Result<()> {
        self.out.write_all(render_text(window).as_bytes())?;
        self.out.flush()
    }
}
