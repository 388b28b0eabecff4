use serde::Serialize;
use std::io::{self, Write};

use super::Renderer;
use crate::trace::{AxisRange, TraceWindow};
use crate::utils::consts::{LABEL_TRACK_LEVEL, Y_MAX_VALUE, Y_MIN_VALUE};

/// Flat buffers an external chart needs for one frame.
#[derive(Debug, Serialize)]
pub struct TraceSnapshot {
    pub time: f64,
    pub axis: AxisRange,
    pub y_range: (f64, f64),
    pub label_track: f64,
    pub waveform_x: Vec<f64>,
    pub waveform_y: Vec<f64>,
    pub label_x: Vec<f64>,
    pub labels: Vec<&'static str>,
}

impl TraceSnapshot {
    pub fn capture(window: &TraceWindow) -> Self {
        Self {
            time: window.time(),
            axis: window.axis(),
            y_range: (Y_MIN_VALUE, Y_MAX_VALUE),
            label_track: LABEL_TRACK_LEVEL,
            waveform_x: window.waveform_x(),
            waveform_y: window.waveform_y(),
            label_x: window.label_x(),
            labels: window.label_texts(),
        }
    }
}

/// Writes one JSON object per line for an external plotter.
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn redraw(&mut self, window: &TraceWindow) -> io::Result<()> {
        let snapshot = TraceSnapshot::capture(window);
        serde_json::to_writer(&mut self.out, &snapshot)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_coding::Symbol;

    #[test]
    fn test_one_line_per_redraw() {
        let mut window = TraceWindow::new(4).unwrap();
        let mut renderer = JsonRenderer::new(Vec::new());

        window.accept(Symbol::High2);
        renderer.redraw(&window).unwrap();
        window.accept(Symbol::Low1);
        renderer.redraw(&window).unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let last: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(last["waveform_y"], serde_json::json!([2.0, 2.0, -1.0, -1.0]));
        assert_eq!(last["waveform_x"], serde_json::json!([0.0, 1.0, 1.0, 2.0]));
        assert_eq!(last["labels"], serde_json::json!(["1  1", "0  1"]));
        assert_eq!(last["axis"]["max"], serde_json::json!(20.0));
        assert_eq!(last["label_track"], serde_json::json!(-3.0));
    }
}
