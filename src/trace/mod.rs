// Scrolling trace window
// Keeps the last N waveform samples and N/2 decoded labels for the chart

pub mod ring;

pub use ring::RingBuffer;

use serde::Serialize;
use tracing::trace;

use crate::error::TraceError;
use crate::line_coding::Emission;
use crate::utils::consts::*;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DecodedLabel {
    pub time: f64,
    pub text: &'static str,
}

/// Visible X range recommended to the chart.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl Default for AxisRange {
    fn default() -> Self {
        Self {
            min: X_MIN_VALUE,
            max: X_MAX_VALUE,
        }
    }
}

impl AxisRange {
    /// Jump the axis when `newest` comes within the scroll margin of the
    /// right edge. Returns whether the bounds moved.
    pub fn follow(&mut self, newest: f64) -> bool {
        if newest > self.max - AXIS_SCROLL_MARGIN {
            self.max = newest + AXIS_SCROLL_MARGIN;
            self.min = newest - (AXIS_SPAN - AXIS_SCROLL_MARGIN);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.min && t <= self.max
    }
}

/// Waveform and decoded-label windows for the chart.
///
/// Both windows are pre-filled and keep a constant length: every accepted
/// symbol evicts two samples and one label and appends the same amount.
#[derive(Clone, Debug)]
pub struct TraceWindow {
    waveform: RingBuffer<Sample>,
    labels: RingBuffer<DecodedLabel>,
    time: f64,
    axis: AxisRange,
    needs_redraw: bool,
}

impl TraceWindow {
    /// `capacity` is the number of waveform samples; it must be even and non-zero.
    pub fn new(capacity: usize) -> Result<Self, TraceError> {
        if capacity == 0 || capacity % 2 != 0 {
            return Err(TraceError::InvalidCapacity(capacity));
        }

        let placeholder_sample = Sample {
            time: 0.0,
            value: 0.0,
        };
        let placeholder_label = DecodedLabel {
            time: 0.0,
            text: BLANK_LABEL,
        };

        Ok(Self {
            waveform: RingBuffer::filled(capacity, placeholder_sample),
            labels: RingBuffer::filled(capacity / 2, placeholder_label),
            time: 0.0,
            axis: AxisRange::default(),
            needs_redraw: false,
        })
    }

    /// Append one symbol as a flat step and its label at the step midpoint.
    pub fn accept(&mut self, symbol: impl Into<Emission>) {
        let Emission { level, label } = symbol.into();
        let start = self.time;
        self.time += SYMBOL_DURATION;

        self.waveform.push(Sample {
            time: start,
            value: level,
        });
        self.waveform.push(Sample {
            time: self.time,
            value: level,
        });
        self.labels.push(DecodedLabel {
            time: start + SYMBOL_DURATION / 2.0,
            text: label,
        });

        let newest = self.waveform.newest().time;
        if self.axis.follow(newest) {
            trace!("Axis moved to [{}, {}]", self.axis.min, self.axis.max);
        }
        self.needs_redraw = true;
    }

    /// Clear and return the pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn capacity(&self) -> usize {
        self.waveform.capacity()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn axis(&self) -> AxisRange {
        self.axis
    }

    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.waveform.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &DecodedLabel> {
        self.labels.iter()
    }

    pub fn newest_sample(&self) -> &Sample {
        self.waveform.newest()
    }

    pub fn waveform_x(&self) -> Vec<f64> {
        self.samples().map(|s| s.time).collect()
    }

    pub fn waveform_y(&self) -> Vec<f64> {
        self.samples().map(|s| s.value).collect()
    }

    pub fn label_x(&self) -> Vec<f64> {
        self.labels().map(|l| l.time).collect()
    }

    pub fn label_texts(&self) -> Vec<&'static str> {
        self.labels().map(|l| l.text).collect()
    }

    /// One entry per symbol slot: the step's opening sample and its label.
    pub fn symbol_cells(&self) -> impl Iterator<Item = (&Sample, &DecodedLabel)> {
        self.samples()
            .step_by(2)
            .zip(self.labels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_coding::Symbol;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_prefilled_window() {
        let window = TraceWindow::new(8).unwrap();
        assert_eq!(window.waveform_x(), vec![0.0; 8]);
        assert_eq!(window.waveform_y(), vec![0.0; 8]);
        assert_eq!(window.label_texts(), vec![" "; 4]);
        assert_eq!(window.axis(), AxisRange { min: 0.0, max: 20.0 });
        assert!(!window.needs_redraw());
    }

    #[test]
    fn test_rejects_bad_capacity() {
        assert_eq!(TraceWindow::new(0).unwrap_err(), TraceError::InvalidCapacity(0));
        assert_eq!(TraceWindow::new(5).unwrap_err(), TraceError::InvalidCapacity(5));
    }

    #[test]
    fn test_capacity_four_sequence() {
        let mut window = TraceWindow::new(4).unwrap();
        window.accept(Symbol::Low2);
        window.accept(Symbol::High2);
        assert_eq!(window.waveform_y(), vec![-2.0, -2.0, 2.0, 2.0]);
        assert_eq!(window.waveform_x(), vec![0.0, 1.0, 1.0, 2.0]);

        window.accept(Symbol::Low1);
        assert_eq!(window.waveform_y(), vec![2.0, 2.0, -1.0, -1.0]);
        assert_eq!(window.waveform_x(), vec![1.0, 2.0, 2.0, 3.0]);
        assert_eq!(window.label_x(), vec![1.5, 2.5]);
        assert_eq!(window.label_texts(), vec!["1  1", "0  1"]);
    }

    #[test]
    fn test_lengths_invariant_and_flat_steps() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut window = TraceWindow::new(16).unwrap();
        for _ in 0..100 {
            let symbol = Symbol::ALL[rng.random_range(0..Symbol::ALL.len())];
            window.accept(symbol);
            assert_eq!(window.samples().count(), 16);
            assert_eq!(window.labels().count(), 8);
        }

        let xs = window.waveform_x();
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));
        let ys = window.waveform_y();
        for pair in ys.chunks(2) {
            assert_eq!(pair[0], pair[1]);
        }
        let label_xs = window.label_x();
        assert!(label_xs.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(window.time(), 100.0);
    }

    #[test]
    fn test_idle_is_flat_zero() {
        let mut window = TraceWindow::new(4).unwrap();
        window.accept(Symbol::High1);
        window.accept(Symbol::Idle);
        assert_eq!(window.waveform_y(), vec![1.0, 1.0, 0.0, 0.0]);
        assert_eq!(window.label_texts(), vec!["1  0", " "]);
    }

    #[test]
    fn test_axis_does_not_move_before_margin() {
        let mut window = TraceWindow::new(8).unwrap();
        for _ in 0..18 {
            window.accept(Symbol::Idle);
        }
        // newest == 18.0, not greater than 20.0 - 2.0
        assert_eq!(window.newest_sample().time, 18.0);
        assert_eq!(window.axis(), AxisRange { min: 0.0, max: 20.0 });
    }

    #[test]
    fn test_axis_jumps_past_margin() {
        let mut window = TraceWindow::new(8).unwrap();
        for _ in 0..19 {
            window.accept(Symbol::Idle);
        }
        assert_eq!(window.axis(), AxisRange { min: 1.0, max: 21.0 });
    }

    #[test]
    fn test_axis_follow_boundary() {
        let mut axis = AxisRange { min: 10.0, max: 30.0 };
        assert!(!axis.follow(28.0));
        assert_eq!(axis, AxisRange { min: 10.0, max: 30.0 });
        assert!(axis.follow(28.5));
        assert_eq!(axis, AxisRange { min: 10.5, max: 30.5 });
    }

    #[test]
    fn test_redraw_flag() {
        let mut window = TraceWindow::new(4).unwrap();
        window.accept(Symbol::Low1);
        assert!(window.take_redraw());
        assert!(!window.take_redraw());
    }

    #[test]
    fn test_symbol_cells_pair_levels_with_labels() {
        let mut window = TraceWindow::new(4).unwrap();
        window.accept(Symbol::Low2);
        window.accept(Symbol::High1);
        let cells: Vec<(f64, &str)> = window
            .symbol_cells()
            .map(|(s, l)| (s.value, l.text))
            .collect();
        assert_eq!(cells, vec![(-2.0, "0  0"), (1.0, "1  0")]);
    }
}
