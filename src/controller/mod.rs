pub mod generator;

pub use generator::TickGenerator;

use std::time::Instant;

use crossbeam_channel::{Receiver, after, never, select};
use tracing::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::error::{ConfigError, SessionError};
use crate::line_coding::{Bit, LineCode};
use crate::trace::TraceWindow;
use crate::ui::Renderer;

/// Everything that can drive the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Raw keypress, mapped by [`InputEvent::from_key`]
    Key(char),
    /// On-screen button
    Bit(Bit),
    /// Automatic-path code from an external source
    Direct(i32),
    SetAutoFill(bool),
    SetRandomize(bool),
    ToggleAutoFill,
    ToggleRandomize,
    /// Drop a half-entered symbol and the line code state
    Clear,
    /// The key source is exhausted; ends the session unless the timer runs
    EndOfInput,
    Quit,
}

impl InputEvent {
    pub fn from_key(key: char) -> Option<Self> {
        if let Some(bit) = Bit::from_key(key) {
            return Some(InputEvent::Bit(bit));
        }
        match key {
            'a' | 'A' => Some(InputEvent::ToggleAutoFill),
            'r' | 'R' => Some(InputEvent::ToggleRandomize),
            'c' | 'C' => Some(InputEvent::Clear),
            'q' | 'Q' => Some(InputEvent::Quit),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the encoder, the trace window and the auto-fill timer.
///
/// All mutation happens through `&mut self`, on the thread that runs
/// [`Controller::run`]. Manual symbols push the timer deadline back so the
/// two input paths never interleave within one period.
pub struct Controller {
    config: ControllerConfig,
    line_code: Box<dyn LineCode>,
    window: TraceWindow,
    generator: TickGenerator,
    renderer: Box<dyn Renderer>,
    deadline: Option<Instant>,
    ticks: u64,
}

impl Controller {
    pub fn new(
        config: ControllerConfig,
        renderer: Box<dyn Renderer>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let window = TraceWindow::new(config.capacity)?;
        let line_code = config.line_coding.create();
        let generator = TickGenerator::new(config.seed, config.idle_one_in);

        info!("Controller initialized:");
        info!("  - line coding: {}", line_code.name());
        info!("  - capacity: {} samples", config.capacity);
        info!("  - tick period: {:?}", config.tick_period);
        info!(
            "  - auto fill: {}, randomize: {} (idle 1 in {})",
            config.auto_fill, config.randomize, config.idle_one_in
        );

        let mut controller = Self {
            config,
            line_code,
            window,
            generator,
            renderer,
            deadline: None,
            ticks: 0,
        };
        if controller.config.auto_fill {
            controller.restart_timer();
        }
        Ok(controller)
    }

    pub fn window(&self) -> &TraceWindow {
        &self.window
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn timer_running(&self) -> bool {
        self.deadline.is_some()
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn handle_key(&mut self, key: char) -> Result<Flow, SessionError> {
        debug!("Pressed: {:?}", key);
        match InputEvent::from_key(key) {
            Some(event) => self.handle_event(event),
            None => {
                if !key.is_whitespace() {
                    warn!("Ignoring key {:?}", key);
                }
                Ok(Flow::Continue)
            }
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Result<Flow, SessionError> {
        match event {
            InputEvent::Key(key) => return self.handle_key(key),
            InputEvent::Bit(bit) => self.feed_bit(bit)?,
            InputEvent::Direct(code) => self.emit_direct(code)?,
            InputEvent::SetAutoFill(on) => self.set_auto_fill(on),
            InputEvent::SetRandomize(on) => self.set_randomize(on),
            InputEvent::ToggleAutoFill => self.set_auto_fill(!self.config.auto_fill),
            InputEvent::ToggleRandomize => self.set_randomize(!self.config.randomize),
            InputEvent::Clear => self.clear_line_code(),
            InputEvent::EndOfInput => {
                if !self.timer_running() {
                    return Ok(Flow::Quit);
                }
            }
            InputEvent::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Manual path: accumulate bits until the line code emits a symbol.
    pub fn feed_bit(&mut self, bit: Bit) -> Result<(), SessionError> {
        debug!("Input: {}", bit.value());
        if let Some(emission) = self.line_code.feed_bit(bit) {
            self.window.accept(emission);
            self.restart_timer();
            self.refresh()?;
        }
        Ok(())
    }

    /// Automatic path. An invalid code leaves the window untouched.
    pub fn emit_direct(&mut self, code: i32) -> Result<(), SessionError> {
        let emission = self.line_code.emit_direct(code)?;
        self.window.accept(emission);
        self.refresh()?;
        Ok(())
    }

    /// Timer tick. No-op while auto-fill is off.
    pub fn on_tick(&mut self) -> Result<(), SessionError> {
        if !self.config.auto_fill {
            return Ok(());
        }
        self.ticks += 1;
        let code = self.generator.next_code(
            self.config.randomize,
            self.line_code.bits_per_symbol(),
        );
        info!("Generated next value: {}", code);
        self.restart_timer();
        self.emit_direct(code)
    }

    pub fn set_auto_fill(&mut self, on: bool) {
        self.config.auto_fill = on;
        if on {
            self.restart_timer();
        } else {
            self.deadline = None;
        }
        info!("auto fill switched to {}", on);
    }

    /// Forget pending input bits; the trace window is kept.
    pub fn clear_line_code(&mut self) {
        self.line_code.reset();
        info!("{} encoder cleared", self.line_code.name());
    }

    pub fn set_randomize(&mut self, on: bool) {
        self.config.randomize = on;
        info!("randomize switched to {}", on);
    }

    fn restart_timer(&mut self) {
        if self.config.auto_fill {
            self.deadline = Some(Instant::now() + self.config.tick_period);
        }
    }

    fn refresh(&mut self) -> Result<(), SessionError> {
        if self.window.take_redraw() {
            self.renderer.redraw(&self.window)?;
        }
        Ok(())
    }

    /// Event loop. Returns on `Quit`, after `max_ticks` timer ticks, or when
    /// the input channel closes while the timer is stopped.
    pub fn run(&mut self, events: Receiver<InputEvent>) -> Result<(), SessionError> {
        let mut input_open = true;
        loop {
            if let Some(max) = self.config.max_ticks {
                if self.ticks >= max {
                    info!("Reached {} ticks, stopping", max);
                    break;
                }
            }

            let timeout = match self.deadline {
                Some(deadline) => after(deadline.saturating_duration_since(Instant::now())),
                None => never(),
            };

            let input = if input_open { events.clone() } else { never() };

            select! {
                recv(input) -> msg => match msg {
                    Ok(event) => {
                        if self.handle_event(event)? == Flow::Quit {
                            info!("Quit requested");
                            break;
                        }
                    }
                    Err(_) => {
                        if self.timer_running() {
                            debug!("Input closed, timer keeps running");
                            input_open = false;
                        } else {
                            debug!("Input closed");
                            break;
                        }
                    }
                },
                recv(timeout) -> _ => self.on_tick()?,
            }
        }
        Ok(())
    }
}
