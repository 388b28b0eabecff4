pub mod json;
pub mod text;

pub use json::{JsonRenderer, TraceSnapshot};
pub use text::TextRenderer;

use std::io;

use crate::trace::TraceWindow;
use crate::utils::consts::APP_NAME;

pub fn print_banner() {
    eprintln!("{}", APP_NAME);
    eprintln!("keys: 0/1/space = bits, a = auto-fill, r = random, c = clear, q = quit");
}

/// Chart surface fed from the trace window after each accepted symbol.
pub trait Renderer {
    fn redraw(&mut self, window: &TraceWindow) -> io::Result<()>;
}

/// Drops every redraw.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn redraw(&mut self, _window: &TraceWindow) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RenderKind {
    #[default]
    Text,
    Json,
    None,
}

impl RenderKind {
    /// Renderer writing to stdout.
    pub fn create(self) -> Box<dyn Renderer> {
        match self {
            RenderKind::Text => Box::new(TextRenderer::new(io::stdout())),
            RenderKind::Json => Box::new(JsonRenderer::new(io::stdout())),
            RenderKind::None => Box::new(NullRenderer),
        }
    }
}
