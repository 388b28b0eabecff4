use tracing::{debug, error};

use super::{Bit, Emission, IDLE_CODE, LineCode};
use crate::error::LineCodeError;
use crate::utils::consts::BLANK_LABEL;

/// PAM5 symbol: two data bits per symbol on four levels, plus idle at 0 V.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Low2,
    Low1,
    High1,
    High2,
    Idle,
}

impl Symbol {
    pub const ALL: [Symbol; 5] = [
        Symbol::Low2,
        Symbol::Low1,
        Symbol::High1,
        Symbol::High2,
        Symbol::Idle,
    ];

    /// (first, second) -> symbol
    pub fn from_pair(first: Bit, second: Bit) -> Self {
        match (first, second) {
            (Bit::Zero, Bit::Zero) => Symbol::Low2,
            (Bit::Zero, Bit::One) => Symbol::Low1,
            (Bit::One, Bit::Zero) => Symbol::High1,
            (Bit::One, Bit::One) => Symbol::High2,
        }
    }

    /// Generator codes: `0, 1, 10, 11` for the bit pairs, `-1` for idle.
    pub fn from_code(code: i32) -> Result<Self, LineCodeError> {
        match code {
            0 => Ok(Symbol::Low2),
            1 => Ok(Symbol::Low1),
            10 => Ok(Symbol::High1),
            11 => Ok(Symbol::High2),
            IDLE_CODE => Ok(Symbol::Idle),
            other => Err(LineCodeError::InvalidSymbol(other)),
        }
    }

    pub fn level(self) -> f64 {
        match self {
            Symbol::Low2 => -2.0,
            Symbol::Low1 => -1.0,
            Symbol::High1 => 1.0,
            Symbol::High2 => 2.0,
            Symbol::Idle => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Symbol::Low2 => "0  0",
            Symbol::Low1 => "0  1",
            Symbol::High1 => "1  0",
            Symbol::High2 => "1  1",
            Symbol::Idle => BLANK_LABEL,
        }
    }
}

impl From<Symbol> for Emission {
    fn from(symbol: Symbol) -> Self {
        Emission::new(symbol.level(), symbol.label())
    }
}

/// Pairwise PAM5 encoder. Holds at most one pending bit.
#[derive(Debug, Default)]
pub struct Pam5Encoder {
    pending: Option<Bit>,
}

impl Pam5Encoder {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Buffer the first bit of a pair, emit a symbol on the second.
    pub fn feed_bit(&mut self, bit: Bit) -> Option<Symbol> {
        match self.pending.take() {
            None => {
                self.pending = Some(bit);
                debug!("Last Input = {}", bit.value());
                None
            }
            Some(first) => {
                let symbol = Symbol::from_pair(first, bit);
                debug!(
                    "New chart update to {}{} ({})",
                    first.value(),
                    bit.value(),
                    symbol.level()
                );
                Some(symbol)
            }
        }
    }

    /// Automatic path: emit the symbol for `code` right away.
    pub fn emit_direct(&mut self, code: i32) -> Result<Symbol, LineCodeError> {
        let symbol = Symbol::from_code(code).inspect_err(|_| {
            error!("Incorrect input value: {}", code);
        })?;
        debug!("Direct symbol {:?} ({})", symbol, symbol.level());
        Ok(symbol)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn reset(&mut self) {
        self.pending = None;
    }
}

impl LineCode for Pam5Encoder {
    fn name(&self) -> &'static str {
        "PAM5"
    }

    fn bits_per_symbol(&self) -> usize {
        2
    }

    fn feed_bit(&mut self, bit: Bit) -> Option<Emission> {
        Pam5Encoder::feed_bit(self, bit).map(Emission::from)
    }

    fn emit_direct(&mut self, code: i32) -> Result<Emission, LineCodeError> {
        Pam5Encoder::emit_direct(self, code).map(Emission::from)
    }

    fn reset(&mut self) {
        Pam5Encoder::reset(self);
    }
}
