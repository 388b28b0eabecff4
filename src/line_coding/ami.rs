// AMI (alternate mark inversion): 0 -> 0 V, 1 -> alternating +1 / -1
use tracing::{debug, error};

use super::{Bit, Emission, IDLE_CODE, LineCode};
use crate::error::LineCodeError;
use crate::utils::consts::BLANK_LABEL;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AmiSymbol {
    Space,
    MarkPositive,
    MarkNegative,
    Idle,
}

impl AmiSymbol {
    pub fn level(self) -> f64 {
        match self {
            AmiSymbol::Space | AmiSymbol::Idle => 0.0,
            AmiSymbol::MarkPositive => 1.0,
            AmiSymbol::MarkNegative => -1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AmiSymbol::Space => "0",
            AmiSymbol::MarkPositive | AmiSymbol::MarkNegative => "1",
            AmiSymbol::Idle => BLANK_LABEL,
        }
    }
}

impl From<AmiSymbol> for Emission {
    fn from(symbol: AmiSymbol) -> Self {
        Emission::new(symbol.level(), symbol.label())
    }
}

#[derive(Debug)]
pub struct AmiEncoder {
    next_mark_positive: bool,
}

impl Default for AmiEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AmiEncoder {
    pub fn new() -> Self {
        Self {
            next_mark_positive: true,
        }
    }

    pub fn encode_bit(&mut self, bit: Bit) -> AmiSymbol {
        let symbol = match bit {
            Bit::Zero => AmiSymbol::Space,
            Bit::One => {
                let mark = if self.next_mark_positive {
                    AmiSymbol::MarkPositive
                } else {
                    AmiSymbol::MarkNegative
                };
                self.next_mark_positive = !self.next_mark_positive;
                mark
            }
        };
        debug!("New chart update to {} ({})", bit.value(), symbol.level());
        symbol
    }

    /// Direct codes: `0`, `1` and `-1` for idle. Idle keeps the mark polarity.
    pub fn emit_direct(&mut self, code: i32) -> Result<AmiSymbol, LineCodeError> {
        match code {
            0 => Ok(self.encode_bit(Bit::Zero)),
            1 => Ok(self.encode_bit(Bit::One)),
            IDLE_CODE => Ok(AmiSymbol::Idle),
            other => {
                error!("Incorrect input value: {}", other);
                Err(LineCodeError::InvalidSymbol(other))
            }
        }
    }

    pub fn reset(&mut self) {
        self.next_mark_positive = true;
    }
}

impl LineCode for AmiEncoder {
    fn name(&self) -> &'static str {
        "AMI"
    }

    fn bits_per_symbol(&self) -> usize {
        1
    }

    fn feed_bit(&mut self, bit: Bit) -> Option<Emission> {
        Some(self.encode_bit(bit).into())
    }

    fn emit_direct(&mut self, code: i32) -> Result<Emission, LineCodeError> {
        AmiEncoder::emit_direct(self, code).map(Emission::from)
    }

    fn reset(&mut self) {
        AmiEncoder::reset(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_alternate() {
        let mut encoder = AmiEncoder::new();
        let bits = [Bit::One, Bit::Zero, Bit::One, Bit::One, Bit::Zero, Bit::One];
        let levels: Vec<f64> = bits
            .iter()
            .map(|&b| encoder.encode_bit(b).level())
            .collect();
        assert_eq!(levels, vec![1.0, 0.0, -1.0, 1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_idle_keeps_polarity() {
        let mut encoder = AmiEncoder::new();
        assert_eq!(encoder.emit_direct(1), Ok(AmiSymbol::MarkPositive));
        assert_eq!(encoder.emit_direct(IDLE_CODE), Ok(AmiSymbol::Idle));
        assert_eq!(encoder.emit_direct(1), Ok(AmiSymbol::MarkNegative));
    }

    #[test]
    fn test_labels() {
        assert_eq!(AmiSymbol::Space.label(), "0");
        assert_eq!(AmiSymbol::MarkNegative.label(), "1");
        assert_eq!(AmiSymbol::Idle.label(), " ");
    }

    #[test]
    fn test_rejects_pam5_codes() {
        let mut encoder = AmiEncoder::new();
        assert_eq!(encoder.emit_direct(10), Err(LineCodeError::InvalidSymbol(10)));
        assert_eq!(encoder.emit_direct(11), Err(LineCodeError::InvalidSymbol(11)));
    }

    #[test]
    fn test_every_bit_emits_through_trait() {
        let mut code: Box<dyn LineCode> = Box::new(AmiEncoder::new());
        assert_eq!(code.feed_bit(Bit::One), Some(Emission::new(1.0, "1")));
        code.reset();
        assert_eq!(code.feed_bit(Bit::One), Some(Emission::new(1.0, "1")));
    }
}
