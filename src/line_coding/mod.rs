// Line coding for the trace scope
// Maps an input bit stream to discrete line levels and decoded labels

pub mod ami;
pub mod pam5;

pub use ami::{AmiEncoder, AmiSymbol};
pub use pam5::{Pam5Encoder, Symbol};

use crate::error::LineCodeError;

/// A single input bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Keyboard mapping: `'1'` is one, `'0'` and space are zero.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(Bit::One),
            '0' | ' ' => Some(Bit::Zero),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        if b { Bit::One } else { Bit::Zero }
    }
}

impl TryFrom<u8> for Bit {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            other => Err(other),
        }
    }
}

/// What a symbol puts on the line: a held level plus its decoded label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emission {
    pub level: f64,
    pub label: &'static str,
}

impl Emission {
    pub const fn new(level: f64, label: &'static str) -> Self {
        Self { level, label }
    }
}

/// Common interface of the line codes the scope can drive.
///
/// `feed_bit` is the manual path and accumulates as many bits as one symbol
/// needs. `emit_direct` is the automatic path: it takes a raw generator code
/// and emits a symbol immediately, without touching the pending bits.
pub trait LineCode: Send {
    fn name(&self) -> &'static str;

    /// Input bits consumed per symbol on the manual path.
    fn bits_per_symbol(&self) -> usize;

    fn feed_bit(&mut self, bit: Bit) -> Option<Emission>;

    fn emit_direct(&mut self, code: i32) -> Result<Emission, LineCodeError>;

    /// Drop any pending partial symbol and line state.
    fn reset(&mut self);
}

/// Raw code the generator uses for an idle gap.
pub const IDLE_CODE: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineCodingKind {
    #[default]
    Pam5,
    Ami,
}

impl LineCodingKind {
    pub fn create(self) -> Box<dyn LineCode> {
        match self {
            LineCodingKind::Pam5 => Box::new(Pam5Encoder::new()),
            LineCodingKind::Ami => Box::new(AmiEncoder::new()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LineCodingKind::Pam5 => "PAM5",
            LineCodingKind::Ami => "AMI",
        }
    }
}

/// Compose a generator code from bits, most significant first: `[1, 0]` -> `10`.
pub fn code_from_bits(bits: &[Bit]) -> i32 {
    bits.iter()
        .fold(0, |acc, b| acc * 10 + b.value() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Bit::from_key('1'), Some(Bit::One));
        assert_eq!(Bit::from_key('0'), Some(Bit::Zero));
        assert_eq!(Bit::from_key(' '), Some(Bit::Zero));
        assert_eq!(Bit::from_key('x'), None);
        assert_eq!(Bit::from_key('2'), None);
    }

    #[test]
    fn test_bit_from_u8() {
        assert_eq!(Bit::try_from(0u8), Ok(Bit::Zero));
        assert_eq!(Bit::try_from(1u8), Ok(Bit::One));
        assert_eq!(Bit::try_from(7u8), Err(7));
    }

    #[test]
    fn test_code_from_bits() {
        assert_eq!(code_from_bits(&[Bit::Zero, Bit::Zero]), 0);
        assert_eq!(code_from_bits(&[Bit::Zero, Bit::One]), 1);
        assert_eq!(code_from_bits(&[Bit::One, Bit::Zero]), 10);
        assert_eq!(code_from_bits(&[Bit::One, Bit::One]), 11);
        assert_eq!(code_from_bits(&[Bit::One]), 1);
    }

    #[test]
    fn test_kind_creates_matching_code() {
        assert_eq!(LineCodingKind::Pam5.create().name(), "PAM5");
        assert_eq!(LineCodingKind::Ami.create().name(), "AMI");
        assert_eq!(LineCodingKind::Pam5.create().bits_per_symbol(), 2);
        assert_eq!(LineCodingKind::Ami.create().bits_per_symbol(), 1);
    }
}
