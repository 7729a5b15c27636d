use crate::config::BitOrder;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// An 8-bit value plus the control flag.
///
/// Written `D.x.y` for data and `K.x.y` for control characters, where `x` is
/// the low five bits and `y` the high three bits of `data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Symbol {
    pub data: u8,
    pub control: bool,
}

impl Symbol {
    pub const K28_0: Symbol = Symbol::k(28, 0);
    pub const K28_1: Symbol = Symbol::k(28, 1);
    pub const K28_2: Symbol = Symbol::k(28, 2);
    pub const K28_3: Symbol = Symbol::k(28, 3);
    pub const K28_4: Symbol = Symbol::k(28, 4);
    /// The comma character most protocols align on
    pub const K28_5: Symbol = Symbol::k(28, 5);
    pub const K28_6: Symbol = Symbol::k(28, 6);
    pub const K28_7: Symbol = Symbol::k(28, 7);
    pub const K23_7: Symbol = Symbol::k(23, 7);
    pub const K27_7: Symbol = Symbol::k(27, 7);
    pub const K29_7: Symbol = Symbol::k(29, 7);
    pub const K30_7: Symbol = Symbol::k(30, 7);

    pub const fn new(data: u8, control: bool) -> Self {
        Self { data, control }
    }

    /// Data character `D.x.y`.
    pub const fn d(x: u8, y: u8) -> Self {
        Self::new((y << 5) | (x & 0x1f), false)
    }

    /// Control character `K.x.y`.
    pub const fn k(x: u8, y: u8) -> Self {
        Self::new((y << 5) | (x & 0x1f), true)
    }

    /// Low five bits, the 5b/6b input.
    pub const fn x(self) -> u8 {
        self.data & 0x1f
    }

    /// High three bits, the 3b/4b input.
    pub const fn y(self) -> u8 {
        self.data >> 5
    }

    /// Whether this is one of the twelve control characters the line code defines.
    ///
    /// Other control values still encode, but the result is not a standard codeword.
    pub fn is_defined_control(self) -> bool {
        self.control && CONTROL_SYMBOLS.contains(&self)
    }
}

/// Every control character with a defined encoding.
pub const CONTROL_SYMBOLS: [Symbol; 12] = [
    Symbol::K28_0,
    Symbol::K28_1,
    Symbol::K28_2,
    Symbol::K28_3,
    Symbol::K28_4,
    Symbol::K28_5,
    Symbol::K28_6,
    Symbol::K28_7,
    Symbol::K23_7,
    Symbol::K27_7,
    Symbol::K29_7,
    Symbol::K30_7,
];

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.control { 'K' } else { 'D' };
        write!(f, "{}.{}.{}", kind, self.x(), self.y())
    }
}

impl FromStr for Symbol {
    type Err = Error;

    /// Parses `D.x.y`, `Dx.y`, `K.x.y` or `Kx.y` (letter case ignored).
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidSymbolName(s.to_string());

        let mut chars = s.chars();
        let control = match chars.next() {
            Some('D' | 'd') => false,
            Some('K' | 'k') => true,
            _ => return Err(invalid()),
        };
        let rest = chars.as_str();
        let rest = rest.strip_prefix('.').unwrap_or(rest);

        let (x, y) = rest.split_once('.').ok_or_else(invalid)?;
        let x: u8 = x.parse().map_err(|_| invalid())?;
        let y: u8 = y.parse().map_err(|_| invalid())?;
        if x > 31 || y > 7 {
            return Err(invalid());
        }

        Ok(if control { Symbol::k(x, y) } else { Symbol::d(x, y) })
    }
}

/// A 10-bit line codeword.
///
/// The wrapped value never has bits above bit 9 set. Field accessors read the
/// word as MSB-first: the 6-bit sub-code in bits 9..4, the 4-bit sub-code in bits 3..0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Codeword(u16);

impl Codeword {
    pub const MASK: u16 = 0x3ff;

    /// Wraps the low ten bits of `value`, discarding the rest.
    pub const fn new(value: u16) -> Self {
        Self(value & Self::MASK)
    }

    pub(crate) const fn from_fields(code6b: u8, code4b: u8) -> Self {
        Self::new(((code6b as u16) << 4) | (code4b as u16 & 0xf))
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Number of one bits (4, 5 or 6 for any valid codeword).
    pub const fn ones(self) -> u32 {
        self.0.count_ones()
    }

    /// The word with its ten bits in the opposite order.
    pub const fn reversed(self) -> Self {
        Self(self.0.reverse_bits() >> 6)
    }

    /// Converts between MSB-first and `order`. The conversion is its own inverse.
    pub const fn with_order(self, order: BitOrder) -> Self {
        match order {
            BitOrder::MsbFirst => self,
            BitOrder::LsbFirst => self.reversed(),
        }
    }

    pub const fn code6b(self) -> u8 {
        (self.0 >> 4) as u8
    }

    pub const fn code4b(self) -> u8 {
        (self.0 & 0xf) as u8
    }

    /// Whether the 6-bit sub-code is one of the K.28 comma patterns.
    pub const fn is_comma(self) -> bool {
        matches!(self.code6b(), COMMA_NEGATIVE | COMMA_POSITIVE)
    }
}

/// K.28 sub-code emitted at negative running disparity.
pub(crate) const COMMA_NEGATIVE: u8 = 0b001111;
/// K.28 sub-code emitted at positive running disparity.
pub(crate) const COMMA_POSITIVE: u8 = 0b110000;

impl TryFrom<u16> for Codeword {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        if value & !Self::MASK != 0 {
            return Err(Error::CodewordOutOfRange(value));
        }
        Ok(Self(value))
    }
}

impl From<Codeword> for u16 {
    fn from(codeword: Codeword) -> u16 {
        codeword.0
    }
}

impl fmt::Binary for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:010b}", self.0)
    }
}

/// Running disparity: the sign of the ones-minus-zeros balance sent so far.
///
/// As a single bit, `false` is negative and `true` is positive. A fresh stream
/// starts negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Disparity {
    #[default]
    Negative,
    Positive,
}

impl Disparity {
    pub const fn from_bool(positive: bool) -> Self {
        if positive {
            Disparity::Positive
        } else {
            Disparity::Negative
        }
    }

    pub const fn is_positive(self) -> bool {
        matches!(self, Disparity::Positive)
    }

    pub const fn flipped(self) -> Self {
        Self::from_bool(!self.is_positive())
    }
}

impl From<bool> for Disparity {
    fn from(positive: bool) -> Self {
        Self::from_bool(positive)
    }
}

impl From<Disparity> for bool {
    fn from(disparity: Disparity) -> bool {
        disparity.is_positive()
    }
}

/// A decoded codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Decoded {
    pub symbol: Symbol,
    /// Set when the codeword does not carry 4, 5 or 6 ones. A clear flag does
    /// not prove the codeword was valid.
    pub invalid: bool,
}

/// Ones minus zeros over the low `nbits` bits of `word`.
pub const fn disparity(word: u16, nbits: u32) -> i32 {
    let mask = if nbits >= 16 { u16::MAX } else { (1 << nbits) - 1 };
    let ones = (word & mask).count_ones() as i32;
    ones - (nbits as i32 - ones)
}
