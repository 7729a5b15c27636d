use crate::config::BitOrder;
use crate::symbol::{Codeword, Disparity, Symbol, COMMA_POSITIVE};
use crate::tables::{tables, Tables, ALT7_NEGATIVE, ALT7_POSITIVE};

/// One encoding lane.
///
/// Stateless: running disparity is passed in and handed back on every call,
/// so the caller decides how it chains between symbols.
#[derive(Debug, Clone, Copy)]
pub struct SingleEncoder {
    tables: &'static Tables,
    bit_order: BitOrder,
}

/// Sub-codes and polarity flags looked up for one symbol, before disparity
/// control is applied.
#[derive(Debug, Clone, Copy)]
struct SubCodes {
    code6b: u8,
    unbalanced6b: bool,
    flip6b: bool,
    code4b: u8,
    unbalanced4b: bool,
    flip4b: bool,
    /// Use the alternate D.x.7 code when the disparity after the 6-bit field is negative.
    alt7_negative: bool,
    /// Use the alternate D.x.7 code when the disparity after the 6-bit field is positive.
    alt7_positive: bool,
}

impl SubCodes {
    fn lookup(tables: &Tables, symbol: Symbol) -> Self {
        let code5b = symbol.x();
        let code3b = symbol.y();
        let k = symbol.control;

        let (code6b, unbalanced6b, flip6b) = if k && code5b == 28 {
            (COMMA_POSITIVE, true, true)
        } else {
            let i = code5b as usize;
            (
                tables.code_5b6b[i],
                tables.unbalanced_6b[i],
                tables.flip_6b[i],
            )
        };

        let i = code3b as usize;
        let code4b = tables.code_3b4b[i];
        let unbalanced4b = tables.unbalanced_4b[i];
        // Every control character tracks polarity in its 4-bit field.
        let flip4b = k || tables.flip_4b[i];

        // The primary D.x.7 code after these 6-bit codes would put a false
        // comma on the line.
        let (alt7_negative, alt7_positive) = if code3b == 7 {
            (
                k || matches!(code5b, 17 | 18 | 20),
                k || matches!(code5b, 11 | 13 | 14),
            )
        } else {
            (false, false)
        };

        Self {
            code6b,
            unbalanced6b,
            flip6b,
            code4b,
            unbalanced4b,
            flip4b,
            alt7_negative,
            alt7_positive,
        }
    }

    /// Applies disparity control. Returns the MSB-first codeword and the
    /// running disparity after it.
    fn resolve(self, rd_in: bool) -> (Codeword, bool) {
        let disp_inter = rd_in ^ self.unbalanced6b;
        let output6b = if !rd_in && self.flip6b {
            !self.code6b & 0x3f
        } else {
            self.code6b
        };

        let (output4b, rd_out) = if !disp_inter && self.alt7_negative {
            (ALT7_NEGATIVE, !disp_inter)
        } else if disp_inter && self.alt7_positive {
            (ALT7_POSITIVE, !disp_inter)
        } else {
            let output4b = if !disp_inter && self.flip4b {
                !self.code4b & 0xf
            } else {
                self.code4b
            };
            (output4b, disp_inter ^ self.unbalanced4b)
        };

        (Codeword::from_fields(output6b, output4b), rd_out)
    }
}

impl SingleEncoder {
    pub fn new(bit_order: BitOrder) -> Self {
        Self {
            tables: tables(),
            bit_order,
        }
    }

    pub fn bit_order(&self) -> BitOrder {
        self.bit_order
    }

    /// Encodes `symbol` at running disparity `rd_in`.
    ///
    /// Returns the codeword in this lane's bit order and the running disparity
    /// to feed the next symbol. Control values without a defined meaning are
    /// still encoded from the tables.
    pub fn encode(&self, symbol: Symbol, rd_in: Disparity) -> (Codeword, Disparity) {
        let (codeword, rd_out) = SubCodes::lookup(self.tables, symbol).resolve(rd_in.is_positive());
        (codeword.with_order(self.bit_order), Disparity::from_bool(rd_out))
    }
}

impl Default for SingleEncoder {
    fn default() -> Self {
        Self::new(BitOrder::MsbFirst)
    }
}
