use crate::config::BitOrder;
use crate::symbol::{Codeword, Decoded, Symbol, COMMA_NEGATIVE, COMMA_POSITIVE};
use crate::tables::{tables, Tables, ALT7_NEGATIVE, ALT7_POSITIVE};
use tracing::trace;

/// 6-bit codes that may legitimately precede an alternate D.x.7 field in a
/// data character. Anywhere else the alternate field marks a K.x.7.
const ALT7_DATA_PREFIXES: [u8; 6] = [0b100011, 0b010011, 0b001011, 0b110100, 0b101100, 0b011100];

/// One decoding lane. Needs no running disparity.
#[derive(Debug, Clone, Copy)]
pub struct SingleDecoder {
    tables: &'static Tables,
    bit_order: BitOrder,
}

impl SingleDecoder {
    pub fn new(bit_order: BitOrder) -> Self {
        Self {
            tables: tables(),
            bit_order,
        }
    }

    pub fn bit_order(&self) -> BitOrder {
        self.bit_order
    }

    /// Decodes one codeword given in this lane's bit order.
    ///
    /// `invalid` is only a ones-count check: codewords with 4, 5 or 6 ones but a
    /// sub-code pairing the line code never emits decode to a best-effort value
    /// with `invalid` clear.
    pub fn decode(&self, codeword: Codeword) -> Decoded {
        let word = codeword.with_order(self.bit_order);
        let code6b = word.code6b();
        let code4b = word.code4b() as usize;
        let t = self.tables;

        let code5b = t.code_6b5b[code6b as usize];
        let (control, code3b) = match code6b {
            COMMA_NEGATIVE => (true, t.code_4b3b_k_neg[code4b]),
            COMMA_POSITIVE => (true, t.code_4b3b_k_pos[code4b]),
            _ => {
                let alt7 = matches!(code4b as u8, ALT7_NEGATIVE | ALT7_POSITIVE);
                let control = alt7 && !ALT7_DATA_PREFIXES.contains(&code6b);
                (control, t.code_4b3b[code4b])
            }
        };

        let invalid = !matches!(codeword.ones(), 4..=6);
        if invalid {
            trace!(codeword = codeword.value(), "invalid 8b/10b codeword");
        }

        Decoded {
            symbol: Symbol::new((code3b << 5) | code5b, control),
            invalid,
        }
    }
}

impl Default for SingleDecoder {
    fn default() -> Self {
        Self::new(BitOrder::MsbFirst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::SingleEncoder;
    use crate::symbol::Disparity;

    fn dec(value: u16) -> Decoded {
        SingleDecoder::default().decode(Codeword::new(value))
    }

    #[test]
    fn test_data() {
        assert_eq!(dec(0b100111_0100).symbol, Symbol::d(0, 0));
        assert_eq!(dec(0b011000_1011).symbol, Symbol::d(0, 0));
        assert_eq!(dec(0b101010_1010).symbol, Symbol::d(21, 5));
        assert!(!dec(0b101010_1010).invalid);
    }

    #[test]
    fn test_alternate_d_x_7_stays_data() {
        assert_eq!(dec(0b100011_0111).symbol, Symbol::d(17, 7));
        assert_eq!(dec(0b110100_1000).symbol, Symbol::d(11, 7));
    }

    #[test]
    fn test_k_x_7() {
        assert_eq!(dec(0b111010_1000).symbol, Symbol::K23_7);
        assert_eq!(dec(0b000101_0111).symbol, Symbol::K23_7);
        assert_eq!(dec(0b011110_1000).symbol, Symbol::K30_7);
    }

    #[test]
    fn test_commas() {
        let neg = dec(0b001111_1010);
        assert_eq!(neg.symbol, Symbol::K28_5);
        assert!(!neg.invalid);
        assert_eq!(dec(0b110000_0101).symbol, Symbol::K28_5);
        assert_eq!(dec(0b001111_1000).symbol, Symbol::K28_7);
        assert_eq!(dec(0b110000_0111).symbol, Symbol::K28_7);
    }

    #[test]
    fn test_lsb_first_commas() {
        let decoder = SingleDecoder::new(BitOrder::LsbFirst);
        for value in [0b0101111100, 0b1010000011] {
            let decoded = decoder.decode(Codeword::new(value));
            assert!(decoded.symbol.control, "{value:#012b} should be a control");
            assert_eq!(decoded.symbol, Symbol::K28_5);
            assert!(!decoded.invalid);
        }
    }

    #[test]
    fn test_invalid_ones_count() {
        assert!(dec(0).invalid);
        assert!(dec(0x3ff).invalid);
        assert!(dec(0b000000_0111).invalid);
        assert!(dec(0b111111_1000).invalid);
    }

    #[test]
    fn test_unpaired_subcodes_pass_the_check() {
        // Four ones but a 6b/4b pairing no encoder emits
        let decoded = dec(0b111000_0100);
        assert!(!decoded.invalid);
    }

    #[test]
    fn test_roundtrip_all_data() {
        let encoder = SingleEncoder::default();
        let decoder = SingleDecoder::default();
        for data in 0..=255u8 {
            for rd in [Disparity::Negative, Disparity::Positive] {
                let symbol = Symbol::new(data, false);
                let (codeword, _) = encoder.encode(symbol, rd);
                let decoded = decoder.decode(codeword);
                assert_eq!(decoded.symbol, symbol, "{symbol} at {rd:?}");
                assert!(!decoded.invalid);
            }
        }
    }
}
