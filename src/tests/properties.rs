use crate::config::{BitOrder, CodecConfig};
use crate::decoder::SingleDecoder;
use crate::encoder::SingleEncoder;
use crate::lanes::{decode, encode, Encoder};
use crate::symbol::{Codeword, Disparity, Symbol, CONTROL_SYMBOLS};
use proptest::prelude::*;

/// Disparity a codeword leaves behind, judged from its ones count alone.
fn disparity_after(codeword: Codeword, rd_in: Disparity) -> Disparity {
    match codeword.ones() {
        5 => rd_in,
        n => Disparity::from_bool(n > 5),
    }
}

fn control_symbol() -> impl Strategy<Value = Symbol> {
    prop::sample::select(CONTROL_SYMBOLS.to_vec())
}

/// Data symbols mixed with defined control characters.
fn line_symbol() -> impl Strategy<Value = Symbol> {
    prop_oneof![
        4 => any::<u8>().prop_map(|d| Symbol::new(d, false)),
        1 => control_symbol(),
    ]
}

proptest! {
    /// Property 1: Data roundtrip
    /// Every data byte decodes back to itself from either running disparity.
    #[test]
    fn prop_data_roundtrip(data: u8, positive: bool) {
        let symbol = Symbol::new(data, false);
        let (codeword, _) = SingleEncoder::default().encode(symbol, positive.into());
        let decoded = SingleDecoder::default().decode(codeword);

        prop_assert_eq!(decoded.symbol, symbol);
        prop_assert!(!decoded.invalid);
    }

    /// Property 2: Control roundtrip
    #[test]
    fn prop_control_roundtrip(symbol in control_symbol(), positive: bool) {
        let (codeword, _) = SingleEncoder::default().encode(symbol, positive.into());
        let decoded = SingleDecoder::default().decode(codeword);

        prop_assert_eq!(decoded.symbol, symbol);
        prop_assert!(!decoded.invalid);
    }

    /// Property 3: Bounded imbalance
    /// Any symbol, defined or not, encodes to 4, 5 or 6 ones.
    #[test]
    fn prop_ones_count(data: u8, control: bool, positive: bool) {
        let (codeword, _) = SingleEncoder::default().encode(Symbol::new(data, control), positive.into());
        prop_assert!((4..=6).contains(&codeword.ones()), "{:b} has {} ones", codeword, codeword.ones());
    }

    /// Property 4: Disparity consistency
    /// The returned running disparity agrees with the codeword's ones count.
    #[test]
    fn prop_disparity_consistency(data: u8, control: bool, positive: bool) {
        let rd_in = Disparity::from_bool(positive);
        let (codeword, rd_out) = SingleEncoder::default().encode(Symbol::new(data, control), rd_in);
        prop_assert_eq!(rd_out, disparity_after(codeword, rd_in));
    }

    /// Property 5: Lane chaining
    /// Encoding in groups of `lanes` matches encoding one symbol at a time.
    #[test]
    fn prop_lanes_match_single_lane(
        symbols in prop::collection::vec(line_symbol(), 0..64),
        lanes in 1usize..=8,
        positive: bool,
    ) {
        let symbols = &symbols[..symbols.len() - symbols.len() % lanes];
        let rd_in = Disparity::from_bool(positive);

        let mut rd = rd_in;
        let mut one_by_one = Vec::new();
        let encoder = SingleEncoder::default();
        for &symbol in symbols {
            let (codeword, rd_out) = encoder.encode(symbol, rd);
            one_by_one.push(codeword);
            rd = rd_out;
        }

        let mut multi = Encoder::new(&CodecConfig::new(lanes, BitOrder::MsbFirst)).unwrap();
        multi.set_disparity(rd_in);
        let mut grouped = Vec::new();
        for group in symbols.chunks(lanes) {
            grouped.extend(multi.encode(group).unwrap());
        }

        prop_assert_eq!(&grouped, &one_by_one);
        prop_assert_eq!(multi.disparity(), rd);
        prop_assert_eq!(encode(symbols, rd_in), (one_by_one, rd));
    }

    /// Property 6: Bit order symmetry
    /// LSB-first words are the reversed MSB-first words and decode the same.
    #[test]
    fn prop_bit_order(symbol in line_symbol(), positive: bool) {
        let rd = Disparity::from_bool(positive);
        let (msb, msb_rd) = SingleEncoder::new(BitOrder::MsbFirst).encode(symbol, rd);
        let (lsb, lsb_rd) = SingleEncoder::new(BitOrder::LsbFirst).encode(symbol, rd);

        prop_assert_eq!(lsb, msb.reversed());
        prop_assert_eq!(lsb_rd, msb_rd);
        prop_assert_eq!(SingleDecoder::new(BitOrder::LsbFirst).decode(lsb).symbol, symbol);
    }

    /// Property 7: Ones-count check
    /// `invalid` is set exactly when the ones count falls outside 4..=6.
    #[test]
    fn prop_invalid_flag(value in 0u16..1024) {
        let decoded = SingleDecoder::default().decode(Codeword::new(value));
        prop_assert_eq!(decoded.invalid, !(4..=6).contains(&value.count_ones()));
    }
}

/// Bolero fuzz test: a long stream stays DC balanced and decodes intact
#[cfg(test)]
#[test]
fn fuzz_stream_balance() {
    bolero::check!().with_type::<Vec<(u8, u8)>>().for_each(|input| {
        let symbols: Vec<Symbol> = input
            .iter()
            .map(|&(data, pick)| {
                if pick % 8 == 0 {
                    CONTROL_SYMBOLS[pick as usize % CONTROL_SYMBOLS.len()]
                } else {
                    Symbol::new(data, false)
                }
            })
            .collect();

        let encoder = SingleEncoder::default();
        let mut rd = Disparity::Negative;
        // Running digital sum, seeded at -1 for a fresh RD- stream
        let mut sum: i32 = -1;
        let mut codewords = Vec::with_capacity(symbols.len());
        for &symbol in &symbols {
            let (codeword, rd_out) = encoder.encode(symbol, rd);
            sum += 2 * codeword.ones() as i32 - 10;
            assert_eq!(sum, if rd_out.is_positive() { 1 } else { -1 });
            codewords.push(codeword);
            rd = rd_out;
        }

        let decoded: Vec<Symbol> = decode(&codewords).iter().map(|d| d.symbol).collect();
        assert_eq!(decoded, symbols);
    });
}

/// Bolero fuzz test: decoding arbitrary words never panics
#[cfg(test)]
#[test]
fn fuzz_decode_no_panic() {
    bolero::check!().with_type::<u16>().for_each(|&value| {
        let decoded = SingleDecoder::new(BitOrder::LsbFirst).decode(Codeword::new(value));
        let ones = Codeword::new(value).ones();
        assert_eq!(decoded.invalid, !(4..=6).contains(&ones));
    });
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_every_control_both_disparities() {
        let encoder = SingleEncoder::default();
        let decoder = SingleDecoder::default();
        for symbol in CONTROL_SYMBOLS {
            for rd in [Disparity::Negative, Disparity::Positive] {
                let (codeword, rd_out) = encoder.encode(symbol, rd);
                let decoded = decoder.decode(codeword);
                assert_eq!(decoded.symbol, symbol, "{symbol} at {rd:?}");
                assert!(decoded.symbol.control);
                assert!(!decoded.invalid);
                assert_eq!(rd_out, disparity_after(codeword, rd));
            }
        }
    }

    #[test]
    fn test_only_k28_carries_a_comma() {
        let encoder = SingleEncoder::default();
        for data in 0..=255u8 {
            for control in [false, true] {
                let symbol = Symbol::new(data, control);
                if symbol.control && symbol.x() == 28 {
                    continue;
                }
                for rd in [Disparity::Negative, Disparity::Positive] {
                    let (codeword, _) = encoder.encode(symbol, rd);
                    assert!(!codeword.is_comma(), "{symbol} produced a comma");
                }
            }
        }
    }

    #[test]
    fn test_canonical_commas() {
        let lsb = SingleDecoder::new(BitOrder::LsbFirst);
        let msb = SingleDecoder::new(BitOrder::MsbFirst);
        for (lsb_word, msb_word) in [(0b0101111100, 0b0011111010), (0b1010000011, 0b1100000101)] {
            assert!(lsb.decode(Codeword::new(lsb_word)).symbol.control);
            assert!(msb.decode(Codeword::new(msb_word)).symbol.control);
            assert!(Codeword::new(msb_word).is_comma());
        }
    }

    #[test]
    fn test_all_zeros_invalid() {
        assert!(decode(&[Codeword::new(0)])[0].invalid);
    }
}
