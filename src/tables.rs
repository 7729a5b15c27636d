//! Static 5b/6b and 3b/4b lookup tables.
//!
//! The forward tables hold the sub-code sent at positive running disparity.
//! Unbalanced codes, and the few balanced codes whose pairing depends on
//! disparity, are complemented when the running disparity is negative; the
//! `flip` arrays mark them. Reverse tables map both polarities back to the
//! source value and default every unused row to 0.
//!
//! Tables are built once per process and cached in a `OnceLock`.

use crate::error::{Error, Result};
use crate::symbol::{disparity, COMMA_NEGATIVE, COMMA_POSITIVE};
use std::sync::OnceLock;
use tracing::debug;

const TABLE_5B6B: [u8; 32] = [
    0b011000, 0b100010, 0b010010, 0b110001, 0b001010, 0b101001, 0b011001, 0b000111, // D.0 - D.7
    0b000110, 0b100101, 0b010101, 0b110100, 0b001101, 0b101100, 0b011100, 0b101000, // D.8 - D.15
    0b100100, 0b100011, 0b010011, 0b110010, 0b001011, 0b101010, 0b011010, 0b000101, // D.16 - D.23
    0b001100, 0b100110, 0b010110, 0b001001, 0b001110, 0b010001, 0b100001, 0b010100, // D.24 - D.31
];

const TABLE_3B4B: [u8; 8] = [
    0b0100, 0b1001, 0b0101, 0b0011, 0b0010, 0b1010, 0b0110,
    0b0001, // primary D.x.7
];

/// Balanced 6-bit code that still needs its polarity tracked (D.7).
const FORCED_FLIP_6B: usize = 7;
/// Balanced 4-bit code that still needs its polarity tracked (D.x.3).
const FORCED_FLIP_4B: usize = 3;

/// Alternate D.x.7 / K.x.7 4-bit codes.
pub(crate) const ALT7_NEGATIVE: u8 = 0b0111;
pub(crate) const ALT7_POSITIVE: u8 = 0b1000;

static TABLES: OnceLock<Tables> = OnceLock::new();

/// Get the process-wide lookup tables.
///
/// Construction failure means a constant table was corrupted, so it panics
/// instead of returning an error.
#[inline]
pub fn tables() -> &'static Tables {
    TABLES.get_or_init(|| {
        Tables::build().unwrap_or_else(|e| panic!("8b/10b lookup tables are inconsistent: {e}"))
    })
}

/// Immutable sub-code tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    pub(crate) code_5b6b: [u8; 32],
    pub(crate) unbalanced_6b: [bool; 32],
    pub(crate) flip_6b: [bool; 32],
    pub(crate) code_6b5b: [u8; 64],

    pub(crate) code_3b4b: [u8; 8],
    pub(crate) unbalanced_4b: [bool; 8],
    pub(crate) flip_4b: [bool; 8],
    pub(crate) code_4b3b: [u8; 16],

    /// 4b/3b for the companion field of the `001111` comma.
    pub(crate) code_4b3b_k_neg: [u8; 16],
    /// 4b/3b for the companion field of the `110000` comma.
    pub(crate) code_4b3b_k_pos: [u8; 16],
}

impl Tables {
    /// Builds every table from the constant sub-code lists.
    pub fn build() -> Result<Self> {
        let code_5b6b = TABLE_5B6B;
        let unbalanced_6b = code_5b6b.map(|c| disparity(c as u16, 6) != 0);
        let mut flip_6b = unbalanced_6b;
        flip_6b[FORCED_FLIP_6B] = true;

        let mut code_6b5b = reverse_table::<64>("6b5b", &code_5b6b, Some(&flip_6b))?;
        code_6b5b[COMMA_NEGATIVE as usize] = 28;
        code_6b5b[COMMA_POSITIVE as usize] = 28;

        let code_3b4b = TABLE_3B4B;
        let unbalanced_4b = code_3b4b.map(|c| disparity(c as u16, 4) != 0);
        let mut flip_4b = unbalanced_4b;
        flip_4b[FORCED_FLIP_4B] = true;

        let mut code_4b3b = reverse_table::<16>("4b3b", &code_3b4b, Some(&flip_4b))?;
        code_4b3b[ALT7_NEGATIVE as usize] = 7;
        code_4b3b[ALT7_POSITIVE as usize] = 7;

        // Control characters never use the primary D.x.7 code, so its rows
        // are freed and the alternate codes take value 7.
        let mut code_4b3b_k_neg = reverse_table::<16>("4b3b K-", &code_3b4b, None)?;
        code_4b3b_k_neg[0b0001] = 0;
        code_4b3b_k_neg[ALT7_POSITIVE as usize] = 7;

        let mut code_4b3b_k_pos = reverse_table::<16>("4b3b K+", &code_3b4b.map(|c| !c & 0xf), None)?;
        code_4b3b_k_pos[0b1110] = 0;
        code_4b3b_k_pos[ALT7_NEGATIVE as usize] = 7;

        debug!("built 8b/10b lookup tables");

        Ok(Self {
            code_5b6b,
            unbalanced_6b,
            flip_6b,
            code_6b5b,
            code_3b4b,
            unbalanced_4b,
            flip_4b,
            code_4b3b,
            code_4b3b_k_neg,
            code_4b3b_k_pos,
        })
    }
}

/// Inverts `inputs` into an `N`-row table.
///
/// Rows whose `flips` entry is set are also reachable through their bitwise
/// complement. A row claimed twice is a [`Error::DuplicateTableRow`].
pub(crate) fn reverse_table<const N: usize>(
    name: &'static str,
    inputs: &[u8],
    flips: Option<&[bool]>,
) -> Result<[u8; N]> {
    debug_assert!(N.is_power_of_two());
    let mask = N - 1;
    let mut outputs: [Option<u8>; N] = [None; N];

    let mut claim = |row: usize, value: u8| match outputs[row] {
        Some(existing) => Err(Error::DuplicateTableRow {
            table: name,
            row,
            existing,
            value,
        }),
        None => {
            outputs[row] = Some(value);
            Ok(())
        }
    };

    for (i, &word) in inputs.iter().enumerate() {
        let word = word as usize & mask;
        claim(word, i as u8)?;
        if flips.is_some_and(|f| f[i]) {
            claim(!word & mask, i as u8)?;
        }
    }

    Ok(outputs.map(|o| o.unwrap_or(0)))
}
