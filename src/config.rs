use crate::error::{Error, Result};
use serde::Deserialize;

/// Order of the ten bits inside a codeword word.
///
/// `MsbFirst` keeps the first transmitted bit (`a`) in bit 9. `LsbFirst`
/// reverses the word so that bit 0 goes out first, which is what LSB-first
/// serializers expect. The same order applies to encoder output and decoder input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitOrder {
    #[default]
    MsbFirst,
    LsbFirst,
}

/// Construction-time settings for multi-lane and streaming units.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CodecConfig {
    /// Symbols processed per step
    pub lanes: usize,
    /// Bit order of every codeword word
    pub bit_order: BitOrder,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            lanes: 1,
            bit_order: BitOrder::MsbFirst,
        }
    }
}

impl CodecConfig {
    pub fn new(lanes: usize, bit_order: BitOrder) -> Self {
        Self { lanes, bit_order }
    }

    /// Parses and validates a TOML document such as:
    ///
    /// ```toml
    /// lanes = 4
    /// bit_order = "lsb_first"
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: CodecConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.lanes == 0 {
            return Err(Error::InvalidLaneCount(self.lanes));
        }
        Ok(())
    }
}
