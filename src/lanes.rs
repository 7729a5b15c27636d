//! Multi-lane composition.
//!
//! Encoder lanes form a ring in disparity and a line in data: lane `i` starts
//! from the disparity lane `i - 1` ended on within the same step, and lane 0
//! starts from the disparity the last lane ended on in the previous step.
//! That carried value is the only state crossing steps. Decoder lanes are
//! independent.

use crate::config::CodecConfig;
use crate::decoder::SingleDecoder;
use crate::encoder::SingleEncoder;
use crate::error::{Error, Result};
use crate::symbol::{Codeword, Decoded, Disparity, Symbol};
use tracing::debug;

/// Encodes `symbols` in order starting from `rd_in`, MSB-first.
///
/// Returns the codewords and the running disparity after the last one.
pub fn encode(symbols: &[Symbol], rd_in: Disparity) -> (Vec<Codeword>, Disparity) {
    chain(&[SingleEncoder::default()], symbols, rd_in)
}

/// Decodes MSB-first `codewords`.
pub fn decode(codewords: &[Codeword]) -> Vec<Decoded> {
    let decoder = SingleDecoder::default();
    codewords.iter().map(|&c| decoder.decode(c)).collect()
}

/// Threads running disparity through `symbols`, lane `i % lanes.len()`
/// encoding symbol `i`.
fn chain(lanes: &[SingleEncoder], symbols: &[Symbol], rd_in: Disparity) -> (Vec<Codeword>, Disparity) {
    let mut rd = rd_in;
    let codewords = symbols
        .iter()
        .enumerate()
        .map(|(i, &symbol)| {
            let (codeword, rd_out) = lanes[i % lanes.len()].encode(symbol, rd);
            rd = rd_out;
            codeword
        })
        .collect();
    (codewords, rd)
}

/// `lanes` single-lane encoders chained through running disparity.
#[derive(Debug, Clone)]
pub struct Encoder {
    lanes: Vec<SingleEncoder>,
    /// Disparity the last lane ended on in the previous committed step
    disparity: Disparity,
}

impl Encoder {
    pub fn new(config: &CodecConfig) -> Result<Self> {
        config.validate()?;
        debug!(lanes = config.lanes, bit_order = ?config.bit_order, "creating 8b/10b encoder");
        Ok(Self {
            lanes: vec![SingleEncoder::new(config.bit_order); config.lanes],
            disparity: Disparity::Negative,
        })
    }

    pub fn lanes(&self) -> usize {
        self.lanes.len()
    }

    /// Running disparity the next step starts from.
    pub fn disparity(&self) -> Disparity {
        self.disparity
    }

    /// Resets the carried running disparity, e.g. when a stream restarts.
    pub fn set_disparity(&mut self, disparity: Disparity) {
        self.disparity = disparity;
    }

    /// Encodes one group without touching the carried state.
    ///
    /// Returns the codewords and the disparity that [`Encoder::commit`] should
    /// store to advance the stream.
    pub fn transform(&self, symbols: &[Symbol]) -> Result<(Vec<Codeword>, Disparity)> {
        self.check_width(symbols.len())?;
        Ok(chain(&self.lanes, symbols, self.disparity))
    }

    pub fn commit(&mut self, disparity: Disparity) {
        self.disparity = disparity;
    }

    /// Encodes one group and advances the carried disparity.
    pub fn encode(&mut self, symbols: &[Symbol]) -> Result<Vec<Codeword>> {
        let (codewords, disparity) = self.transform(symbols)?;
        self.commit(disparity);
        Ok(codewords)
    }

    /// One processing step. A disabled step does nothing and returns `None`.
    pub fn step(&mut self, symbols: &[Symbol], enabled: bool) -> Result<Option<Vec<Codeword>>> {
        if !enabled {
            return Ok(None);
        }
        self.encode(symbols).map(Some)
    }

    fn check_width(&self, actual: usize) -> Result<()> {
        if actual != self.lanes.len() {
            return Err(Error::LaneMismatch {
                expected: self.lanes.len(),
                actual,
            });
        }
        Ok(())
    }
}

/// `lanes` independent single-lane decoders.
#[derive(Debug, Clone)]
pub struct Decoder {
    lanes: Vec<SingleDecoder>,
}

impl Decoder {
    pub fn new(config: &CodecConfig) -> Result<Self> {
        config.validate()?;
        debug!(lanes = config.lanes, bit_order = ?config.bit_order, "creating 8b/10b decoder");
        Ok(Self {
            lanes: vec![SingleDecoder::new(config.bit_order); config.lanes],
        })
    }

    pub fn lanes(&self) -> usize {
        self.lanes.len()
    }

    pub fn decode(&self, codewords: &[Codeword]) -> Result<Vec<Decoded>> {
        if codewords.len() != self.lanes.len() {
            return Err(Error::LaneMismatch {
                expected: self.lanes.len(),
                actual: codewords.len(),
            });
        }
        Ok(self
            .lanes
            .iter()
            .zip(codewords)
            .map(|(lane, &codeword)| lane.decode(codeword))
            .collect())
    }

    /// One processing step. A disabled step does nothing and returns `None`.
    pub fn step(&self, codewords: &[Codeword], enabled: bool) -> Result<Option<Vec<Decoded>>> {
        if !enabled {
            return Ok(None);
        }
        self.decode(codewords).map(Some)
    }
}
