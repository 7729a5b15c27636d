//! # code8b10b - IBM 8b/10b line code
//!
//! Maps 8-bit data and control symbols to 10-bit codewords that are DC balanced
//! and rich in bit transitions, and maps them back.
//!
//! Each codeword is built from a 5b/6b and a 3b/4b sub-code. Unbalanced
//! sub-codes are sent in the polarity that pulls the running disparity back
//! toward zero, so the encoder carries one bit of state from symbol to symbol.
//! The decoder needs no state.
//!
//! ## Example
//!
//! ```
//! use code8b10b_rs::{decode, encode, Disparity, Symbol};
//!
//! let symbols = [Symbol::K28_5, Symbol::d(21, 5), Symbol::d(7, 0)];
//! let (codewords, rd) = encode(&symbols, Disparity::Negative);
//! assert_eq!(codewords[0].value(), 0b001111_1010);
//! assert_eq!(rd, Disparity::Negative);
//!
//! let decoded: Vec<Symbol> = decode(&codewords).iter().map(|d| d.symbol).collect();
//! assert_eq!(decoded, symbols);
//! ```
//!
//! ## Lanes and streaming
//!
//! [`Encoder`] and [`Decoder`] process a fixed number of symbols per step,
//! threading running disparity across lanes and from one step to the next.
//! [`StreamEncoder`] and [`StreamDecoder`] put them behind a valid/ready
//! handshake with a latency of two and one steps respectively.
//!
//! ```
//! use code8b10b_rs::{BitOrder, CodecConfig, StreamDecoder, StreamEncoder, Symbol};
//!
//! let config = CodecConfig::new(2, BitOrder::LsbFirst);
//! let mut encoder = StreamEncoder::new(&config).unwrap();
//! let mut decoder = StreamDecoder::new(&config).unwrap();
//!
//! let groups = vec![vec![Symbol::K28_5, Symbol::d(1, 2)], vec![Symbol::d(3, 4), Symbol::K28_1]];
//! let encoded = encoder.run(groups.clone()).unwrap();
//! let decoded = decoder.run(encoded).unwrap();
//! for (group, out) in groups.iter().zip(&decoded) {
//!     let symbols: Vec<Symbol> = out.iter().map(|d| d.symbol).collect();
//!     assert_eq!(&symbols, group);
//! }
//! ```

mod config;
mod decoder;
mod encoder;
mod error;
mod lanes;
mod stream;
mod symbol;
mod tables;

#[cfg(test)]
mod tests;

pub use config::{BitOrder, CodecConfig};
pub use decoder::SingleDecoder;
pub use encoder::SingleEncoder;
pub use error::{Error, Result};
pub use lanes::{decode, encode, Decoder, Encoder};
pub use stream::{Pipeline, Stage, Step, StreamDecoder, StreamEncoder, StreamStats};
pub use symbol::{disparity, Codeword, Decoded, Disparity, Symbol, CONTROL_SYMBOLS};
pub use tables::{tables, Tables};
