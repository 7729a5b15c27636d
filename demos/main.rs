use code8b10b_rs::{decode, encode, Disparity, Symbol};
use std::env;
use std::fs::File;
use std::io::{BufReader, Read};

/// Encodes a file as an 8b/10b line with a K.28.5 comma every 16 bytes,
/// decodes it back and checks the result.
///
/// Usage: cargo run --example main <filename>
fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <filename>", args[0]);
        std::process::exit(1);
    }

    let filename = &args[1];

    let file = File::open(filename).unwrap_or_else(|_| {
        eprintln!("File \"{}\" not found.", filename);
        std::process::exit(1);
    });

    let mut symbols = Vec::new();
    let reader = BufReader::new(file);
    for (i, byte_result) in reader.bytes().enumerate() {
        let byte = byte_result.expect("Error reading file");
        if i % 16 == 0 {
            symbols.push(Symbol::K28_5);
        }
        symbols.push(Symbol::new(byte, false));
    }

    let (codewords, rd) = encode(&symbols, Disparity::Negative);

    // Verify by decoding
    let decoded = decode(&codewords);
    let mut mismatches = 0usize;
    for (position, (expected, actual)) in symbols.iter().zip(&decoded).enumerate() {
        if actual.invalid || actual.symbol != *expected {
            eprintln!("Mismatch at position {}: sent={}, got={}", position, expected, actual.symbol);
            mismatches += 1;
        }
    }

    let ones: usize = codewords.iter().map(|c| c.ones() as usize).sum();
    let commas = codewords.iter().filter(|c| c.is_comma()).count();

    println!("=== Statistics ===");
    println!("Symbols encoded: {}", symbols.len());
    println!("Line bits: {}", codewords.len() * 10);
    println!("Ones: {} / zeros: {}", ones, codewords.len() * 10 - ones);
    println!("Commas: {}", commas);
    println!("Final running disparity: {:?}", rd);
    println!("Mismatches: {}", mismatches);

    if let Some(first) = codewords.first() {
        println!("First codeword: {:b}", first);
    }
}
