use code8b10b_rs::{CodecConfig, StreamDecoder, StreamEncoder, Symbol};
use tracing::{info, Level};

const CONFIG: &str = r#"
lanes = 4
bit_order = "lsb_first"
"#;

/// Streams symbol groups through an encoder and decoder while the consumer
/// stalls every third step.
///
/// Usage: cargo run --example stream
fn main() -> code8b10b_rs::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let config = CodecConfig::from_toml_str(CONFIG)?;
    let mut encoder = StreamEncoder::new(&config)?;
    let mut decoder = StreamDecoder::new(&config)?;

    let groups: Vec<Vec<Symbol>> = (0..32u8)
        .map(|i| {
            let mut group: Vec<Symbol> = (0..config.lanes as u8).map(|lane| Symbol::new(i * 8 + lane, false)).collect();
            if i % 8 == 0 {
                group[0] = Symbol::K28_5;
            }
            group
        })
        .collect();

    let mut pending = groups.iter().peekable();
    let mut encoded = Vec::new();
    let mut step = 0usize;
    while pending.peek().is_some() || encoder.in_flight() > 0 {
        let consumer_ready = step % 3 != 2;
        let offered = pending.peek().map(|g| g.as_slice());
        let result = encoder.step(offered, consumer_ready)?;
        if result.accepted {
            pending.next();
        }
        encoded.extend(result.output);
        step += 1;
    }

    let decoded = decoder.run(encoded.iter().map(Vec::as_slice))?;
    let intact = groups
        .iter()
        .zip(&decoded)
        .all(|(sent, got)| sent.iter().zip(got).all(|(s, d)| *s == d.symbol && !d.invalid));

    let stats = encoder.stats();
    info!(
        steps = step,
        accepted = stats.accepted,
        emitted = stats.emitted,
        stalled = stats.stalled,
        intact,
        "stream finished"
    );
    Ok(())
}
