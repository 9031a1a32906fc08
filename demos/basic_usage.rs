//! Basic usage example for ffwd-client
//!
//! Run with: cargo run --example basic_usage
//!
//! Sends one metric and one event to the collector on localhost:19091.
//! Set `RUST_LOG=ffwd_client=trace` to see client logs.

use ffwd_client::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("ffwd-client Basic Usage Example");
    println!("===============================");

    // Example 1: Building records
    println!("\n1. Persistent builders:");
    let base = Metric::for_key("cpu.load").with_host("node1");
    let sample = base.with_value(0.73).with_tag("prod");
    println!("  base fields:   {:?}", base.fields());
    println!("  sample fields: {:?}", sample.fields());

    // Example 2: Inspecting the encoded frame
    println!("\n2. Encoded frame:");
    let frame = frame::encode_frame(&sample.serialize())?;
    let decoder = FrameDecoder::new(&frame);
    let header = decoder.header()?;
    println!("  version={}, length={}", header.version, header.length);

    let (kind, cursor) = decoder.record()?;
    println!("  kind={:?}", kind);
    for field in cursor {
        let field = field?;
        println!("    #{} {:?}", field.number, field.value);
    }

    // Example 3: Sending
    println!("\n3. Sending to the collector:");
    let config = ClientConfig::default();
    let client = Client::from_config(&config);
    if !client.ready() {
        eprintln!("  Not ready to send ({})", config.address());
        return Ok(());
    }

    let event = Event::for_key("deploy")
        .with_state("ok")
        .with_ttl(300)
        .with_attribute("version", "0.1.0");

    println!("  metric: {:?}", client.send(&sample));
    println!("  event:  {:?}", client.send(&event));

    Ok(())
}
