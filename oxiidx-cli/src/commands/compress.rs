//! Compress command implementation.

use crate::codec::Codec;
use crate::utils::{print_stats, read_bits};
use oxiidx_core::Bitmap;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// JSON document printed by `compress --trace`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TraceOutput {
    codec: String,
    input_bits: usize,
    compressed: String,
    steps: serde_json::Value,
}

pub fn cmd_compress(
    codec: Codec,
    bits: Option<String>,
    input: Option<&Path>,
    trace: bool,
    stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let bits = read_bits(bits, input)?;
    let bitmap = Bitmap::from_bit_str(&bits)?;
    info!(%codec, bits = bitmap.len(), "compressing");

    let encoded = if trace {
        let (encoded, steps) = codec.compress_traced(&bitmap)?;
        let output = TraceOutput {
            codec: codec.to_string(),
            input_bits: bitmap.len(),
            compressed: encoded.to_bit_string(),
            steps,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        encoded
    } else {
        let encoded = codec.compress(&bitmap)?;
        println!("{}", encoded);
        encoded
    };

    if stats {
        print_stats(&codec.to_string(), bitmap.len(), &encoded);
    }
    Ok(())
}
