//! Decompress command implementation.

use crate::codec::Codec;
use crate::utils::read_bits;
use oxiidx_core::EncodedBitmap;
use std::path::Path;
use tracing::info;

pub fn cmd_decompress(
    codec: Codec,
    bits: Option<String>,
    input: Option<&Path>,
    length: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let bits = read_bits(bits, input)?;
    let encoded = EncodedBitmap::from_bit_str(&bits, codec.unit_bits())?;
    info!(%codec, units = encoded.len(), length, "decompressing");

    let bitmap = codec.decompress(&encoded, length)?;
    println!("{}", bitmap);
    Ok(())
}
