//! BBC integration tests.

use oxiidx_bbc::{Bbc, compress, compress_with_trace, decompress};
use oxiidx_core::{Bitmap, BitmapCodec};
use proptest::prelude::*;

/// `n` zero bytes followed by one literal byte, as a bit string.
fn runs_then_literal(n: usize) -> String {
    let mut bits = "0".repeat(n * 8);
    bits.push_str("10101010");
    bits
}

#[test]
fn test_empty_input() {
    assert_eq!(compress("").unwrap(), "");
    assert_eq!(decompress("", 0).unwrap(), "");
}

#[test]
fn test_six_runs_single_header_byte() {
    let encoded = compress(&runs_then_literal(6)).unwrap();
    assert_eq!(&encoded[..8], "11000001");
    assert_eq!(&encoded[8..], "10101010");
}

#[test]
fn test_seven_runs_escape_form() {
    let encoded = compress(&runs_then_literal(7)).unwrap();
    assert_eq!(&encoded[..8], "11100001");
    assert_eq!(&encoded[8..16], "00000111");
    assert_eq!(&encoded[16..], "10101010");
}

#[test]
fn test_127_runs_two_byte_form() {
    let encoded = compress(&runs_then_literal(127)).unwrap();
    assert_eq!(encoded.len(), 24);
    assert_eq!(&encoded[8..16], "01111111");
}

#[test]
fn test_128_runs_three_byte_form() {
    let encoded = compress(&runs_then_literal(128)).unwrap();
    assert_eq!(encoded.len(), 32);
    assert_eq!(&encoded[..8], "11100001");
    assert_eq!(&encoded[8..16], "10000000");
    assert_eq!(&encoded[16..24], "10000000");
}

#[test]
fn test_max_run_boundary() {
    // Exactly 2^15 - 1 zero bytes: one forced flush using the 3-byte form.
    let bits = "0".repeat(((1 << 15) - 1) * 8);
    let encoded = compress(&bits).unwrap();
    assert_eq!(encoded, "111000001111111111111111");
    assert_eq!(decompress(&encoded, bits.len()).unwrap(), bits);

    // One more zero byte starts a fresh run.
    let bits = "0".repeat((1 << 15) * 8);
    let encoded = compress(&bits).unwrap();
    assert_eq!(encoded, "11100000111111111111111100100000");
    assert_eq!(decompress(&encoded, bits.len()).unwrap(), bits);
}

#[test]
fn test_long_literal_stretch() {
    let bits = "10110111".repeat(100);
    let encoded = compress(&bits).unwrap();
    // 100 literals need 7 headers (6 full chunks of 15, one of 10).
    assert_eq!(encoded.len(), (100 + 7) * 8);
    assert_eq!(decompress(&encoded, bits.len()).unwrap(), bits);
}

#[test]
fn test_determinism() {
    let bits = "0000000100000000111100001000000000000000".repeat(20);
    assert_eq!(compress(&bits).unwrap(), compress(&bits).unwrap());
}

#[test]
fn test_trace_covers_input() {
    let bits = "00000000".repeat(3) + "00000100" + "11110000" + &"00000000".repeat(9);
    let (encoded, steps) = compress_with_trace(&bits).unwrap();
    let joined: String = steps.iter().map(|s| s.encoded_bits()).collect();
    assert_eq!(joined, encoded);
    assert_eq!(steps.first().map(|s| s.start_byte), Some(0));
    assert_eq!(steps.last().map(|s| s.end_byte), Some(bits.len() / 8));
}

#[test]
fn test_codec_trait() {
    let bitmap: Bitmap = "0000000000000000000000001".parse().unwrap();
    let encoded = Bbc.compress(&bitmap).unwrap();
    assert_eq!(encoded.unit_bits(), 8);
    assert_eq!(Bbc.decompress(&encoded, bitmap.len()).unwrap(), bitmap);
}

proptest! {
    #[test]
    fn prop_roundtrip(bits in "[01]{0,600}") {
        let encoded = compress(&bits).unwrap();
        prop_assert_eq!(decompress(&encoded, bits.len()).unwrap(), bits);
    }

    #[test]
    fn prop_roundtrip_sparse(bytes in proptest::collection::vec(
        prop_oneof![8 => Just(0u8), 2 => any::<u8>(), 1 => Just(0x10u8)],
        0..400,
    )) {
        let bitmap = Bitmap::from_bytes(&bytes, bytes.len() * 8).unwrap();
        let encoded = Bbc.compress(&bitmap).unwrap();
        prop_assert_eq!(Bbc.decompress(&encoded, bitmap.len()).unwrap(), bitmap);
    }
}
