//! WAH integration tests.

use oxiidx_core::{Bitmap, BitmapCodec, WordSize};
use oxiidx_wah::{Wah, WahConfig, compress, compress_with_trace, decompress};
use proptest::prelude::*;

#[test]
fn test_literal_vs_run_w8() {
    assert_eq!(compress("1010001", 8).unwrap(), "01010001");
    assert_eq!(compress("1111111", 8).unwrap(), "11000001");
    assert_eq!(compress("0000000", 8).unwrap(), "10000001");
}

#[test]
fn test_short_final_chunk_is_literal() {
    for tail in ["1", "11", "111111", "0", "000000"] {
        let encoded = compress(tail, 8).unwrap();
        assert_eq!(encoded.len(), 8, "tail {tail:?}");
        assert!(encoded.starts_with('0'), "tail {tail:?} encoded as a run");
    }
}

#[test]
fn test_word_sizes() {
    // One full chunk of ones per word size encodes as a run of one.
    for word_size in WordSize::ALL {
        let ws = word_size.bits() as usize;
        let bits = "1".repeat(ws - 1);
        let encoded = compress(&bits, ws as u32).unwrap();
        let expected = format!("11{}1", "0".repeat(ws - 3));
        assert_eq!(encoded, expected, "{word_size}");
    }
}

#[test]
fn test_w64_long_run() {
    let bits = "0".repeat(63 * 1000);
    let encoded = compress(&bits, 64).unwrap();
    assert_eq!(encoded.len(), 64);
    assert_eq!(decompress(&encoded, 64, bits.len()).unwrap(), bits);
}

#[test]
fn test_w32_mixed_roundtrip() {
    let bits = "1".repeat(31 * 3) + "0101" + &"0".repeat(31 * 2) + "1";
    let encoded = compress(&bits, 32).unwrap();
    assert_eq!(decompress(&encoded, 32, bits.len()).unwrap(), bits);
}

#[test]
fn test_determinism() {
    let bits = "110100000000000000000111111111111111111010".repeat(30);
    assert_eq!(compress(&bits, 16).unwrap(), compress(&bits, 16).unwrap());
}

#[test]
fn test_trace_matches_plain_output() {
    let bits = "0".repeat(100) + &"1".repeat(45) + "1011" + &"0".repeat(15);
    for ws in [8, 16, 32, 64] {
        let (encoded, steps) = compress_with_trace(&bits, ws).unwrap();
        assert_eq!(encoded, compress(&bits, ws).unwrap());
        let joined: String = steps.iter().map(|s| s.compressed.as_str()).collect();
        assert_eq!(joined, encoded);
    }
}

#[test]
fn test_trace_json_shape() {
    let (_, steps) = compress_with_trace("11111111010000", 8).unwrap();
    let json = serde_json::to_value(&steps).unwrap();
    assert_eq!(json[0]["runs"], 1);
    assert_eq!(json[0]["runType"], "1");
    assert_eq!(json[0]["startIndex"], 0);
    assert_eq!(json[1]["runType"], serde_json::Value::Null);
    assert_eq!(json[1]["compressed"], "01010000");
}

#[test]
fn test_codec_struct() {
    let codec = Wah::new(WahConfig::new(WordSize::W16));
    let bitmap: Bitmap = "1".repeat(100).parse().unwrap();
    let encoded = codec.compress(&bitmap).unwrap();
    assert_eq!(encoded.unit_bits(), 16);
    assert_eq!(codec.decompress(&encoded, 100).unwrap(), bitmap);
}

fn word_sizes() -> impl Strategy<Value = u32> {
    prop_oneof![Just(8u32), Just(16), Just(32), Just(64)]
}

proptest! {
    #[test]
    fn prop_roundtrip(bits in "[01]{0,500}", ws in word_sizes()) {
        let encoded = compress(&bits, ws).unwrap();
        prop_assert_eq!(decompress(&encoded, ws, bits.len()).unwrap(), bits);
    }

    #[test]
    fn prop_roundtrip_runs(
        runs in proptest::collection::vec((any::<bool>(), 1usize..200), 0..20),
        ws in word_sizes(),
    ) {
        let bits: String = runs
            .iter()
            .map(|&(bit, len)| if bit { "1" } else { "0" }.repeat(len))
            .collect();
        let encoded = compress(&bits, ws).unwrap();
        prop_assert_eq!(decompress(&encoded, ws, bits.len()).unwrap(), bits);
    }
}
