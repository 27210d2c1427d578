//! Property tests for the LZ77 codec.

use duopack_lz77::{Lz77Config, Lz77Encoder, Lz77Token, compress, decompress};
use proptest::prelude::*;

fn config_strategy() -> impl Strategy<Value = Lz77Config> {
    (0u32..=8, 0u32..=6).prop_map(|(h, v)| Lz77Config::new(1 << h, 1 << v))
}

proptest! {
    #[test]
    fn roundtrip(data in proptest::collection::vec(any::<u8>(), 0..2048), config in config_strategy()) {
        let compressed = compress(&data, config).unwrap();
        let decompressed = decompress(&compressed, config).unwrap();
        prop_assert_eq!(decompressed, data);
    }

    #[test]
    fn roundtrip_low_entropy(data in proptest::collection::vec(0u8..4, 0..4096)) {
        let config = Lz77Config::new(64, 16);
        let compressed = compress(&data, config).unwrap();
        prop_assert_eq!(decompress(&compressed, config).unwrap(), data);
    }

    #[test]
    fn tokens_respect_window(data in proptest::collection::vec(0u8..8, 0..1024), config in config_strategy()) {
        let tokens = Lz77Encoder::new(config).unwrap().tokenize(&data).unwrap();
        let mut covered = 0usize;
        for token in &tokens {
            if let Lz77Token::Match { offset, length, .. } = *token {
                prop_assert!(offset >= 1 && (offset as usize) < config.history_size);
                prop_assert!(length >= 1 && (length as usize) < config.view_size);
                prop_assert!(offset as usize <= covered);
            }
            covered += token.advance();
        }
        prop_assert_eq!(covered, data.len());
    }

    #[test]
    fn trailer_count_in_range(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let compressed = compress(&data, Lz77Config::SMALL).unwrap();
        prop_assert!(compressed.len() >= 2);
        prop_assert!(compressed[compressed.len() - 1] <= 7);
    }
}
