//! Property tests for the Shannon-Fano codec.

use duopack_shannon::{CodeTable, FrequencyTable, compress, decompress};
use proptest::prelude::*;

proptest! {
    #[test]
    fn roundtrip(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let compressed = compress(&data).unwrap();
        prop_assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn codes_are_prefix_free(data in proptest::collection::vec(any::<u8>(), 1..2048)) {
        let frequencies = FrequencyTable::from_bytes(&data);
        let table = CodeTable::build(&frequencies);
        prop_assert_eq!(table.len(), frequencies.distinct());
        prop_assert!(table.is_prefix_free());
    }

    #[test]
    fn skewed_codes_are_prefix_free(weights in proptest::collection::vec(1usize..200, 1..64)) {
        let mut data = Vec::new();
        for (symbol, &weight) in weights.iter().enumerate() {
            data.extend(std::iter::repeat_n(symbol as u8, weight));
        }
        let table = CodeTable::build(&FrequencyTable::from_bytes(&data));
        prop_assert!(table.is_prefix_free());
    }

    #[test]
    fn counting_is_idempotent(data in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let once = FrequencyTable::from_bytes(&data);
        let twice = FrequencyTable::from_bytes(&data);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.total(), data.len() as u64);
    }

    #[test]
    fn sort_is_stable(data in proptest::collection::vec(0u8..16, 0..512)) {
        let sorted = FrequencyTable::from_bytes(&data).sorted_by_count();
        for pair in sorted.windows(2) {
            prop_assert!(pair[0].1 < pair[1].1 || (pair[0].1 == pair[1].1 && pair[0].0 < pair[1].0));
        }
    }

    #[test]
    fn trailer_count_in_range(data in proptest::collection::vec(any::<u8>(), 0..512)) {
        let compressed = compress(&data).unwrap();
        prop_assert!(compressed[compressed.len() - 1] <= 7);
    }
}
