//! Property tests across the closed codec set.

use duopack::stats::first_difference;
use duopack::{Codec, CodecKind, Lz77Config};
use proptest::prelude::*;

fn codec_strategy() -> impl Strategy<Value = CodecKind> {
    prop_oneof![
        Just(CodecKind::shannon()),
        (2u32..=10, 1u32..=6).prop_map(|(h, v)| {
            CodecKind::lz77(Lz77Config::new(1 << h, 1 << v)).expect("power-of-two sizes")
        }),
    ]
}

proptest! {
    #[test]
    fn roundtrip(data in proptest::collection::vec(any::<u8>(), 0..2048), codec in codec_strategy()) {
        let packed = codec.encode(&data).unwrap();
        let restored = codec.decode(&packed).unwrap();
        prop_assert_eq!(first_difference(&data, &restored), None);
    }

    #[test]
    fn short_name_parses_back(h in 0u32..=14, v in 0u32..=12) {
        let codec = CodecKind::lz77(Lz77Config::new(1 << h, 1 << v)).unwrap();
        let name = codec.short_name();
        if let Ok(parsed) = name.parse::<CodecKind>() {
            prop_assert_eq!(parsed.short_name(), name);
        }
    }

    #[test]
    fn first_difference_is_first(a in proptest::collection::vec(any::<u8>(), 0..64), b in proptest::collection::vec(any::<u8>(), 0..64)) {
        match first_difference(&a, &b) {
            None => prop_assert_eq!(&a, &b),
            Some(i) => {
                prop_assert_eq!(&a[..i], &b[..i]);
                prop_assert!(i == a.len() || i == b.len() || a[i] != b[i]);
            }
        }
    }
}
