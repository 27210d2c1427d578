//! The shared codec interface.
//!
//! Both codecs are stateless across calls: a codec value is only its
//! configuration, and every buffer lives inside one `encode`/`decode`
//! invocation. That makes every implementation `Send + Sync` so a driver can
//! run independent files on separate threads.

use crate::error::Result;

/// A whole-buffer compressor/decompressor pair.
pub trait Codec: Send + Sync {
    /// Human-readable algorithm name (e.g. `"LZ77"`).
    fn description(&self) -> &'static str;

    /// Short identifier, also used as the output file extension.
    fn short_name(&self) -> String;

    /// Compress `input` into a complete stream, trailer included.
    fn encode(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Reconstruct the original bytes from a complete stream.
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>>;
}

impl<C: Codec + ?Sized> Codec for &C {
    fn description(&self) -> &'static str {
        (**self).description()
    }

    fn short_name(&self) -> String {
        (**self).short_name()
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        (**self).encode(input)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        (**self).decode(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;

    impl Codec for Identity {
        fn description(&self) -> &'static str {
            "Identity"
        }

        fn short_name(&self) -> String {
            "id".to_string()
        }

        fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
            Ok(input.to_vec())
        }

        fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
            Ok(input.to_vec())
        }
    }

    fn roundtrip(codec: impl Codec, data: &[u8]) -> Vec<u8> {
        codec.decode(&codec.encode(data).unwrap()).unwrap()
    }

    #[test]
    fn test_codec_by_reference() {
        let codec = Identity;
        assert_eq!(roundtrip(&codec, b"abc"), b"abc");
        assert_eq!((&codec).short_name(), "id");
    }

    #[test]
    fn test_codec_trait_object() {
        let codecs: Vec<Box<dyn Codec>> = vec![Box::new(Identity)];
        for codec in &codecs {
            assert_eq!(codec.description(), "Identity");
            assert_eq!(codec.decode(b"x").unwrap(), b"x");
        }
    }
}
