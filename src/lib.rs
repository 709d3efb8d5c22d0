//! Configurable Base64 transcoder.
//!
//! Every alphabet in the family shares positions 0-61 (`A`-`Z`, `a`-`z`,
//! `0`-`9`); the caller picks the characters for positions 62 and 63 and an
//! optional padding character. Encoding runs a SIMD block transform over the
//! group-aligned bulk of the input (scalar on platforms without SSSE3, or
//! with the `simd` feature disabled) and a tail handler over the final
//! partial group. Sources too large for one working buffer go through
//! [`StreamingEncoder`], which chunks them through a pooled 1 KiB buffer
//! without ever splitting a 3-byte group.
//!
//! Without padding, a partial final group encodes to `remainder + 1` symbols
//! and the output length is not rounded up to a multiple of 4.
//!
//! ```
//! use sixbit::{encode, decode_str, Alphabet};
//!
//! let alphabet = Alphabet::standard();
//! let encoded = encode(b"hello world", &alphabet);
//! assert_eq!(encoded, "aGVsbG8gd29ybGQ=");
//! assert_eq!(decode_str(&encoded, &alphabet).unwrap(), "hello world");
//!
//! let unpadded = Alphabet::standard_no_pad();
//! assert_eq!(encode(b"hello world", &unpadded), "aGVsbG8gd29ybGQ");
//! ```

mod alphabet;
mod block;
mod config;
mod encoding;
mod pool;
#[cfg(all(feature = "simd", target_arch = "x86_64"))]
mod simd;
mod streaming;

pub use alphabet::Alphabet;
pub use config::{AlphabetRegistry, AlphabetSpec};
pub use encoding::DecodeError;
pub use streaming::StreamingEncoder;

/// Encodes a byte slice with the given alphabet.
pub fn encode(data: &[u8], alphabet: &Alphabet) -> String {
    encoding::encode(data, alphabet)
}

/// Encodes UTF-8 text with the given alphabet.
///
/// Byte-identical to `encode(text.as_bytes(), alphabet)`; the text is fed
/// through the chunked driver in character-boundary-respecting slices.
pub fn encode_str(text: &str, alphabet: &Alphabet) -> String {
    encoding::encode_str(text, alphabet)
}

/// Decodes an encoded string back into bytes.
pub fn decode(encoded: &str, alphabet: &Alphabet) -> Result<Vec<u8>, DecodeError> {
    encoding::decode(encoded, alphabet)
}

/// Decodes an encoded string back into UTF-8 text.
pub fn decode_str(encoded: &str, alphabet: &Alphabet) -> Result<String, DecodeError> {
    encoding::decode_str(encoded, alphabet)
}
