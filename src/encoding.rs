//! One-shot encode and decode against an [`Alphabet`].

use crate::alphabet::Alphabet;
use crate::block;
use crate::pool;
use crate::streaming;

/// Errors that can occur during decoding.
#[derive(Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The input string is empty
    EmptyInput,
    /// The input length is impossible for the alphabet's padding policy
    InvalidLength(usize),
    /// The padding symbol is missing, misplaced, or over-long
    InvalidPadding,
    /// The input contains a character outside the alphabet
    InvalidCharacter(char),
    /// The decoded payload is not valid UTF-8 text
    InvalidUtf8,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::EmptyInput => write!(f, "Cannot decode empty input"),
            DecodeError::InvalidLength(len) => {
                write!(f, "Invalid encoded length: {}", len)
            }
            DecodeError::InvalidPadding => write!(f, "Invalid padding"),
            DecodeError::InvalidCharacter(c) => {
                write!(f, "Invalid character in input: {}", c)
            }
            DecodeError::InvalidUtf8 => write!(f, "Decoded payload is not valid UTF-8"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Encodes a byte slice into its textual representation.
pub fn encode(data: &[u8], alphabet: &Alphabet) -> String {
    let mut out = vec![0u8; alphabet.encoded_len(data.len())];
    let written = block::encode_final(data, alphabet, &mut out);
    debug_assert_eq!(written, out.len());
    // SAFETY: every symbol comes from the alphabet tables, which hold only
    // 7-bit ASCII by the alphabet invariant.
    unsafe { String::from_utf8_unchecked(out) }
}

/// Encodes UTF-8 text, byte-identical to `encode(text.as_bytes(), ..)`.
///
/// The text is pulled through the bounded working buffer in chunks that
/// never split a multi-byte character, so arbitrarily large inputs stay
/// within one chunk of memory on the source side.
pub fn encode_str(text: &str, alphabet: &Alphabet) -> String {
    let mut out = vec![0u8; alphabet.encoded_len(text.len())];
    let mut chunk = pool::acquire(pool::SOURCE_CAPACITY);
    let written = streaming::chunk_text(text, alphabet, &mut chunk, &mut out);
    debug_assert_eq!(written, out.len());
    // SAFETY: as in `encode`, the output holds only ASCII symbols.
    unsafe { String::from_utf8_unchecked(out) }
}

/// Decodes an encoded string back into bytes.
///
/// Fails on structurally malformed input: empty strings, lengths impossible
/// under the alphabet's padding policy, padding anywhere but the end of the
/// final group, or characters outside the alphabet.
pub fn decode(encoded: &str, alphabet: &Alphabet) -> Result<Vec<u8>, DecodeError> {
    if encoded.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    if let Some(c) = encoded.chars().find(|c| !c.is_ascii()) {
        return Err(DecodeError::InvalidCharacter(c));
    }

    let symbols = encoded.as_bytes();
    let (payload_len, total) = decoded_len(symbols, alphabet)?;
    let payload = &symbols[..payload_len];

    let mut out = vec![0u8; total];
    let full = total - total % 3;

    let mut j = 0;
    for i in (0..full).step_by(3) {
        let v0 = symbol_value(alphabet, payload[j])?;
        let v1 = symbol_value(alphabet, payload[j + 1])?;
        let v2 = symbol_value(alphabet, payload[j + 2])?;
        let v3 = symbol_value(alphabet, payload[j + 3])?;
        out[i] = v0 << 2 | v1 >> 4;
        out[i + 1] = v1 << 4 | v2 >> 2;
        out[i + 2] = v2 << 6 | v3;
        j += 4;
    }

    match total - full {
        1 => {
            let v0 = symbol_value(alphabet, payload[j])?;
            let v1 = symbol_value(alphabet, payload[j + 1])?;
            out[full] = v0 << 2 | v1 >> 4;
        }
        2 => {
            let v0 = symbol_value(alphabet, payload[j])?;
            let v1 = symbol_value(alphabet, payload[j + 1])?;
            let v2 = symbol_value(alphabet, payload[j + 2])?;
            out[full] = v0 << 2 | v1 >> 4;
            out[full + 1] = v1 << 4 | v2 >> 2;
        }
        _ => {}
    }

    Ok(out)
}

/// Decodes an encoded string back into UTF-8 text.
pub fn decode_str(encoded: &str, alphabet: &Alphabet) -> Result<String, DecodeError> {
    let bytes = decode(encoded, alphabet)?;
    String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)
}

/// Validates the structure of an encoded string and returns the payload
/// symbol count (excluding trailing padding) and the decoded byte count.
fn decoded_len(symbols: &[u8], alphabet: &Alphabet) -> Result<(usize, usize), DecodeError> {
    let len = symbols.len();
    match alphabet.padding_byte() {
        Some(pad) => {
            if len % 4 != 0 {
                return Err(DecodeError::InvalidLength(len));
            }
            let trailing = symbols.iter().rev().take_while(|&&b| b == pad).count();
            if trailing > 2 {
                return Err(DecodeError::InvalidPadding);
            }
            Ok((len - trailing, len / 4 * 3 - trailing))
        }
        None => {
            // A lone trailing symbol carries only 6 bits, less than a byte;
            // the other residues carry 1 or 2 whole extra bytes.
            let extra = match len % 4 {
                0 => 0,
                2 => 1,
                3 => 2,
                _ => return Err(DecodeError::InvalidLength(len)),
            };
            Ok((len, len / 4 * 3 + extra))
        }
    }
}

fn symbol_value(alphabet: &Alphabet, symbol: u8) -> Result<u8, DecodeError> {
    match alphabet.value_of(symbol) {
        Some(value) => Ok(value),
        None if alphabet.padding_byte() == Some(symbol) => Err(DecodeError::InvalidPadding),
        None => Err(DecodeError::InvalidCharacter(symbol as char)),
    }
}
