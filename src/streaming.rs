//! Chunked driver for sources too large for a single working buffer.
//!
//! The driver pulls fixed-size slices of the source through a pooled working
//! buffer, runs the block transform over the group-aligned prefix of each
//! chunk, and carries the 0-2 leftover bytes to the front of the buffer for
//! the next fill. The final fill goes through the tail handler instead, so
//! no 3-byte group is ever split across a chunk boundary and the total
//! output length is exactly the one-shot encoded length.

use std::io::{Read, Write};

use crate::alphabet::Alphabet;
use crate::block;
use crate::pool;

/// Streaming encoder for byte or text sources of unbounded size.
///
/// Output is written incrementally; source-side memory stays bounded by one
/// pooled working buffer. Decoding has no streaming counterpart: encoded
/// inputs are decoded in memory.
pub struct StreamingEncoder<'a, W: Write> {
    alphabet: &'a Alphabet,
    writer: W,
}

impl<'a, W: Write> StreamingEncoder<'a, W> {
    /// Creates a new streaming encoder.
    ///
    /// # Arguments
    ///
    /// * `alphabet` - The alphabet to encode with
    /// * `writer` - The destination for encoded output
    pub fn new(alphabet: &'a Alphabet, writer: W) -> Self {
        StreamingEncoder { alphabet, writer }
    }

    /// Encodes everything the reader yields, in chunks. Returns the number
    /// of symbols written.
    pub fn encode<R: Read>(&mut self, reader: &mut R) -> std::io::Result<u64> {
        let mut source = pool::acquire(pool::SOURCE_CAPACITY);
        let mut output = pool::acquire(pool::OUTPUT_CAPACITY);
        self.encode_with(reader, &mut source, &mut output)
    }

    /// Chunk loop behind [`encode`](Self::encode), parameterized over the
    /// working buffers so the chunking itself is testable.
    pub(crate) fn encode_with<R: Read>(
        &mut self,
        reader: &mut R,
        source: &mut [u8],
        output: &mut [u8],
    ) -> std::io::Result<u64> {
        debug_assert!(source.len() >= block::SOURCE_GROUP);
        debug_assert!(output.len() >= self.alphabet.encoded_len(source.len()));

        let mut carry = 0;
        let mut written = 0u64;
        loop {
            let (filled, eof) = fill(reader, source, carry)?;
            if eof {
                let n = block::encode_final(&source[..filled], self.alphabet, output);
                self.writer.write_all(&output[..n])?;
                return Ok(written + n as u64);
            }

            let leftover = filled % block::SOURCE_GROUP;
            let split = filled - leftover;
            let n = split / block::SOURCE_GROUP * block::TARGET_GROUP;
            block::encode_blocks(&source[..split], self.alphabet.encode_table(), &mut output[..n]);
            self.writer.write_all(&output[..n])?;
            written += n as u64;

            source.copy_within(split..filled, 0);
            carry = leftover;
        }
    }

    /// Encodes UTF-8 text, byte-identical to encoding `text.as_bytes()`.
    /// Chunk boundaries are chosen in bytes but never split a multi-byte
    /// character.
    pub fn encode_text(&mut self, text: &str) -> std::io::Result<u64> {
        let mut source = pool::acquire(pool::SOURCE_CAPACITY);
        let mut output = pool::acquire(pool::OUTPUT_CAPACITY);

        let mut rest = text;
        let mut carry = 0;
        let mut written = 0u64;
        loop {
            let take = char_prefix(rest, source.len() - carry);
            source[carry..carry + take.len()].copy_from_slice(take.as_bytes());
            let filled = carry + take.len();
            rest = &rest[take.len()..];

            if rest.is_empty() {
                let n = block::encode_final(&source[..filled], self.alphabet, &mut output);
                self.writer.write_all(&output[..n])?;
                return Ok(written + n as u64);
            }

            let leftover = filled % block::SOURCE_GROUP;
            let split = filled - leftover;
            let n = split / block::SOURCE_GROUP * block::TARGET_GROUP;
            block::encode_blocks(&source[..split], self.alphabet.encode_table(), &mut output[..n]);
            self.writer.write_all(&output[..n])?;
            written += n as u64;

            source.copy_within(split..filled, 0);
            carry = leftover;
        }
    }
}

/// In-memory text chunk loop for `encode_str`: same carry discipline as the
/// streaming driver, writing into a pre-sized output slice. Returns symbols
/// written.
pub(crate) fn chunk_text(
    text: &str,
    alphabet: &Alphabet,
    chunk: &mut [u8],
    out: &mut [u8],
) -> usize {
    // Room for a 2-byte carry plus the widest UTF-8 character, so every
    // iteration makes progress.
    debug_assert!(chunk.len() >= 6);

    let mut rest = text;
    let mut carry = 0;
    let mut written = 0;
    loop {
        let take = char_prefix(rest, chunk.len() - carry);
        chunk[carry..carry + take.len()].copy_from_slice(take.as_bytes());
        let filled = carry + take.len();
        rest = &rest[take.len()..];

        if rest.is_empty() {
            return written + block::encode_final(&chunk[..filled], alphabet, &mut out[written..]);
        }

        let leftover = filled % block::SOURCE_GROUP;
        let split = filled - leftover;
        let n = split / block::SOURCE_GROUP * block::TARGET_GROUP;
        block::encode_blocks(
            &chunk[..split],
            alphabet.encode_table(),
            &mut out[written..written + n],
        );
        written += n;

        chunk.copy_within(split..filled, 0);
        carry = leftover;
    }
}

/// Longest prefix of `text` at most `max_bytes` long that ends on a
/// character boundary.
fn char_prefix(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Reads into `buf[start..]` until the buffer is full or the reader is
/// exhausted. Returns the fill level and whether the source hit EOF.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8], start: usize) -> std::io::Result<(usize, bool)> {
    let mut filled = start;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            return Ok((filled, true));
        }
        filled += n;
    }
    Ok((filled, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::encode;
    use std::io::Cursor;

    #[test]
    fn streamed_output_matches_one_shot() {
        let alphabet = Alphabet::standard();
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();

        let mut streamed = Vec::new();
        let written = StreamingEncoder::new(&alphabet, &mut streamed)
            .encode(&mut Cursor::new(&data))
            .unwrap();

        let one_shot = encode(&data, &alphabet);
        assert_eq!(written, one_shot.len() as u64);
        assert_eq!(streamed, one_shot.as_bytes());
    }

    #[test]
    fn tiny_working_buffers_are_invisible() {
        let alphabet = Alphabet::standard_no_pad();
        let data: Vec<u8> = (0..997u32).map(|i| (i * 31 % 256) as u8).collect();
        let one_shot = encode(&data, &alphabet);

        for capacity in [3, 4, 5, 7, 8, 16, 64] {
            let mut source = vec![0u8; capacity];
            let mut output = vec![0u8; alphabet.encoded_len(capacity)];
            let mut streamed = Vec::new();
            StreamingEncoder::new(&alphabet, &mut streamed)
                .encode_with(&mut Cursor::new(&data), &mut source, &mut output)
                .unwrap();
            assert_eq!(
                streamed,
                one_shot.as_bytes(),
                "divergence at capacity {}",
                capacity
            );
        }
    }

    #[test]
    fn source_sized_exactly_to_buffer_still_terminates() {
        let alphabet = Alphabet::standard();
        for len in [pool::SOURCE_CAPACITY - 1, pool::SOURCE_CAPACITY, pool::SOURCE_CAPACITY + 1] {
            let data = vec![0xA7u8; len];
            let mut streamed = Vec::new();
            StreamingEncoder::new(&alphabet, &mut streamed)
                .encode(&mut Cursor::new(&data))
                .unwrap();
            assert_eq!(streamed, encode(&data, &alphabet).as_bytes());
        }
    }

    #[test]
    fn text_streaming_matches_byte_encoding() {
        let alphabet = Alphabet::url_safe();
        let text = "héllo wörld / 漢字テスト / καρδιά / 🫀 ".repeat(200);

        let mut streamed = Vec::new();
        StreamingEncoder::new(&alphabet, &mut streamed)
            .encode_text(&text)
            .unwrap();

        assert_eq!(streamed, encode(text.as_bytes(), &alphabet).as_bytes());
    }

    #[test]
    fn char_prefix_backs_off_to_boundaries() {
        let text = "aé漢";
        assert_eq!(char_prefix(text, 0), "");
        assert_eq!(char_prefix(text, 1), "a");
        assert_eq!(char_prefix(text, 2), "a");
        assert_eq!(char_prefix(text, 3), "aé");
        assert_eq!(char_prefix(text, 5), "aé");
        assert_eq!(char_prefix(text, 6), "aé漢");
        assert_eq!(char_prefix(text, 10), "aé漢");
    }
}
