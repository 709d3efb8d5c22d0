//! The block transform: bulk 3-byte-group to 4-symbol expansion, plus the
//! tail handler for the final partial group.

use crate::alphabet::Alphabet;

/// Bytes per source group.
pub(crate) const SOURCE_GROUP: usize = 3;
/// Symbols per target group.
pub(crate) const TARGET_GROUP: usize = 4;

/// Expands a group-aligned byte span into symbols.
///
/// `src.len()` must be a multiple of 3 and `dst` exactly 4/3 as long; the
/// tail never comes through here. Uses the SIMD kernel when the platform
/// supports it, with scalar cleanup for the stride remainder.
pub(crate) fn encode_blocks(src: &[u8], table: &[u8; 256], dst: &mut [u8]) {
    debug_assert_eq!(src.len() % SOURCE_GROUP, 0);
    debug_assert_eq!(dst.len(), src.len() / SOURCE_GROUP * TARGET_GROUP);

    #[cfg(all(feature = "simd", target_arch = "x86_64"))]
    if crate::simd::has_ssse3() {
        // SAFETY: SSSE3 availability verified above.
        let consumed = unsafe { crate::simd::encode_blocks_ssse3(src, table, dst) };
        encode_blocks_scalar(
            &src[consumed..],
            table,
            &mut dst[consumed / SOURCE_GROUP * TARGET_GROUP..],
        );
        return;
    }

    encode_blocks_scalar(src, table, dst);
}

/// Scalar reference transform. The vectorized kernel must match this
/// byte-for-byte for every input.
pub(crate) fn encode_blocks_scalar(src: &[u8], table: &[u8; 256], dst: &mut [u8]) {
    debug_assert_eq!(src.len() % SOURCE_GROUP, 0);

    for (group, out) in src
        .chunks_exact(SOURCE_GROUP)
        .zip(dst.chunks_exact_mut(TARGET_GROUP))
    {
        let (b0, b1, b2) = (group[0], group[1], group[2]);
        out[0] = table[(b0 >> 2) as usize];
        out[1] = table[((b0 << 4 & 0x3F) | (b1 >> 4)) as usize];
        out[2] = table[((b1 << 2 & 0x3F) | (b2 >> 6)) as usize];
        out[3] = table[(b2 & 0x3F) as usize];
    }
}

/// Encodes the 0, 1, or 2 bytes left after the group-aligned prefix,
/// applying the padding policy. Returns the number of symbols written.
pub(crate) fn encode_tail(tail: &[u8], alphabet: &Alphabet, dst: &mut [u8]) -> usize {
    match *tail {
        [] => 0,
        [b0] => {
            dst[0] = alphabet.symbol(b0 >> 2);
            dst[1] = alphabet.symbol(b0 << 4 & 0x3F);
            match alphabet.padding_byte() {
                Some(pad) => {
                    dst[2] = pad;
                    dst[3] = pad;
                    4
                }
                None => 2,
            }
        }
        [b0, b1] => {
            dst[0] = alphabet.symbol(b0 >> 2);
            dst[1] = alphabet.symbol((b0 << 4 & 0x3F) | (b1 >> 4));
            dst[2] = alphabet.symbol(b1 << 2 & 0x3F);
            match alphabet.padding_byte() {
                Some(pad) => {
                    dst[3] = pad;
                    4
                }
                None => 3,
            }
        }
        _ => unreachable!("tail is at most two bytes"),
    }
}

/// Encodes a complete buffer: group-aligned prefix through the block
/// transform, remainder through the tail handler. Returns symbols written.
pub(crate) fn encode_final(data: &[u8], alphabet: &Alphabet, dst: &mut [u8]) -> usize {
    let split = data.len() - data.len() % SOURCE_GROUP;
    let bulk = split / SOURCE_GROUP * TARGET_GROUP;
    encode_blocks(&data[..split], alphabet.encode_table(), &mut dst[..bulk]);
    bulk + encode_tail(&data[split..], alphabet, &mut dst[bulk..])
}
