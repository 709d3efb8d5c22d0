//! SSSE3 kernel for the block transform.
//!
//! Each round loads 16 bytes, consumes 12 (four source groups), and produces
//! 16 symbols. A source group `(b0, b1, b2)` is spread into a 32-bit lane as
//! `w = b2 | b1<<8 | b0<<16`; the four 6-bit fields are then isolated with
//!
//! ```text
//! (w*64 & 0x3F000000) | (w*16 & 0x003F0000) | (w*4 & 0x00003F00) | (w & 0x0000003F)
//! ```
//!
//! which lands them in lane bytes `[c3, c2, c1, c0]`; a byte shuffle restores
//! output order before gathering through the replicated symbol table.

use std::arch::x86_64::*;

/// Source bytes consumed per round.
const SOURCE_STRIDE: usize = 12;
/// Symbols produced per round.
const TARGET_STRIDE: usize = 16;

/// Vectorized group expansion. `src.len()` must be a multiple of 3; returns
/// the number of source bytes consumed (a multiple of 12), leaving the rest
/// for the scalar path.
///
/// # Safety
///
/// The caller must have verified SSSE3 support.
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn encode_blocks(src: &[u8], table: &[u8; 256], dst: &mut [u8]) -> usize {
    if src.len() < TARGET_STRIDE {
        return 0;
    }

    // Every load reads 4 bytes past the 12 it consumes; cap the rounds so
    // the final load stays inside the buffer.
    let rounds = (src.len() - 4) / SOURCE_STRIDE;

    // Spread bytes [a, b, c] of each group into a lane as [c, b, a, 0].
    let spread = _mm_setr_epi8(2, 1, 0, -1, 5, 4, 3, -1, 8, 7, 6, -1, 11, 10, 9, -1);
    // The masked products come out byte-reversed per lane; undo that.
    let order = _mm_setr_epi8(3, 2, 1, 0, 7, 6, 5, 4, 11, 10, 9, 8, 15, 14, 13, 12);

    let mut consumed = 0;
    let mut written = 0;
    for _ in 0..rounds {
        // SAFETY: consumed + 16 <= src.len() by the rounds bound above.
        let input = unsafe { _mm_loadu_si128(src.as_ptr().add(consumed) as *const __m128i) };
        let w = _mm_shuffle_epi8(input, spread);

        let f0 = _mm_and_si128(_mm_slli_epi32::<6>(w), _mm_set1_epi32(0x3F00_0000));
        let f1 = _mm_and_si128(_mm_slli_epi32::<4>(w), _mm_set1_epi32(0x003F_0000));
        let f2 = _mm_and_si128(_mm_slli_epi32::<2>(w), _mm_set1_epi32(0x0000_3F00));
        let f3 = _mm_and_si128(w, _mm_set1_epi32(0x0000_003F));
        let packed = _mm_or_si128(_mm_or_si128(f0, f1), _mm_or_si128(f2, f3));
        let indices = _mm_shuffle_epi8(packed, order);

        let mut lanes = [0u8; TARGET_STRIDE];
        // SAFETY: `lanes` is exactly 16 bytes.
        unsafe { _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, indices) };

        for (slot, &index) in dst[written..written + TARGET_STRIDE].iter_mut().zip(&lanes) {
            *slot = table[index as usize];
        }

        consumed += SOURCE_STRIDE;
        written += TARGET_STRIDE;
    }

    consumed
}
