//! SIMD acceleration for the block transform.
//!
//! Runtime CPU feature detection picks the kernel; callers fall back to the
//! scalar reference when no kernel applies. Only compiled with the `simd`
//! feature on x86_64.

use std::sync::OnceLock;

mod x86_64;

pub(crate) use x86_64::encode_blocks as encode_blocks_ssse3;

static HAS_SSSE3: OnceLock<bool> = OnceLock::new();

/// Check if SSSE3 is available (cached after first call).
pub(crate) fn has_ssse3() -> bool {
    *HAS_SSSE3.get_or_init(|| is_x86_feature_detected!("ssse3"))
}
