//! Thread-local pool for the fixed-capacity working buffers.
//!
//! Buffers are checked out for the duration of a single call and returned by
//! the guard's `Drop`, so release happens on every exit path.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

/// Source-side working buffer capacity for the chunked driver.
pub(crate) const SOURCE_CAPACITY: usize = 1024;
/// Output-side capacity: the encoded length of a full padded source chunk.
pub(crate) const OUTPUT_CAPACITY: usize = 1368;

/// Buffers retained per thread; checkouts beyond this just allocate.
const MAX_POOLED: usize = 8;

thread_local! {
    static POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

/// A working buffer checked out from the pool.
pub(crate) struct PooledBuf {
    buf: Vec<u8>,
}

/// Checks out a zero-initialized buffer of exactly `capacity` bytes, reusing
/// a pooled one of the same size class when available.
pub(crate) fn acquire(capacity: usize) -> PooledBuf {
    let buf = POOL.with(|pool| {
        let mut pool = pool.borrow_mut();
        match pool.iter().position(|b| b.len() == capacity) {
            Some(i) => pool.swap_remove(i),
            None => vec![0u8; capacity],
        }
    });
    PooledBuf { buf }
}

impl Drop for PooledBuf {
    fn drop(&mut self) {
        let buf = std::mem::take(&mut self.buf);
        // During thread teardown the pool may already be gone; the buffer is
        // then simply freed.
        let _ = POOL.try_with(|pool| {
            let mut pool = pool.borrow_mut();
            if pool.len() < MAX_POOLED {
                pool.push(buf);
            }
        });
    }
}

impl Deref for PooledBuf {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf
    }
}

impl DerefMut for PooledBuf {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}
