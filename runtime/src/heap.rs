//! Bump allocator over a single fixed-size arena.
//!
//! Blocks are handed out front to back and never reclaimed. Each block is a
//! disjoint `&mut` borrow of the arena, so two live blocks cannot overlap.

use core::mem;

use log::{trace, warn};

pub struct Arena<'a> {
    free: &'a mut [u8],
    position: usize,
    capacity: usize,
}

impl<'a> Arena<'a> {
    pub fn new(storage: &'a mut [u8]) -> Self {
        let capacity = storage.len();
        Self {
            free: storage,
            position: 0,
            capacity,
        }
    }

    /// Returns the next `size` bytes, or `None` once they no longer fit.
    ///
    /// No alignment is applied beyond that of the arena start.
    pub fn allocate(&mut self, size: usize) -> Option<&'a mut [u8]> {
        if size > self.free.len() {
            warn!(
                "heap exhausted: requested {size} bytes at {}/{}",
                self.position, self.capacity
            );
            return None;
        }
        let (block, rest) = mem::take(&mut self.free).split_at_mut(size);
        self.free = rest;
        trace!("allocate({size}) at offset {}", self.position);
        self.position += size;
        Some(block)
    }

    /// Accepts a block back. Freed memory is never reused.
    pub fn release(&mut self, _block: &mut [u8]) {}

    /// Bytes handed out so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.free.len()
    }
}
