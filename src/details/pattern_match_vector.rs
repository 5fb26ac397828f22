//! # Pattern Match Vectors
//!
//! Encodes a pattern sequence as a table from element to the bit mask of the positions
//! where the element occurs. Bit `i` of word `k` stands for pattern position `64k + i`.
//!
//! - [`PatternMatchVector`]: patterns of at most 64 elements, one word per element.
//! - [`BlockPatternMatchVector`]: arbitrary patterns, one word per 64-element block.
//!
//! Both answer lookups for elements below 256 from a dense table and fall back to a
//! [`GrowingHashmap`] for everything else.

use crate::details::common::HashableChar;
use crate::details::growing_hashmap::{GrowingHashmap, HybridGrowingHashmap};
use crate::details::intrinsics::ceil_div;
use crate::details::matrix::BitMatrix;

/// Read access shared by the single-word and blocked pattern encodings.
pub(crate) trait BitVectorInterface {
    /// Occurrence mask of `ch` within 64-element block `block` of the pattern.
    fn get<T: HashableChar>(&self, block: usize, ch: T) -> u64;

    /// Number of 64-element blocks.
    fn size(&self) -> usize;
}

/// Occurrence masks of a pattern that fits into a single word.
#[derive(Debug, Clone, Default)]
pub(crate) struct PatternMatchVector {
    map: HybridGrowingHashmap<u64>,
}

impl PatternMatchVector {
    pub fn new<T: HashableChar>(s: &[T]) -> Self {
        debug_assert!(s.len() <= 64);
        let mut pm = Self::default();
        let mut mask = 1_u64;
        for ch in s {
            *pm.map.get_mut(ch.hash_char()) |= mask;
            mask <<= 1;
        }
        pm
    }
}

impl BitVectorInterface for PatternMatchVector {
    #[inline]
    fn get<T: HashableChar>(&self, block: usize, ch: T) -> u64 {
        debug_assert_eq!(block, 0);
        self.map.get(ch.hash_char())
    }

    fn size(&self) -> usize {
        1
    }
}

/// Occurrence masks of a pattern of any length, split into 64-element blocks.
#[derive(Debug, Clone, Default)]
pub(crate) struct BlockPatternMatchVector {
    block_count: usize,
    // one hash map per block, allocated on the first element outside the dense range
    maps: Vec<GrowingHashmap<u64>>,
    extended_ascii: BitMatrix<u64>,
}

impl BlockPatternMatchVector {
    pub fn new<T: HashableChar>(s: &[T]) -> Self {
        let block_count = ceil_div(s.len(), 64);
        let mut pm = Self {
            block_count,
            maps: Vec::new(),
            extended_ascii: BitMatrix::new(256, block_count, 0),
        };

        for (i, ch) in s.iter().enumerate() {
            pm.insert_mask(i / 64, ch.hash_char(), 1_u64 << (i % 64));
        }
        pm
    }

    fn insert_mask(&mut self, block: usize, key: u64, mask: u64) {
        debug_assert!(block < self.block_count);
        if key < 256 {
            *self.extended_ascii.get_mut(key as usize, block) |= mask;
        } else {
            if self.maps.is_empty() {
                self.maps = vec![GrowingHashmap::default(); self.block_count];
            }
            *self.maps[block].get_mut(key) |= mask;
        }
    }
}

impl BitVectorInterface for BlockPatternMatchVector {
    #[inline]
    fn get<T: HashableChar>(&self, block: usize, ch: T) -> u64 {
        let key = ch.hash_char();
        if key < 256 {
            self.extended_ascii.get(key as usize, block)
        } else if self.maps.is_empty() {
            0
        } else {
            self.maps[block].get(key)
        }
    }

    fn size(&self) -> usize {
        self.block_count
    }
}
