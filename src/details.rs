//! Building blocks of the bit-parallel metrics.
//!
//! Nothing in here is part of the public API. The metrics in [`crate::distance`] combine
//! these pieces:
//! - word-level bit helpers
//! - the element abstraction and affix removal
//! - an open addressing hash map for wide elements
//! - pattern match vectors
//! - a word matrix for alignment recovery
//! - the score conversion traits

pub(crate) mod common;
pub(crate) mod distance;
pub(crate) mod growing_hashmap;
pub(crate) mod intrinsics;
pub(crate) mod matrix;
pub(crate) mod pattern_match_vector;
