//! Bit-parallel string metrics.
//!
//! Edit distances (Levenshtein, Indel, OSA, Damerau-Levenshtein, Hamming), the longest
//! common subsequence, Jaro and Jaro-Winkler similarity and prefix/postfix similarity
//! over arbitrary sequences of comparable elements. The Levenshtein, Indel, LCS and OSA
//! metrics use Hyyrö's bit-parallel recurrences, 64 pattern positions per machine word,
//! and can recover the edit script behind a distance.
//!
//! ```
//! use bitdist::distance::{levenshtein, CachedLevenshtein};
//!
//! assert_eq!(levenshtein::distance(b"kitten", b"sitting", None, None), 3);
//!
//! let scorer = CachedLevenshtein::new(b"kitten", None);
//! assert_eq!(scorer.distance(b"sitting", 2), 3);
//!
//! let ops = levenshtein::editops(b"kitten", b"sitting");
//! assert_eq!(ops.apply(b"kitten", b"sitting").unwrap(), b"sitting");
//! ```

pub mod alignment;
pub(crate) mod details;
pub mod distance;
pub mod error;

pub use details::common::HashableChar;
pub use error::{Error, Result};
