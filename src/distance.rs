//! String metrics over sequences of [`HashableChar`](crate::HashableChar) elements.
//!
//! Every metric module exposes `distance`, `similarity`, `normalized_distance` and
//! `normalized_similarity` as free functions plus a `Cached*` scorer that prepares the
//! first sequence once. Scores beyond `score_cutoff` are reported as `score_cutoff + 1`
//! for distances, `0` for similarities and `1.0` / `0.0` for the normalized forms.
//!
//! [`multi`] holds batch scorers that compare one query against many short sequences.

pub mod damerau_levenshtein;
pub mod hamming;
pub mod indel;
pub mod jaro;
pub mod jaro_winkler;
pub mod lcs_seq;
pub mod levenshtein;
pub mod multi;
pub mod osa;
pub mod postfix;
pub mod prefix;

pub use damerau_levenshtein::CachedDamerauLevenshtein;
pub use hamming::CachedHamming;
pub use indel::CachedIndel;
pub use jaro::CachedJaro;
pub use jaro_winkler::CachedJaroWinkler;
pub use lcs_seq::CachedLcsSeq;
pub use levenshtein::{CachedLevenshtein, LevenshteinWeightTable};
pub use multi::{MultiIndel, MultiLcsSeq, MultiLevenshtein};
pub use osa::CachedOsa;
pub use postfix::CachedPostfix;
pub use prefix::CachedPrefix;

#[cfg(test)]
mod tests;
