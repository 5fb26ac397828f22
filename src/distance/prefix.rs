//! # Prefix Similarity
//!
//! Length of the common prefix of two sequences. The distance is
//! `max(len1, len2) - similarity`.

use crate::details::common::{common_prefix, HashableChar};
use crate::details::distance::SimilarityMetricUsize;

pub(crate) struct Prefix;

impl<T: HashableChar> SimilarityMetricUsize<T> for Prefix {
    fn maximum(&self, len1: usize, len2: usize) -> usize {
        len1.max(len2)
    }

    fn _similarity(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        let sim = common_prefix(s1, s2);
        if sim >= score_cutoff {
            sim
        } else {
            0
        }
    }
}

/// `max(len1, len2)` minus the common prefix length; `score_cutoff + 1` when above the cutoff.
///
/// # Examples
///
/// ```
/// use bitdist::distance::prefix;
///
/// assert_eq!(prefix::similarity(b"abcd", b"abcx", None), 3);
/// assert_eq!(prefix::distance(b"abcd", b"abcx", None), 1);
/// ```
pub fn distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<usize>>,
) -> usize {
    Prefix._distance(s1, s2, score_cutoff.into().unwrap_or(usize::MAX))
}

/// Common prefix length; 0 when below `score_cutoff`.
pub fn similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<usize>>,
) -> usize {
    Prefix._similarity(s1, s2, score_cutoff.into().unwrap_or(0))
}

pub fn normalized_distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    Prefix._normalized_distance(s1, s2, score_cutoff.into().unwrap_or(1.0))
}

pub fn normalized_similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    Prefix._normalized_similarity(s1, s2, score_cutoff.into().unwrap_or(0.0))
}

#[derive(Debug, Clone)]
pub struct CachedPrefix<T> {
    s1: Vec<T>,
}

impl<T: HashableChar> CachedPrefix<T> {
    pub fn new(s1: &[T]) -> Self {
        Self { s1: s1.to_vec() }
    }

    pub fn distance(&self, s2: &[T], score_cutoff: impl Into<Option<usize>>) -> usize {
        distance(&self.s1, s2, score_cutoff)
    }

    pub fn similarity(&self, s2: &[T], score_cutoff: impl Into<Option<usize>>) -> usize {
        similarity(&self.s1, s2, score_cutoff)
    }

    pub fn normalized_distance(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> f64 {
        normalized_distance(&self.s1, s2, score_cutoff)
    }

    pub fn normalized_similarity(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> f64 {
        normalized_similarity(&self.s1, s2, score_cutoff)
    }
}
