//! # Postfix Similarity
//!
//! Length of the common suffix of two sequences. The distance is
//! `max(len1, len2) - similarity`.

use crate::details::common::{common_suffix, HashableChar};
use crate::details::distance::SimilarityMetricUsize;

pub(crate) struct Postfix;

impl<T: HashableChar> SimilarityMetricUsize<T> for Postfix {
    fn maximum(&self, len1: usize, len2: usize) -> usize {
        len1.max(len2)
    }

    fn _similarity(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        let sim = common_suffix(s1, s2);
        if sim >= score_cutoff {
            sim
        } else {
            0
        }
    }
}

/// `max(len1, len2)` minus the common suffix length; `score_cutoff + 1` when above the cutoff.
///
/// # Examples
///
/// ```
/// use bitdist::distance::postfix;
///
/// assert_eq!(postfix::similarity(b"abcd", b"xbcd", None), 3);
/// assert_eq!(postfix::distance(b"abcd", b"xbcd", None), 1);
/// assert_eq!(postfix::distance(b"abcd", b"abcx", None), 4);
/// ```
pub fn distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<usize>>,
) -> usize {
    Postfix._distance(s1, s2, score_cutoff.into().unwrap_or(usize::MAX))
}

/// Common suffix length; 0 when below `score_cutoff`.
pub fn similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<usize>>,
) -> usize {
    Postfix._similarity(s1, s2, score_cutoff.into().unwrap_or(0))
}

pub fn normalized_distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    Postfix._normalized_distance(s1, s2, score_cutoff.into().unwrap_or(1.0))
}

pub fn normalized_similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    Postfix._normalized_similarity(s1, s2, score_cutoff.into().unwrap_or(0.0))
}

#[derive(Debug, Clone)]
pub struct CachedPostfix<T> {
    s1: Vec<T>,
}

impl<T: HashableChar> CachedPostfix<T> {
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
