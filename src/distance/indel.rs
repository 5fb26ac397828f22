//! # Indel Distance
//!
//! Minimum number of insertions and deletions needed to turn one sequence into the
//! other. Equivalent to a Levenshtein distance where a substitution costs 2, and
//! computed from the LCS length as `len1 + len2 - 2 * lcs`.

use crate::alignment::Editops;
use crate::details::common::HashableChar;
use crate::details::distance::DistanceMetricUsize;
use crate::details::intrinsics::ceil_div;
use crate::details::pattern_match_vector::{BitVectorInterface, BlockPatternMatchVector};
use crate::distance::lcs_seq::{lcs_seq_editops, lcs_seq_similarity, lcs_seq_similarity_with_pm};
use log::debug;

/// Smallest LCS length that keeps the indel distance within `score_cutoff`.
#[inline]
fn lcs_cutoff(maximum: usize, score_cutoff: usize) -> usize {
    ceil_div(maximum.saturating_sub(score_cutoff), 2)
}

pub(crate) fn indel_distance<T: HashableChar>(s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
    let maximum = s1.len() + s2.len();
    let lcs_sim = lcs_seq_similarity(s1, s2, lcs_cutoff(maximum, score_cutoff));
    let dist = maximum - 2 * lcs_sim;
    if dist <= score_cutoff {
        dist
    } else {
        score_cutoff + 1
    }
}

pub(crate) fn indel_distance_with_pm<PmVec, T>(
    pm: &PmVec,
    s1: &[T],
    s2: &[T],
    score_cutoff: usize,
) -> usize
where
    PmVec: BitVectorInterface,
    T: HashableChar,
{
    let maximum = s1.len() + s2.len();
    let lcs_sim = lcs_seq_similarity_with_pm(pm, s1, s2, lcs_cutoff(maximum, score_cutoff));
    let dist = maximum - 2 * lcs_sim;
    if dist <= score_cutoff {
        dist
    } else {
        score_cutoff + 1
    }
}

pub(crate) struct Indel;

impl<T: HashableChar> DistanceMetricUsize<T> for Indel {
    fn maximum(&self, len1: usize, len2: usize) -> usize {
        len1 + len2
    }

    fn _distance(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        indel_distance(s1, s2, score_cutoff)
    }
}

/// Minimum number of insertions and deletions that turn `s1` into `s2`.
///
/// Returns `score_cutoff + 1` when the distance exceeds `score_cutoff`.
///
/// # Examples
///
/// ```
/// use bitdist::distance::indel;
///
/// assert_eq!(indel::distance(b"lewenstein", b"levenshtein", None), 3);
/// assert_eq!(indel::distance(b"aaaa", b"bbbb", 5), 6);
/// ```
pub fn distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<usize>>,
) -> usize {
    Indel._distance(s1, s2, score_cutoff.into().unwrap_or(usize::MAX))
}

/// `len1 + len2 - distance`; 0 when below `score_cutoff`.
pub fn similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<usize>>,
) -> usize {
    Indel._similarity(s1, s2, score_cutoff.into().unwrap_or(0))
}

pub fn normalized_distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    Indel._normalized_distance(s1, s2, score_cutoff.into().unwrap_or(1.0))
}

pub fn normalized_similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    Indel._normalized_similarity(s1, s2, score_cutoff.into().unwrap_or(0.0))
}

/// Insertions and deletions that turn `s1` into `s2`.
pub fn editops<T: HashableChar>(s1: &[T], s2: &[T]) -> Editops {
    lcs_seq_editops(s1, s2)
}

/// Indel scorer with the first sequence encoded once.
#[derive(Debug, Clone)]
pub struct CachedIndel<T> {
    s1: Vec<T>,
    pm: BlockPatternMatchVector,
}

impl<T: HashableChar> DistanceMetricUsize<T> for CachedIndel<T> {
    fn maximum(&self, len1: usize, len2: usize) -> usize {
        len1 + len2
    }

    fn _distance(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        indel_distance_with_pm(&self.pm, s1, s2, score_cutoff)
    }
}

impl<T: HashableChar> CachedIndel<T> {
    pub fn new(s1: &[T]) -> Self {
        let pm = BlockPatternMatchVector::new(s1);
        debug!("cached indel: encoded {} elements in {} blocks", s1.len(), pm.size());
        Self { s1: s1.to_vec(), pm }
    }

    pub fn distance(&self, s2: &[T], score_cutoff: impl Into<Option<usize>>) -> usize {
        self._distance(&self.s1, s2, score_cutoff.into().unwrap_or(usize::MAX))
    }

    pub fn similarity(&self, s2: &[T], score_cutoff: impl Into<Option<usize>>) -> usize {
        self._similarity(&self.s1, s2, score_cutoff.into().unwrap_or(0))
    }

    pub fn normalized_distance(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> f64 {
        self._normalized_distance(&self.s1, s2, score_cutoff.into().unwrap_or(1.0))
    }

    pub fn normalized_similarity(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> f64 {
        self._normalized_similarity(&self.s1, s2, score_cutoff.into().unwrap_or(0.0))
    }
}
