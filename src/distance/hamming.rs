//! # Hamming Distance
//!
//! Number of positions at which two sequences differ. The sequences must have the same
//! length unless `pad` is set, in which case the surplus of the longer sequence counts
//! as one edit per element.

use crate::alignment::{EditOp, EditType, Editops};
use crate::details::common::HashableChar;
use crate::details::distance::DistanceMetricUsize;
use crate::error::{Error, Result};
use log::debug;

fn check_lengths(len1: usize, len2: usize, pad: bool) -> Result<()> {
    if !pad && len1 != len2 {
        return Err(Error::invalid_argument(format!(
            "sequences are not the same length ({len1} != {len2})"
        )));
    }
    Ok(())
}

pub(crate) struct Hamming;

impl<T: HashableChar> DistanceMetricUsize<T> for Hamming {
    fn maximum(&self, len1: usize, len2: usize) -> usize {
        len1.max(len2)
    }

    fn _distance(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        let mismatches = s1.iter().zip(s2).filter(|(ch1, ch2)| ch1 != ch2).count();
        let dist = mismatches + s1.len().abs_diff(s2.len());
        if dist <= score_cutoff {
            dist
        } else {
            score_cutoff + 1
        }
    }
}

/// Hamming distance between `s1` and `s2`.
///
/// Returns `score_cutoff + 1` when the distance exceeds `score_cutoff`.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when the lengths differ and `pad` is not set.
///
/// # Examples
///
/// ```
/// use bitdist::distance::hamming;
///
/// assert_eq!(hamming::distance(b"aaaa", b"abaa", false, None).unwrap(), 1);
/// assert!(hamming::distance(b"aaaa", b"aaaaa", false, None).is_err());
/// assert_eq!(hamming::distance(b"aaaa", b"aaaaa", true, None).unwrap(), 1);
/// ```
pub fn distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    pad: bool,
    score_cutoff: impl Into<Option<usize>>,
) -> Result<usize> {
    check_lengths(s1.len(), s2.len(), pad)?;
    Ok(Hamming._distance(s1, s2, score_cutoff.into().unwrap_or(usize::MAX)))
}

pub fn similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    pad: bool,
    score_cutoff: impl Into<Option<usize>>,
) -> Result<usize> {
    check_lengths(s1.len(), s2.len(), pad)?;
    Ok(Hamming._similarity(s1, s2, score_cutoff.into().unwrap_or(0)))
}

pub fn normalized_distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    pad: bool,
    score_cutoff: impl Into<Option<f64>>,
) -> Result<f64> {
    check_lengths(s1.len(), s2.len(), pad)?;
    Ok(Hamming._normalized_distance(s1, s2, score_cutoff.into().unwrap_or(1.0)))
}

pub fn normalized_similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    pad: bool,
    score_cutoff: impl Into<Option<f64>>,
) -> Result<f64> {
    check_lengths(s1.len(), s2.len(), pad)?;
    Ok(Hamming._normalized_similarity(s1, s2, score_cutoff.into().unwrap_or(0.0)))
}

/// One replacement per differing position; with `pad` the surplus of the longer
/// sequence is deleted or inserted at the end.
pub fn editops<T: HashableChar>(s1: &[T], s2: &[T], pad: bool) -> Result<Editops> {
    check_lengths(s1.len(), s2.len(), pad)?;

    let mut ops: Vec<EditOp> = s1
        .iter()
        .zip(s2)
        .enumerate()
        .filter(|(_, (ch1, ch2))| ch1 != ch2)
        .map(|(i, _)| EditOp::new(EditType::Replace, i, i))
        .collect();

    let min_len = s1.len().min(s2.len());
    ops.extend((min_len..s1.len()).map(|i| EditOp::new(EditType::Delete, i, s2.len())));
    ops.extend((min_len..s2.len()).map(|j| EditOp::new(EditType::Insert, s1.len(), j)));

    Ok(Editops::new(ops, s1.len(), s2.len()))
}

/// Hamming scorer bound to a first sequence.
#[derive(Debug, Clone)]
pub struct CachedHamming<T> {
    s1: Vec<T>,
    pad: bool,
}

impl<T: HashableChar> CachedHamming<T> {
    pub fn new(s1: &[T], pad: bool) -> Self {
        debug!("cached hamming: stored {} elements, pad {}", s1.len(), pad);
        Self {
            s1: s1.to_vec(),
            pad,
        }
    }

    pub fn distance(&self, s2: &[T], score_cutoff: impl Into<Option<usize>>) -> Result<usize> {
        distance(&self.s1, s2, self.pad, score_cutoff)
    }

    pub fn similarity(&self, s2: &[T], score_cutoff: impl Into<Option<usize>>) -> Result<usize> {
        similarity(&self.s1, s2, self.pad, score_cutoff)
    }

    pub fn normalized_distance(
        &self,
        s2: &[T],
        score_cutoff: impl Into<Option<f64>>,
    ) -> Result<f64> {
        normalized_distance(&self.s1, s2, self.pad, score_cutoff)
    }

    pub fn normalized_similarity(
        &self,
        s2: &[T],
        score_cutoff: impl Into<Option<f64>>,
    ) -> Result<f64> {
        normalized_similarity(&self.s1, s2, self.pad, score_cutoff)
    }
}
