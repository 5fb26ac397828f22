//! # Batch Scorers
//!
//! Score one sequence against many short sequences inserted up front. Every inserted
//! sequence (a lane) is limited to [`MAX_LEN`] elements and gets its own single-word
//! pattern match vector, so scoring a lane is one pass of the word-sized engine over the
//! query. With the `parallel` feature the lanes are distributed over the rayon thread
//! pool. Results are always returned in insertion order.

use crate::details::common::HashableChar;
use crate::details::distance::{DistanceMetricUsize, SimilarityMetricUsize};
use crate::details::intrinsics::ceil_div;
use crate::details::pattern_match_vector::PatternMatchVector;
use crate::distance::indel::indel_distance_with_pm;
use crate::distance::lcs_seq::lcs_seq_similarity_with_pm;
use crate::distance::levenshtein::{levenshtein_hyrroe2003, levenshtein_maximum, LevenshteinWeightTable};
use crate::error::{Error, Result};
use log::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Maximum number of elements of a sequence inserted into a batch scorer.
pub const MAX_LEN: usize = 64;

#[derive(Debug, Clone)]
struct Lane<T> {
    s1: Vec<T>,
    pm: PatternMatchVector,
}

#[derive(Debug, Clone)]
struct Lanes<T> {
    capacity: usize,
    lanes: Vec<Lane<T>>,
}

impl<T: HashableChar + Send + Sync> Lanes<T> {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            lanes: Vec::with_capacity(capacity),
        }
    }

    fn insert(&mut self, s: &[T]) -> Result<()> {
        if self.lanes.len() >= self.capacity {
            return Err(Error::OutOfBoundsInsert {
                capacity: self.capacity,
            });
        }
        if s.len() > MAX_LEN {
            return Err(Error::invalid_argument(format!(
                "sequence of {} elements exceeds the batch limit of {MAX_LEN}",
                s.len()
            )));
        }

        self.lanes.push(Lane {
            s1: s.to_vec(),
            pm: PatternMatchVector::new(s),
        });
        Ok(())
    }

    fn score_all<R, F>(&self, score: F) -> Vec<R>
    where
        R: Send,
        F: Fn(&Lane<T>) -> R + Send + Sync,
    {
        trace!("batch: scoring {} lanes", self.lanes.len());

        #[cfg(feature = "parallel")]
        {
            self.lanes.par_iter().map(score).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            self.lanes.iter().map(score).collect()
        }
    }
}

fn validate_weights(weights: &LevenshteinWeightTable) -> Result<()> {
    let indel_like = weights.insert_cost == weights.delete_cost
        && weights.replace_cost >= weights.insert_cost.saturating_add(weights.delete_cost);
    if weights.is_uniform() || indel_like {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!(
            "unsupported weights for batch scoring: {weights:?}"
        )))
    }
}

/// Levenshtein against a single lane.
struct LaneLevenshtein<'a> {
    pm: &'a PatternMatchVector,
    weights: LevenshteinWeightTable,
}

impl<T: HashableChar> DistanceMetricUsize<T> for LaneLevenshtein<'_> {
    fn maximum(&self, len1: usize, len2: usize) -> usize {
        levenshtein_maximum(len1, len2, &self.weights)
    }

    fn _distance(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        let unit = self.weights.insert_cost;
        if unit == 0 {
            return 0;
        }

        let new_cutoff = ceil_div(score_cutoff, unit);
        let dist = if self.weights.is_uniform() {
            if s1.is_empty() {
                s2.len()
            } else {
                levenshtein_hyrroe2003(self.pm, s1.len(), s2, new_cutoff)
            }
        } else {
            indel_distance_with_pm(self.pm, s1, s2, new_cutoff)
        };

        let dist = dist.saturating_mul(unit);
        if dist <= score_cutoff {
            dist
        } else {
            score_cutoff + 1
        }
    }
}

struct LaneIndel<'a> {
    pm: &'a PatternMatchVector,
}

impl<T: HashableChar> DistanceMetricUsize<T> for LaneIndel<'_> {
    fn maximum(&self, len1: usize, len2: usize) -> usize {
        len1 + len2
    }

    fn _distance(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        indel_distance_with_pm(self.pm, s1, s2, score_cutoff)
    }
}

struct LaneLcsSeq<'a> {
    pm: &'a PatternMatchVector,
}

impl<T: HashableChar> SimilarityMetricUsize<T> for LaneLcsSeq<'_> {
    fn maximum(&self, len1: usize, len2: usize) -> usize {
        len1.max(len2)
    }

    fn _similarity(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        lcs_seq_similarity_with_pm(self.pm, s1, s2, score_cutoff)
    }
}

/// Levenshtein distance of one query against many short sequences.
///
/// Supports uniform weights and weights with `insert == delete` and
/// `replace >= insert + delete`.
///
/// # Examples
///
/// ```
/// use bitdist::distance::multi::MultiLevenshtein;
///
/// let mut scorer = MultiLevenshtein::new(2, None).unwrap();
/// scorer.insert(b"kitten").unwrap();
/// scorer.insert(b"sitting").unwrap();
/// assert_eq!(scorer.distance_all(b"sitten", None), vec![1, 2]);
/// assert!(scorer.insert(b"mitten").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MultiLevenshtein<T> {
    weights: LevenshteinWeightTable,
    lanes: Lanes<T>,
}

impl<T: HashableChar + Send + Sync> MultiLevenshtein<T> {
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when the weights are not supported in batch mode.
    pub fn new(capacity: usize, weights: Option<LevenshteinWeightTable>) -> Result<Self> {
        let weights = weights.unwrap_or_default();
        validate_weights(&weights)?;
        debug!("multi levenshtein: capacity {capacity}, weights {weights:?}");
        Ok(Self {
            weights,
            lanes: Lanes::new(capacity),
        })
    }

    pub fn capacity(&self) -> usize {
        self.lanes.capacity
    }

    pub fn len(&self) -> usize {
        self.lanes.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.lanes.is_empty()
    }

    /// # Errors
    ///
    /// [`Error::OutOfBoundsInsert`] when the scorer is full and
    /// [`Error::InvalidArgument`] when `s` is longer than [`MAX_LEN`].
    pub fn insert(&mut self, s: &[T]) -> Result<()> {
        self.lanes.insert(s)
    }

    fn metric<'a>(&self, lane: &'a Lane<T>) -> LaneLevenshtein<'a> {
        LaneLevenshtein {
            pm: &lane.pm,
            weights: self.weights,
        }
    }

    pub fn distance_all(&self, s2: &[T], score_cutoff: impl Into<Option<usize>>) -> Vec<usize> {
        let score_cutoff = score_cutoff.into().unwrap_or(usize::MAX);
        self.lanes
            .score_all(|lane| self.metric(lane)._distance(&lane.s1, s2, score_cutoff))
    }

    pub fn similarity_all(&self, s2: &[T], score_cutoff: impl Into<Option<usize>>) -> Vec<usize> {
        let score_cutoff = score_cutoff.into().unwrap_or(0);
        self.lanes
            .score_all(|lane| self.metric(lane)._similarity(&lane.s1, s2, score_cutoff))
    }

    pub fn normalized_distance_all(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> Vec<f64> {
        let score_cutoff = score_cutoff.into().unwrap_or(1.0);
        self.lanes.score_all(|lane| {
            self.metric(lane)
                ._normalized_distance(&lane.s1, s2, score_cutoff)
        })
    }

    pub fn normalized_similarity_all(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> Vec<f64> {
        let score_cutoff = score_cutoff.into().unwrap_or(0.0);
        self.lanes.score_all(|lane| {
            self.metric(lane)
                ._normalized_similarity(&lane.s1, s2, score_cutoff)
        })
    }
}

/// Indel distance of one query against many short sequences.
#[derive(Debug, Clone)]
pub struct MultiIndel<T> {
    lanes: Lanes<T>,
}

impl<T: HashableChar + Send + Sync> MultiIndel<T> {
    pub fn new(capacity: usize) -> Self {
        debug!("multi indel: capacity {capacity}");
        Self {
            lanes: Lanes::new(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.lanes.capacity
    }

    pub fn len(&self) -> usize {
        self.lanes.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.lanes.is_empty()
    }

    /// # Errors
    ///
    /// [`Error::OutOfBoundsInsert`] when the scorer is full and
    /// [`Error::InvalidArgument`] when `s` is longer than [`MAX_LEN`].
    pub fn insert(&mut self, s: &[T]) -> Result<()> {
        self.lanes.insert(s)
    }

    pub fn distance_all(&self, s2: &[T], score_cutoff: impl Into<Option<usize>>) -> Vec<usize> {
        let score_cutoff = score_cutoff.into().unwrap_or(usize::MAX);
        self.lanes
            .score_all(|lane| LaneIndel { pm: &lane.pm }._distance(&lane.s1, s2, score_cutoff))
    }

    pub fn similarity_all(&self, s2: &[T], score_cutoff: impl Into<Option<usize>>) -> Vec<usize> {
        let score_cutoff = score_cutoff.into().unwrap_or(0);
        self.lanes
            .score_all(|lane| LaneIndel { pm: &lane.pm }._similarity(&lane.s1, s2, score_cutoff))
    }

    pub fn normalized_distance_all(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> Vec<f64> {
        let score_cutoff = score_cutoff.into().unwrap_or(1.0);
        self.lanes.score_all(|lane| {
            LaneIndel { pm: &lane.pm }._normalized_distance(&lane.s1, s2, score_cutoff)
        })
    }

    pub fn normalized_similarity_all(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> Vec<f64> {
        let score_cutoff = score_cutoff.into().unwrap_or(0.0);
        self.lanes.score_all(|lane| {
            LaneIndel { pm: &lane.pm }._normalized_similarity(&lane.s1, s2, score_cutoff)
        })
    }
}

/// LCS similarity of one query against many short sequences.
#[derive(Debug, Clone)]
pub struct MultiLcsSeq<T> {
    lanes: Lanes<T>,
}

impl<T: HashableChar + Send + Sync> MultiLcsSeq<T> {
    pub fn new(capacity: usize) -> Self {
        debug!("multi lcs_seq: capacity {capacity}");
        Self {
            lanes: Lanes::new(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.lanes.capacity
    }

    pub fn len(&self) -> usize {
        self.lanes.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.lanes.is_empty()
    }

    /// # Errors
    ///
    /// [`Error::OutOfBoundsInsert`] when the scorer is full and
    /// [`Error::InvalidArgument`] when `s` is longer than [`MAX_LEN`].
    pub fn insert(&mut self, s: &[T]) -> Result<()> {
        self.lanes.insert(s)
    }

    pub fn distance_all(&self, s2: &[T], score_cutoff: impl Into<Option<usize>>) -> Vec<usize> {
        let score_cutoff = score_cutoff.into().unwrap_or(usize::MAX);
        self.lanes
            .score_all(|lane| LaneLcsSeq { pm: &lane.pm }._distance(&lane.s1, s2, score_cutoff))
    }

    pub fn similarity_all(&self, s2: &[T], score_cutoff: impl Into<Option<usize>>) -> Vec<usize> {
        let score_cutoff = score_cutoff.into().unwrap_or(0);
        self.lanes
            .score_all(|lane| LaneLcsSeq { pm: &lane.pm }._similarity(&lane.s1, s2, score_cutoff))
    }

    pub fn normalized_distance_all(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> Vec<f64> {
        let score_cutoff = score_cutoff.into().unwrap_or(1.0);
        self.lanes.score_all(|lane| {
            LaneLcsSeq { pm: &lane.pm }._normalized_distance(&lane.s1, s2, score_cutoff)
        })
    }

    pub fn normalized_similarity_all(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> Vec<f64> {
        let score_cutoff = score_cutoff.into().unwrap_or(0.0);
        self.lanes.score_all(|lane| {
            LaneLcsSeq { pm: &lane.pm }._normalized_similarity(&lane.s1, s2, score_cutoff)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{indel, lcs_seq, levenshtein};
    use approx::assert_abs_diff_eq;

    const WORDS: [&str; 6] = ["kitten", "sitting", "", "levenshtein", "lewenstein", "a"];
    const QUERIES: [&str; 4] = ["sitten", "", "levenstein", "the quick brown fox jumps over the lazy dog"];

    #[test]
    fn test_levenshtein_matches_single_scorer() {
        let weight_tables = [
            None,
            Some(LevenshteinWeightTable::new(2, 2, 2)),
            Some(LevenshteinWeightTable::new(1, 1, 2)),
            Some(LevenshteinWeightTable::new(3, 3, 7)),
        ];

        for weights in weight_tables {
            let mut scorer = MultiLevenshtein::new(WORDS.len(), weights).unwrap();
            for word in WORDS {
                scorer.insert(word.as_bytes()).unwrap();
            }

            for query in QUERIES {
                let q = query.as_bytes();
                for cutoff in [None, Some(0), Some(2), Some(5)] {
                    let expected: Vec<usize> = WORDS
                        .iter()
                        .map(|w| levenshtein::distance(w.as_bytes(), q, weights, cutoff))
                        .collect();
                    assert_eq!(scorer.distance_all(q, cutoff), expected);

                    let expected: Vec<usize> = WORDS
                        .iter()
                        .map(|w| levenshtein::similarity(w.as_bytes(), q, weights, cutoff))
                        .collect();
                    assert_eq!(scorer.similarity_all(q, cutoff), expected);
                }

                let expected: Vec<f64> = WORDS
                    .iter()
                    .map(|w| levenshtein::normalized_similarity(w.as_bytes(), q, weights, None))
                    .collect();
                for (res, exp) in scorer.normalized_similarity_all(q, None).iter().zip(&expected) {
                    assert_abs_diff_eq!(res, exp, epsilon = 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_indel_and_lcs_match_single_scorer() {
        let mut multi_indel = MultiIndel::new(WORDS.len());
        let mut multi_lcs = MultiLcsSeq::new(WORDS.len());
        for word in WORDS {
            multi_indel.insert(word.as_bytes()).unwrap();
            multi_lcs.insert(word.as_bytes()).unwrap();
        }

        for query in QUERIES {
            let q = query.as_bytes();
            for cutoff in [None, Some(1), Some(4)] {
                let expected: Vec<usize> = WORDS
                    .iter()
                    .map(|w| indel::distance(w.as_bytes(), q, cutoff))
                    .collect();
                assert_eq!(multi_indel.distance_all(q, cutoff), expected);

                let expected: Vec<usize> = WORDS
                    .iter()
                    .map(|w| lcs_seq::similarity(w.as_bytes(), q, cutoff))
                    .collect();
                assert_eq!(multi_lcs.similarity_all(q, cutoff), expected);

                let expected: Vec<usize> = WORDS
                    .iter()
                    .map(|w| lcs_seq::distance(w.as_bytes(), q, cutoff))
                    .collect();
                assert_eq!(multi_lcs.distance_all(q, cutoff), expected);
            }

            let expected: Vec<f64> = WORDS
                .iter()
                .map(|w| indel::normalized_distance(w.as_bytes(), q, None))
                .collect();
            for (res, exp) in multi_indel.normalized_distance_all(q, None).iter().zip(&expected) {
                assert_abs_diff_eq!(res, exp, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_capacity() {
        let mut scorer = MultiIndel::new(1);
        assert!(scorer.is_empty());
        scorer.insert(b"abc").unwrap();
        assert_eq!(scorer.len(), 1);
        assert_eq!(
            scorer.insert(b"abc"),
            Err(Error::OutOfBoundsInsert { capacity: 1 })
        );
        assert_eq!(scorer.capacity(), 1);
    }

    #[test]
    fn test_sequence_too_long() {
        let mut scorer = MultiLcsSeq::new(2);
        let long = vec![b'a'; MAX_LEN + 1];
        assert!(matches!(scorer.insert(&long), Err(Error::InvalidArgument(_))));
        scorer.insert(&long[..MAX_LEN]).unwrap();
        assert_eq!(scorer.similarity_all(&long, None), vec![MAX_LEN]);
    }

    #[test]
    fn test_unsupported_weights() {
        let res = MultiLevenshtein::<u8>::new(4, Some(LevenshteinWeightTable::new(1, 2, 3)));
        assert!(matches!(res, Err(Error::InvalidArgument(_))));
        let res = MultiLevenshtein::<u8>::new(4, Some(LevenshteinWeightTable::new(2, 2, 3)));
        assert!(res.is_err());
        assert!(MultiLevenshtein::<u8>::new(4, Some(LevenshteinWeightTable::new(0, 0, 1))).is_ok());
    }

    #[test]
    fn test_free_insertions() {
        let mut scorer = MultiLevenshtein::new(1, Some(LevenshteinWeightTable::new(0, 0, 1))).unwrap();
        scorer.insert(b"abc").unwrap();
        assert_eq!(scorer.distance_all(b"xyz", None), vec![0]);
    }
}
