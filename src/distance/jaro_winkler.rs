//! # Jaro-Winkler Similarity
//!
//! Jaro similarity with a bonus for a shared prefix of up to four elements. The bonus
//! `prefix * prefix_weight * (1 - jaro)` is only granted when the Jaro similarity is
//! above 0.7.

use crate::details::common::{common_prefix, HashableChar};
use crate::distance::jaro::{self, distance_from_similarity, CachedJaro};
use crate::error::{Error, Result};
use log::debug;

const DEFAULT_PREFIX_WEIGHT: f64 = 0.1;
const MAX_PREFIX: usize = 4;
const BOOST_THRESHOLD: f64 = 0.7;

fn validate_prefix_weight(prefix_weight: Option<f64>) -> Result<f64> {
    let prefix_weight = prefix_weight.unwrap_or(DEFAULT_PREFIX_WEIGHT);
    if !(0.0..=0.25).contains(&prefix_weight) {
        return Err(Error::invalid_argument(format!(
            "prefix_weight must be between 0.0 and 0.25, got {prefix_weight}"
        )));
    }
    Ok(prefix_weight)
}

/// Runs `jaro_similarity` with a cutoff lowered to what the prefix bonus can still lift
/// past `score_cutoff`, then applies the bonus.
fn jaro_winkler_similarity_impl<T, F>(
    s1: &[T],
    s2: &[T],
    prefix_weight: f64,
    score_cutoff: f64,
    jaro_similarity: F,
) -> f64
where
    T: HashableChar,
    F: FnOnce(f64) -> f64,
{
    let max_prefix = s1.len().min(s2.len()).min(MAX_PREFIX);
    let prefix = common_prefix(&s1[..max_prefix], &s2[..max_prefix]);

    let mut jaro_cutoff = score_cutoff;
    if jaro_cutoff > BOOST_THRESHOLD {
        let prefix_sim = prefix as f64 * prefix_weight;
        jaro_cutoff = if prefix_sim >= 1.0 {
            BOOST_THRESHOLD
        } else {
            BOOST_THRESHOLD.max((prefix_sim - jaro_cutoff) / (prefix_sim - 1.0))
        };
    }

    let mut sim = jaro_similarity(jaro_cutoff);
    if sim > BOOST_THRESHOLD {
        sim += prefix as f64 * prefix_weight * (1.0 - sim);
    }

    if sim >= score_cutoff {
        sim
    } else {
        0.0
    }
}

fn jaro_winkler_similarity<T: HashableChar>(s1: &[T], s2: &[T], prefix_weight: f64, score_cutoff: f64) -> f64 {
    jaro_winkler_similarity_impl(s1, s2, prefix_weight, score_cutoff, |cutoff| {
        jaro::similarity(s1, s2, cutoff)
    })
}

/// Jaro-Winkler similarity in `[0, 1]`; 0.0 when below `score_cutoff`.
///
/// `prefix_weight` defaults to 0.1.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `prefix_weight` is outside of `[0.0, 0.25]`.
///
/// # Examples
///
/// ```
/// use bitdist::distance::jaro_winkler;
///
/// let sim = jaro_winkler::similarity(b"MARTHA", b"MARHTA", None, None).unwrap();
/// assert!((sim - 0.9611).abs() < 1e-4);
/// assert!(jaro_winkler::similarity(b"a", b"a", Some(0.3), None).is_err());
/// ```
pub fn similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    prefix_weight: Option<f64>,
    score_cutoff: impl Into<Option<f64>>,
) -> Result<f64> {
    let prefix_weight = validate_prefix_weight(prefix_weight)?;
    Ok(jaro_winkler_similarity(
        s1,
        s2,
        prefix_weight,
        score_cutoff.into().unwrap_or(0.0),
    ))
}

/// `1 - similarity`; 1.0 when above `score_cutoff`.
pub fn distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    prefix_weight: Option<f64>,
    score_cutoff: impl Into<Option<f64>>,
) -> Result<f64> {
    let prefix_weight = validate_prefix_weight(prefix_weight)?;
    Ok(distance_from_similarity(score_cutoff.into().unwrap_or(1.0), |cutoff| {
        jaro_winkler_similarity(s1, s2, prefix_weight, cutoff)
    }))
}

pub fn normalized_similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    prefix_weight: Option<f64>,
    score_cutoff: impl Into<Option<f64>>,
) -> Result<f64> {
    similarity(s1, s2, prefix_weight, score_cutoff)
}

pub fn normalized_distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    prefix_weight: Option<f64>,
    score_cutoff: impl Into<Option<f64>>,
) -> Result<f64> {
    distance(s1, s2, prefix_weight, score_cutoff)
}

/// Jaro-Winkler scorer reusing the encoded first sequence of a [`CachedJaro`].
#[derive(Debug, Clone)]
pub struct CachedJaroWinkler<T> {
    prefix_weight: f64,
    jaro: CachedJaro<T>,
}

impl<T: HashableChar> CachedJaroWinkler<T> {
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when `prefix_weight` is outside of `[0.0, 0.25]`.
    pub fn new(s1: &[T], prefix_weight: Option<f64>) -> Result<Self> {
        let prefix_weight = validate_prefix_weight(prefix_weight)?;
        debug!("cached jaro-winkler: prefix weight {prefix_weight}");
        Ok(Self {
            prefix_weight,
            jaro: CachedJaro::new(s1),
        })
    }

    fn similarity_with_cutoff(&self, s2: &[T], score_cutoff: f64) -> f64 {
        jaro_winkler_similarity_impl(
            self.jaro.s1(),
            s2,
            self.prefix_weight,
            score_cutoff,
            |cutoff| self.jaro.similarity_with_cutoff(s2, cutoff),
        )
    }

    pub fn similarity(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> f64 {
        self.similarity_with_cutoff(s2, score_cutoff.into().unwrap_or(0.0))
    }

    pub fn distance(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> f64 {
        distance_from_similarity(score_cutoff.into().unwrap_or(1.0), |cutoff| {
            self.similarity_with_cutoff(s2, cutoff)
        })
    }

    pub fn normalized_similarity(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> f64 {
        self.similarity(s2, score_cutoff)
    }

    pub fn normalized_distance(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> f64 {
        self.distance(s2, score_cutoff)
    }
}
