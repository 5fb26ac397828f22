//! # Jaro Similarity
//!
//! Elements of the second sequence are matched, in order, against the lowest unmatched
//! equal element of the first sequence within a window of `max(len1, len2) / 2 - 1`
//! positions. With `m` matches and `t` matched pairs that appear in a different order:
//!
//! ```text
//! sim = (m / len1 + m / len2 + (m - t / 2) / m) / 3
//! ```
//!
//! When both sequences fit into a word the match flags are computed with bit-parallel
//! masks, otherwise with `bitvec` flag vectors.

use crate::details::common::HashableChar;
use crate::details::intrinsics::{bit_mask_lsb, blsi, blsr, popcount};
use crate::details::pattern_match_vector::{
    BitVectorInterface, BlockPatternMatchVector, PatternMatchVector,
};
use bitvec::{bitvec, vec::BitVec};
use log::debug;

/// Upper bound of the similarity from the lengths alone.
fn jaro_length_filter(p_len: usize, t_len: usize, score_cutoff: f64) -> bool {
    if p_len == 0 || t_len == 0 {
        return false;
    }

    let min_len = p_len.min(t_len) as f64;
    let sim = (min_len / p_len as f64 + min_len / t_len as f64 + 1.0) / 3.0;
    sim >= score_cutoff
}

/// Upper bound of the similarity once the number of matches is known.
fn jaro_common_char_filter(p_len: usize, t_len: usize, common_chars: usize, score_cutoff: f64) -> bool {
    if common_chars == 0 {
        return false;
    }

    let common = common_chars as f64;
    let sim = (common / p_len as f64 + common / t_len as f64 + 1.0) / 3.0;
    sim >= score_cutoff
}

fn jaro_calculate_similarity(p_len: usize, t_len: usize, common_chars: usize, transpositions: usize) -> f64 {
    let common = common_chars as f64;
    let transpositions = (transpositions / 2) as f64;
    (common / p_len as f64 + common / t_len as f64 + (common - transpositions) / common) / 3.0
}

/// Half width of the match window.
#[inline]
fn jaro_bound(p_len: usize, t_len: usize) -> usize {
    (p_len.max(t_len) / 2).saturating_sub(1)
}

#[derive(Debug, Default, Clone, Copy)]
struct FlaggedCharsWord {
    p_flag: u64,
    t_flag: u64,
}

fn flag_similar_characters_word<PmVec, T>(pm: &PmVec, t: &[T], bound: usize) -> FlaggedCharsWord
where
    PmVec: BitVectorInterface,
    T: HashableChar,
{
    debug_assert!(t.len() <= 64);

    let mut flagged = FlaggedCharsWord::default();
    // the window grows until it reaches its full width of 2 * bound + 1
    let mut bound_mask = bit_mask_lsb(bound + 1);

    for (j, &ch) in t.iter().enumerate() {
        let pm_j = pm.get(0, ch) & bound_mask & !flagged.p_flag;
        flagged.p_flag |= blsi(pm_j);
        flagged.t_flag |= u64::from(pm_j != 0) << j;

        bound_mask = if j < bound {
            (bound_mask << 1) | 1
        } else {
            bound_mask << 1
        };
    }

    flagged
}

fn count_transpositions_word<PmVec, T>(pm: &PmVec, t: &[T], flagged: FlaggedCharsWord) -> usize
where
    PmVec: BitVectorInterface,
    T: HashableChar,
{
    let mut p_flag = flagged.p_flag;
    let mut t_flag = flagged.t_flag;
    let mut transpositions = 0;

    while t_flag != 0 {
        let pattern_flag_mask = blsi(p_flag);
        let j = t_flag.trailing_zeros() as usize;
        transpositions += usize::from(pm.get(0, t[j]) & pattern_flag_mask == 0);

        t_flag = blsr(t_flag);
        p_flag ^= pattern_flag_mask;
    }

    transpositions
}

fn flag_similar_characters_general<T: HashableChar>(p: &[T], t: &[T], bound: usize) -> (BitVec, BitVec) {
    let mut p_flag = bitvec![0; p.len()];
    let mut t_flag = bitvec![0; t.len()];

    for (j, ch) in t.iter().enumerate() {
        let lower = j.saturating_sub(bound);
        let upper = (j + bound + 1).min(p.len());

        if let Some(i) = (lower..upper).find(|&i| !p_flag[i] && p[i] == *ch) {
            p_flag.set(i, true);
            t_flag.set(j, true);
        }
    }

    (p_flag, t_flag)
}

fn count_transpositions_general<T: HashableChar>(p: &[T], t: &[T], p_flag: &BitVec, t_flag: &BitVec) -> usize {
    p_flag
        .iter_ones()
        .zip(t_flag.iter_ones())
        .filter(|&(i, j)| p[i] != t[j])
        .count()
}

/// Jaro similarity where `pm`, when given, encodes at least the first 64 elements of `p`
/// in a single block.
fn jaro_similarity_with_pm<PmVec, T>(pm: Option<&PmVec>, p: &[T], t: &[T], score_cutoff: f64) -> f64
where
    PmVec: BitVectorInterface,
    T: HashableChar,
{
    let p_len = p.len();
    let t_len = t.len();

    if p_len == 0 && t_len == 0 {
        return if score_cutoff <= 1.0 { 1.0 } else { 0.0 };
    }

    if !jaro_length_filter(p_len, t_len, score_cutoff) {
        return 0.0;
    }

    if p_len == 1 && t_len == 1 {
        let sim = if p[0] == t[0] { 1.0 } else { 0.0 };
        return if sim >= score_cutoff { sim } else { 0.0 };
    }

    // elements outside of every window can never match
    let bound = jaro_bound(p_len, t_len);
    let p_trim = &p[..p_len.min(t_len + bound)];
    let t_trim = &t[..t_len.min(p_len + bound)];

    let (common_chars, transpositions) = match pm {
        Some(pm) if p_trim.len() <= 64 && t_trim.len() <= 64 => {
            let flagged = flag_similar_characters_word(pm, t_trim, bound);
            let common_chars = popcount(flagged.p_flag);
            if !jaro_common_char_filter(p_len, t_len, common_chars, score_cutoff) {
                return 0.0;
            }
            (common_chars, count_transpositions_word(pm, t_trim, flagged))
        }
        _ => {
            let (p_flag, t_flag) = flag_similar_characters_general(p_trim, t_trim, bound);
            let common_chars = p_flag.count_ones();
            if !jaro_common_char_filter(p_len, t_len, common_chars, score_cutoff) {
                return 0.0;
            }
            let transpositions = count_transpositions_general(p_trim, t_trim, &p_flag, &t_flag);
            (common_chars, transpositions)
        }
    };

    let sim = jaro_calculate_similarity(p_len, t_len, common_chars, transpositions);
    if sim >= score_cutoff {
        sim
    } else {
        0.0
    }
}

pub(crate) fn jaro_similarity<T: HashableChar>(p: &[T], t: &[T], score_cutoff: f64) -> f64 {
    let bound = jaro_bound(p.len(), t.len());
    let p_used = p.len().min(t.len() + bound);

    if p_used != 0 && p_used <= 64 {
        let pm = PatternMatchVector::new(&p[..p_used]);
        jaro_similarity_with_pm(Some(&pm), p, t, score_cutoff)
    } else {
        jaro_similarity_with_pm(None::<&PatternMatchVector>, p, t, score_cutoff)
    }
}

/// Converts a distance cutoff into a similarity cutoff, runs `similarity` and converts back.
pub(crate) fn distance_from_similarity<F>(score_cutoff: f64, similarity: F) -> f64
where
    F: FnOnce(f64) -> f64,
{
    let cutoff_similarity = if score_cutoff <= 1.0 {
        1.0 - score_cutoff
    } else {
        0.0
    };
    let dist = 1.0 - similarity(cutoff_similarity);
    if dist <= score_cutoff {
        dist
    } else {
        1.0
    }
}

/// Jaro similarity in `[0, 1]`; 0.0 when below `score_cutoff`.
///
/// # Examples
///
/// ```
/// use bitdist::distance::jaro;
///
/// let sim = jaro::similarity(b"MARTHA", b"MARHTA", None);
/// assert!((sim - 0.9444).abs() < 1e-4);
/// ```
pub fn similarity<T: HashableChar>(s1: &[T], s2: &[T], score_cutoff: impl Into<Option<f64>>) -> f64 {
    jaro_similarity(s1, s2, score_cutoff.into().unwrap_or(0.0))
}

/// `1 - similarity`; 1.0 when above `score_cutoff`.
pub fn distance<T: HashableChar>(s1: &[T], s2: &[T], score_cutoff: impl Into<Option<f64>>) -> f64 {
    distance_from_similarity(score_cutoff.into().unwrap_or(1.0), |cutoff| {
        jaro_similarity(s1, s2, cutoff)
    })
}

/// Same as [`similarity`]; Jaro is already normalized.
pub fn normalized_similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    similarity(s1, s2, score_cutoff)
}

/// Same as [`distance`]; Jaro is already normalized.
pub fn normalized_distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    distance(s1, s2, score_cutoff)
}

/// Jaro scorer with the first sequence encoded once.
#[derive(Debug, Clone)]
pub struct CachedJaro<T> {
    s1: Vec<T>,
    pm: BlockPatternMatchVector,
}

impl<T: HashableChar> CachedJaro<T> {
    pub fn new(s1: &[T]) -> Self {
        let pm = BlockPatternMatchVector::new(s1);
        debug!("cached jaro: encoded {} elements in {} blocks", s1.len(), pm.size());
        Self { s1: s1.to_vec(), pm }
    }

    pub(crate) fn similarity_with_cutoff(&self, s2: &[T], score_cutoff: f64) -> f64 {
        // the word engine needs the whole pattern inside block 0
        if self.pm.size() == 1 {
            jaro_similarity_with_pm(Some(&self.pm), &self.s1, s2, score_cutoff)
        } else {
            jaro_similarity_with_pm(None::<&BlockPatternMatchVector>, &self.s1, s2, score_cutoff)
        }
    }

    pub(crate) fn s1(&self) -> &[T] {
        &self.s1
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
