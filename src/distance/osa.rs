//! # Optimal String Alignment
//!
//! Levenshtein distance extended with transpositions of two adjacent elements, under
//! the restriction that no substring is edited more than once. Computed with Hyyrö's
//! bit-parallel recurrence plus a transposition term:
//!
//! ```text
//! TR = (((~D0) & PM[ch]) << 1) & PM[previous ch]
//! D0 = (((X & VP) + VP) ^ VP) | X | VN | TR
//! ```
//!
//! For patterns longer than a word the transposition bit is carried across the
//! word boundary from the previous block.

use crate::details::common::{remove_common_affix, HashableChar};
use crate::details::distance::DistanceMetricUsize;
use crate::details::pattern_match_vector::{
    BitVectorInterface, BlockPatternMatchVector, PatternMatchVector,
};
use log::{debug, trace};
use std::mem;

/// Bit-parallel OSA for a pattern of at most 64 elements.
fn osa_hyrroe2003<PmVec, T>(pm: &PmVec, len1: usize, s2: &[T], score_cutoff: usize) -> usize
where
    PmVec: BitVectorInterface,
    T: HashableChar,
{
    debug_assert!(len1 != 0 && len1 <= 64);

    let mut vp = !0_u64;
    let mut vn = 0_u64;
    let mut d0 = 0_u64;
    let mut pm_j_old = 0_u64;
    let mut dist = len1;
    let mask = 1_u64 << (len1 - 1);

    for &ch2 in s2 {
        let pm_j = pm.get(0, ch2);
        let tr = (((!d0) & pm_j) << 1) & pm_j_old;
        d0 = ((pm_j & vp).wrapping_add(vp) ^ vp) | pm_j | vn | tr;

        let mut hp = vn | !(d0 | vp);
        let mut hn = d0 & vp;

        dist += usize::from(hp & mask != 0);
        dist -= usize::from(hn & mask != 0);

        hp = (hp << 1) | 1;
        hn <<= 1;

        vp = hn | !(d0 | hp);
        vn = hp & d0;
        pm_j_old = pm_j;
    }

    if dist <= score_cutoff {
        dist
    } else {
        score_cutoff + 1
    }
}

/// State of one block. Slot 0 of a row is a zeroed sentinel for the block below word 0.
#[derive(Debug, Clone, Copy)]
struct OsaRow {
    vp: u64,
    vn: u64,
    d0: u64,
    pm: u64,
}

impl Default for OsaRow {
    fn default() -> Self {
        Self {
            vp: !0,
            vn: 0,
            d0: 0,
            pm: 0,
        }
    }
}

fn osa_hyrroe2003_block<PmVec, T>(pm: &PmVec, len1: usize, s2: &[T], score_cutoff: usize) -> usize
where
    PmVec: BitVectorInterface,
    T: HashableChar,
{
    let words = pm.size();
    let last = 1_u64 << ((len1 - 1) % 64);

    let mut dist = len1;
    let mut old_vecs = vec![OsaRow::default(); words + 1];
    let mut new_vecs = vec![OsaRow::default(); words + 1];

    for &ch2 in s2 {
        let mut hp_carry = 1_u64;
        let mut hn_carry = 0_u64;

        for word in 0..words {
            let OsaRow { vp, vn, d0, pm: pm_j_old } = old_vecs[word + 1];
            // previous element, block below
            let d0_last = old_vecs[word].d0;
            // current element, block below
            let pm_last = new_vecs[word].pm;

            let pm_j = pm.get(word, ch2);
            let tr = ((((!d0) & pm_j) << 1) | (((!d0_last) & pm_last) >> 63)) & pm_j_old;

            let x = pm_j | hn_carry;
            let d0 = ((x & vp).wrapping_add(vp) ^ vp) | x | vn | tr;

            let mut hp = vn | !(d0 | vp);
            let mut hn = d0 & vp;

            if word + 1 == words {
                dist += usize::from(hp & last != 0);
                dist -= usize::from(hn & last != 0);
            }

            let hp_carry_in = hp_carry;
            let hn_carry_in = hn_carry;
            hp_carry = hp >> 63;
            hn_carry = hn >> 63;
            hp = (hp << 1) | hp_carry_in;
            hn = (hn << 1) | hn_carry_in;

            new_vecs[word + 1] = OsaRow {
                vp: hn | !(d0 | hp),
                vn: hp & d0,
                d0,
                pm: pm_j,
            };
        }

        mem::swap(&mut new_vecs, &mut old_vecs);
    }

    if dist <= score_cutoff {
        dist
    } else {
        score_cutoff + 1
    }
}

fn osa_distance<T: HashableChar>(s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
    // the longer sequence becomes the pattern
    if s1.len() < s2.len() {
        return osa_distance(s2, s1, score_cutoff);
    }

    if score_cutoff < s1.len() - s2.len() {
        return score_cutoff + 1;
    }

    let affix = remove_common_affix(s1, s2);
    let (s1, s2) = (affix.s1, affix.s2);

    if s1.is_empty() || s2.is_empty() {
        let dist = s1.len() + s2.len();
        return if dist <= score_cutoff {
            dist
        } else {
            score_cutoff + 1
        };
    }

    if s1.len() <= 64 {
        let pm = PatternMatchVector::new(s1);
        osa_hyrroe2003(&pm, s1.len(), s2, score_cutoff)
    } else {
        let pm = BlockPatternMatchVector::new(s1);
        trace!("osa: blockwise pass over {} blocks", pm.size());
        osa_hyrroe2003_block(&pm, s1.len(), s2, score_cutoff)
    }
}

pub(crate) struct Osa;

impl<T: HashableChar> DistanceMetricUsize<T> for Osa {
    fn maximum(&self, len1: usize, len2: usize) -> usize {
        len1.max(len2)
    }

    fn _distance(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        osa_distance(s1, s2, score_cutoff)
    }
}

/// Optimal string alignment distance.
///
/// Returns `score_cutoff + 1` when the distance exceeds `score_cutoff`.
///
/// # Examples
///
/// ```
/// use bitdist::distance::osa;
///
/// assert_eq!(osa::distance(b"CA", b"AC", None), 1);
/// // a transposed pair cannot be edited again
/// assert_eq!(osa::distance(b"CA", b"ABC", None), 3);
/// ```
pub fn distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<usize>>,
) -> usize {
    Osa._distance(s1, s2, score_cutoff.into().unwrap_or(usize::MAX))
}

pub fn similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<usize>>,
) -> usize {
    Osa._similarity(s1, s2, score_cutoff.into().unwrap_or(0))
}

pub fn normalized_distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    Osa._normalized_distance(s1, s2, score_cutoff.into().unwrap_or(1.0))
}

pub fn normalized_similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    Osa._normalized_similarity(s1, s2, score_cutoff.into().unwrap_or(0.0))
}

/// OSA scorer with the first sequence encoded once.
#[derive(Debug, Clone)]
pub struct CachedOsa<T> {
    s1: Vec<T>,
    pm: BlockPatternMatchVector,
}

impl<T: HashableChar> DistanceMetricUsize<T> for CachedOsa<T> {
    fn maximum(&self, len1: usize, len2: usize) -> usize {
        len1.max(len2)
    }

    fn _distance(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        let dist = if s1.is_empty() {
            s2.len()
        } else if s2.is_empty() {
            s1.len()
        } else if s1.len() <= 64 {
            osa_hyrroe2003(&self.pm, s1.len(), s2, score_cutoff)
        } else {
            osa_hyrroe2003_block(&self.pm, s1.len(), s2, score_cutoff)
        };

        if dist <= score_cutoff {
            dist
        } else {
            score_cutoff + 1
        }
    }
}

impl<T: HashableChar> CachedOsa<T> {
    pub fn new(s1: &[T]) -> Self {
        let pm = BlockPatternMatchVector::new(s1);
        debug!("cached osa: encoded {} elements in {} blocks", s1.len(), pm.size());
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
