//! # Damerau-Levenshtein Distance
//!
//! Unrestricted Damerau-Levenshtein distance: insertions, deletions, substitutions and
//! transpositions of adjacent elements, where transposed elements may be edited again.
//! Unlike [`osa`](crate::distance::osa), `"CA"` to `"ABC"` costs 2.
//!
//! Computed with Zhao's row formulation of the Lowrance-Wagner dynamic program. For every
//! element the last row of the first sequence it occurred in is kept in a hybrid hash map,
//! so the transposition candidate of every cell is found in O(1). Memory is linear in the
//! length of the second sequence.

use crate::details::common::{remove_common_affix, HashableChar};
use crate::details::distance::DistanceMetricUsize;
use crate::details::growing_hashmap::HybridGrowingHashmap;
use log::debug;
use std::mem;

/// Row an element of the first sequence was last seen in; -1 before its first occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowId(isize);

impl Default for RowId {
    fn default() -> Self {
        RowId(-1)
    }
}

/// Zhao's row formulation of Lowrance-Wagner over two affix-free, non-empty sequences.
///
/// Only the current row, the previous row and the row of transposition candidates are
/// kept, so memory is linear in `s2.len()`. Every row is shifted by one slot so that
/// column -1 holds the sentinel.
fn damerau_levenshtein_distance_zhao<T: HashableChar>(s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
    let len2 = s2.len();
    let max_val = s1.len().max(len2) as isize + 1;
    let size = len2 + 2;

    let mut last_row_id: HybridGrowingHashmap<RowId> = HybridGrowingHashmap::default();
    let mut fr = vec![max_val; size];
    let mut r1 = vec![max_val; size];
    let mut r: Vec<isize> = Vec::with_capacity(size);
    r.push(max_val);
    r.extend(0..=len2 as isize);

    for (row, &ch1) in s1.iter().enumerate() {
        let i = row as isize + 1;
        mem::swap(&mut r, &mut r1);

        // column of the last match of ch1 in the current row
        let mut last_col_id: isize = -1;
        // H[i-2][l-1] for that match
        let mut t = max_val;
        let mut last_i2l1 = r[1];
        r[1] = i;

        for (col, &ch2) in s2.iter().enumerate() {
            let j = col as isize + 1;
            let diag = r1[col + 1] + isize::from(ch1 != ch2);
            let left = r[col + 1] + 1;
            let up = r1[col + 2] + 1;
            let mut temp = diag.min(left).min(up);

            if ch1 == ch2 {
                last_col_id = j;
                fr[col + 2] = r1[col];
                t = last_i2l1;
            } else {
                let k = last_row_id.get(ch2.hash_char()).0;
                let l = last_col_id;

                if j - l == 1 {
                    temp = temp.min(fr[col + 2] + (i - k));
                } else if i - k == 1 {
                    temp = temp.min(t + (j - l));
                }
            }

            last_i2l1 = r[col + 2];
            r[col + 2] = temp;
        }

        *last_row_id.get_mut(ch1.hash_char()) = RowId(i);
    }

    let dist = r[len2 + 1] as usize;
    if dist <= score_cutoff {
        dist
    } else {
        score_cutoff + 1
    }
}

fn damerau_levenshtein_distance<T: HashableChar>(s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
    if score_cutoff < s1.len().abs_diff(s2.len()) {
        return score_cutoff + 1;
    }

    let affix = remove_common_affix(s1, s2);
    if affix.s1.is_empty() || affix.s2.is_empty() {
        let dist = affix.s1.len() + affix.s2.len();
        return if dist <= score_cutoff {
            dist
        } else {
            score_cutoff + 1
        };
    }

    damerau_levenshtein_distance_zhao(affix.s1, affix.s2, score_cutoff)
}

pub(crate) struct DamerauLevenshtein;

impl<T: HashableChar> DistanceMetricUsize<T> for DamerauLevenshtein {
    fn maximum(&self, len1: usize, len2: usize) -> usize {
        len1.max(len2)
    }

    fn _distance(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        damerau_levenshtein_distance(s1, s2, score_cutoff)
    }
}

/// Damerau-Levenshtein distance with unrestricted transpositions.
///
/// Returns `score_cutoff + 1` when the distance exceeds `score_cutoff`.
///
/// # Examples
///
/// ```
/// use bitdist::distance::damerau_levenshtein;
///
/// assert_eq!(damerau_levenshtein::distance(b"CA", b"ABC", None), 2);
/// ```
pub fn distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<usize>>,
) -> usize {
    DamerauLevenshtein._distance(s1, s2, score_cutoff.into().unwrap_or(usize::MAX))
}

pub fn similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<usize>>,
) -> usize {
    DamerauLevenshtein._similarity(s1, s2, score_cutoff.into().unwrap_or(0))
}

pub fn normalized_distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    DamerauLevenshtein._normalized_distance(s1, s2, score_cutoff.into().unwrap_or(1.0))
}

pub fn normalized_similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    DamerauLevenshtein._normalized_similarity(s1, s2, score_cutoff.into().unwrap_or(0.0))
}

/// Damerau-Levenshtein scorer bound to a first sequence.
#[derive(Debug, Clone)]
pub struct CachedDamerauLevenshtein<T> {
    s1: Vec<T>,
}

impl<T: HashableChar> CachedDamerauLevenshtein<T> {
    pub fn new(s1: &[T]) -> Self {
        debug!("cached damerau-levenshtein: stored {} elements", s1.len());
        Self { s1: s1.to_vec() }
    }

    pub fn distance(&self, s2: &[T], score_cutoff: impl Into<Option<usize>>) -> usize {
        DamerauLevenshtein._distance(&self.s1, s2, score_cutoff.into().unwrap_or(usize::MAX))
    }

    pub fn similarity(&self, s2: &[T], score_cutoff: impl Into<Option<usize>>) -> usize {
        DamerauLevenshtein._similarity(&self.s1, s2, score_cutoff.into().unwrap_or(0))
    }

    pub fn normalized_distance(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> f64 {
        DamerauLevenshtein._normalized_distance(&self.s1, s2, score_cutoff.into().unwrap_or(1.0))
    }

    pub fn normalized_similarity(&self, s2: &[T], score_cutoff: impl Into<Option<f64>>) -> f64 {
        DamerauLevenshtein._normalized_similarity(&self.s1, s2, score_cutoff.into().unwrap_or(0.0))
    }
}
