//! # Levenshtein Distance
//!
//! Minimum total cost of insertions, deletions and substitutions needed to turn one
//! sequence into the other.
//!
//! ## Dispatch
//!
//! Uniform weights run through a chain of increasingly general engines:
//! - a direct comparison when no edit is allowed
//! - the mbleven enumeration for cutoffs below 4
//! - Hyyrö's bit-parallel recurrence when the shorter sequence fits into one word
//! - the blockwise recurrence restricted to an Ukkonen band otherwise
//!
//! `insert == delete` with `replace >= insert + delete` is an Indel distance in disguise
//! and reuses the LCS engine. Every other weighting falls back to a Wagner-Fischer
//! dynamic program over the sequences with their common affix removed.

use crate::alignment::{EditOp, EditType, Editops};
use crate::details::common::{remove_common_affix, Affix, HashableChar};
use crate::details::distance::DistanceMetricUsize;
use crate::details::intrinsics::ceil_div;
use crate::details::matrix::BitMatrix;
use crate::details::pattern_match_vector::{
    BitVectorInterface, BlockPatternMatchVector, PatternMatchVector,
};
use crate::distance::indel::{indel_distance, indel_distance_with_pm};
use log::{debug, trace};

/// Costs of the three edit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevenshteinWeightTable {
    pub insert_cost: usize,
    pub delete_cost: usize,
    pub replace_cost: usize,
}

impl LevenshteinWeightTable {
    pub fn new(insert_cost: usize, delete_cost: usize, replace_cost: usize) -> Self {
        Self {
            insert_cost,
            delete_cost,
            replace_cost,
        }
    }

    /// All three operations cost the same.
    pub fn is_uniform(&self) -> bool {
        self.insert_cost == self.delete_cost && self.delete_cost == self.replace_cost
    }
}

impl Default for LevenshteinWeightTable {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

/// Largest distance possible for the given lengths.
pub(crate) fn levenshtein_maximum(len1: usize, len2: usize, weights: &LevenshteinWeightTable) -> usize {
    let max_dist = len1
        .saturating_mul(weights.delete_cost)
        .saturating_add(len2.saturating_mul(weights.insert_cost));

    if len1 >= len2 {
        max_dist.min(
            len2.saturating_mul(weights.replace_cost)
                .saturating_add((len1 - len2).saturating_mul(weights.delete_cost)),
        )
    } else {
        max_dist.min(
            len1.saturating_mul(weights.replace_cost)
                .saturating_add((len2 - len1).saturating_mul(weights.insert_cost)),
        )
    }
}

/// Lower bound from the length difference alone.
fn levenshtein_min_distance(len1: usize, len2: usize, weights: &LevenshteinWeightTable) -> usize {
    if len1 >= len2 {
        (len1 - len2).saturating_mul(weights.delete_cost)
    } else {
        (len2 - len1).saturating_mul(weights.insert_cost)
    }
}

/// Single-row Wagner-Fischer with arbitrary weights.
fn generalized_levenshtein_wagner_fischer<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    weights: &LevenshteinWeightTable,
    score_cutoff: usize,
) -> usize {
    let mut cache: Vec<usize> = (0..=s1.len())
        .map(|i| i.saturating_mul(weights.delete_cost))
        .collect();

    for &ch2 in s2 {
        let mut diag = cache[0];
        cache[0] = cache[0].saturating_add(weights.insert_cost);

        for (i, &ch1) in s1.iter().enumerate() {
            let above = cache[i + 1];
            cache[i + 1] = if ch1 == ch2 {
                diag
            } else {
                cache[i]
                    .saturating_add(weights.delete_cost)
                    .min(above.saturating_add(weights.insert_cost))
                    .min(diag.saturating_add(weights.replace_cost))
            };
            diag = above;
        }
    }

    let dist = cache[s1.len()];
    if dist <= score_cutoff {
        dist
    } else {
        score_cutoff + 1
    }
}

fn generalized_levenshtein_distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    weights: &LevenshteinWeightTable,
    score_cutoff: usize,
) -> usize {
    if levenshtein_min_distance(s1.len(), s2.len(), weights) > score_cutoff {
        return score_cutoff + 1;
    }

    let affix = remove_common_affix(s1, s2);
    generalized_levenshtein_wagner_fischer(affix.s1, affix.s2, weights, score_cutoff)
}

/// mbleven edit sequences, indexed by `(max_distance, len_diff)`.
///
/// Every byte encodes up to four operations, two bits each, lowest bits first:
/// `01` deletes from the longer sequence, `10` inserts, `11` substitutes. A zero byte
/// ends the row.
static LEVENSHTEIN_MBLEVEN2018_MATRIX: [[u8; 7]; 9] = [
    // max edit distance 1
    [0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // len_diff 0
    [0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // len_diff 1
    // max edit distance 2
    [0x0F, 0x09, 0x06, 0x00, 0x00, 0x00, 0x00], // len_diff 0
    [0x0D, 0x07, 0x00, 0x00, 0x00, 0x00, 0x00], // len_diff 1
    [0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // len_diff 2
    // max edit distance 3
    [0x3F, 0x27, 0x2D, 0x39, 0x36, 0x1E, 0x1B], // len_diff 0
    [0x3D, 0x37, 0x1F, 0x25, 0x19, 0x16, 0x00], // len_diff 1
    [0x35, 0x1D, 0x17, 0x00, 0x00, 0x00, 0x00], // len_diff 2
    [0x15, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // len_diff 3
];

/// Distance by enumerating every edit sequence allowed by `score_cutoff`.
///
/// Requires non-empty sequences without a common affix, `1 <= score_cutoff <= 3` and
/// a length difference of at most `score_cutoff`.
fn levenshtein_mbleven2018<T: HashableChar>(s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
    debug_assert!(!s1.is_empty() && !s2.is_empty());

    if s1.len() < s2.len() {
        return levenshtein_mbleven2018(s2, s1, score_cutoff);
    }

    let len1 = s1.len();
    let len2 = s2.len();
    let len_diff = len1 - len2;

    // first and last elements differ after affix removal
    if score_cutoff == 1 {
        return score_cutoff + usize::from(len_diff == 1 || len1 != 1);
    }

    let ops_index = (score_cutoff + score_cutoff * score_cutoff) / 2 + len_diff - 1;
    let mut dist = score_cutoff + 1;

    for &possible_ops in LEVENSHTEIN_MBLEVEN2018_MATRIX[ops_index].iter() {
        if possible_ops == 0 {
            break;
        }

        let mut ops = possible_ops;
        let mut i1 = 0;
        let mut i2 = 0;
        let mut cur_dist = 0;

        while i1 < len1 && i2 < len2 {
            if s1[i1] != s2[i2] {
                cur_dist += 1;
                if ops == 0 {
                    break;
                }
                if ops & 1 != 0 {
                    i1 += 1;
                }
                if ops & 2 != 0 {
                    i2 += 1;
                }
                ops >>= 2;
            } else {
                i1 += 1;
                i2 += 1;
            }
        }

        cur_dist += (len1 - i1) + (len2 - i2);
        dist = dist.min(cur_dist);
    }

    if dist <= score_cutoff {
        dist
    } else {
        score_cutoff + 1
    }
}

/// Vertical delta vectors of one 64-element block.
#[derive(Debug, Clone, Copy)]
struct LevenshteinRow {
    vp: u64,
    vn: u64,
}

impl Default for LevenshteinRow {
    fn default() -> Self {
        Self { vp: !0, vn: 0 }
    }
}

/// Advances one block by one element of the text.
///
/// `carry_bit` marks the highest pattern position of the block. The horizontal
/// carries coming in from the block below are replaced by the carries going out.
#[inline]
fn advance_block(
    vecs: &mut LevenshteinRow,
    pm_j: u64,
    carry_bit: u64,
    hp_carry: &mut u64,
    hn_carry: &mut u64,
) {
    let vp = vecs.vp;
    let vn = vecs.vn;

    let x = pm_j | *hn_carry;
    let d0 = ((x & vp).wrapping_add(vp) ^ vp) | x | vn;

    let mut hp = vn | !(d0 | vp);
    let mut hn = d0 & vp;

    let hp_carry_in = *hp_carry;
    let hn_carry_in = *hn_carry;
    *hp_carry = u64::from(hp & carry_bit != 0);
    *hn_carry = u64::from(hn & carry_bit != 0);

    hp = (hp << 1) | hp_carry_in;
    hn = (hn << 1) | hn_carry_in;

    vecs.vp = hn | !(d0 | hp);
    vecs.vn = hp & d0;
}

/// Hyyrö's bit-parallel Levenshtein for a pattern of at most 64 elements.
pub(crate) fn levenshtein_hyrroe2003<PmVec, T>(pm: &PmVec, len1: usize, s2: &[T], score_cutoff: usize) -> usize
where
    PmVec: BitVectorInterface,
    T: HashableChar,
{
    debug_assert!(len1 != 0 && len1 <= 64);

    let mut vp = !0_u64;
    let mut vn = 0_u64;
    let mut dist = len1;
    // bottom row of the dynamic programming matrix
    let mask = 1_u64 << (len1 - 1);

    for &ch2 in s2 {
        let x = pm.get(0, ch2);
        let d0 = ((x & vp).wrapping_add(vp) ^ vp) | x | vn;

        let mut hp = vn | !(d0 | vp);
        let mut hn = d0 & vp;

        dist += usize::from(hp & mask != 0);
        dist -= usize::from(hn & mask != 0);

        hp = (hp << 1) | 1;
        hn <<= 1;

        vp = hn | !(d0 | hp);
        vn = hp & d0;
    }

    if dist <= score_cutoff {
        dist
    } else {
        score_cutoff + 1
    }
}

/// Blockwise Hyyrö recurrence that only advances the blocks inside the Ukkonen band.
///
/// The band starts at the blocks reachable within `score_cutoff` and is moved after
/// every row using the bottom score of the first and last block. The cutoff is
/// tightened on the way with the cheapest completion of the last block's score.
fn levenshtein_hyrroe2003_block<PmVec, T>(
    pm: &PmVec,
    len1: usize,
    s2: &[T],
    score_cutoff: usize,
) -> usize
where
    PmVec: BitVectorInterface,
    T: HashableChar,
{
    let len2 = s2.len();
    if score_cutoff < len1.abs_diff(len2) {
        return score_cutoff + 1;
    }

    let word_size = 64;
    let words = pm.size();
    debug_assert!(words != 0);

    let mut vecs = vec![LevenshteinRow::default(); words];
    let mut scores: Vec<usize> = (1..=words).map(|word| word * word_size).collect();
    scores[words - 1] = len1;
    let last = 1_u64 << ((len1 - 1) % word_size);
    let carry_bit = |word: usize| if word + 1 == words { last } else { 1_u64 << 63 };
    let row_num = |word: usize| {
        if word + 1 == words {
            len1 - 1
        } else {
            (word + 1) * word_size - 1
        }
    };

    let max_cutoff = score_cutoff;
    let mut cutoff = score_cutoff.min(len1.max(len2));
    let mut first_block = 0;
    let mut last_block =
        words.min(ceil_div(cutoff.min((cutoff + len1 - len2) / 2) + 1, word_size)) - 1;

    for (row, &ch2) in s2.iter().enumerate() {
        let mut hp_carry = 1_u64;
        let mut hn_carry = 0_u64;

        for word in first_block..=last_block {
            advance_block(
                &mut vecs[word],
                pm.get(word, ch2),
                carry_bit(word),
                &mut hp_carry,
                &mut hn_carry,
            );
            scores[word] += hp_carry as usize;
            scores[word] -= hn_carry as usize;
        }

        cutoff = cutoff.min(
            scores[last_block]
                + (len2 - row - 1).max(len1.saturating_sub((1 + last_block) * word_size)),
        );

        // extend the band by at most one block, the ones after it are certainly outside
        if last_block + 1 < words
            && row_num(last_block) + scores[last_block] + 2 + len2
                <= cutoff + 2 * word_size + row + len1
        {
            last_block += 1;
            vecs[last_block] = LevenshteinRow::default();

            let chars_in_block = if last_block + 1 == words {
                (len1 - 1) % word_size + 1
            } else {
                word_size
            };
            scores[last_block] =
                scores[last_block - 1] + chars_in_block - hp_carry as usize + hn_carry as usize;

            advance_block(
                &mut vecs[last_block],
                pm.get(last_block, ch2),
                carry_bit(last_block),
                &mut hp_carry,
                &mut hn_carry,
            );
            scores[last_block] += hp_carry as usize;
            scores[last_block] -= hn_carry as usize;
        }

        loop {
            // score within a word of the cutoff and the block is not below the band
            let in_band = scores[last_block] < cutoff + word_size
                && row_num(last_block) + scores[last_block] + 2 + len2
                    <= cutoff + 2 * word_size + row + len1 + 1;
            if in_band {
                break;
            }
            if last_block == first_block {
                return max_cutoff + 1;
            }
            last_block -= 1;
        }

        loop {
            // score within a word of the cutoff and the block is not above the band
            let in_band = scores[first_block] < cutoff + word_size
                && row_num(first_block) + cutoff + len2 >= scores[first_block] + len1 + row;
            if in_band {
                break;
            }
            if first_block == last_block {
                return max_cutoff + 1;
            }
            first_block += 1;
        }
    }

    if last_block + 1 != words {
        return max_cutoff + 1;
    }

    let dist = scores[words - 1];
    if dist <= max_cutoff {
        dist
    } else {
        max_cutoff + 1
    }
}

/// Picks the engine for uniform weights once the trivial cases are handled.
fn uniform_levenshtein_distance<T: HashableChar>(s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
    // the shorter sequence goes second
    if s1.len() < s2.len() {
        return uniform_levenshtein_distance(s2, s1, score_cutoff);
    }

    let score_cutoff = score_cutoff.min(s1.len());

    // no edits are allowed
    if score_cutoff == 0 {
        return usize::from(s1 != s2);
    }

    if score_cutoff < s1.len() - s2.len() {
        return score_cutoff + 1;
    }

    let affix = remove_common_affix(s1, s2);
    let (s1, s2) = (affix.s1, affix.s2);
    if s1.is_empty() || s2.is_empty() {
        return s1.len() + s2.len();
    }

    if score_cutoff < 4 {
        return levenshtein_mbleven2018(s1, s2, score_cutoff);
    }

    if s2.len() <= 64 {
        let pm = PatternMatchVector::new(s2);
        return levenshtein_hyrroe2003(&pm, s2.len(), s1, score_cutoff);
    }

    let pm = BlockPatternMatchVector::new(s1);
    trace!(
        "levenshtein: banded blockwise pass over {} blocks, cutoff {}",
        pm.size(),
        score_cutoff
    );
    levenshtein_hyrroe2003_block(&pm, s1.len(), s2, score_cutoff)
}

/// Uniform Levenshtein against an already encoded `s1`.
fn uniform_levenshtein_distance_with_pm<T: HashableChar>(
    pm: &BlockPatternMatchVector,
    s1: &[T],
    s2: &[T],
    score_cutoff: usize,
) -> usize {
    let len1 = s1.len();
    let len2 = s2.len();
    let score_cutoff = score_cutoff.min(len1.max(len2));

    // no edits are allowed
    if score_cutoff == 0 {
        return usize::from(s1 != s2);
    }

    if score_cutoff < len1.abs_diff(len2) {
        return score_cutoff + 1;
    }

    if len1 == 0 || len2 == 0 {
        return len1 + len2;
    }

    if score_cutoff < 4 {
        let affix = remove_common_affix(s1, s2);
        if affix.s1.is_empty() || affix.s2.is_empty() {
            return affix.s1.len() + affix.s2.len();
        }
        return levenshtein_mbleven2018(affix.s1, affix.s2, score_cutoff);
    }

    // the encoded pattern covers the whole of s1, so the affix stays in place
    if len1 <= 64 {
        levenshtein_hyrroe2003(pm, len1, s2, score_cutoff)
    } else {
        levenshtein_hyrroe2003_block(pm, len1, s2, score_cutoff)
    }
}

pub(crate) fn levenshtein_distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    weights: &LevenshteinWeightTable,
    score_cutoff: usize,
) -> usize {
    if weights.insert_cost == weights.delete_cost {
        // when insertions and deletions are free there can be no edit distance
        if weights.insert_cost == 0 {
            return 0;
        }

        if weights.insert_cost == weights.replace_cost {
            let new_cutoff = ceil_div(score_cutoff, weights.insert_cost);
            let dist = uniform_levenshtein_distance(s1, s2, new_cutoff).saturating_mul(weights.insert_cost);
            return if dist <= score_cutoff {
                dist
            } else {
                score_cutoff + 1
            };
        }

        // a replacement is never cheaper than an insertion plus a deletion
        if weights.replace_cost >= weights.insert_cost.saturating_add(weights.delete_cost) {
            let new_cutoff = ceil_div(score_cutoff, weights.insert_cost);
            let dist = indel_distance(s1, s2, new_cutoff).saturating_mul(weights.insert_cost);
            return if dist <= score_cutoff {
                dist
            } else {
                score_cutoff + 1
            };
        }
    }

    generalized_levenshtein_distance(s1, s2, weights, score_cutoff)
}

/// Vertical delta vectors of every row, kept for alignment recovery.
#[derive(Debug, Default)]
struct LevenshteinMatrix {
    dist: usize,
    vp: BitMatrix<u64>,
    vn: BitMatrix<u64>,
}

/// Full blockwise recurrence that records `VP` and `VN` after every text element.
fn levenshtein_matrix<PmVec, T>(pm: &PmVec, len1: usize, s2: &[T]) -> LevenshteinMatrix
where
    PmVec: BitVectorInterface,
    T: HashableChar,
{
    debug_assert!(len1 != 0);

    let words = pm.size();
    let last = 1_u64 << ((len1 - 1) % 64);
    let mut vecs = vec![LevenshteinRow::default(); words];
    let mut res = LevenshteinMatrix {
        dist: len1,
        vp: BitMatrix::new(s2.len(), words, !0_u64),
        vn: BitMatrix::new(s2.len(), words, 0_u64),
    };

    for (row, &ch2) in s2.iter().enumerate() {
        let mut hp_carry = 1_u64;
        let mut hn_carry = 0_u64;

        for (word, block) in vecs.iter_mut().enumerate() {
            let carry_bit = if word + 1 == words { last } else { 1_u64 << 63 };
            advance_block(block, pm.get(word, ch2), carry_bit, &mut hp_carry, &mut hn_carry);
            *res.vp.get_mut(row, word) = block.vp;
            *res.vn.get_mut(row, word) = block.vn;
        }

        // the carries out of the last block are the bottom row deltas
        res.dist += hp_carry as usize;
        res.dist -= hn_carry as usize;
    }

    res
}

/// Walks the recorded delta vectors back from the bottom right corner.
fn recover_levenshtein_editops<T: HashableChar>(
    src_len: usize,
    dest_len: usize,
    affix: &Affix<'_, T>,
    matrix: &LevenshteinMatrix,
) -> Editops {
    let s1 = affix.s1;
    let s2 = affix.s2;
    let prefix = affix.prefix_len;

    let mut dist = matrix.dist;
    let mut ops = vec![EditOp::new(EditType::Delete, 0, 0); dist];

    let mut col = s1.len();
    let mut row = s2.len();
    while row != 0 && col != 0 {
        if matrix.vp.test_bit(row - 1, col - 1) {
            dist -= 1;
            col -= 1;
            ops[dist] = EditOp::new(EditType::Delete, col + prefix, row + prefix);
        } else {
            row -= 1;
            if row != 0 && matrix.vn.test_bit(row - 1, col - 1) {
                dist -= 1;
                ops[dist] = EditOp::new(EditType::Insert, col + prefix, row + prefix);
            } else {
                col -= 1;
                if s1[col] != s2[row] {
                    dist -= 1;
                    ops[dist] = EditOp::new(EditType::Replace, col + prefix, row + prefix);
                }
            }
        }
    }

    while col != 0 {
        dist -= 1;
        col -= 1;
        ops[dist] = EditOp::new(EditType::Delete, col + prefix, row + prefix);
    }

    while row != 0 {
        dist -= 1;
        row -= 1;
        ops[dist] = EditOp::new(EditType::Insert, col + prefix, row + prefix);
    }

    debug_assert_eq!(dist, 0);
    Editops::new(ops, src_len, dest_len)
}

pub(crate) fn levenshtein_editops<T: HashableChar>(s1: &[T], s2: &[T]) -> Editops {
    let affix = remove_common_affix(s1, s2);

    let matrix = if affix.s1.is_empty() || affix.s2.is_empty() {
        LevenshteinMatrix {
            dist: affix.s1.len() + affix.s2.len(),
            ..Default::default()
        }
    } else if affix.s1.len() <= 64 {
        let pm = PatternMatchVector::new(affix.s1);
        levenshtein_matrix(&pm, affix.s1.len(), affix.s2)
    } else {
        let pm = BlockPatternMatchVector::new(affix.s1);
        levenshtein_matrix(&pm, affix.s1.len(), affix.s2)
    };

    debug!(
        "levenshtein editops: distance {} for lengths {} and {}",
        matrix.dist,
        s1.len(),
        s2.len()
    );
    recover_levenshtein_editops(s1.len(), s2.len(), &affix, &matrix)
}

pub(crate) struct Levenshtein {
    weights: LevenshteinWeightTable,
}

impl<T: HashableChar> DistanceMetricUsize<T> for Levenshtein {
    fn maximum(&self, len1: usize, len2: usize) -> usize {
        levenshtein_maximum(len1, len2, &self.weights)
    }

    fn _distance(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        levenshtein_distance(s1, s2, &self.weights, score_cutoff)
    }
}

/// Weighted Levenshtein distance between `s1` and `s2`.
///
/// `weights` defaults to a cost of 1 for every operation. Returns `score_cutoff + 1`
/// when the distance exceeds `score_cutoff`.
///
/// # Examples
///
/// ```
/// use bitdist::distance::levenshtein::{self, LevenshteinWeightTable};
///
/// assert_eq!(levenshtein::distance(b"lewenstein", b"levenshtein", None, None), 2);
///
/// let weights = LevenshteinWeightTable::new(1, 1, 2);
/// assert_eq!(levenshtein::distance(b"aaaa", b"bbbb", Some(weights), None), 8);
/// ```
pub fn distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    weights: Option<LevenshteinWeightTable>,
    score_cutoff: impl Into<Option<usize>>,
) -> usize {
    let metric = Levenshtein {
        weights: weights.unwrap_or_default(),
    };
    metric._distance(s1, s2, score_cutoff.into().unwrap_or(usize::MAX))
}

/// `maximum - distance`; 0 when below `score_cutoff`.
pub fn similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    weights: Option<LevenshteinWeightTable>,
    score_cutoff: impl Into<Option<usize>>,
) -> usize {
    let metric = Levenshtein {
        weights: weights.unwrap_or_default(),
    };
    metric._similarity(s1, s2, score_cutoff.into().unwrap_or(0))
}

pub fn normalized_distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    weights: Option<LevenshteinWeightTable>,
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    let metric = Levenshtein {
        weights: weights.unwrap_or_default(),
    };
    metric._normalized_distance(s1, s2, score_cutoff.into().unwrap_or(1.0))
}

pub fn normalized_similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    weights: Option<LevenshteinWeightTable>,
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    let metric = Levenshtein {
        weights: weights.unwrap_or_default(),
    };
    metric._normalized_similarity(s1, s2, score_cutoff.into().unwrap_or(0.0))
}

/// Insertions, deletions and substitutions of a minimal uniform-weight alignment.
///
/// The number of operations equals the uniform Levenshtein distance.
///
/// # Examples
///
/// ```
/// use bitdist::distance::levenshtein;
///
/// let ops = levenshtein::editops(b"kitten", b"sitting");
/// assert_eq!(ops.len(), 3);
/// assert_eq!(ops.apply(b"kitten", b"sitting").unwrap(), b"sitting");
/// ```
pub fn editops<T: HashableChar>(s1: &[T], s2: &[T]) -> Editops {
    levenshtein_editops(s1, s2)
}

/// Levenshtein scorer with the first sequence encoded once.
#[derive(Debug, Clone)]
pub struct CachedLevenshtein<T> {
    s1: Vec<T>,
    pm: BlockPatternMatchVector,
    weights: LevenshteinWeightTable,
}

impl<T: HashableChar> DistanceMetricUsize<T> for CachedLevenshtein<T> {
    fn maximum(&self, len1: usize, len2: usize) -> usize {
        levenshtein_maximum(len1, len2, &self.weights)
    }

    fn _distance(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        let weights = &self.weights;
        if weights.insert_cost == weights.delete_cost {
            if weights.insert_cost == 0 {
                return 0;
            }

            if weights.insert_cost == weights.replace_cost {
                let new_cutoff = ceil_div(score_cutoff, weights.insert_cost);
                let dist = uniform_levenshtein_distance_with_pm(&self.pm, s1, s2, new_cutoff)
                    .saturating_mul(weights.insert_cost);
                return if dist <= score_cutoff {
                    dist
                } else {
                    score_cutoff + 1
                };
            }

            if weights.replace_cost >= weights.insert_cost.saturating_add(weights.delete_cost) {
                let new_cutoff = ceil_div(score_cutoff, weights.insert_cost);
                let dist =
                    indel_distance_with_pm(&self.pm, s1, s2, new_cutoff).saturating_mul(weights.insert_cost);
                return if dist <= score_cutoff {
                    dist
                } else {
                    score_cutoff + 1
                };
            }
        }

        generalized_levenshtein_distance(s1, s2, weights, score_cutoff)
    }
}

impl<T: HashableChar> CachedLevenshtein<T> {
    pub fn new(s1: &[T], weights: Option<LevenshteinWeightTable>) -> Self {
        let pm = BlockPatternMatchVector::new(s1);
        let weights = weights.unwrap_or_default();
        debug!(
            "cached levenshtein: encoded {} elements in {} blocks, weights {:?}",
            s1.len(),
            pm.size(),
            weights
        );
        Self {
            s1: s1.to_vec(),
            pm,
            weights,
        }
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
