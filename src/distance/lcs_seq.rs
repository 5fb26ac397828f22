//! # Longest Common Subsequence
//!
//! Similarity is the length of the longest common subsequence, the distance is
//! `max(len1, len2) - similarity`.
//!
//! The length is computed with the bit-parallel algorithm from Hyyrö, "Bit-Parallel
//! LCS-length Computation Revisited". One word of state `S` is kept per 64 pattern
//! elements and advanced once per element of the second sequence:
//!
//! ```text
//! u = S & PM[ch]
//! S = (S + u + carry) | (S - u)
//! ```
//!
//! The LCS length is the number of zero bits left in `S`. Small cutoffs skip the
//! bit-parallel pass in favour of the mbleven enumeration.

use crate::alignment::{EditOp, EditType, Editops};
use crate::details::common::{remove_common_affix, Affix, HashableChar};
use crate::details::distance::SimilarityMetricUsize;
use crate::details::intrinsics::{carrying_add, ceil_div, popcount};
use crate::details::matrix::BitMatrix;
use crate::details::pattern_match_vector::{
    BitVectorInterface, BlockPatternMatchVector, PatternMatchVector,
};
use log::{debug, trace};

/// mbleven edit sequences for LCS, indexed by `(max_misses, len_diff)`.
///
/// Every byte encodes up to four operations, two bits each, lowest bits first:
/// `01` skips an element of the longer sequence, `10` skips one of the shorter.
/// A zero byte ends the row.
static LCS_SEQ_MBLEVEN2018_MATRIX: [[u8; 6]; 14] = [
    // max misses 1
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // len_diff 0, cannot occur
    [0x01, 0x00, 0x00, 0x00, 0x00, 0x00], // len_diff 1
    // max misses 2
    [0x09, 0x06, 0x00, 0x00, 0x00, 0x00], // len_diff 0
    [0x01, 0x00, 0x00, 0x00, 0x00, 0x00], // len_diff 1
    [0x05, 0x00, 0x00, 0x00, 0x00, 0x00], // len_diff 2
    // max misses 3
    [0x09, 0x06, 0x00, 0x00, 0x00, 0x00], // len_diff 0
    [0x25, 0x19, 0x16, 0x00, 0x00, 0x00], // len_diff 1
    [0x05, 0x00, 0x00, 0x00, 0x00, 0x00], // len_diff 2
    [0x15, 0x00, 0x00, 0x00, 0x00, 0x00], // len_diff 3
    // max misses 4
    [0x96, 0x66, 0x5A, 0x99, 0x69, 0xA5], // len_diff 0
    [0x25, 0x19, 0x16, 0x00, 0x00, 0x00], // len_diff 1
    [0x65, 0x56, 0x95, 0x59, 0x00, 0x00], // len_diff 2
    [0x15, 0x00, 0x00, 0x00, 0x00, 0x00], // len_diff 3
    [0x55, 0x00, 0x00, 0x00, 0x00, 0x00], // len_diff 4
];

/// LCS length by enumerating every skip sequence allowed by the cutoff.
///
/// Requires non-empty sequences and `1 <= len1 + len2 - 2 * score_cutoff <= 4`.
fn lcs_seq_mbleven2018<T: HashableChar>(s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
    debug_assert!(!s1.is_empty() && !s2.is_empty());

    if s1.len() < s2.len() {
        return lcs_seq_mbleven2018(s2, s1, score_cutoff);
    }

    let len_diff = s1.len() - s2.len();
    let max_misses = s1.len() + s2.len() - 2 * score_cutoff;
    let ops_index = (max_misses + max_misses * max_misses) / 2 + len_diff - 1;
    let mut max_len = 0;

    for &possible_ops in LCS_SEQ_MBLEVEN2018_MATRIX[ops_index].iter() {
        if possible_ops == 0 {
            break;
        }

        let mut ops = possible_ops;
        let mut i1 = 0;
        let mut i2 = 0;
        let mut cur_len = 0;

        while i1 < s1.len() && i2 < s2.len() {
            if s1[i1] != s2[i2] {
                if ops == 0 {
                    break;
                }
                if ops & 1 != 0 {
                    i1 += 1;
                } else if ops & 2 != 0 {
                    i2 += 1;
                }
                ops >>= 2;
            } else {
                cur_len += 1;
                i1 += 1;
                i2 += 1;
            }
        }

        max_len = max_len.max(cur_len);
    }

    if max_len >= score_cutoff {
        max_len
    } else {
        0
    }
}

/// LCS length plus the recorded `S` words when alignment recovery needs them.
#[derive(Debug, Default)]
pub(crate) struct LcsSeqResult {
    pub sim: usize,
    pub s: BitMatrix<u64>,
}

/// Blockwise Hyyrö LCS between the encoded pattern (length `len1`) and `s2`.
///
/// Without recording, only the blocks inside the band allowed by `score_cutoff` are
/// advanced. With recording, every block of every row is kept.
pub(crate) fn lcs_blockwise<const RECORD_MATRIX: bool, PmVec, T>(
    pm: &PmVec,
    len1: usize,
    s2: &[T],
    score_cutoff: usize,
) -> LcsSeqResult
where
    PmVec: BitVectorInterface,
    T: HashableChar,
{
    debug_assert!(score_cutoff <= len1);
    debug_assert!(score_cutoff <= s2.len());

    let word_size = 64;
    let words = pm.size();
    let len2 = s2.len();
    let mut s = vec![!0_u64; words];

    let mut res = LcsSeqResult::default();
    if RECORD_MATRIX {
        res.s = BitMatrix::new(len2, words, !0_u64);
    }

    let band_width_left = len1 - score_cutoff;
    let band_width_right = len2 - score_cutoff;

    let mut first_block = 0;
    let mut last_block = if RECORD_MATRIX {
        words
    } else {
        words.min(ceil_div(band_width_left + 1, word_size))
    };

    for (row, &ch2) in s2.iter().enumerate() {
        let mut carry = false;

        for (word, s_word) in s.iter_mut().enumerate().take(last_block).skip(first_block) {
            let matches = pm.get(word, ch2);
            let u = *s_word & matches;
            let (x, next_carry) = carrying_add(*s_word, u, carry);
            carry = next_carry;
            *s_word = x | (*s_word - u);

            if RECORD_MATRIX {
                *res.s.get_mut(row, word) = *s_word;
            }
        }

        if !RECORD_MATRIX {
            if row > band_width_right {
                first_block = (row - band_width_right) / word_size;
            }
            if row + 1 + band_width_left <= len1 {
                last_block = ceil_div(row + 1 + band_width_left, word_size);
            }
        }
    }

    res.sim = s.iter().map(|&x| popcount(!x)).sum();
    if res.sim < score_cutoff {
        res.sim = 0;
    }
    res
}

/// LCS similarity against an already encoded `s1`.
pub(crate) fn lcs_seq_similarity_with_pm<PmVec, T>(
    pm: &PmVec,
    s1: &[T],
    s2: &[T],
    score_cutoff: usize,
) -> usize
where
    PmVec: BitVectorInterface,
    T: HashableChar,
{
    let len1 = s1.len();
    let len2 = s2.len();
    if score_cutoff > len1 || score_cutoff > len2 {
        return 0;
    }

    let max_misses = len1 + len2 - 2 * score_cutoff;
    // no edits are allowed
    if max_misses == 0 || (max_misses == 1 && len1 == len2) {
        return if s1 == s2 { len1 } else { 0 };
    }

    if max_misses < len1.abs_diff(len2) {
        return 0;
    }

    // the encoded pattern cannot be trimmed, so use it directly
    if max_misses >= 5 {
        return lcs_blockwise::<false, _, _>(pm, len1, s2, score_cutoff).sim;
    }

    let affix = remove_common_affix(s1, s2);
    let mut lcs_sim = affix.removed();
    if !affix.s1.is_empty() && !affix.s2.is_empty() {
        lcs_sim += lcs_seq_mbleven2018(affix.s1, affix.s2, score_cutoff.saturating_sub(lcs_sim));
    }

    if lcs_sim >= score_cutoff {
        lcs_sim
    } else {
        0
    }
}

/// Encodes `s1` and runs the blockwise LCS.
fn longest_common_subsequence<T: HashableChar>(s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
    if s1.is_empty() {
        0
    } else if s1.len() <= 64 {
        let pm = PatternMatchVector::new(s1);
        lcs_blockwise::<false, _, _>(&pm, s1.len(), s2, score_cutoff).sim
    } else {
        let pm = BlockPatternMatchVector::new(s1);
        trace!(
            "lcs: banded blockwise pass over {} blocks, cutoff {}",
            pm.size(),
            score_cutoff
        );
        lcs_blockwise::<false, _, _>(&pm, s1.len(), s2, score_cutoff).sim
    }
}

pub(crate) fn lcs_seq_similarity<T: HashableChar>(s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
    // the longer sequence goes first
    if s1.len() < s2.len() {
        return lcs_seq_similarity(s2, s1, score_cutoff);
    }

    let len1 = s1.len();
    let len2 = s2.len();
    if score_cutoff > len2 {
        return 0;
    }

    let max_misses = len1 + len2 - 2 * score_cutoff;
    // no edits are allowed
    if max_misses == 0 || (max_misses == 1 && len1 == len2) {
        return if s1 == s2 { len1 } else { 0 };
    }

    if max_misses < len1 - len2 {
        return 0;
    }

    // the common affix is always part of the LCS
    let affix = remove_common_affix(s1, s2);
    let mut lcs_sim = affix.removed();
    if !affix.s1.is_empty() && !affix.s2.is_empty() {
        let adjusted_cutoff = score_cutoff.saturating_sub(lcs_sim);
        lcs_sim += if max_misses < 5 {
            lcs_seq_mbleven2018(affix.s1, affix.s2, adjusted_cutoff)
        } else {
            longest_common_subsequence(affix.s1, affix.s2, adjusted_cutoff)
        };
    }

    if lcs_sim >= score_cutoff {
        lcs_sim
    } else {
        0
    }
}

/// Walks the recorded `S` words back from the bottom right corner.
///
/// `S` bit `col` of a row is set while pattern element `col` is not part of the
/// subsequence; a set bit means `s1[col]` is deleted.
fn recover_lcs_editops<T: HashableChar>(
    src_len: usize,
    dest_len: usize,
    affix: &Affix<'_, T>,
    res: &LcsSeqResult,
) -> Editops {
    let len1 = affix.s1.len();
    let len2 = affix.s2.len();
    let prefix = affix.prefix_len;

    let mut dist = len1 + len2 - 2 * res.sim;
    let mut ops = vec![EditOp::new(EditType::Delete, 0, 0); dist];

    let mut col = len1;
    let mut row = len2;
    while row != 0 && col != 0 {
        if res.s.test_bit(row - 1, col - 1) {
            dist -= 1;
            col -= 1;
            ops[dist] = EditOp::new(EditType::Delete, col + prefix, row + prefix);
        } else {
            row -= 1;
            if row != 0 && !res.s.test_bit(row - 1, col - 1) {
                dist -= 1;
                ops[dist] = EditOp::new(EditType::Insert, col + prefix, row + prefix);
            } else {
                col -= 1;
                debug_assert!(affix.s1[col] == affix.s2[row]);
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

/// Insertions and deletions that turn `s1` into `s2` while keeping a longest
/// common subsequence in place.
pub(crate) fn lcs_seq_editops<T: HashableChar>(s1: &[T], s2: &[T]) -> Editops {
    let affix = remove_common_affix(s1, s2);

    let res = if affix.s1.is_empty() || affix.s2.is_empty() {
        LcsSeqResult::default()
    } else if affix.s1.len() <= 64 {
        let pm = PatternMatchVector::new(affix.s1);
        lcs_blockwise::<true, _, _>(&pm, affix.s1.len(), affix.s2, 0)
    } else {
        let pm = BlockPatternMatchVector::new(affix.s1);
        lcs_blockwise::<true, _, _>(&pm, affix.s1.len(), affix.s2, 0)
    };

    let ops = recover_lcs_editops(s1.len(), s2.len(), &affix, &res);
    debug!(
        "lcs editops: {} operations for lengths {} and {}",
        ops.len(),
        s1.len(),
        s2.len()
    );
    ops
}

pub(crate) struct LcsSeq;

impl<T: HashableChar> SimilarityMetricUsize<T> for LcsSeq {
    fn maximum(&self, len1: usize, len2: usize) -> usize {
        len1.max(len2)
    }

    fn _similarity(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        lcs_seq_similarity(s1, s2, score_cutoff)
    }
}

/// Number of elements of the longer sequence that are not part of the longest
/// common subsequence: `max(len1, len2) - lcs`.
///
/// Returns `score_cutoff + 1` when the distance exceeds `score_cutoff`.
///
/// # Examples
///
/// ```
/// use bitdist::distance::lcs_seq;
///
/// assert_eq!(lcs_seq::distance(b"South Korea", b"North Korea", None), 2);
/// assert_eq!(lcs_seq::distance(b"South Korea", b"North Korea", 1), 2);
/// ```
pub fn distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<usize>>,
) -> usize {
    LcsSeq._distance(s1, s2, score_cutoff.into().unwrap_or(usize::MAX))
}

/// Length of the longest common subsequence.
///
/// Returns 0 when the similarity is below `score_cutoff`.
pub fn similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<usize>>,
) -> usize {
    LcsSeq._similarity(s1, s2, score_cutoff.into().unwrap_or(0))
}

/// Distance divided by `max(len1, len2)`; 1.0 when above `score_cutoff`.
pub fn normalized_distance<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    LcsSeq._normalized_distance(s1, s2, score_cutoff.into().unwrap_or(1.0))
}

/// `1 - normalized_distance`; 0.0 when below `score_cutoff`.
pub fn normalized_similarity<T: HashableChar>(
    s1: &[T],
    s2: &[T],
    score_cutoff: impl Into<Option<f64>>,
) -> f64 {
    LcsSeq._normalized_similarity(s1, s2, score_cutoff.into().unwrap_or(0.0))
}

/// Insertions and deletions that turn `s1` into `s2`.
pub fn editops<T: HashableChar>(s1: &[T], s2: &[T]) -> Editops {
    lcs_seq_editops(s1, s2)
}

/// LCS scorer with the first sequence encoded once.
#[derive(Debug, Clone)]
pub struct CachedLcsSeq<T> {
    s1: Vec<T>,
    pm: BlockPatternMatchVector,
}

impl<T: HashableChar> SimilarityMetricUsize<T> for CachedLcsSeq<T> {
    fn maximum(&self, len1: usize, len2: usize) -> usize {
        len1.max(len2)
    }

    fn _similarity(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        lcs_seq_similarity_with_pm(&self.pm, s1, s2, score_cutoff)
    }
}

impl<T: HashableChar> CachedLcsSeq<T> {
    pub fn new(s1: &[T]) -> Self {
        let pm = BlockPatternMatchVector::new(s1);
        debug!("cached lcs: encoded {} elements in {} blocks", s1.len(), pm.size());
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Checks both argument orders and the cached scorer, for bytes and chars.
    fn lcs_seq_distance_ascii(s1: &str, s2: &str, score_cutoff: Option<usize>) -> usize {
        let (b1, b2) = (s1.as_bytes(), s2.as_bytes());
        let c1: Vec<char> = s1.chars().collect();
        let c2: Vec<char> = s2.chars().collect();

        let res = distance(b1, b2, score_cutoff);
        assert_eq!(res, distance(b2, b1, score_cutoff));
        assert_eq!(res, distance(&c1, &c2, score_cutoff));
        assert_eq!(res, CachedLcsSeq::new(b1).distance(b2, score_cutoff));
        assert_eq!(res, CachedLcsSeq::new(&c2).distance(&c1, score_cutoff));
        res
    }

    fn lcs_seq_similarity_ascii(s1: &str, s2: &str, score_cutoff: Option<usize>) -> usize {
        let (b1, b2) = (s1.as_bytes(), s2.as_bytes());
        let res = similarity(b1, b2, score_cutoff);
        assert_eq!(res, similarity(b2, b1, score_cutoff));
        assert_eq!(res, CachedLcsSeq::new(b1).similarity(b2, score_cutoff));
        assert_eq!(res, CachedLcsSeq::new(b2).similarity(b1, score_cutoff));
        res
    }

    /// Plain dynamic program for comparison.
    fn lcs_dp(s1: &[u8], s2: &[u8]) -> usize {
        let mut prev = vec![0; s2.len() + 1];
        for &c1 in s1 {
            let mut curr = vec![0; s2.len() + 1];
            for (j, &c2) in s2.iter().enumerate() {
                curr[j + 1] = if c1 == c2 {
                    prev[j] + 1
                } else {
                    curr[j].max(prev[j + 1])
                };
            }
            prev = curr;
        }
        prev[s2.len()]
    }

    #[test]
    fn test_similar() {
        assert_eq!(lcs_seq_distance_ascii("aaaa", "aaaa", None), 0);
        assert_eq!(lcs_seq_similarity_ascii("aaaa", "aaaa", None), 4);
        assert_abs_diff_eq!(normalized_distance(b"aaaa", b"aaaa", None), 0.0);
        assert_abs_diff_eq!(normalized_similarity(b"aaaa", b"aaaa", None), 1.0);
    }

    #[test]
    fn test_completely_different() {
        assert_eq!(lcs_seq_distance_ascii("aaaa", "bbbb", None), 4);
        assert_eq!(lcs_seq_similarity_ascii("aaaa", "bbbb", None), 0);
        assert_abs_diff_eq!(normalized_distance(b"aaaa", b"bbbb", None), 1.0);
        assert_abs_diff_eq!(normalized_similarity(b"aaaa", b"bbbb", None), 0.0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(lcs_seq_distance_ascii("", "", None), 0);
        assert_eq!(lcs_seq_distance_ascii("abc", "", None), 3);
        assert_eq!(lcs_seq_similarity_ascii("", "abc", None), 0);
        assert_abs_diff_eq!(normalized_similarity::<u8>(b"", b"", None), 1.0);
    }

    #[test]
    fn test_mbleven() {
        let (a, b) = ("South Korea", "North Korea");
        assert_eq!(lcs_seq_similarity_ascii(a, b, None), 9);
        assert_eq!(lcs_seq_similarity_ascii(a, b, Some(9)), 9);
        assert_eq!(lcs_seq_similarity_ascii(a, b, Some(10)), 0);

        assert_eq!(lcs_seq_distance_ascii(a, b, None), 2);
        assert_eq!(lcs_seq_distance_ascii(a, b, Some(4)), 2);
        assert_eq!(lcs_seq_distance_ascii(a, b, Some(3)), 2);
        assert_eq!(lcs_seq_distance_ascii(a, b, Some(2)), 2);
        assert_eq!(lcs_seq_distance_ascii(a, b, Some(1)), 2);
        assert_eq!(lcs_seq_distance_ascii(a, b, Some(0)), 1);

        let (a, b) = ("aabc", "cccd");
        assert_eq!(lcs_seq_similarity_ascii(a, b, None), 1);
        assert_eq!(lcs_seq_similarity_ascii(a, b, Some(1)), 1);
        assert_eq!(lcs_seq_similarity_ascii(a, b, Some(2)), 0);

        assert_eq!(lcs_seq_distance_ascii(a, b, None), 3);
        assert_eq!(lcs_seq_distance_ascii(a, b, Some(4)), 3);
        assert_eq!(lcs_seq_distance_ascii(a, b, Some(3)), 3);
        assert_eq!(lcs_seq_distance_ascii(a, b, Some(2)), 3);
        assert_eq!(lcs_seq_distance_ascii(a, b, Some(1)), 2);
        assert_eq!(lcs_seq_distance_ascii(a, b, Some(0)), 1);
    }

    #[test]
    fn test_cached_short() {
        assert_eq!(lcs_seq_similarity_ascii("001", "220", None), 1);
    }

    #[test]
    fn test_blockwise() {
        let s1 = "abcd".repeat(40);
        let s2 = "abxd".repeat(40);
        assert_eq!(lcs_seq_similarity_ascii(&s1, &s2, None), 120);
        assert_eq!(lcs_seq_distance_ascii(&s1, &s2, None), 40);
        assert_eq!(lcs_seq_distance_ascii(&s1, &s2, Some(39)), 40);
        assert_eq!(lcs_seq_similarity_ascii(&s1, &s2, Some(121)), 0);
    }

    #[test]
    fn test_against_dynamic_program() {
        let cases = [
            ("kitten", "sitting"),
            ("intention", "execution"),
            ("the quick brown fox jumps over the lazy dog", "pack my box with five dozen liquor jugs"),
        ];
        for (a, b) in cases {
            let expected = lcs_dp(a.as_bytes(), b.as_bytes());
            assert_eq!(similarity(a.as_bytes(), b.as_bytes(), None), expected);
        }

        let long1 = "lorem ipsum dolor sit amet ".repeat(5);
        let long2 = "lorem dolor ipsum sat amet ".repeat(5);
        let expected = lcs_dp(long1.as_bytes(), long2.as_bytes());
        assert_eq!(lcs_seq_similarity_ascii(&long1, &long2, None), expected);
    }

    #[test]
    fn test_editops() {
        let ops = editops(b"South Korea", b"North Korea");
        assert_eq!(ops.len(), 4);
        assert!(ops.iter().all(|op| op.edit_type != EditType::Replace));
        assert_eq!(ops.apply(b"South Korea", b"North Korea").unwrap(), b"North Korea");
    }

    #[test]
    fn test_editops_long() {
        let s1 = "abcdefghij".repeat(13);
        let s2 = "abcxefghyj".repeat(13);
        let ops = editops(s1.as_bytes(), s2.as_bytes());
        assert_eq!(ops.len(), 2 * 26);
        assert_eq!(ops.apply(s1.as_bytes(), s2.as_bytes()).unwrap(), s2.as_bytes());
    }

    #[test]
    fn test_editops_empty() {
        let ops = editops(b"", b"abc");
        assert_eq!(ops.len(), 3);
        assert!(ops.iter().all(|op| op.edit_type == EditType::Insert));
        assert_eq!(ops.apply(b"", b"abc").unwrap(), b"abc");

        let ops = editops(b"abc", b"abc");
        assert!(ops.is_empty());
    }
}
