//! Cross-metric checks on random inputs against straightforward dynamic programs.

use crate::distance::{
    damerau_levenshtein, hamming, indel, jaro, jaro_winkler, lcs_seq, levenshtein, osa, postfix,
    prefix, CachedDamerauLevenshtein, CachedIndel, CachedJaro, CachedJaroWinkler, CachedLcsSeq,
    CachedLevenshtein, CachedOsa, LevenshteinWeightTable,
};
use crate::HashableChar;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

const ROUNDS: usize = 200;

fn random_sequence<T: Copy>(rng: &mut StdRng, alphabet: &[T], max_len: usize) -> Vec<T> {
    let len = rng.gen_range(0..=max_len);
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect()
}

/// Copy of `s` with up to `edits` random insertions, deletions and substitutions.
fn mutate<T: Copy>(rng: &mut StdRng, s: &[T], alphabet: &[T], edits: usize) -> Vec<T> {
    let mut res = s.to_vec();
    for _ in 0..rng.gen_range(0..=edits) {
        let ch = alphabet[rng.gen_range(0..alphabet.len())];
        match rng.gen_range(0..3) {
            0 => {
                let pos = rng.gen_range(0..=res.len());
                res.insert(pos, ch);
            }
            1 if !res.is_empty() => {
                let pos = rng.gen_range(0..res.len());
                res.remove(pos);
            }
            _ if !res.is_empty() => {
                let pos = rng.gen_range(0..res.len());
                res[pos] = ch;
            }
            _ => res.push(ch),
        }
    }
    res
}

/// Random pairs: unrelated sequences and sequences a few edits apart.
fn random_pairs<T: Copy>(seed: u64, alphabet: &[T], max_len: usize) -> Vec<(Vec<T>, Vec<T>)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..ROUNDS)
        .map(|round| {
            let s1 = random_sequence(&mut rng, alphabet, max_len);
            let s2 = if round % 2 == 0 {
                random_sequence(&mut rng, alphabet, max_len)
            } else {
                mutate(&mut rng, &s1, alphabet, 8)
            };
            (s1, s2)
        })
        .collect()
}

fn naive_levenshtein<T: PartialEq>(s1: &[T], s2: &[T], weights: &LevenshteinWeightTable) -> usize {
    let mut prev: Vec<usize> = (0..=s2.len()).map(|j| j * weights.insert_cost).collect();
    for (i, ch1) in s1.iter().enumerate() {
        let mut cur = vec![(i + 1) * weights.delete_cost; s2.len() + 1];
        for (j, ch2) in s2.iter().enumerate() {
            let replace = if ch1 == ch2 { 0 } else { weights.replace_cost };
            cur[j + 1] = (prev[j] + replace)
                .min(prev[j + 1] + weights.delete_cost)
                .min(cur[j] + weights.insert_cost);
        }
        prev = cur;
    }
    prev[s2.len()]
}

fn naive_lcs<T: PartialEq>(s1: &[T], s2: &[T]) -> usize {
    let mut prev = vec![0; s2.len() + 1];
    for ch1 in s1 {
        let mut cur = vec![0; s2.len() + 1];
        for (j, ch2) in s2.iter().enumerate() {
            cur[j + 1] = if ch1 == ch2 {
                prev[j] + 1
            } else {
                prev[j + 1].max(cur[j])
            };
        }
        prev = cur;
    }
    prev[s2.len()]
}

fn naive_osa<T: PartialEq>(s1: &[T], s2: &[T]) -> usize {
    let (len1, len2) = (s1.len(), s2.len());
    let mut d = vec![vec![0; len2 + 1]; len1 + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in d[0].iter_mut().enumerate() {
        *cell = j;
    }

    for (i, c1) in s1.iter().enumerate() {
        for (j, c2) in s2.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            let mut best = (d[i][j + 1] + 1).min(d[i + 1][j] + 1).min(d[i][j] + cost);
            if i > 0 && j > 0 && c1 == &s2[j - 1] && &s1[i - 1] == c2 {
                best = best.min(d[i - 1][j - 1] + 1);
            }
            d[i + 1][j + 1] = best;
        }
    }
    d[len1][len2]
}

fn naive_damerau_levenshtein<T: Eq + Hash + Copy>(s1: &[T], s2: &[T]) -> usize {
    let (len1, len2) = (s1.len(), s2.len());
    let max_dist = len1 + len2;
    let mut d = vec![vec![0; len2 + 2]; len1 + 2];
    d[0].fill(max_dist);
    for (i, row) in d.iter_mut().enumerate().skip(1) {
        row[0] = max_dist;
        row[1] = i - 1;
    }
    for (j, cell) in d[1].iter_mut().enumerate().skip(1) {
        *cell = j - 1;
    }

    // element i of s1 fills table row i + 2, likewise for s2 and columns
    let mut last_row: HashMap<T, usize> = HashMap::new();
    for (i, &c1) in s1.iter().enumerate() {
        let mut last_col = 0;
        for (j, &c2) in s2.iter().enumerate() {
            let k = last_row.get(&c2).copied().unwrap_or(0);
            let l = last_col;
            let cost = if c1 == c2 {
                last_col = j + 1;
                0
            } else {
                1
            };
            d[i + 2][j + 2] = (d[i + 1][j + 1] + cost)
                .min(d[i + 2][j + 1] + 1)
                .min(d[i + 1][j + 2] + 1)
                .min(d[k][l] + (i - k) + 1 + (j - l));
        }
        last_row.insert(c1, i + 1);
    }
    d[len1 + 1][len2 + 1]
}

/// Jaro with boolean flags; elements of `s2` are matched against a window of `s1`.
fn naive_jaro<T: PartialEq>(s1: &[T], s2: &[T]) -> f64 {
    if s1.is_empty() && s2.is_empty() {
        return 1.0;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }

    let bound = (s1.len().max(s2.len()) / 2).saturating_sub(1);
    let mut flags1 = vec![false; s1.len()];
    let mut flags2 = vec![false; s2.len()];
    for (j, ch) in s2.iter().enumerate() {
        let lower = j.saturating_sub(bound);
        let upper = (j + bound + 1).min(s1.len());
        if lower >= upper {
            continue;
        }
        let mut window = flags1[lower..upper].iter_mut().zip(&s1[lower..upper]);
        if let Some((flag, _)) = window.find(|(flag, c)| !**flag && *c == ch) {
            *flag = true;
            flags2[j] = true;
        }
    }

    let m = flags1.iter().filter(|&&f| f).count();
    if m == 0 {
        return 0.0;
    }
    let matched1 = s1.iter().zip(&flags1).filter(|(_, &f)| f).map(|(c, _)| c);
    let matched2 = s2.iter().zip(&flags2).filter(|(_, &f)| f).map(|(c, _)| c);
    let t = matched1.zip(matched2).filter(|(a, b)| a != b).count() / 2;

    let m = m as f64;
    (m / s1.len() as f64 + m / s2.len() as f64 + (m - t as f64) / m) / 3.0
}

/// Cutoffs below, at and above `expected`, skipping values that tie with it.
fn float_cutoffs(expected: f64) -> Vec<f64> {
    [0.0, 0.5, 0.7, 0.8, 0.9, expected - 1e-6, expected + 1e-6]
        .into_iter()
        .filter(|c| (c - expected).abs() > 1e-9)
        .collect()
}

fn check_jaro<T: HashableChar>(s1: &[T], s2: &[T]) {
    let expected = naive_jaro(s1, s2);
    let cached = CachedJaro::new(s1);
    assert!((jaro::similarity(s1, s2, None) - expected).abs() < 1e-12);
    assert!((cached.similarity(s2, None) - expected).abs() < 1e-12);

    for cutoff in float_cutoffs(expected) {
        let sim = if expected >= cutoff { expected } else { 0.0 };
        assert!((jaro::similarity(s1, s2, cutoff) - sim).abs() < 1e-12);
        assert!((cached.similarity(s2, cutoff) - sim).abs() < 1e-12);

        let dist_cutoff = 1.0 - cutoff;
        let dist = if 1.0 - expected <= dist_cutoff { 1.0 - expected } else { 1.0 };
        assert!((jaro::distance(s1, s2, dist_cutoff) - dist).abs() < 1e-12);
        assert!((cached.distance(s2, dist_cutoff) - dist).abs() < 1e-12);
    }
}

fn check_jaro_winkler<T: HashableChar>(s1: &[T], s2: &[T]) {
    let jaro = naive_jaro(s1, s2);
    // the prefix bonus is only granted above 0.7
    if (jaro - 0.7).abs() < 1e-9 {
        return;
    }
    let prefix = s1.iter().zip(s2).take(4).take_while(|(a, b)| a == b).count();
    let expected = if jaro > 0.7 {
        jaro + prefix as f64 * 0.1 * (1.0 - jaro)
    } else {
        jaro
    };

    let cached = CachedJaroWinkler::new(s1, None).unwrap();
    assert!((jaro_winkler::similarity(s1, s2, None, None).unwrap() - expected).abs() < 1e-12);
    assert!((cached.similarity(s2, None) - expected).abs() < 1e-12);

    for cutoff in float_cutoffs(expected) {
        let sim = if expected >= cutoff { expected } else { 0.0 };
        assert!((jaro_winkler::similarity(s1, s2, None, cutoff).unwrap() - sim).abs() < 1e-12);
        assert!((cached.similarity(s2, cutoff) - sim).abs() < 1e-12);
    }
}

/// `expected` when within `cutoff`, the `cutoff + 1` sentinel otherwise.
fn with_cutoff(expected: usize, cutoff: usize) -> usize {
    if expected <= cutoff {
        expected
    } else {
        cutoff + 1
    }
}

fn check_uniform_levenshtein<T: HashableChar + Debug>(s1: &[T], s2: &[T]) {
    let weights = LevenshteinWeightTable::default();
    let expected = naive_levenshtein(s1, s2, &weights);

    assert_eq!(levenshtein::distance(s1, s2, None, None), expected);
    assert_eq!(levenshtein::distance(s2, s1, None, None), expected);
    assert_eq!(CachedLevenshtein::new(s1, None).distance(s2, None), expected);
    assert_eq!(CachedLevenshtein::new(s2, None).distance(s1, None), expected);
    assert!(s1.len().abs_diff(s2.len()) <= expected);

    for cutoff in [0, 1, 2, 3, 4, 7, 31, 64] {
        let res = with_cutoff(expected, cutoff);
        assert_eq!(levenshtein::distance(s1, s2, None, cutoff), res);
        assert_eq!(CachedLevenshtein::new(s1, None).distance(s2, cutoff), res);
    }

    let ops = levenshtein::editops(s1, s2);
    assert_eq!(ops.len(), expected);
    assert_eq!(ops.apply(s1, s2).ok(), Some(s2.to_vec()));
    assert_eq!(ops.inverse().apply(s2, s1).ok(), Some(s1.to_vec()));
}

#[test]
fn test_levenshtein_random_bytes() {
    for (s1, s2) in random_pairs(1, b"abcd", 150) {
        check_uniform_levenshtein(&s1, &s2);
    }
}

#[test]
fn test_levenshtein_random_wide_chars() {
    let alphabet = ['a', 'é', '€', 'ß', '😀', '中'];
    for (s1, s2) in random_pairs(2, &alphabet, 90) {
        check_uniform_levenshtein(&s1, &s2);
    }
}

#[test]
fn test_weighted_levenshtein_random() {
    let mut rng = StdRng::seed_from_u64(3);
    for (s1, s2) in random_pairs(4, b"abc", 40) {
        let weights = LevenshteinWeightTable::new(
            rng.gen_range(1..5),
            rng.gen_range(1..5),
            rng.gen_range(0..9),
        );
        let expected = naive_levenshtein(&s1, &s2, &weights);

        assert_eq!(levenshtein::distance(&s1, &s2, Some(weights), None), expected);
        let cached = CachedLevenshtein::new(&s1, Some(weights));
        assert_eq!(cached.distance(&s2, None), expected);

        let cutoff = rng.gen_range(0..20);
        assert_eq!(
            levenshtein::distance(&s1, &s2, Some(weights), cutoff),
            with_cutoff(expected, cutoff)
        );
    }
}

#[test]
fn test_indel_and_lcs_random() {
    for (s1, s2) in random_pairs(5, b"abcd", 150) {
        let lcs = naive_lcs(&s1, &s2);
        let expected = s1.len() + s2.len() - 2 * lcs;

        assert_eq!(lcs_seq::similarity(&s1, &s2, None), lcs);
        assert_eq!(lcs_seq::similarity(&s2, &s1, None), lcs);
        assert_eq!(CachedLcsSeq::new(&s1).similarity(&s2, None), lcs);
        assert_eq!(indel::distance(&s1, &s2, None), expected);
        assert_eq!(CachedIndel::new(&s2).distance(&s1, None), expected);
        assert!(expected <= s1.len() + s2.len());

        for cutoff in [0, 1, 2, 4, 5, 9, 40] {
            assert_eq!(indel::distance(&s1, &s2, cutoff), with_cutoff(expected, cutoff));
            assert_eq!(
                CachedIndel::new(&s1).distance(&s2, cutoff),
                with_cutoff(expected, cutoff)
            );
            let sim = if lcs >= cutoff { lcs } else { 0 };
            assert_eq!(lcs_seq::similarity(&s1, &s2, cutoff), sim);
        }

        let ops = indel::editops(&s1, &s2);
        assert_eq!(ops.len(), expected);
        assert_eq!(ops.apply(&s1, &s2).ok(), Some(s2.clone()));
    }
}

#[test]
fn test_osa_random() {
    for (s1, s2) in random_pairs(6, b"abc", 150) {
        let expected = naive_osa(&s1, &s2);
        assert_eq!(osa::distance(&s1, &s2, None), expected);
        assert_eq!(osa::distance(&s2, &s1, None), expected);
        assert_eq!(CachedOsa::new(&s1).distance(&s2, None), expected);
        assert_eq!(CachedOsa::new(&s2).distance(&s1, None), expected);

        for cutoff in [0, 1, 3, 10] {
            assert_eq!(osa::distance(&s1, &s2, cutoff), with_cutoff(expected, cutoff));
        }
    }
}

#[test]
fn test_damerau_levenshtein_random() {
    for (s1, s2) in random_pairs(7, b"abcd", 40) {
        let expected = naive_damerau_levenshtein(&s1, &s2);
        assert_eq!(damerau_levenshtein::distance(&s1, &s2, None), expected);
        assert_eq!(damerau_levenshtein::distance(&s2, &s1, None), expected);
        assert_eq!(CachedDamerauLevenshtein::new(&s1).distance(&s2, None), expected);
        assert!(expected <= naive_osa(&s1, &s2));

        for cutoff in [0, 2, 5] {
            assert_eq!(
                damerau_levenshtein::distance(&s1, &s2, cutoff),
                with_cutoff(expected, cutoff)
            );
        }
    }
}

#[test]
fn test_jaro_random_bytes() {
    for (s1, s2) in random_pairs(11, b"abcdef", 200) {
        check_jaro(&s1, &s2);
        check_jaro_winkler(&s1, &s2);
    }
}

#[test]
fn test_jaro_random_wide_chars() {
    let alphabet = ['a', 'é', '€', 'ß', '😀', '中', 'z', 'q'];
    for (s1, s2) in random_pairs(12, &alphabet, 100) {
        check_jaro(&s1, &s2);
        check_jaro_winkler(&s1, &s2);
    }
}

#[test]
fn test_hamming_random() {
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..ROUNDS {
        let s1 = random_sequence(&mut rng, b"ab", 30);
        let s2: Vec<u8> = s1
            .iter()
            .map(|&ch| if rng.gen_bool(0.3) { b'c' } else { ch })
            .collect();
        let expected = s1.iter().zip(&s2).filter(|(a, b)| a != b).count();

        assert_eq!(hamming::distance(&s1, &s2, false, None), Ok(expected));
        assert_eq!(hamming::distance(&s2, &s1, false, None), Ok(expected));

        let ops = hamming::editops(&s1, &s2, false).unwrap();
        assert_eq!(ops.len(), expected);
        assert_eq!(ops.apply(&s1, &s2).ok(), Some(s2.clone()));
    }
}

#[test]
fn test_identity() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..50 {
        let s = random_sequence(&mut rng, b"abcdefgh", 200);
        assert_eq!(levenshtein::distance(&s, &s, None, None), 0);
        assert_eq!(indel::distance(&s, &s, None), 0);
        assert_eq!(osa::distance(&s, &s, None), 0);
        assert_eq!(damerau_levenshtein::distance(&s, &s, None), 0);
        assert_eq!(hamming::distance(&s, &s, false, None), Ok(0));
        assert_eq!(lcs_seq::distance(&s, &s, None), 0);
        assert_eq!(prefix::distance(&s, &s, None), 0);
        assert_eq!(postfix::distance(&s, &s, None), 0);

        assert!((levenshtein::normalized_similarity(&s, &s, None, None) - 1.0).abs() < 1e-12);
        assert!((indel::normalized_similarity(&s, &s, None) - 1.0).abs() < 1e-12);
        assert!((jaro::similarity(&s, &s, None) - 1.0).abs() < 1e-12);
        let sim = jaro_winkler::similarity(&s, &s, None, None).unwrap();
        assert!((sim - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_normalized_scores_in_range() {
    for (s1, s2) in random_pairs(10, b"abcde", 100) {
        let scores = [
            levenshtein::normalized_distance(&s1, &s2, None, None),
            levenshtein::normalized_similarity(&s1, &s2, None, None),
            indel::normalized_similarity(&s1, &s2, None),
            lcs_seq::normalized_similarity(&s1, &s2, None),
            osa::normalized_distance(&s1, &s2, None),
            jaro::similarity(&s1, &s2, None),
            jaro_winkler::similarity(&s1, &s2, None, None).unwrap(),
            prefix::normalized_similarity(&s1, &s2, None),
        ];
        for score in scores {
            assert!((0.0..=1.0).contains(&score), "score {score} out of range");
        }

        let dist = levenshtein::normalized_distance(&s1, &s2, None, None);
        let sim = levenshtein::normalized_similarity(&s1, &s2, None, None);
        assert!((dist + sim - 1.0).abs() < 1e-9);

        let jw = jaro_winkler::similarity(&s1, &s2, None, None).unwrap();
        assert!(jw >= jaro::similarity(&s1, &s2, None));
    }
}
