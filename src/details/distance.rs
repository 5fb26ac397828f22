//! Score conversion layer shared by the metrics.
//!
//! Every metric is either distance-native or similarity-native. It implements the native
//! computation plus `maximum`, and the trait derives the remaining three scores. Cutoffs
//! are converted into the native unit before the computation starts, and results beyond
//! the cutoff are reported with the sentinels `cutoff + 1`, `0`, `1.0` and `0.0`.

use crate::details::common::HashableChar;

/// Converts a normalized similarity cutoff into a normalized distance cutoff.
///
/// The small epsilon keeps results that land exactly on the cutoff from being lost to
/// rounding when the distance is scaled back.
#[inline]
pub(crate) fn norm_sim_to_norm_dist(score_cutoff: f64) -> f64 {
    let imprecision = 0.00001;
    (1.0 - score_cutoff + imprecision).min(1.0)
}

/// Converts a normalized distance cutoff into an integer cutoff for `maximum`.
#[inline]
pub(crate) fn norm_cutoff_to_distance(maximum: usize, score_cutoff: f64) -> usize {
    (maximum as f64 * score_cutoff).ceil() as usize
}

#[inline]
fn normalize(dist: usize, maximum: usize) -> f64 {
    if maximum == 0 {
        0.0
    } else {
        dist as f64 / maximum as f64
    }
}

/// A metric whose native score is a distance.
pub(crate) trait DistanceMetricUsize<T: HashableChar> {
    fn maximum(&self, len1: usize, len2: usize) -> usize;

    /// Exact distance when it is `<= score_cutoff`, otherwise `score_cutoff + 1`.
    fn _distance(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize;

    fn _similarity(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        let maximum = self.maximum(s1.len(), s2.len());
        if score_cutoff > maximum {
            return 0;
        }

        let cutoff_distance = maximum - score_cutoff;
        let dist = self._distance(s1, s2, cutoff_distance);
        let sim = maximum - dist.min(maximum);
        if sim >= score_cutoff {
            sim
        } else {
            0
        }
    }

    fn _normalized_distance(&self, s1: &[T], s2: &[T], score_cutoff: f64) -> f64 {
        let maximum = self.maximum(s1.len(), s2.len());
        let cutoff_distance = norm_cutoff_to_distance(maximum, score_cutoff);
        let dist = self._distance(s1, s2, cutoff_distance);
        let norm_dist = normalize(dist, maximum);
        if norm_dist <= score_cutoff {
            norm_dist
        } else {
            1.0
        }
    }

    fn _normalized_similarity(&self, s1: &[T], s2: &[T], score_cutoff: f64) -> f64 {
        let cutoff_score = norm_sim_to_norm_dist(score_cutoff);
        let norm_dist = self._normalized_distance(s1, s2, cutoff_score);
        let norm_sim = 1.0 - norm_dist;
        if norm_sim >= score_cutoff {
            norm_sim
        } else {
            0.0
        }
    }
}

/// A metric whose native score is a similarity.
pub(crate) trait SimilarityMetricUsize<T: HashableChar> {
    fn maximum(&self, len1: usize, len2: usize) -> usize;

    /// Exact similarity when it is `>= score_cutoff`, otherwise `0`.
    fn _similarity(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize;

    fn _distance(&self, s1: &[T], s2: &[T], score_cutoff: usize) -> usize {
        let maximum = self.maximum(s1.len(), s2.len());
        let cutoff_similarity = maximum.saturating_sub(score_cutoff);
        let sim = self._similarity(s1, s2, cutoff_similarity);
        let dist = maximum - sim;
        if dist <= score_cutoff {
            dist
        } else {
            score_cutoff + 1
        }
    }

    fn _normalized_distance(&self, s1: &[T], s2: &[T], score_cutoff: f64) -> f64 {
        let maximum = self.maximum(s1.len(), s2.len());
        let cutoff_distance = norm_cutoff_to_distance(maximum, score_cutoff);
        let dist = self._distance(s1, s2, cutoff_distance);
        let norm_dist = normalize(dist, maximum);
        if norm_dist <= score_cutoff {
            norm_dist
        } else {
            1.0
        }
    }

    fn _normalized_similarity(&self, s1: &[T], s2: &[T], score_cutoff: f64) -> f64 {
        let cutoff_score = norm_sim_to_norm_dist(score_cutoff);
        let norm_dist = self._normalized_distance(s1, s2, cutoff_score);
        let norm_sim = 1.0 - norm_dist;
        if norm_sim >= score_cutoff {
            norm_sim
        } else {
            0.0
        }
    }
}
