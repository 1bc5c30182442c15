use super::features::{FeatureSet, TRAJECTORY_MIN_POSITIONS};
use super::vector;

// Number of contiguous runs in a position sequence; a run breaks wherever
// consecutive positions are more than one stroke apart.
pub fn chunk_count(positions: &[usize]) -> usize {
    if positions.is_empty() {
        return 0;
    }
    1 + positions.windows(2).filter(|w| w[1] > w[0] + 1).count()
}

// Sum of per-stroke histogram deviations; each term is within 0..1
fn stroke_histograms_diff(reference: &FeatureSet, candidate: &FeatureSet) -> f64 {
    candidate
        .stroke_histograms
        .iter()
        .zip(reference.stroke_histograms.iter())
        .map(|(hist, ref_hist)| vector::norm(&vector::sub(hist, ref_hist)) / 2.0)
        .sum()
}

fn aggregate_histogram_diff(reference: &FeatureSet, candidate: &FeatureSet) -> f64 {
    let deviation = vector::sub(&candidate.aggregate_histogram, &reference.aggregate_histogram);
    vector::norm(&vector::scale(&deviation, 0.5))
}

// Product of per-step angle deviations, each raised to the reference's stroke gap at that step.
// With fewer than three positions the trajectory is underdetermined and carries no penalty.
fn trajectory_diff(reference: &FeatureSet, candidate: &FeatureSet, positions: &[usize]) -> f64 {
    if positions.len() < TRAJECTORY_MIN_POSITIONS {
        return 1.0;
    }
    candidate
        .trajectory_angles
        .iter()
        .zip(reference.trajectory_angles.iter())
        .zip(reference.step_gaps.iter())
        .map(|((angle, ref_angle), &gap)| {
            let deviation = ((angle - ref_angle) / 2.0).tan().abs() + 1.0;
            deviation.powi(gap as i32)
        })
        .product()
}

// Difference between reference features and the features of one candidate embedding.
// Lower is more similar; identical features score zero. The factors multiply, so a single
// near-zero factor dominates, and scattered embeddings are punished by `chunks ^ chunks`.
pub fn score(reference: &FeatureSet, candidate: &FeatureSet, positions: &[usize]) -> f64 {
    let hists_diff = stroke_histograms_diff(reference, candidate);
    let overall_hist_diff = aggregate_histogram_diff(reference, candidate);
    let traj_diff = trajectory_diff(reference, candidate, positions);
    let chunks = chunk_count(positions) as i32;
    overall_hist_diff * hists_diff * traj_diff * f64::from(chunks).powi(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn features(
        hists: Vec<[f64; 4]>,
        aggregate: [f64; 4],
        angles: Vec<f64>,
        gaps: Vec<usize>,
    ) -> FeatureSet {
        FeatureSet {
            stroke_histograms: hists,
            aggregate_histogram: aggregate,
            trajectory_angles: angles,
            step_gaps: gaps,
        }
    }

    fn reference() -> FeatureSet {
        features(
            vec![[1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 0.0]],
            [1.0, 0.0, 0.0, 0.0],
            vec![0.0, PI / 2.0],
            vec![1, 2],
        )
    }

    fn candidate() -> FeatureSet {
        features(
            vec![[0.5, 0.5, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], [0.0, 0.0, 0.5, 0.5]],
            [0.0, 1.0, 0.0, 0.0],
            vec![PI / 2.0, PI / 2.0],
            vec![1, 1],
        )
    }

    #[test]
    fn test_chunk_count() {
        assert_eq!(chunk_count(&[]), 0);
        assert_eq!(chunk_count(&[4]), 1);
        assert_eq!(chunk_count(&[1, 2, 3]), 1);
        assert_eq!(chunk_count(&[1, 3, 4, 7]), 3);
    }

    #[test]
    fn test_identical_features_score_zero() {
        assert_eq!(score(&reference(), &reference(), &[0, 1, 2]), 0.0);
    }

    #[test]
    fn test_score_components() {
        let r = reference();
        let c = candidate();
        let hists = 2.0 * (0.5f64).sqrt() / 2.0;
        let overall = (0.5f64).sqrt();
        // First step deviates by PI/2 with gap 1; second step matches
        let traj = (PI / 4.0).tan() + 1.0;
        let expected = overall * hists * traj;
        assert!((score(&r, &c, &[0, 1, 2]) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_trajectory_exponent_uses_reference_gap() {
        let mut r = reference();
        r.trajectory_angles = vec![PI / 2.0, 0.0];
        let c = candidate();
        // Second step deviates by PI/2 and the reference spanned two strokes there
        assert!((trajectory_diff(&r, &c, &[0, 1, 2]) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_embeddings_skip_trajectory() {
        let r = reference();
        let c = candidate();
        assert_eq!(trajectory_diff(&r, &c, &[0, 1]), 1.0);
    }

    #[test]
    fn test_scattered_embedding_scores_worse() {
        let r = reference();
        let c = candidate();
        let compact = score(&r, &c, &[0, 1, 2]);
        let split = score(&r, &c, &[0, 1, 3]);
        let scattered = score(&r, &c, &[0, 2, 4]);
        assert!(compact < split);
        assert!(split < scattered);
        assert!((split / compact - 4.0).abs() < 1e-9);
        assert!((scattered / compact - 27.0).abs() < 1e-9);
    }
}
