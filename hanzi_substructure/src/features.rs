use super::entities::*;
use super::error::*;
use super::vector;

// Trajectory only enters the score from this many positions on
pub const TRAJECTORY_MIN_POSITIONS: usize = 3;

// Shape and trajectory features of a set of strokes within one character
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    // Sum-normalized histogram of each selected stroke
    pub stroke_histograms: Vec<Histogram>,
    // Sum of raw histograms over selected strokes, as a unit vector
    pub aggregate_histogram: Histogram,
    // Undirected angle in 0..PI of each centroid-to-centroid step;
    // empty below TRAJECTORY_MIN_POSITIONS
    pub trajectory_angles: Vec<f64>,
    // Number of strokes spanned by each step
    pub step_gaps: Vec<usize>,
}

// Extracts features of the strokes at `positions`.
// Fails with DegenerateVector if a stroke's histogram sums to zero, if the aggregate
// histogram is zero, or if a trajectory is needed and two consecutive strokes share a centroid.
pub fn extract_features(profile: &StrokeProfile, positions: &[usize]) -> Result<FeatureSet> {
    let mut stroke_histograms: Vec<Histogram> = Vec::with_capacity(positions.len());
    let mut overall: Histogram = [0.0; HIST_BINS];
    for &pos in positions {
        let hist = &profile.histograms[pos];
        overall = vector::add(&overall, hist);
        stroke_histograms.push(vector::normalized(hist)?);
    }
    let aggregate_histogram = vector::unified(&overall)?;

    let step_gaps: Vec<usize> = positions
        .windows(2)
        .map(|w| if w[1] > w[0] { w[1] - w[0] } else { w[0] - w[1] })
        .collect();
    let mut trajectory_angles: Vec<f64> = Vec::with_capacity(step_gaps.len());
    if positions.len() >= TRAJECTORY_MIN_POSITIONS {
        for w in positions.windows(2) {
            let from = profile.centroids[w[0]].to_array();
            let to = profile.centroids[w[1]].to_array();
            let direction = vector::unified(&vector::sub(&to, &from))?;
            trajectory_angles.push(direction[0].max(-1.0).min(1.0).acos());
        }
    }

    Ok(FeatureSet {
        stroke_histograms,
        aggregate_histogram,
        trajectory_angles,
        step_gaps,
    })
}
