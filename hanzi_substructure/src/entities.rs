use serde_derive::{Deserialize, Serialize};

pub const HIST_BINS: usize = 4;

// A stroke's direction/shape histogram
pub type Histogram = [f64; HIST_BINS];

// Positions into a candidate's stroke sequence, strictly increasing
pub type Embedding = Vec<usize>;

// A stroke's spatial centroid
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
}

impl Centroid {
    pub fn new(x: f64, y: f64) -> Centroid {
        Centroid { x, y }
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

// Static stroke data of one character; all three sequences have one item per stroke
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeProfile {
    // Stroke-type codes in drawing order
    pub stroke_types: Vec<u8>,
    // Per-stroke shape histograms
    pub histograms: Vec<Histogram>,
    // Per-stroke centroids
    pub centroids: Vec<Centroid>,
}

impl StrokeProfile {
    pub fn stroke_count(&self) -> usize {
        self.stroke_types.len()
    }

    pub fn is_consistent(&self) -> bool {
        let n = self.stroke_types.len();
        self.histograms.len() == n && self.centroids.len() == n
    }
}

// One character's profile as stored in the binary repository file
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct CharProfile {
    pub hanzi: char,
    pub stroke_types: Vec<u8>,
    pub histograms: Vec<Histogram>,
    pub centroids: Vec<Centroid>,
}

impl CharProfile {
    pub fn into_parts(self) -> (char, StrokeProfile) {
        let profile = StrokeProfile {
            stroke_types: self.stroke_types,
            histograms: self.histograms,
            centroids: self.centroids,
        };
        (self.hanzi, profile)
    }

    pub fn from_parts(hanzi: char, profile: &StrokeProfile) -> CharProfile {
        CharProfile {
            hanzi,
            stroke_types: profile.stroke_types.clone(),
            histograms: profile.histograms.clone(),
            centroids: profile.centroids.clone(),
        }
    }
}
