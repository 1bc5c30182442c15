use thiserror::Error;

// Everything that can go wrong while loading stroke data or running a search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("symbol not found in repository: {0}")]
    NotFound(char),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Zero sum on normalization, or zero norm on unification
    #[error("vector cannot be normalized: zero magnitude")]
    DegenerateVector,

    #[error(
        "inconsistent profile for {hanzi}: {types} stroke types, \
         {histograms} histograms, {centroids} centroids"
    )]
    InconsistentProfile {
        hanzi: char,
        types: usize,
        histograms: usize,
        centroids: usize,
    },

    #[error("malformed stroke data: {0}")]
    MalformedData(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;
