extern crate bincode;
extern crate serde_derive;
extern crate wasm_bindgen;

mod config;
mod entities;
mod enumerator;
mod error;
mod features;
mod match_collector;
mod matcher;
mod pattern;
mod repository;
mod scorer;
mod vector;

use serde_derive::{Deserialize, Serialize};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub use config::SearchConfig;
pub use entities::{Centroid, CharProfile, Embedding, Histogram, StrokeProfile, HIST_BINS};
pub use enumerator::embeddings_of;
pub use error::{Result, SearchError};
pub use features::{extract_features, FeatureSet};
pub use matcher::{Matcher, SearchOutcome};
pub use pattern::{is_feasible, Substructure};
pub use repository::StrokeRepository;
pub use scorer::{chunk_count, score};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub hanzi: char,
    pub score: f64,
}

// What the JS side gets back from a search
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct SearchResponse {
    potential: Vec<char>,
    negative: Vec<char>,
}

thread_local!(static REPOSITORY: RefCell<Option<StrokeRepository>> = RefCell::new(None));

// Runs one search with an explicit repository and configuration.
pub fn search_typed(
    repo: &StrokeRepository,
    reference: char,
    positions: &[usize],
    config: SearchConfig,
) -> Result<SearchOutcome> {
    let matcher = Matcher::with_config(repo, config)?;
    matcher.search(reference, positions)
}

fn search_json(repo: &StrokeRepository, reference: &str, positions: &[u32]) -> Result<String> {
    let mut chars = reference.chars();
    let reference = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            let msg = format!("expected a single character, got {:?}", reference);
            return Err(SearchError::InvalidInput(msg));
        }
    };
    let positions: Vec<usize> = positions.iter().map(|&pos| pos as usize).collect();
    // No worker threads inside wasm
    let config = SearchConfig {
        parallel: false,
        ..SearchConfig::default()
    };
    let outcome = search_typed(repo, reference, &positions, config)?;
    let response = SearchResponse {
        potential: outcome.potential_symbols(),
        negative: outcome.negative.into_iter().collect(),
    };
    Ok(serde_json::to_string(&response)?)
}

fn to_js_error(err: SearchError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// Installs the stroke repository (bincode bytes) used by `search`; returns the character count
#[wasm_bindgen]
pub fn load_repository(bytes: &[u8]) -> std::result::Result<usize, JsValue> {
    let repo = StrokeRepository::from_bincode_bytes(bytes).map_err(to_js_error)?;
    let count = repo.len();
    REPOSITORY.with(|slot| *slot.borrow_mut() = Some(repo));
    Ok(count)
}

// Searches the installed repository; returns `{"potential": [...], "negative": [...]}` as JSON.
#[wasm_bindgen]
pub fn search(reference: &str, positions: Vec<u32>) -> std::result::Result<String, JsValue> {
    REPOSITORY.with(|slot| match slot.borrow().as_ref() {
        Some(repo) => search_json(repo, reference, &positions).map_err(to_js_error),
        None => Err(JsValue::from_str("repository not loaded")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> StrokeRepository {
        StrokeRepository::from_json_str(
            r#"{
                "十": {"index": "12", "hist": [[4, 1, 0, 0], [0, 1, 4, 0]],
                       "traj": [[50, 50], [52, 48]]},
                "干": {"index": "112", "hist": [[4, 1, 0, 0], [4, 1, 0, 0], [0, 1, 4, 0]],
                       "traj": [[50, 20], [50, 60], [50, 50]]},
                "八": {"index": "34", "hist": [[0, 0, 1, 4], [1, 0, 0, 4]],
                       "traj": [[30, 50], [70, 50]]}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_search_json() {
        let json = search_json(&repo(), "十", &[0, 1]).unwrap();
        let response: SearchResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(response.potential[0], '十');
        assert!(response.potential.contains(&'干'));
        assert_eq!(response.negative, vec!['八']);
    }

    #[test]
    fn test_search_json_rejects_bad_reference() {
        assert!(matches!(search_json(&repo(), "十干", &[0]), Err(SearchError::InvalidInput(_))));
        assert!(matches!(search_json(&repo(), "", &[0]), Err(SearchError::InvalidInput(_))));
    }

    #[test]
    fn test_search_typed_validates_config() {
        let config = SearchConfig {
            limit: 0,
            ..SearchConfig::default()
        };
        let res = search_typed(&repo(), '十', &[0], config);
        assert!(matches!(res, Err(SearchError::InvalidConfig(_))));
    }
}
