use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, trace, warn};

use super::config::SearchConfig;
use super::entities::*;
use super::enumerator::embeddings_of;
use super::error::*;
use super::features::{extract_features, FeatureSet};
use super::match_collector::*;
use super::pattern::{is_feasible, Substructure};
use super::repository::StrokeRepository;
use super::scorer::score;
use super::Match;

// Result of one search: candidates ranked best first, plus everything that was rejected
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub potential: Vec<Match>,
    pub negative: BTreeSet<char>,
    // Requested candidates that are not in the repository
    pub missing: Vec<char>,
}

impl SearchOutcome {
    pub fn potential_symbols(&self) -> Vec<char> {
        self.potential.iter().map(|m| m.hanzi).collect()
    }
}

// Reference side of a search, computed once
struct Query {
    substructure: Substructure,
    // None if the reference strokes are degenerate; every candidate then scores the sentinel
    features: Option<FeatureSet>,
}

enum Verdict {
    Negative,
    Potential(f64),
}

pub struct Matcher<'a> {
    repo: &'a StrokeRepository,
    config: SearchConfig,
}

impl<'a> Matcher<'a> {
    pub fn new(repo: &'a StrokeRepository) -> Matcher<'a> {
        Matcher {
            repo,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(repo: &'a StrokeRepository, config: SearchConfig) -> Result<Matcher<'a>> {
        config.validate()?;
        Ok(Matcher { repo, config })
    }

    // Ranks every character in the repository against the substructure of `reference`
    // made up of the strokes at `positions`.
    pub fn search(&self, reference: char, positions: &[usize]) -> Result<SearchOutcome> {
        let candidates: Vec<char> = self.repo.all_symbols().collect();
        self.search_within(reference, positions, &candidates)
    }

    // Like `search`, but only ranks the given candidates. Duplicates are evaluated once;
    // candidates missing from the repository are skipped and reported in `missing`.
    pub fn search_within(
        &self,
        reference: char,
        positions: &[usize],
        candidates: &[char],
    ) -> Result<SearchOutcome> {
        let query = self.prepare(reference, positions)?;

        let mut seen: HashSet<char> = HashSet::with_capacity(candidates.len());
        let mut universe: Vec<(char, &StrokeProfile)> = Vec::with_capacity(candidates.len());
        let mut missing: Vec<char> = Vec::new();
        for &hanzi in candidates {
            if !seen.insert(hanzi) {
                continue;
            }
            match self.repo.lookup(hanzi) {
                Ok(profile) => universe.push((hanzi, profile)),
                Err(err) => {
                    warn!(%hanzi, error = %err, "skipping candidate");
                    missing.push(hanzi);
                }
            }
        }

        // Verdicts come back in universe order whether or not they were computed in parallel
        let verdicts: Vec<(char, Verdict)> = if self.config.parallel {
            universe
                .par_iter()
                .map(|&(hanzi, profile)| (hanzi, self.evaluate(&query, hanzi, profile)))
                .collect()
        } else {
            universe
                .iter()
                .map(|&(hanzi, profile)| (hanzi, self.evaluate(&query, hanzi, profile)))
                .collect()
        };

        let mut collector = MatchCollector::new(self.config.limit);
        let mut negative: BTreeSet<char> = BTreeSet::new();
        for (hanzi, verdict) in verdicts {
            match verdict {
                Verdict::Negative => {
                    negative.insert(hanzi);
                }
                Verdict::Potential(diff) => {
                    if let Some(dropped) = collector.file_match(Match { hanzi, score: diff }) {
                        negative.insert(dropped);
                    }
                }
            }
        }
        let potential = collector.into_sorted();

        debug!(
            %reference,
            pattern = ?query.substructure.pattern,
            evaluated = universe.len(),
            potential = potential.len(),
            negative = negative.len(),
            missing = missing.len(),
            "substructure search done"
        );
        Ok(SearchOutcome {
            potential,
            negative,
            missing,
        })
    }

    // Smallest difference over all embeddings of the reference substructure in `candidate`.
    // Sentinel score if the candidate cannot hold the substructure at all.
    pub fn smallest_difference(
        &self,
        reference: char,
        positions: &[usize],
        candidate: char,
    ) -> Result<f64> {
        let query = self.prepare(reference, positions)?;
        let profile = self.repo.lookup(candidate)?;
        if !is_feasible(&query.substructure.pattern, &profile.stroke_types) {
            return Ok(self.config.sentinel_score);
        }
        Ok(self.smallest_for(&query, profile).unwrap_or(self.config.sentinel_score))
    }

    fn prepare(&self, reference: char, positions: &[usize]) -> Result<Query> {
        let ref_profile = self.repo.lookup(reference)?;
        let substructure = Substructure::resolve(ref_profile, positions)?;
        let features = match extract_features(ref_profile, &substructure.positions) {
            Ok(features) => Some(features),
            Err(err) => {
                warn!(
                    %reference,
                    ?positions,
                    error = %err,
                    "degenerate reference strokes; all candidates will be rejected"
                );
                None
            }
        };
        Ok(Query { substructure, features })
    }

    fn evaluate(&self, query: &Query, hanzi: char, profile: &StrokeProfile) -> Verdict {
        if !is_feasible(&query.substructure.pattern, &profile.stroke_types) {
            return Verdict::Negative;
        }
        let smallest = match self.smallest_for(query, profile) {
            Some(smallest) => smallest,
            None => {
                trace!(%hanzi, "feasible but no embedding");
                return Verdict::Negative;
            }
        };
        trace!(%hanzi, smallest, "scored candidate");
        if smallest > self.config.threshold {
            Verdict::Negative
        } else {
            Verdict::Potential(smallest)
        }
    }

    // Minimum score over all embeddings; None if there are no embeddings.
    fn smallest_for(&self, query: &Query, profile: &StrokeProfile) -> Option<f64> {
        let embeddings = embeddings_of(&query.substructure.pattern, &profile.stroke_types);
        if embeddings.is_empty() {
            return None;
        }
        let sentinel = self.config.sentinel_score;
        let ref_features = match &query.features {
            Some(features) => features,
            None => return Some(sentinel),
        };
        let smallest = embeddings
            .iter()
            .map(|positions| match extract_features(profile, positions) {
                Ok(features) => {
                    let diff = score(ref_features, &features, positions);
                    if diff.is_finite() {
                        diff
                    } else {
                        sentinel
                    }
                }
                Err(_) => sentinel,
            })
            .fold(sentinel, f64::min);
        Some(smallest)
    }
}
