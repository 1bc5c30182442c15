use serde_derive::Deserialize;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use tracing::debug;

use super::entities::*;
use super::error::*;

// One entry of the JSON stroke-info dictionary, e.g.
// "口": {"index": "251", "hist": [[..], [..], [..]], "traj": [[x, y], [x, y], [x, y]]}
#[derive(Deserialize, Debug)]
struct StrokeInfoEntry {
    index: String,
    hist: Vec<Histogram>,
    traj: Vec<[f64; 2]>,
}

// Read-only lookup of per-character stroke profiles.
// Profiles are kept ordered by code point, so iteration (and everything built on it) is
// deterministic.
#[derive(Debug, Default, Clone)]
pub struct StrokeRepository {
    profiles: BTreeMap<char, StrokeProfile>,
}

impl StrokeRepository {
    pub fn new() -> StrokeRepository {
        StrokeRepository {
            profiles: BTreeMap::new(),
        }
    }

    pub fn from_profiles<I>(profiles: I) -> Result<StrokeRepository>
    where
        I: IntoIterator<Item = (char, StrokeProfile)>,
    {
        let mut repo = StrokeRepository::new();
        for (hanzi, profile) in profiles {
            repo.insert(hanzi, profile)?;
        }
        Ok(repo)
    }

    // Used while loading; the repository is never mutated once searches start.
    fn insert(&mut self, hanzi: char, profile: StrokeProfile) -> Result<()> {
        if !profile.is_consistent() {
            return Err(SearchError::InconsistentProfile {
                hanzi,
                types: profile.stroke_types.len(),
                histograms: profile.histograms.len(),
                centroids: profile.centroids.len(),
            });
        }
        self.profiles.insert(hanzi, profile);
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<StrokeRepository> {
        let entries: BTreeMap<String, StrokeInfoEntry> = serde_json::from_str(json)?;
        StrokeRepository::from_stroke_info(entries)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<StrokeRepository> {
        let entries: BTreeMap<String, StrokeInfoEntry> = serde_json::from_reader(reader)?;
        StrokeRepository::from_stroke_info(entries)
    }

    fn from_stroke_info(entries: BTreeMap<String, StrokeInfoEntry>) -> Result<StrokeRepository> {
        let mut repo = StrokeRepository::new();
        for (key, entry) in entries {
            let mut chars = key.chars();
            let hanzi = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    let msg = format!("key is not a single character: {:?}", key);
                    return Err(SearchError::MalformedData(msg));
                }
            };
            let stroke_types = parse_stroke_types(hanzi, &entry.index)?;
            let centroids = entry.traj.iter().map(|p| Centroid::new(p[0], p[1])).collect();
            let profile = StrokeProfile {
                stroke_types,
                histograms: entry.hist,
                centroids,
            };
            repo.insert(hanzi, profile)?;
        }
        debug!(characters = repo.len(), "loaded stroke info");
        Ok(repo)
    }

    pub fn from_bincode_reader<R: Read>(reader: R) -> Result<StrokeRepository> {
        let records: Vec<CharProfile> = bincode::deserialize_from(reader)?;
        debug!(records = records.len(), "decoded binary stroke repository");
        StrokeRepository::from_profiles(records.into_iter().map(CharProfile::into_parts))
    }

    pub fn from_bincode_bytes(bytes: &[u8]) -> Result<StrokeRepository> {
        let reader = std::io::BufReader::new(bytes);
        StrokeRepository::from_bincode_reader(reader)
    }

    pub fn to_bincode_writer<W: Write>(&self, writer: W) -> Result<()> {
        let records: Vec<CharProfile> = self
            .profiles
            .iter()
            .map(|(hanzi, profile)| CharProfile::from_parts(*hanzi, profile))
            .collect();
        bincode::serialize_into(writer, &records)?;
        Ok(())
    }

    pub fn lookup(&self, hanzi: char) -> Result<&StrokeProfile> {
        self.profiles.get(&hanzi).ok_or(SearchError::NotFound(hanzi))
    }

    pub fn contains(&self, hanzi: char) -> bool {
        self.profiles.contains_key(&hanzi)
    }

    // All characters, in code point order
    pub fn all_symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.profiles.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

// "2514" -> [2, 5, 1, 4]
fn parse_stroke_types(hanzi: char, index: &str) -> Result<Vec<u8>> {
    index
        .chars()
        .map(|c| {
            c.to_digit(10).map(|d| d as u8).ok_or_else(|| {
                SearchError::MalformedData(format!("bad stroke type {:?} for {}", c, hanzi))
            })
        })
        .collect()
}
