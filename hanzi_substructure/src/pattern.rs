use std::collections::HashSet;

use super::entities::*;
use super::error::*;

// A caller-chosen, ordered subset of a reference character's strokes, together with the
// stroke-type pattern it spells out.
#[derive(Debug, Clone, PartialEq)]
pub struct Substructure {
    pub positions: Vec<usize>,
    pub pattern: Vec<u8>,
}

impl Substructure {
    // Validates `positions` against the reference profile and derives the stroke-type pattern.
    // Positions must be non-empty, in range, and distinct. Their order is kept as given.
    pub fn resolve(profile: &StrokeProfile, positions: &[usize]) -> Result<Substructure> {
        if positions.is_empty() {
            return Err(SearchError::InvalidInput("no reference positions given".to_string()));
        }
        let stroke_count = profile.stroke_count();
        let mut seen: HashSet<usize> = HashSet::with_capacity(positions.len());
        for &pos in positions {
            if pos >= stroke_count {
                return Err(SearchError::InvalidInput(format!(
                    "position {} out of range for {} strokes",
                    pos, stroke_count
                )));
            }
            if !seen.insert(pos) {
                return Err(SearchError::InvalidInput(format!("duplicate position {}", pos)));
            }
        }
        let pattern = positions.iter().map(|&pos| profile.stroke_types[pos]).collect();
        Ok(Substructure {
            positions: positions.to_vec(),
            pattern,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

// Quick reject: can the stroke-type sequence contain the pattern at all?
// Equivalent to matching `\d* d1+ \d* d2+ ... \d* dk+ \d*` against the sequence, which reduces
// to an in-order subsequence test. Linear in the length of the sequence.
pub fn is_feasible(pattern: &[u8], stroke_types: &[u8]) -> bool {
    let mut remaining = pattern.iter().peekable();
    for stroke_type in stroke_types {
        match remaining.peek() {
            Some(&&wanted) if wanted == *stroke_type => {
                remaining.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    remaining.peek().is_none()
}
