use ordered_float::OrderedFloat;
use std::collections::BinaryHeap;

use super::Match;

// Keeps the best (lowest-scoring) matches, up to a maximum.
// Heap top is the worst match kept so far; ties on score are broken by code point.
pub struct MatchCollector {
    max: usize,
    heap: BinaryHeap<(OrderedFloat<f64>, char)>,
}

impl MatchCollector {
    pub fn new(max: usize) -> MatchCollector {
        assert!(max > 0, "Expected a positive number for the maximum number of matches.");
        MatchCollector {
            max,
            heap: BinaryHeap::with_capacity(max + 1),
        }
    }

    // Files a match. Returns the character that did not make the cut, if any:
    // either the new match itself, or the previous worst match it displaced.
    pub fn file_match(&mut self, mc: Match) -> Option<char> {
        let entry = (OrderedFloat(mc.score), mc.hanzi);
        if self.heap.len() < self.max {
            self.heap.push(entry);
            return None;
        }
        let displaces_worst = self.heap.peek().map_or(false, |worst| entry < *worst);
        if !displaces_worst {
            return Some(mc.hanzi);
        }
        self.heap.push(entry);
        self.heap.pop().map(|(_, hanzi)| hanzi)
    }

    // Drains kept matches, best first. Holds fewer than the maximum if fewer were filed.
    pub fn into_sorted(self) -> Vec<Match> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|(score, hanzi)| Match { hanzi, score: score.into_inner() })
            .collect()
    }
}
