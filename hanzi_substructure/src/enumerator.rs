use std::collections::HashMap;

use super::entities::*;

// A partial embedding under construction
#[derive(Debug, Clone)]
struct AssignmentNode {
    last: usize,
    gene: Vec<usize>,
}

impl AssignmentNode {
    fn start(position: usize) -> AssignmentNode {
        AssignmentNode {
            last: position,
            gene: vec![position],
        }
    }

    fn is_legal_to_append(&self, position: usize) -> bool {
        position > self.last
    }

    fn extended(&self, position: usize) -> AssignmentNode {
        let mut gene = Vec::with_capacity(self.gene.len() + 1);
        gene.extend_from_slice(&self.gene);
        gene.push(position);
        AssignmentNode { last: position, gene }
    }
}

// Positions of each stroke type within a stroke sequence, ascending
fn positions_by_type(stroke_types: &[u8]) -> HashMap<u8, Vec<usize>> {
    let mut res: HashMap<u8, Vec<usize>> = HashMap::new();
    for (pos, &stroke_type) in stroke_types.iter().enumerate() {
        res.entry(stroke_type).or_insert_with(Vec::new).push(pos);
    }
    res
}

fn positions_of(by_type: &HashMap<u8, Vec<usize>>, stroke_type: u8) -> &[usize] {
    by_type.get(&stroke_type).map(Vec::as_slice).unwrap_or(&[])
}

// Enumerates every placement of `pattern` onto `stroke_types`.
// Each returned embedding is strictly increasing, and the stroke at its i-th position has
// type `pattern[i]`. Works breadth-first over the pattern: the working set of partial
// assignments is extended by one element per step, and assignments that cannot be extended
// are dropped. An empty pattern, or one that does not fit, yields no embeddings.
pub fn embeddings_of(pattern: &[u8], stroke_types: &[u8]) -> Vec<Embedding> {
    let (first, rest) = match pattern.split_first() {
        Some(split) => split,
        None => return Vec::new(),
    };
    let by_type = positions_by_type(stroke_types);

    let mut nodes: Vec<AssignmentNode> = positions_of(&by_type, *first)
        .iter()
        .map(|&pos| AssignmentNode::start(pos))
        .collect();
    for stroke_type in rest {
        let candidates = positions_of(&by_type, *stroke_type);
        let mut next_nodes: Vec<AssignmentNode> = Vec::new();
        for node in &nodes {
            for &pos in candidates {
                if node.is_legal_to_append(pos) {
                    next_nodes.push(node.extended(pos));
                }
            }
        }
        nodes = next_nodes;
        if nodes.is_empty() {
            break;
        }
    }
    nodes.into_iter().map(|node| node.gene).collect()
}

#[cfg(test)]
mod tests {
    use super::super::pattern::is_feasible;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_embedding() {
        assert_eq!(embeddings_of(&[1, 2], &[1, 2, 3]), vec![vec![0, 1]]);
    }

    #[test]
    fn test_branching() {
        let res = embeddings_of(&[1, 2], &[1, 1, 2, 3, 2]);
        assert_eq!(res, vec![vec![0, 2], vec![0, 4], vec![1, 2], vec![1, 4]]);
    }

    #[test]
    fn test_repeated_type_in_pattern() {
        let res = embeddings_of(&[2, 2], &[2, 3, 2, 2]);
        assert_eq!(res, vec![vec![0, 2], vec![0, 3], vec![2, 3]]);
    }

    #[test]
    fn test_no_embedding() {
        assert!(embeddings_of(&[1, 2], &[3, 2, 1]).is_empty());
        assert!(embeddings_of(&[4], &[1, 2, 3]).is_empty());
        assert!(embeddings_of(&[], &[1, 2, 3]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_embeddings_are_legal(
            pattern in prop::collection::vec(1u8..=3, 1..5),
            types in prop::collection::vec(1u8..=3, 0..10),
        ) {
            for embedding in embeddings_of(&pattern, &types) {
                prop_assert_eq!(embedding.len(), pattern.len());
                for w in embedding.windows(2) {
                    prop_assert!(w[0] < w[1]);
                }
                for (i, &pos) in embedding.iter().enumerate() {
                    prop_assert_eq!(types[pos], pattern[i]);
                }
            }
        }

        #[test]
        fn prop_embeddings_exist_iff_feasible(
            pattern in prop::collection::vec(1u8..=3, 1..5),
            types in prop::collection::vec(1u8..=3, 0..10),
        ) {
            let found = !embeddings_of(&pattern, &types).is_empty();
            prop_assert_eq!(found, is_feasible(&pattern, &types));
        }
    }
}
