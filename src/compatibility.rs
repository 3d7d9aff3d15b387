//! Compatibility distance between two genomes, used to cluster the
//! population into species.

use serde::{Deserialize, Serialize};

use crate::genome::Genome;

/// How excess/disjoint genes are counted. `Positional` compares the two
/// connection lists index by index up to the shorter length and treats the
/// length difference as excess; it matches the historical behavior this
/// engine evolved with and only agrees with classic NEAT when both genomes
/// enumerate connections in the same order. `InnovationAligned` is the
/// classic innovation-id-aligned computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Positional,
    InnovationAligned,
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::Positional
    }
}

/// `excess + disjoint + average absolute weight difference over matching
/// genes`. Matching is always by innovation id; only the excess/disjoint
/// split depends on the alignment mode.
pub fn distance(a: &Genome, b: &Genome, alignment: Alignment) -> f64 {
    let mut matching = 0;
    let mut weight_diff = 0.0;

    for connection in &a.connections {
        if let Some(other) = b
            .connections
            .iter()
            .find(|candidate| candidate.innovation == connection.innovation)
        {
            matching += 1;
            weight_diff += (connection.weight - other.weight).abs();
        }
    }

    // fully disjoint genomes must not divide by zero
    let avg_weight_diff = if matching == 0 {
        0.0
    } else {
        weight_diff / matching as f64
    };

    let (excess, disjoint) = match alignment {
        Alignment::Positional => positional_counts(a, b),
        Alignment::InnovationAligned => aligned_counts(a, b),
    };

    (excess + disjoint) as f64 + avg_weight_diff
}

fn positional_counts(a: &Genome, b: &Genome) -> (usize, usize) {
    let shorter = a.connections.len().min(b.connections.len());

    let disjoint = (0..shorter)
        .filter(|&index| a.connections[index].innovation != b.connections[index].innovation)
        .count();
    let excess = a.connections.len().max(b.connections.len()) - shorter;

    (excess, disjoint)
}

fn aligned_counts(a: &Genome, b: &Genome) -> (usize, usize) {
    let (excess_a, disjoint_a) = half_counts(a, b);
    let (excess_b, disjoint_b) = half_counts(b, a);

    (excess_a + excess_b, disjoint_a + disjoint_b)
}

// non-matching genes of `own`: beyond `other`'s innovation ceiling they are
// excess, inside it they are disjoint
fn half_counts(own: &Genome, other: &Genome) -> (usize, usize) {
    let ceiling = other
        .connections
        .iter()
        .map(|connection| connection.innovation)
        .max();

    let mut excess = 0;
    let mut disjoint = 0;

    for connection in &own.connections {
        if other
            .connections
            .iter()
            .any(|candidate| candidate.innovation == connection.innovation)
        {
            continue;
        }
        match ceiling {
            Some(ceiling) if connection.innovation <= ceiling => disjoint += 1,
            _ => excess += 1,
        }
    }

    (excess, disjoint)
}

#[cfg(test)]
mod tests {
    use super::{distance, Alignment};
    use crate::genes::{ConnectionGene, NodeGene, NodeId};
    use crate::genome::Genome;
    use crate::parameters::Parameters;
    use crate::rng::NeatRng;

    fn genome_with_edges(edges: &[(usize, usize, f64)]) -> Genome {
        let mut nodes: Vec<NodeGene> = Vec::new();
        let mut connections = Vec::new();

        for &(from, to, weight) in edges {
            for id in &[from, to] {
                if !nodes.iter().any(|node| node.id == NodeId(*id)) {
                    nodes.push(NodeGene::hidden(NodeId(*id), 1));
                }
            }
            connections.push(ConnectionGene::new(NodeId(from), NodeId(to), weight));
        }

        Genome {
            nodes,
            connections,
            fitness: 0.0,
            species: None,
        }
    }

    #[test]
    fn genome_has_zero_distance_to_itself() {
        let parameters: Parameters = Default::default();
        let mut rng = NeatRng::new(0, parameters.mutation.weight_range);
        let genome = Genome::new(&mut rng, &parameters);

        assert_eq!(distance(&genome, &genome, Alignment::Positional), 0.0);
        assert_eq!(distance(&genome, &genome, Alignment::InnovationAligned), 0.0);
    }

    #[test]
    fn fully_disjoint_genomes_avoid_division_by_zero() {
        let a = genome_with_edges(&[(0, 1, 5.0)]);
        let b = genome_with_edges(&[(2, 3, 5.0)]);

        let d = distance(&a, &b, Alignment::Positional);
        assert!(d.is_finite());
        // one mismatched position, equal lengths
        assert_eq!(d, 1.0);
    }

    #[test]
    fn length_difference_counts_as_excess() {
        let a = genome_with_edges(&[(0, 1, 2.0), (0, 2, 3.0), (0, 3, 4.0)]);
        let b = genome_with_edges(&[(0, 1, 2.0)]);

        // positions match on the shared prefix, two genes of excess
        assert_eq!(distance(&a, &b, Alignment::Positional), 2.0);
    }

    #[test]
    fn weight_difference_is_averaged_over_matching_genes() {
        let a = genome_with_edges(&[(0, 1, 2.0), (0, 2, 4.0)]);
        let b = genome_with_edges(&[(0, 1, 3.0), (0, 2, 8.0)]);

        // (1.0 + 4.0) / 2 matching genes
        assert_eq!(distance(&a, &b, Alignment::Positional), 2.5);
    }

    #[test]
    fn alignment_modes_disagree_on_reordered_lists() {
        // same gene sets, enumerated in different orders
        let a = genome_with_edges(&[(0, 1, 2.0), (0, 2, 3.0)]);
        let b = genome_with_edges(&[(0, 2, 3.0), (0, 1, 2.0)]);

        assert_eq!(distance(&a, &b, Alignment::InnovationAligned), 0.0);
        // positional comparison sees two mismatched positions
        assert_eq!(distance(&a, &b, Alignment::Positional), 2.0);
    }
}
