// std imports
use serde::{Deserialize, Serialize};
// crate imports
use crate::error::NeatError;
use crate::genes::{ConnectionGene, NodeGene, NodeId};
use crate::parameters::Parameters;
use crate::rng::NeatRng;

/// chance for a freshly created connection to start out disabled
pub(crate) const FRESH_DISABLED_CHANCE: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub nodes: Vec<NodeGene>,
    pub connections: Vec<ConnectionGene>,
    pub fitness: f64,
    pub species: Option<usize>,
}

// public API
impl Genome {
    /// Builds the initial two-layer topology: inputs and an optional bias on
    /// layer 1, outputs on layer 2, fully connected across the two layers.
    pub fn new(rng: &mut NeatRng, parameters: &Parameters) -> Self {
        let mut ids = 0..;
        let mut nodes = Vec::new();

        for _ in 0..parameters.setup.input_nodes {
            nodes.push(NodeGene::input(
                NodeId(ids.next().unwrap()),
                rng.node_value(),
            ));
        }
        if parameters.setup.bias_node {
            nodes.push(NodeGene::bias(NodeId(ids.next().unwrap())));
        }
        let first_output = nodes.len();
        for _ in 0..parameters.setup.output_nodes {
            nodes.push(NodeGene::output(NodeId(ids.next().unwrap())));
        }

        let mut connections = Vec::new();
        for source in &nodes[..first_output] {
            for target in &nodes[first_output..] {
                let mut connection = ConnectionGene::new(source.id, target.id, rng.weight());
                if rng.gamble(FRESH_DISABLED_CHANCE) {
                    connection.enabled = false;
                }
                connections.push(connection);
            }
        }

        Genome {
            nodes,
            connections,
            fitness: 0.0,
            species: None,
        }
    }

    /// Offspring start as a structural copy of a representative with fitness
    /// and species tag cleared.
    pub fn from(genome: &Genome) -> Self {
        Genome {
            nodes: genome.nodes.clone(),
            connections: genome.connections.clone(),
            fitness: 0.0,
            species: None,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeGene> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn max_layer(&self) -> usize {
        self.nodes.iter().map(|node| node.layer).max().unwrap_or(1)
    }

    pub fn contains_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.connections
            .iter()
            .any(|connection| connection.from == from && connection.to == to)
    }

    pub fn set_bias(&mut self, value: f64) {
        for node in self.nodes.iter_mut().filter(|node| node.is_bias()) {
            node.value = value;
        }
    }

    /// Zeroes all computed node values between trials, leaving structure,
    /// weights and externally supplied input/bias values untouched.
    pub fn reset_values(&mut self) {
        for node in self.nodes.iter_mut().filter(|node| node.is_evaluated()) {
            node.value = 0.0;
        }
    }

    pub fn to_json(&self) -> Result<String, NeatError> {
        serde_json::to_string(self).map_err(NeatError::from)
    }

    /// Reconstructs a genome from a persisted record. A malformed record
    /// fails here without touching any live genome.
    pub fn from_json(record: &str) -> Result<Self, NeatError> {
        serde_json::from_str(record).map_err(NeatError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::Genome;
    use crate::parameters::Parameters;
    use crate::rng::NeatRng;

    fn small_parameters() -> Parameters {
        let mut parameters: Parameters = Default::default();
        parameters.setup.input_nodes = 2;
        parameters.setup.output_nodes = 1;
        parameters
    }

    #[test]
    fn initial_topology_is_fully_connected() {
        let parameters = small_parameters();
        let mut rng = NeatRng::new(0, parameters.mutation.weight_range);

        let genome = Genome::new(&mut rng, &parameters);

        // 2 inputs + bias + 1 output
        assert_eq!(genome.nodes.len(), 4);
        assert_eq!(genome.connections.len(), 3);

        // every output node has an edge from every layer-1 node
        for source in genome.nodes.iter().filter(|node| node.layer == 1) {
            for target in genome.nodes.iter().filter(|node| node.is_output()) {
                assert!(genome.contains_edge(source.id, target.id));
            }
        }
    }

    #[test]
    fn initial_weights_respect_configured_range() {
        let parameters = small_parameters();
        let mut rng = NeatRng::new(3, parameters.mutation.weight_range);

        let genome = Genome::new(&mut rng, &parameters);

        for connection in &genome.connections {
            assert!(connection.weight >= -20.0 && connection.weight <= 20.0);
        }
    }

    #[test]
    fn offspring_copy_clears_fitness_and_species() {
        let parameters = small_parameters();
        let mut rng = NeatRng::new(1, parameters.mutation.weight_range);

        let mut genome = Genome::new(&mut rng, &parameters);
        genome.fitness = 12.5;
        genome.species = Some(3);

        let offspring = Genome::from(&genome);

        assert_eq!(offspring.nodes, genome.nodes);
        assert_eq!(offspring.connections, genome.connections);
        assert_eq!(offspring.fitness, 0.0);
        assert_eq!(offspring.species, None);
    }

    #[test]
    fn round_trip_reproduces_genome_exactly() {
        let parameters = small_parameters();
        let mut rng = NeatRng::new(2, parameters.mutation.weight_range);

        let mut genome = Genome::new(&mut rng, &parameters);
        genome.fitness = 3.25;
        genome.species = Some(1);

        let record = genome.to_json().unwrap();
        let restored = Genome::from_json(&record).unwrap();

        assert_eq!(restored, genome);
    }

    #[test]
    fn malformed_record_fails_deserialization() {
        let result = Genome::from_json("{ \"nodes\": 42 }");

        assert!(result.is_err());
    }
}
