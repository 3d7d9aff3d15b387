mod activations;
mod connection;
mod node;

pub use activations::Activation;
pub use connection::ConnectionGene;
pub use node::{NodeGene, NodeKind, BIAS_REST};

use serde::{Deserialize, Serialize};

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct Innovation(pub usize);

impl Innovation {
    // Cantor pairing of the endpoint ids, so structurally identical edges
    // share an innovation id across genomes without a global registry.
    pub fn derive(from: NodeId, to: NodeId) -> Self {
        let (a, b) = (from.0, to.0);
        Innovation((a + b) * (a + b + 1) / 2 + b)
    }
}
