use super::{Innovation, NodeId};

use serde::{Deserialize, Serialize};

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionGene {
    pub innovation: Innovation,
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
    pub enabled: bool,
    /// does not respect strict layer ordering; skipped by the layered pass
    pub recurrent: bool,
}

impl ConnectionGene {
    pub fn new(from: NodeId, to: NodeId, weight: f64) -> Self {
        ConnectionGene {
            innovation: Innovation::derive(from, to),
            from,
            to,
            weight,
            enabled: true,
            recurrent: false,
        }
    }

    pub fn recurrent(from: NodeId, to: NodeId, weight: f64) -> Self {
        ConnectionGene {
            recurrent: true,
            ..ConnectionGene::new(from, to, weight)
        }
    }

    pub fn carries_signal(&self) -> bool {
        self.enabled && !self.recurrent
    }
}
