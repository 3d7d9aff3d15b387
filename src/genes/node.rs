use super::NodeId;

use serde::{Deserialize, Serialize};

/// Rest value a bias node starts out with; weight mutation may reroll it.
pub const BIAS_REST: f64 = 0.25;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Input,
    Bias,
    Hidden,
    Output,
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Hidden
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct NodeGene {
    pub id: NodeId,
    pub kind: NodeKind,
    /// 1-based; input and bias nodes sit on layer 1, outputs close the deepest layer
    pub layer: usize,
    pub value: f64,
}

impl NodeGene {
    pub fn new(id: NodeId, kind: NodeKind, layer: usize, value: f64) -> Self {
        NodeGene {
            id,
            kind,
            layer,
            value,
        }
    }

    pub fn input(id: NodeId, value: f64) -> Self {
        NodeGene::new(id, NodeKind::Input, 1, value)
    }

    pub fn bias(id: NodeId) -> Self {
        NodeGene::new(id, NodeKind::Bias, 1, BIAS_REST)
    }

    pub fn hidden(id: NodeId, layer: usize) -> Self {
        NodeGene::new(id, NodeKind::Hidden, layer, 0.0)
    }

    pub fn output(id: NodeId) -> Self {
        NodeGene::new(id, NodeKind::Output, 2, 0.0)
    }

    pub fn is_input(&self) -> bool {
        self.kind == NodeKind::Input
    }

    pub fn is_bias(&self) -> bool {
        self.kind == NodeKind::Bias
    }

    pub fn is_hidden(&self) -> bool {
        self.kind == NodeKind::Hidden
    }

    pub fn is_output(&self) -> bool {
        self.kind == NodeKind::Output
    }

    // input and bias values are supplied externally, never recomputed
    pub fn is_evaluated(&self) -> bool {
        matches!(self.kind, NodeKind::Hidden | NodeKind::Output)
    }
}
