//! Structural and weight mutation operators.
//!
//! Failed picks (a disabled connection, an illegal endpoint pair) are not
//! errors: the operator returns `None` and leaves the genome unchanged.

use std::collections::HashMap;

use log::trace;

use crate::genes::{ConnectionGene, Innovation, NodeGene, NodeId, NodeKind};
use crate::genome::{Genome, FRESH_DISABLED_CHANCE};
use crate::parameters::Parameters;
use crate::rng::NeatRng;

impl Genome {
    /// Splits a uniformly chosen connection with a new hidden node. The old
    /// connection is disabled but kept for historical bookkeeping; the two
    /// replacement edges (weight 1.0 into the new node, the old weight out
    /// of it) preserve the signal transfer at the moment of the split.
    pub fn add_node(&mut self, rng: &mut NeatRng) -> Option<NodeId> {
        if self.connections.is_empty() {
            return None;
        }

        let picked = rng.index(self.connections.len());
        if !self.connections[picked].enabled {
            return None;
        }

        let (from, to, weight) = {
            let connection = &self.connections[picked];
            (connection.from, connection.to, connection.weight)
        };
        // endpoints could have been displaced by a prior structural change;
        // treat a dangling edge as a skipped mutation
        let from_layer = self.node(from)?.layer;
        self.node(to)?;

        self.connections[picked].enabled = false;

        let id = self.next_node_id();
        self.nodes.push(NodeGene::hidden(id, from_layer + 1));
        self.connections.push(ConnectionGene::new(from, id, 1.0));
        self.connections.push(ConnectionGene::new(id, to, weight));

        self.recompute_layers();

        trace!("split {:?}->{:?} with new node {:?}", from, to, id);

        Some(id)
    }

    /// Connects two uniformly chosen nodes, subject to the legality rules
    /// checked by [`Genome::try_connect`].
    pub fn add_connection(&mut self, rng: &mut NeatRng) -> Option<Innovation> {
        if self.nodes.len() < 2 {
            return None;
        }

        let from_index = rng.index(self.nodes.len());
        let to_index = rng.index(self.nodes.len());

        self.try_connect(from_index, to_index, rng)
    }

    /// Legality rules, in order: reject an already existing ordered pair,
    /// reject edges into the input layer or out of the output layer, reject
    /// input/bias directly to output (those only arise from initial
    /// construction). A hidden pair on the same layer creates nothing and
    /// instead disables any connection sharing the derived innovation id.
    pub fn try_connect(
        &mut self,
        from_index: usize,
        to_index: usize,
        rng: &mut NeatRng,
    ) -> Option<Innovation> {
        if from_index >= self.nodes.len() || to_index >= self.nodes.len() {
            return None;
        }
        if from_index == to_index {
            return None;
        }

        let (from, from_kind, from_layer) = {
            let node = &self.nodes[from_index];
            (node.id, node.kind, node.layer)
        };
        let (to, to_kind, to_layer) = {
            let node = &self.nodes[to_index];
            (node.id, node.kind, node.layer)
        };

        if self.contains_edge(from, to) {
            return None;
        }

        match (from_kind, to_kind) {
            (NodeKind::Input, NodeKind::Output) | (NodeKind::Bias, NodeKind::Output) => {
                return None
            }
            (NodeKind::Hidden, NodeKind::Hidden) if from_layer == to_layer => {
                // same-layer connections are invalid; prune anything carrying
                // the same derived identifier
                let innovation = Innovation::derive(from, to);
                for connection in &mut self.connections {
                    if connection.innovation == innovation {
                        connection.enabled = false;
                    }
                }
                return None;
            }
            (NodeKind::Input, NodeKind::Hidden)
            | (NodeKind::Bias, NodeKind::Hidden)
            | (NodeKind::Hidden, NodeKind::Output)
            | (NodeKind::Hidden, NodeKind::Hidden) => {}
            _ => return None,
        }

        // a backward edge between hidden layers is kept out of the layered pass
        let mut connection = if from_layer > to_layer {
            ConnectionGene::recurrent(from, to, rng.weight())
        } else {
            ConnectionGene::new(from, to, rng.weight())
        };
        if rng.gamble(FRESH_DISABLED_CHANCE) {
            connection.enabled = false;
        }

        let innovation = connection.innovation;
        self.connections.push(connection);

        Some(innovation)
    }

    /// Weight/enable mutation: independent trials per connection for an
    /// enable flip and a weight reroll, plus a value reroll per bias node.
    pub fn mutate(&mut self, rng: &mut NeatRng, parameters: &Parameters) {
        let chance = parameters.mutation.weight;

        for connection in &mut self.connections {
            if rng.gamble(chance) {
                connection.enabled = !connection.enabled;
            }
            if rng.gamble(chance) {
                connection.weight = rng.weight();
            }
        }

        for node in self.nodes.iter_mut().filter(|node| node.is_bias()) {
            if rng.gamble(chance) {
                node.value = rng.weight();
            }
        }

        // enable flips change which connections govern hidden placement
        self.recompute_layers();
    }

    /// Re-derives every layer from current connectivity: inputs and bias are
    /// pinned to layer 1, each hidden node sits one layer below its deepest
    /// enabled non-recurrent source, outputs close the deepest layer. Must
    /// run after any structural change so the layered pass stays in order.
    pub fn recompute_layers(&mut self) {
        for node in &mut self.nodes {
            if node.is_input() || node.is_bias() {
                node.layer = 1;
            }
        }

        // settle hidden placement to a fixpoint; passes are bounded by the
        // node count since every pass deepens at least one node
        for _ in 0..self.nodes.len() {
            let mut changed = false;

            for index in 0..self.nodes.len() {
                if !self.nodes[index].is_hidden() {
                    continue;
                }
                let id = self.nodes[index].id;
                let governing = self
                    .connections
                    .iter()
                    .filter(|connection| connection.carries_signal() && connection.to == id)
                    .filter_map(|connection| self.node(connection.from))
                    .filter(|source| !source.is_output())
                    .map(|source| source.layer)
                    .max();

                if let Some(layer) = governing {
                    if self.nodes[index].layer != layer + 1 {
                        self.nodes[index].layer = layer + 1;
                        changed = true;
                    }
                }
            }

            if !changed {
                break;
            }
        }

        let deepest = self
            .nodes
            .iter()
            .filter(|node| !node.is_output())
            .map(|node| node.layer)
            .max()
            .unwrap_or(1);
        for node in self.nodes.iter_mut().filter(|node| node.is_output()) {
            node.layer = deepest + 1;
        }

        // an edge that still points backward after settling (a re-enabled
        // leftover from an older topology) cannot take part in the layered pass
        let layer_of: HashMap<NodeId, usize> = self
            .nodes
            .iter()
            .map(|node| (node.id, node.layer))
            .collect();
        for connection in &mut self.connections {
            if !connection.carries_signal() {
                continue;
            }
            if let (Some(from), Some(to)) = (
                layer_of.get(&connection.from),
                layer_of.get(&connection.to),
            ) {
                if from >= to {
                    connection.recurrent = true;
                }
            }
        }
    }

    fn next_node_id(&self) -> NodeId {
        NodeId(
            self.nodes
                .iter()
                .map(|node| node.id.0)
                .max()
                .map_or(0, |max| max + 1),
        )
    }
}
