//! Layered feed-forward pass over a genome.
//!
//! Nodes are visited layer by layer, so every source value read during
//! accumulation was computed in a strictly earlier pass. Disabled and
//! recurrent connections carry no signal.

use crate::error::NeatError;
use crate::genes::Activation;
use crate::genome::Genome;

impl Genome {
    pub fn input_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_input()).count()
    }

    pub fn output_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_output()).count()
    }

    /// Writes the supplied values into the input nodes in insertion order.
    /// The bias node keeps its own value and is not part of the array.
    pub fn set_inputs(&mut self, values: &[f64]) -> Result<(), NeatError> {
        let expected = self.input_count();
        if values.len() != expected {
            return Err(NeatError::InputArity {
                expected,
                got: values.len(),
            });
        }

        let mut supplied = values.iter().copied();
        for node in self.nodes.iter_mut().filter(|node| node.is_input()) {
            if let Some(value) = supplied.next() {
                node.value = value;
            }
        }

        Ok(())
    }

    /// One full propagation pass. Reading without intervening mutation is
    /// idempotent: every evaluated node is reset before accumulation.
    pub fn evaluate(&mut self, activation: Activation) {
        let max_layer = self.max_layer();

        // layer 1 holds inputs and bias, which are supplied, not computed
        for layer in 2..=max_layer {
            let mut sums = Vec::new();

            for (index, node) in self.nodes.iter().enumerate() {
                if node.layer != layer || !node.is_evaluated() {
                    continue;
                }

                let mut sum = 0.0;
                for connection in &self.connections {
                    if !connection.carries_signal() || connection.to != node.id {
                        continue;
                    }
                    // a dangling source contributes nothing
                    if let Some(source) = self.node(connection.from) {
                        sum += source.value * connection.weight;
                    }
                }
                sums.push((index, sum));
            }

            for (index, sum) in sums {
                self.nodes[index].value = activation.apply(sum);
            }
        }
    }

    /// Output node values in insertion order, as left by the last pass.
    pub fn outputs(&self) -> Vec<f64> {
        self.nodes
            .iter()
            .filter(|node| node.is_output())
            .map(|node| node.value)
            .collect()
    }
}
