use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Activation {
    Tanh,
    Sigmoid,
}

impl Default for Activation {
    fn default() -> Self {
        Activation::Tanh
    }
}

impl Activation {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Activation::Tanh => TANH(value),
            Activation::Sigmoid => SIGMOID(value),
        }
    }
}

pub const TANH: fn(f64) -> f64 = |val| val.tanh();
// scaled logistic, range (0, 1)
pub const SIGMOID: fn(f64) -> f64 = |val| 1.0 / (1.0 + (-4.9 * val).exp());
