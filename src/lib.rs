pub mod compatibility;
mod error;
mod evaluation;
pub mod genes;
pub mod genome;
mod mutation;
pub mod parameters;
pub mod population;
pub mod rng;
pub mod species;
pub mod statistics;

// re-exports
pub use crate::compatibility::Alignment;
pub use crate::error::NeatError;
pub use crate::genes::{Activation, ConnectionGene, Innovation, NodeGene, NodeId, NodeKind};
pub use crate::genome::Genome;
pub use crate::parameters::Parameters;
pub use crate::population::{Phase, Population};
pub use crate::rng::NeatRng;
pub use crate::species::Species;
pub use crate::statistics::Report;
