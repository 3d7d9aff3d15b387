use config::{Config, File};
use log::debug;
use serde::Deserialize;

use crate::compatibility::Alignment;
use crate::error::NeatError;

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct Parameters {
    pub setup: Setup,
    pub mutation: Mutation,
    pub compatibility: Compatibility,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Setup {
    pub population: usize,
    pub input_nodes: usize,
    pub output_nodes: usize,
    pub bias_node: bool,
}

impl Default for Setup {
    fn default() -> Self {
        Setup {
            population: 50,
            input_nodes: 8,
            output_nodes: 2,
            bias_node: true,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Mutation {
    /// per-connection chance of an enable flip and, independently, a weight reroll
    pub weight: f64,
    /// per-offspring chance of one add-node and, independently, one add-connection
    pub structure: f64,
    /// rerolled weights are uniform over [-weight_range, weight_range]
    pub weight_range: f64,
}

impl Default for Mutation {
    fn default() -> Self {
        Mutation {
            weight: 0.05,
            structure: 0.05,
            weight_range: 20.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Compatibility {
    /// genomes join a species when their distance to its seed is at most this
    pub threshold: f64,
    pub alignment: Alignment,
}

impl Default for Compatibility {
    fn default() -> Self {
        Compatibility {
            threshold: 0.0,
            alignment: Alignment::default(),
        }
    }
}

impl Parameters {
    pub fn new(path: &str) -> Result<Self, NeatError> {
        let mut s = Config::new();

        s.merge(File::with_name(path))?;

        let parameters: Parameters = s.try_into()?;

        debug!(
            "loaded parameters from {}: population {}, {}+{} in, {} out",
            path,
            parameters.setup.population,
            parameters.setup.input_nodes,
            if parameters.setup.bias_node { 1 } else { 0 },
            parameters.setup.output_nodes,
        );

        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::Parameters;

    #[test]
    fn read_parameters() {
        let parameters = Parameters::new("src/Config.toml").unwrap();

        assert_eq!(parameters.setup.population, 50);
        assert_eq!(parameters.mutation.structure, 0.05);
    }

    #[test]
    fn default_parameters() {
        let parameters: Parameters = Default::default();

        assert_eq!(parameters.setup.population, 50);
        assert!(parameters.setup.bias_node);
        assert_eq!(parameters.mutation.weight, 0.05);
        assert_eq!(parameters.mutation.weight_range, 20.0);
    }
}
