use std::mem;

use log::{debug, info};

use crate::compatibility;
use crate::genome::Genome;
use crate::parameters::Parameters;
use crate::rng::NeatRng;
use crate::species::Species;
use crate::statistics::Report;

/// The controller alternates between agents acting on their genomes and a
/// regeneration step; regeneration only ever runs inside [`Population::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Live,
    Regenerating,
}

/// Owns the genome collection and drives generational transitions: retired
/// genomes are clustered into species and the next population is grown from
/// the species representatives through mutation.
pub struct Population {
    parameters: Parameters,
    rng: NeatRng,
    live: Vec<Genome>,
    retired: Vec<Genome>,
    phase: Phase,
    generation: usize,
    report: Report,
}

// public API
impl Population {
    pub fn new(parameters: Parameters, seed: u64) -> Self {
        let mut rng = NeatRng::new(seed, parameters.mutation.weight_range);

        let live = (0..parameters.setup.population)
            .map(|_| Genome::new(&mut rng, &parameters))
            .collect();

        Population {
            parameters,
            rng,
            live,
            retired: Vec::new(),
            phase: Phase::Live,
            generation: 1,
            report: Report::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn live(&self) -> &[Genome] {
        &self.live
    }

    pub fn retired(&self) -> &[Genome] {
        &self.retired
    }

    /// Mutable access for the agent owning the genome at `index` during the
    /// live phase. Indices are not stable across [`Population::kill`].
    pub fn genome_mut(&mut self, index: usize) -> Option<&mut Genome> {
        self.live.get_mut(index)
    }

    pub fn set_fitness(&mut self, index: usize, fitness: f64) -> bool {
        match self.live.get_mut(index) {
            Some(genome) => {
                genome.fitness = fitness;
                true
            }
            None => false,
        }
    }

    /// Retires the genome of a dead agent; it becomes a candidate for the
    /// next speciation round.
    pub fn kill(&mut self, index: usize) -> bool {
        if index >= self.live.len() {
            return false;
        }
        let genome = self.live.swap_remove(index);
        self.retired.push(genome);
        true
    }

    /// The once-per-tick phase check. When the live collection has emptied
    /// out, exactly one generational transition runs; returns whether the
    /// population was regenerated.
    pub fn tick(&mut self) -> bool {
        if !self.live.is_empty() {
            return false;
        }

        self.phase = Phase::Regenerating;
        let regenerated = self.regenerate();
        self.phase = Phase::Live;

        regenerated
    }
}

// private API
impl Population {
    fn regenerate(&mut self) -> bool {
        self.report.num_retired = self.retired.len();

        let species = self.speciate();
        self.track_best(&species);

        // no species means nothing retired this generation, so there is
        // nothing to repopulate from
        if species.is_empty() {
            debug!("no retired genomes to regenerate from");
            return false;
        }

        let quota = self.parameters.setup.population / species.len();
        for species in &species {
            for _ in 0..quota {
                let mut offspring = Genome::from(&species.representative);
                offspring.mutate(&mut self.rng, &self.parameters);
                if self.rng.gamble(self.parameters.mutation.structure) {
                    let _ = offspring.add_node(&mut self.rng);
                }
                if self.rng.gamble(self.parameters.mutation.structure) {
                    let _ = offspring.add_connection(&mut self.rng);
                }
                self.live.push(offspring);
            }
        }

        self.generation += 1;
        self.report.num_generation = self.generation;
        self.report.num_species = species.len();
        self.report.num_offspring = self.live.len();

        info!(
            "generation {}: {} species, {} offspring",
            self.generation,
            species.len(),
            self.live.len()
        );

        true
    }

    /// Clusters the retired genomes: the first unclustered genome seeds a
    /// species, every remaining genome within the compatibility threshold of
    /// that seed joins it, and the sweep repeats until none are left.
    fn speciate(&mut self) -> Vec<Species> {
        let threshold = self.parameters.compatibility.threshold;
        let alignment = self.parameters.compatibility.alignment;

        let mut species: Vec<Species> = Vec::new();
        let mut unclustered = mem::replace(&mut self.retired, Vec::new());

        while let Some(seed) = unclustered.pop() {
            let mut current = Species::new(species.len(), seed);

            let (members, rest): (Vec<_>, Vec<_>) =
                unclustered.into_iter().partition(|genome| {
                    compatibility::distance(&current.representative, genome, alignment) <= threshold
                });
            for member in members {
                current.admit(member);
            }

            unclustered = rest;
            species.push(current);
        }

        species
    }

    fn track_best(&mut self, species: &[Species]) {
        for species in species {
            let best = species.best_fitness();
            if best > self.report.best_fitness {
                self.report.best_fitness = best;
                self.report.best_generation = self.generation;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Phase, Population};
    use crate::compatibility::Alignment;
    use crate::parameters::Parameters;

    fn test_parameters(population: usize) -> Parameters {
        let mut parameters: Parameters = Default::default();
        parameters.setup.population = population;
        parameters.setup.input_nodes = 2;
        parameters.setup.output_nodes = 1;
        parameters
    }

    #[test]
    fn emptied_population_triggers_exactly_one_transition() {
        let mut population = Population::new(test_parameters(10), 0);
        assert_eq!(population.live().len(), 10);
        assert_eq!(population.generation(), 1);

        while !population.live().is_empty() {
            population.set_fitness(0, 1.0);
            population.kill(0);
            // live agents remain, so ticks must not transition yet
            if !population.live().is_empty() {
                assert!(!population.tick());
            }
        }

        assert!(population.tick());
        assert_eq!(population.live().len(), 10);
        assert_eq!(population.generation(), 2);
        assert_eq!(population.phase(), Phase::Live);
        assert!(population.retired().is_empty());

        // the next tick finds a live population and does nothing
        assert!(!population.tick());
        assert_eq!(population.generation(), 2);
    }

    #[test]
    fn tick_without_retired_genomes_is_a_no_op() {
        let mut population = Population::new(test_parameters(0), 0);

        assert!(!population.tick());
        assert_eq!(population.generation(), 1);
        assert!(population.live().is_empty());
    }

    #[test]
    fn kill_out_of_range_is_rejected() {
        let mut population = Population::new(test_parameters(3), 0);

        assert!(!population.kill(17));
        assert_eq!(population.live().len(), 3);
        assert!(population.retired().is_empty());
    }

    #[test]
    fn identical_genomes_cluster_into_one_species() {
        let mut population = Population::new(test_parameters(6), 0);

        // make everyone a clone of the first genome, then retire them all
        let template = population.live()[0].clone();
        for index in 0..population.live().len() {
            *population.genome_mut(index).unwrap() = template.clone();
        }
        while !population.live().is_empty() {
            population.kill(0);
        }

        assert!(population.tick());
        assert_eq!(population.report().num_species, 1);
        assert_eq!(population.report().num_offspring, 6);
    }

    #[test]
    fn structurally_distinct_genomes_split_into_species() {
        let mut parameters = test_parameters(6);
        parameters.compatibility.alignment = Alignment::InnovationAligned;
        let mut population = Population::new(parameters, 1);

        // freshly constructed genomes differ in weights, so the zero
        // threshold separates them
        while !population.live().is_empty() {
            population.kill(0);
        }

        assert!(population.tick());
        assert!(population.report().num_species > 1);
    }

    #[test]
    fn fitness_is_recorded_in_the_report() {
        let mut population = Population::new(test_parameters(4), 0);

        population.set_fitness(2, 9.5);
        while !population.live().is_empty() {
            population.kill(0);
        }
        population.tick();

        assert_eq!(population.report().best_fitness, 9.5);
        assert_eq!(population.report().num_retired, 4);
    }
}
