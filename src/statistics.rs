use serde::Serialize;

/// Snapshot of the last generational transition, refreshed by the
/// population controller every time it regenerates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub num_generation: usize,
    pub num_species: usize,
    pub num_offspring: usize,
    pub num_retired: usize,
    pub best_fitness: f64,
    pub best_generation: usize,
}
