use crate::genome::Genome;

/// One cluster produced by speciation. The seed genome that opened the
/// species is retained as its representative and is what the next
/// generation's offspring are cloned from.
#[derive(Debug, Clone)]
pub struct Species {
    pub id: usize,
    pub representative: Genome,
    pub members: Vec<Genome>,
}

impl Species {
    pub fn new(id: usize, mut seed: Genome) -> Self {
        seed.species = Some(id);
        Species {
            id,
            representative: seed,
            members: Vec::new(),
        }
    }

    pub fn admit(&mut self, mut genome: Genome) {
        genome.species = Some(self.id);
        self.members.push(genome);
    }

    pub fn len(&self) -> usize {
        self.members.len() + 1
    }

    pub fn best_fitness(&self) -> f64 {
        self.members
            .iter()
            .map(|member| member.fitness)
            .fold(self.representative.fitness, f64::max)
    }
}
