//! Canal de transmission ADN simulé

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error_model::ErrorModel;
use crate::metrics::SimulationMetrics;

const BASES: [char; 4] = ['A', 'C', 'G', 'T'];

/// Canal bruité appliquant substitutions, insertions et délétions
///
/// Le générateur est seedé: deux canaux construits avec le même
/// modèle produisent exactement les mêmes corruptions.
pub struct NoisyChannel {
    model: ErrorModel,
    rng: ChaCha8Rng,
}

impl NoisyChannel {
    /// Crée un nouveau canal
    pub fn new(model: ErrorModel) -> Self {
        let seed = model.seed;
        Self {
            model,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Transmet un oligo à travers le canal
    pub fn transmit(&mut self, oligo: &str) -> (String, SimulationMetrics) {
        let mut corrupted = String::with_capacity(oligo.len() + 4);
        let mut metrics = SimulationMetrics::new();

        let sub_rate = self.model.substitution_rate;
        let ins_rate = self.model.insertion_rate;
        let del_rate = self.model.deletion_rate;

        for base in oligo.chars() {
            let roll: f64 = self.rng.gen();

            if roll < sub_rate {
                corrupted.push(self.substitute_base(base));
                metrics.substitutions += 1;
            } else if roll < sub_rate + ins_rate {
                corrupted.push(self.random_base());
                corrupted.push(base);
                metrics.insertions += 1;
            } else if roll < sub_rate + ins_rate + del_rate {
                metrics.deletions += 1;
            } else {
                corrupted.push(base);
            }
        }

        metrics.total_bases = oligo.len();
        (corrupted, metrics)
    }

    /// Transmet un multiset d'oligos
    pub fn transmit_all(&mut self, oligos: &[String]) -> (Vec<String>, SimulationMetrics) {
        let mut total = SimulationMetrics::new();
        let mut output = Vec::with_capacity(oligos.len());

        for oligo in oligos {
            let (corrupted, metrics) = self.transmit(oligo);
            total.merge(&metrics);
            output.push(corrupted);
        }

        (output, total)
    }

    /// Réinitialise le générateur au seed du modèle
    pub fn reset_rng(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.model.seed);
    }

    /// Substitue une base par une base différente
    fn substitute_base(&mut self, base: char) -> char {
        let mut new_base = base;
        while new_base == base {
            new_base = BASES[self.rng.gen_range(0..4)];
        }
        new_base
    }

    /// Tire une base uniforme
    fn random_base(&mut self) -> char {
        BASES[self.rng.gen_range(0..4)]
    }
}
