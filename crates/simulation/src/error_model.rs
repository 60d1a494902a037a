//! Modèle d'erreur du canal ADN

use serde::{Deserialize, Serialize};

/// Taux d'erreur par base et seed de reproduction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorModel {
    /// Taux de substitution (0.0-1.0)
    pub substitution_rate: f64,

    /// Taux d'insertion (0.0-1.0)
    pub insertion_rate: f64,

    /// Taux de délétion (0.0-1.0)
    pub deletion_rate: f64,

    /// Seed du générateur pseudo-aléatoire
    pub seed: u64,
}

impl Default for ErrorModel {
    fn default() -> Self {
        Self {
            substitution_rate: 0.01,
            insertion_rate: 0.005,
            deletion_rate: 0.005,
            seed: 42,
        }
    }
}

impl ErrorModel {
    /// Modèle sans erreur (canal parfait)
    pub fn noiseless() -> Self {
        Self {
            substitution_rate: 0.0,
            insertion_rate: 0.0,
            deletion_rate: 0.0,
            seed: 0,
        }
    }

    /// Modèle limité aux substitutions
    pub fn substitutions_only(rate: f64, seed: u64) -> Self {
        Self {
            substitution_rate: rate,
            insertion_rate: 0.0,
            deletion_rate: 0.0,
            seed,
        }
    }

    /// Taux d'erreur cumulé
    pub fn total_rate(&self) -> f64 {
        self.substitution_rate + self.insertion_rate + self.deletion_rate
    }
}
