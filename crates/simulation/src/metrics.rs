//! Métriques de simulation

use serde::{Deserialize, Serialize};

/// Métriques collectées pendant une transmission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationMetrics {
    /// Nombre total de bases transmises
    pub total_bases: usize,

    /// Nombre de substitutions
    pub substitutions: usize,

    /// Nombre d'insertions
    pub insertions: usize,

    /// Nombre de délétions
    pub deletions: usize,
}

impl SimulationMetrics {
    /// Crée de nouvelles métriques vides
    pub fn new() -> Self {
        Self::default()
    }

    /// Nombre total de bases affectées
    pub fn affected_bases(&self) -> usize {
        self.substitutions + self.insertions + self.deletions
    }

    /// Taux d'erreur total
    pub fn error_rate(&self) -> f64 {
        if self.total_bases == 0 {
            return 0.0;
        }
        self.affected_bases() as f64 / self.total_bases as f64
    }

    /// Cumule d'autres métriques dans celles-ci
    pub fn merge(&mut self, other: &SimulationMetrics) {
        self.total_bases += other.total_bases;
        self.substitutions += other.substitutions;
        self.insertions += other.insertions;
        self.deletions += other.deletions;
    }

    /// Formate les métriques en tableau
    pub fn format_table(&self) -> String {
        format!(
            "┌────────────────────────────────────┐\n\
             │ Métriques de Simulation            │\n\
             ├────────────────────────────────────┤\n\
             │ Bases totales    : {:>8}        │\n\
             │ Substitutions    : {:>8}        │\n\
             │ Insertions       : {:>8}        │\n\
             │ Délétions        : {:>8}        │\n\
             │ Taux d'erreur    : {:>7.3}%        │\n\
             └────────────────────────────────────┘",
            self.total_bases,
            self.substitutions,
            self.insertions,
            self.deletions,
            100.0 * self.error_rate()
        )
    }
}

/// Collecteur de métriques sur plusieurs transmissions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsCollector {
    metrics: Vec<SimulationMetrics>,
}

impl MetricsCollector {
    /// Crée un nouveau collecteur
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute des métriques
    pub fn add(&mut self, metrics: SimulationMetrics) {
        self.metrics.push(metrics);
    }

    /// Agrège toutes les transmissions
    pub fn total(&self) -> SimulationMetrics {
        let mut total = SimulationMetrics::new();
        for m in &self.metrics {
            total.merge(m);
        }
        total
    }

    /// Nombre de transmissions
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Vérifie si vide
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
