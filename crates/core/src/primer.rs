//! Registre d'amorces et classification des séquences
//!
//! Chaque couple (pool, bloc) est identifié par une paire d'amorces
//! PCR fournie par l'appelant. Le registre est une valeur possédée
//! par l'appelant, passée explicitement aux encodeurs et décodeurs:
//! pas d'état global.

use serde::{Deserialize, Serialize};

/// Amorce avant universelle par défaut
pub const DEFAULT_FORWARD_PRIMER: &str = "CTACACGACGCTCTTCCGATCT";

/// Amorce arrière universelle par défaut
pub const DEFAULT_REVERSE_PRIMER: &str = "AGATCGGAAGAGCGGTTCAGCA";

/// Paire d'amorces identifiant un (pool, bloc)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimerPair {
    pub forward: String,
    pub reverse: String,
}

impl PrimerPair {
    pub fn new(forward: impl Into<String>, reverse: impl Into<String>) -> Self {
        Self {
            forward: forward.into(),
            reverse: reverse.into(),
        }
    }

    /// Paire universelle par défaut
    pub fn universal() -> Self {
        Self::new(DEFAULT_FORWARD_PRIMER, DEFAULT_REVERSE_PRIMER)
    }

    /// Teste si une séquence est flanquée par cette paire
    pub fn flanks(&self, sequence: &str) -> bool {
        sequence.len() >= self.forward.len() + self.reverse.len()
            && sequence.starts_with(&self.forward)
            && sequence.ends_with(&self.reverse)
    }
}

/// Entrée du registre
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Registration {
    pool: u32,
    block: u32,
    primers: PrimerPair,
}

/// Registre (pool, bloc) → paire d'amorces
///
/// L'ordre d'enregistrement est préservé: le classificateur parcourt
/// les entrées dans cet ordre et retourne la première correspondance,
/// ce qui rend la classification stable et reproductible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrimerRegistry {
    entries: Vec<Registration>,
}

impl PrimerRegistry {
    /// Crée un registre vide
    pub fn new() -> Self {
        Self::default()
    }

    /// Enregistre une paire d'amorces pour un (pool, bloc)
    ///
    /// Écrase toute entrée antérieure pour la même clé, à la même
    /// position d'itération. Si la paire est déjà enregistrée sous une
    /// autre clé, le classificateur ne pourra pas discriminer les deux:
    /// un avertissement est émis.
    pub fn register(
        &mut self,
        pool: u32,
        block: u32,
        forward: impl Into<String>,
        reverse: impl Into<String>,
    ) {
        let primers = PrimerPair::new(forward, reverse);

        if let Some(other) = self
            .entries
            .iter()
            .find(|e| (e.pool, e.block) != (pool, block) && e.primers == primers)
        {
            tracing::warn!(
                "Paire d'amorces dupliquée: ({}, {}) partage les amorces de ({}, {})",
                pool,
                block,
                other.pool,
                other.block
            );
        }

        match self
            .entries
            .iter_mut()
            .find(|e| e.pool == pool && e.block == block)
        {
            Some(entry) => entry.primers = primers,
            None => self.entries.push(Registration {
                pool,
                block,
                primers,
            }),
        }
    }

    /// Retourne la paire d'amorces d'un (pool, bloc)
    pub fn get(&self, pool: u32, block: u32) -> Option<&PrimerPair> {
        self.entries
            .iter()
            .find(|e| e.pool == pool && e.block == block)
            .map(|e| &e.primers)
    }

    /// Identifie le (pool, bloc) d'origine d'une séquence
    ///
    /// Parcourt les entrées dans l'ordre d'enregistrement et retourne
    /// la première paire dont les amorces flanquent la séquence.
    pub fn classify(&self, sequence: &str) -> Option<(u32, u32)> {
        self.classify_entry(sequence).map(|(key, _)| key)
    }

    /// Variante de `classify` retournant aussi la paire d'amorces
    pub fn classify_entry(&self, sequence: &str) -> Option<((u32, u32), &PrimerPair)> {
        self.entries
            .iter()
            .find(|e| e.primers.flanks(sequence))
            .map(|e| ((e.pool, e.block), &e.primers))
    }

    /// Itère sur les couples enregistrés, dans l'ordre d'enregistrement
    pub fn iter(&self) -> impl Iterator<Item = ((u32, u32), &PrimerPair)> {
        self.entries.iter().map(|e| ((e.pool, e.block), &e.primers))
    }

    /// Nombre d'entrées
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Vérifie si le registre est vide
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_two_pools() -> PrimerRegistry {
        let mut registry = PrimerRegistry::new();
        registry.register(1, 0, "AAACCCGGGTTTAAACCCGGGT", "TGGGCCCAAATTTGGGCCCAAA");
        registry.register(2, 0, "CCCAAATTTGGGCCCAAATTTG", "AATTTGGGCCCAAATTTGGGCC");
        registry
    }

    #[test]
    fn test_register_and_get() {
        let registry = registry_two_pools();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get(1, 0).unwrap().forward,
            "AAACCCGGGTTTAAACCCGGGT"
        );
        assert!(registry.get(3, 0).is_none());
    }

    #[test]
    fn test_register_overwrites_in_place() {
        let mut registry = registry_two_pools();
        registry.register(1, 0, "GATTACAGATTACAGATTACAG", "CTAATGTCTAATGTCTAATGTC");

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.get(1, 0).unwrap().forward,
            "GATTACAGATTACAGATTACAG"
        );
        // L'ordre d'itération est préservé
        let keys: Vec<_> = registry.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![(1, 0), (2, 0)]);
    }

    #[test]
    fn test_classify_matches_flanking_primers() {
        let registry = registry_two_pools();
        let sequence = format!(
            "{}{}{}",
            "AAACCCGGGTTTAAACCCGGGT", "ACGTACGT", "TGGGCCCAAATTTGGGCCCAAA"
        );

        assert_eq!(registry.classify(&sequence), Some((1, 0)));
        assert_eq!(registry.classify("ACGTACGTACGT"), None);
    }

    #[test]
    fn test_classify_first_match_wins() {
        let mut registry = PrimerRegistry::new();
        registry.register(5, 1, "AAAA", "TTTT");
        registry.register(6, 2, "AAAA", "TTTT");

        let sequence = "AAAACGCGTTTT";
        assert_eq!(registry.classify(sequence), Some((5, 1)));
    }

    #[test]
    fn test_classify_requires_both_primers() {
        let registry = registry_two_pools();
        let only_forward = format!("{}{}", "AAACCCGGGTTTAAACCCGGGT", "ACGTACGT");
        assert_eq!(registry.classify(&only_forward), None);
    }
}
