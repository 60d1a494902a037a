//! Décodeur de blocs: classification, validation CRC, réassemblage
//!
//! Le décodage est tolérant aux pertes: les séquences invalides sont
//! écartées et comptées, jamais remontées en erreur. Pipeline:
//!
//! 1. classification par amorces (registre, ordre d'enregistrement)
//! 2. découpage en champs et décodage canal
//! 3. barrière CRC32 sur la charge utile brute
//! 4. déduplication par adresse
//! 5. comblement des adresses manquantes par des zéros
//! 6. concaténation en ordre d'adresse croissant

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::crc::crc32;
use crate::error::{MolfsError, Result};
use crate::oligo::{parse_oligo, PAYLOAD_BYTES};
use crate::primer::{PrimerPair, PrimerRegistry};

/// Compteurs du décodage d'un bloc
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeStats {
    /// Oligos dont le CRC32 correspond
    pub crc_valid: usize,
    /// Oligos écartés pour CRC32 invalide
    pub crc_invalid: usize,
    /// Oligos sans champ CRC exploitable (toujours 0 en géométrie fixe)
    pub crc_missing: usize,
    /// Doublons d'adresse avec charges utiles divergentes mais CRC valides
    pub crc_conflict: usize,
    /// Séquences sans paire d'amorces enregistrée
    pub unclassified: usize,
    /// Oligos de longueur incohérente avec la géométrie
    pub malformed: usize,
    /// Oligos contenant un caractère hors ACGT
    pub invalid_base: usize,
    /// Adresses sans oligo survivant, comblées par des zéros
    pub missing_addresses: Vec<u32>,
}

impl DecodeStats {
    /// Vrai si aucune anomalie n'a été rencontrée
    pub fn is_clean(&self) -> bool {
        self.crc_invalid == 0
            && self.crc_conflict == 0
            && self.unclassified == 0
            && self.malformed == 0
            && self.invalid_base == 0
            && self.missing_addresses.is_empty()
    }

    /// Formate les compteurs sous forme de tableau
    pub fn format_table(&self) -> String {
        format!(
            "┌────────────────────────────────────┐\n\
             │ Statistiques de Décodage           │\n\
             ├────────────────────────────────────┤\n\
             │ CRC valides      : {:>6}          │\n\
             │ CRC invalides    : {:>6}          │\n\
             │ CRC absents      : {:>6}          │\n\
             │ Conflits CRC     : {:>6}          │\n\
             │ Non classifiés   : {:>6}          │\n\
             │ Malformés        : {:>6}          │\n\
             │ Bases invalides  : {:>6}          │\n\
             │ Adresses perdues : {:>6}          │\n\
             └────────────────────────────────────┘",
            self.crc_valid,
            self.crc_invalid,
            self.crc_missing,
            self.crc_conflict,
            self.unclassified,
            self.malformed,
            self.invalid_base,
            self.missing_addresses.len()
        )
    }
}

/// Bloc décodé avec ses statistiques
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedBlock {
    /// Pool d'origine
    pub pool: u32,
    /// Index du bloc
    pub block: u32,
    /// Octets reconstruits (`K · 12` sans longueur attendue)
    pub data: Vec<u8>,
    /// Compteurs du décodage
    pub stats: DecodeStats,
}

/// Résultat d'un décodage multi-blocs
#[derive(Debug, Clone, Default)]
pub struct DecodedSet {
    /// Blocs décodés, indexés par (pool, bloc)
    pub blocks: BTreeMap<(u32, u32), DecodedBlock>,
    /// Séquences sans paire d'amorces connue
    pub unclassified: usize,
}

impl DecodedSet {
    /// Consomme l'ensemble en liste de blocs décodés
    pub fn into_blocks(self) -> Vec<DecodedBlock> {
        self.blocks.into_values().collect()
    }
}

/// Accumulateur par (pool, bloc) pendant la classification
#[derive(Default)]
struct BlockAccumulator {
    survivors: HashMap<u32, [u8; PAYLOAD_BYTES]>,
    stats: DecodeStats,
}

impl BlockAccumulator {
    /// Applique le parsing, la barrière CRC et la déduplication
    fn ingest(&mut self, sequence: &str, primers: &PrimerPair) {
        let parsed = match parse_oligo(sequence, primers.forward.len(), primers.reverse.len()) {
            Ok(parsed) => parsed,
            Err(MolfsError::InvalidBase(_)) => {
                self.stats.invalid_base += 1;
                return;
            }
            Err(_) => {
                self.stats.malformed += 1;
                return;
            }
        };

        // Barrière CRC: recalculé sur les 12 octets bruts
        if crc32(&parsed.payload) != parsed.crc {
            self.stats.crc_invalid += 1;
            tracing::debug!(
                "Oligo écarté: CRC invalide à l'adresse candidate {}",
                parsed.address
            );
            return;
        }
        self.stats.crc_valid += 1;

        match self.survivors.get(&parsed.address) {
            None => {
                self.survivors.insert(parsed.address, parsed.payload);
            }
            Some(existing) if *existing == parsed.payload => {
                // Copie redondante identique, conservée silencieusement
            }
            Some(_) => {
                // Deux copies CRC-valides divergentes: la première gagne
                self.stats.crc_conflict += 1;
                tracing::warn!(
                    "Conflit de redondance à l'adresse {}: copies CRC-valides divergentes",
                    parsed.address
                );
            }
        }
    }

    /// Concatène les charges utiles en ordre d'adresse croissant
    ///
    /// Sans longueur attendue, le bloc restitué fait `K · 12` octets
    /// avec `K = adresse max + 1`; les zéros de bourrage sont retirés
    /// plus haut, par le sidecar ou le réassembleur de fichier.
    fn assemble(mut self, expected_len: Option<usize>) -> (Vec<u8>, DecodeStats) {
        let num_chunks = match expected_len {
            Some(len) => len.div_ceil(PAYLOAD_BYTES),
            None => self
                .survivors
                .keys()
                .max()
                .map(|&max| max as usize + 1)
                .unwrap_or(0),
        };

        let mut data = Vec::with_capacity(num_chunks * PAYLOAD_BYTES);
        for address in 0..num_chunks as u32 {
            match self.survivors.get(&address) {
                Some(payload) => data.extend_from_slice(payload),
                None => {
                    self.stats.missing_addresses.push(address);
                    data.extend_from_slice(&[0u8; PAYLOAD_BYTES]);
                }
            }
        }

        if let Some(len) = expected_len {
            data.truncate(len);
        }

        (data, self.stats)
    }
}

/// Décodeur de blocs
///
/// Pur: fonction de (registre, entrées). Le registre n'est lu qu'en
/// classification, les lectures concurrentes sont sûres.
pub struct BlockDecoder<'a> {
    registry: &'a PrimerRegistry,
}

impl<'a> BlockDecoder<'a> {
    /// Crée un décodeur sur un registre d'amorces
    pub fn new(registry: &'a PrimerRegistry) -> Self {
        Self { registry }
    }

    /// Décode les séquences visant un (pool, bloc) précis
    ///
    /// Les séquences classifiées vers un autre couple enregistré sont
    /// ignorées sans compteur (elles appartiennent à un autre bloc);
    /// celles sans amorces connues incrémentent `unclassified`.
    pub fn decode_block(
        &self,
        sequences: &[String],
        pool: u32,
        block: u32,
        expected_len: Option<usize>,
    ) -> Result<(Vec<u8>, DecodeStats)> {
        let primers = self
            .registry
            .get(pool, block)
            .ok_or(MolfsError::PrimerMissing { pool, block })?;

        let mut accumulator = BlockAccumulator::default();

        for sequence in sequences {
            match self.registry.classify(sequence) {
                None => accumulator.stats.unclassified += 1,
                Some(key) if key != (pool, block) => continue,
                Some(_) => accumulator.ingest(sequence, primers),
            }
        }

        Ok(accumulator.assemble(expected_len))
    }

    /// Décode un multiset de séquences vers tous les blocs reconnus
    ///
    /// Retourne un bloc par (pool, bloc) rencontré, chacun avec ses
    /// propres compteurs; le compteur `unclassified` est global.
    pub fn decode_all(&self, sequences: &[String]) -> DecodedSet {
        let mut groups: BTreeMap<(u32, u32), BlockAccumulator> = BTreeMap::new();
        let mut unclassified = 0usize;

        for sequence in sequences {
            match self.registry.classify_entry(sequence) {
                None => unclassified += 1,
                Some((key, primers)) => {
                    groups.entry(key).or_default().ingest(sequence, primers);
                }
            }
        }

        let blocks = groups
            .into_iter()
            .map(|((pool, block), accumulator)| {
                let (data, stats) = accumulator.assemble(None);
                (
                    (pool, block),
                    DecodedBlock {
                        pool,
                        block,
                        data,
                        stats,
                    },
                )
            })
            .collect();

        DecodedSet {
            blocks,
            unclassified,
        }
    }
}
