//! Découpage de fichiers en blocs et réassemblage
//!
//! Le fichier est découpé en blocs de taille fixe, chacun dispatché
//! vers un ou plusieurs pools par une stratégie de distribution. Au
//! retour, les copies redondantes d'un même bloc sont départagées par
//! leurs statistiques de décodage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::codec::{BlockEncoder, DecodedBlock, EncodedBlock};
use crate::error::Result;
use crate::primer::PrimerRegistry;

/// Taille de bloc par défaut (5 Kio)
pub const DEFAULT_BLOCK_SIZE: usize = 5120;

/// Découpe un fichier en blocs indexés de taille fixe
///
/// Tous les blocs font exactement `block_size` octets sauf
/// éventuellement le dernier.
pub fn split_blocks(data: &[u8], block_size: usize) -> Vec<(u32, &[u8])> {
    assert!(block_size > 0, "taille de bloc nulle");

    data.chunks(block_size)
        .enumerate()
        .map(|(index, chunk)| (index as u32, chunk))
        .collect()
}

/// Stratégie de distribution des blocs vers les pools
///
/// Politique enfichable: `(index du bloc, nombre total de blocs)` →
/// liste de pools destinataires. Un bloc envoyé vers plusieurs pools
/// est encodé une fois par pool, avec les amorces de chaque pool.
pub trait Distribution {
    fn pools_for(&self, block_index: u32, total_blocks: u32) -> Vec<u32>;
}

/// Tous les blocs vers un pool unique
pub struct SinglePool(pub u32);

impl Distribution for SinglePool {
    fn pools_for(&self, _block_index: u32, _total_blocks: u32) -> Vec<u32> {
        vec![self.0]
    }
}

/// Répartition cyclique sur une liste de pools
pub struct RoundRobin(pub Vec<u32>);

impl Distribution for RoundRobin {
    fn pools_for(&self, block_index: u32, _total_blocks: u32) -> Vec<u32> {
        if self.0.is_empty() {
            return Vec::new();
        }
        vec![self.0[block_index as usize % self.0.len()]]
    }
}

/// Chaque bloc répliqué sur tous les pools
pub struct MirrorAll(pub Vec<u32>);

impl Distribution for MirrorAll {
    fn pools_for(&self, _block_index: u32, _total_blocks: u32) -> Vec<u32> {
        self.0.clone()
    }
}

impl<F> Distribution for F
where
    F: Fn(u32, u32) -> Vec<u32>,
{
    fn pools_for(&self, block_index: u32, total_blocks: u32) -> Vec<u32> {
        self(block_index, total_blocks)
    }
}

/// Encode un fichier complet: découpage, dispatch, encodage par bloc
pub fn encode_file(
    registry: &PrimerRegistry,
    data: &[u8],
    block_size: usize,
    strategy: &dyn Distribution,
) -> Result<Vec<EncodedBlock>> {
    crate::log_operation!("encode_file", {
        let blocks = split_blocks(data, block_size);
        let total_blocks = blocks.len() as u32;
        let encoder = BlockEncoder::new(registry);

        let mut encoded = Vec::new();
        for (block_index, block_data) in blocks {
            for pool in strategy.pools_for(block_index, total_blocks) {
                encoded.push(encoder.encode_block(pool, block_index, block_data)?);
            }
        }

        tracing::info!(
            "Fichier encodé: {} octets, {} blocs, {} jeux d'oligos",
            data.len(),
            total_blocks,
            encoded.len()
        );

        Ok(encoded)
    })
}

/// Rapport de réassemblage d'un fichier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileReport {
    /// Nombre de blocs attendus
    pub total_blocks: u32,
    /// Octets restitués
    pub total_bytes: usize,
    /// Blocs absents, comblés par des zéros
    pub missing_blocks: Vec<u32>,
    /// Pool ayant servi chaque bloc restitué
    pub served_by: BTreeMap<u32, u32>,
}

impl FileReport {
    /// Variante stricte: erreur si un bloc manque au fichier
    pub fn ensure_complete(&self) -> Result<()> {
        if let Some(&block) = self.missing_blocks.first() {
            return Err(crate::error::MolfsError::BlockMissing(block));
        }
        Ok(())
    }
}

/// Sélectionne la meilleure copie: moins d'adresses manquantes,
/// puis moins de CRC invalides, puis première rencontrée
fn better_copy(current: &DecodedBlock, candidate: &DecodedBlock) -> bool {
    let current_key = (
        current.stats.missing_addresses.len(),
        current.stats.crc_invalid,
    );
    let candidate_key = (
        candidate.stats.missing_addresses.len(),
        candidate.stats.crc_invalid,
    );
    candidate_key < current_key
}

/// Réassemble un fichier depuis des copies de blocs décodés
///
/// Les blocs absents produisent un trou de zéros, signalé dans le
/// rapport. `file_len`, quand elle est connue, tronque les zéros de
/// bourrage du dernier bloc; sinon les blocs non finaux sont ramenés
/// à `block_size` (un bloc de 5120 octets se décode en 427 · 12 =
/// 5124 octets avant rognage).
pub fn reassemble_file(
    copies: Vec<DecodedBlock>,
    block_size: usize,
    total_blocks: Option<u32>,
    file_len: Option<usize>,
) -> (Vec<u8>, FileReport) {
    assert!(block_size > 0, "taille de bloc nulle");

    // Meilleure copie par index de bloc
    let mut best: BTreeMap<u32, DecodedBlock> = BTreeMap::new();
    for copy in copies {
        match best.entry(copy.block) {
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(copy);
            }
            std::collections::btree_map::Entry::Occupied(mut slot) => {
                if better_copy(slot.get(), &copy) {
                    slot.insert(copy);
                }
            }
        }
    }

    let total = total_blocks
        .or_else(|| file_len.map(|len| len.div_ceil(block_size) as u32))
        .or_else(|| best.keys().max().map(|&max| max + 1))
        .unwrap_or(0);

    let mut report = FileReport {
        total_blocks: total,
        ..Default::default()
    };
    let mut output = Vec::new();

    for block_index in 0..total {
        let expected = match file_len {
            Some(len) => {
                let offset = block_index as usize * block_size;
                block_size.min(len.saturating_sub(offset))
            }
            None => block_size,
        };

        match best.get(&block_index) {
            Some(copy) => {
                report.served_by.insert(block_index, copy.pool);

                let take = if file_len.is_none() && block_index == total - 1 {
                    // Dernier bloc, longueur réelle inconnue: tout garder
                    copy.data.len()
                } else {
                    expected
                };

                if copy.data.len() >= take {
                    output.extend_from_slice(&copy.data[..take]);
                } else {
                    output.extend_from_slice(&copy.data);
                    output.resize(output.len() + take - copy.data.len(), 0);
                }
            }
            None => {
                tracing::warn!("Bloc manquant: {}", block_index);
                report.missing_blocks.push(block_index);
                output.resize(output.len() + expected, 0);
            }
        }
    }

    if let Some(len) = file_len {
        output.truncate(len);
    }

    report.total_bytes = output.len();
    (output, report)
}
