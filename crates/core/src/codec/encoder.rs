//! Encodeur de blocs en oligos adressés

use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::container::BlockMetadata;
use crate::error::{MolfsError, Result};
use crate::oligo::{build_oligo, MAX_ADDRESSES, PAYLOAD_BYTES};
use crate::primer::PrimerRegistry;

/// Bloc encodé: l'ensemble d'oligos et son sidecar
#[derive(Debug, Clone)]
pub struct EncodedBlock {
    /// Pool de destination
    pub pool: u32,
    /// Index du bloc
    pub block: u32,
    /// Oligos en ordre d'adresse
    pub oligos: Vec<String>,
    /// Métadonnées du bloc (sidecar)
    pub metadata: BlockMetadata,
}

/// Encodeur de blocs
///
/// Pur: fonction de (registre, entrées), sans état propre. Les oligos
/// d'un bloc sont indépendants, leur construction est parallélisée
/// tout en préservant l'ordre d'adresse.
pub struct BlockEncoder<'a> {
    registry: &'a PrimerRegistry,
}

impl<'a> BlockEncoder<'a> {
    /// Crée un encodeur sur un registre d'amorces
    pub fn new(registry: &'a PrimerRegistry) -> Self {
        Self { registry }
    }

    /// Encode un bloc d'octets en oligos pour un (pool, bloc)
    ///
    /// Le bloc est bourré de zéros jusqu'au multiple de 12; la
    /// longueur originale est préservée dans le sidecar. Les adresses
    /// émises sont exactement `0..K-1`.
    pub fn encode_block(&self, pool: u32, block: u32, data: &[u8]) -> Result<EncodedBlock> {
        let primers = self
            .registry
            .get(pool, block)
            .ok_or(MolfsError::PrimerMissing { pool, block })?;

        let num_chunks = data.len().div_ceil(PAYLOAD_BYTES);
        if num_chunks > MAX_ADDRESSES {
            return Err(MolfsError::AddressSpaceExhausted {
                needed: num_chunks,
                max: MAX_ADDRESSES,
            });
        }

        let oligos: Vec<String> = (0..num_chunks)
            .into_par_iter()
            .map(|address| {
                let start = address * PAYLOAD_BYTES;
                let end = (start + PAYLOAD_BYTES).min(data.len());

                let mut payload = [0u8; PAYLOAD_BYTES];
                payload[..end - start].copy_from_slice(&data[start..end]);

                build_oligo(&primers.forward, &primers.reverse, address as u32, &payload)
            })
            .collect::<Result<Vec<String>>>()?;

        tracing::debug!(
            "Bloc {} encodé: {} octets en {} oligos (pool {})",
            block,
            data.len(),
            oligos.len(),
            pool
        );

        let metadata = BlockMetadata::compute(pool, block, data, oligos.len());

        Ok(EncodedBlock {
            pool,
            block,
            oligos,
            metadata,
        })
    }
}
