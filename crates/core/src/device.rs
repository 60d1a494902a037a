//! Interface périphérique pour MolFS
//!
//! Le système de fichiers moléculaire pilote le codec via trois
//! opérations: positionner la session sur un (pool, bloc), encoder
//! des octets en oligos, décoder des oligos en octets. Le couple
//! courant est un état de session de l'appelant, pas du codec.

use crate::codec::{BlockDecoder, BlockEncoder, DecodeStats};
use crate::error::Result;
use crate::file::DEFAULT_BLOCK_SIZE;
use crate::primer::PrimerRegistry;

/// Contrat du périphérique vu par MolFS
pub trait MolFsDevice {
    /// Positionne la session sur un (pool, bloc)
    fn set_current(&mut self, pool: u32, block: u32);

    /// Encode un bloc d'octets pour le (pool, bloc) courant
    fn encode(&self, data: &[u8]) -> Result<Vec<String>>;

    /// Décode un multiset d'oligos pour le (pool, bloc) courant
    fn decode(&self, oligos: &[String]) -> Result<(Vec<u8>, DecodeStats)>;
}

/// Périphérique MolFS fondé sur le codec de Church
///
/// Possède son registre d'amorces: valeur construite par l'appelant
/// et passée à la création, jamais d'état global.
pub struct ChurchDevice {
    registry: PrimerRegistry,
    block_size: usize,
    pool: u32,
    block: u32,
}

impl ChurchDevice {
    /// Crée un périphérique sur un registre d'amorces
    pub fn new(registry: PrimerRegistry) -> Self {
        Self {
            registry,
            block_size: DEFAULT_BLOCK_SIZE,
            pool: 0,
            block: 0,
        }
    }

    /// Change la taille de bloc de la session
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Taille de bloc de la session
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Accès au registre d'amorces
    pub fn registry(&self) -> &PrimerRegistry {
        &self.registry
    }

    /// Enregistre une paire d'amorces
    pub fn register_primers(
        &mut self,
        pool: u32,
        block: u32,
        forward: impl Into<String>,
        reverse: impl Into<String>,
    ) {
        self.registry.register(pool, block, forward, reverse);
    }
}

impl MolFsDevice for ChurchDevice {
    fn set_current(&mut self, pool: u32, block: u32) {
        self.pool = pool;
        self.block = block;
    }

    fn encode(&self, data: &[u8]) -> Result<Vec<String>> {
        let encoded = BlockEncoder::new(&self.registry).encode_block(self.pool, self.block, data)?;
        Ok(encoded.oligos)
    }

    fn decode(&self, oligos: &[String]) -> Result<(Vec<u8>, DecodeStats)> {
        BlockDecoder::new(&self.registry).decode_block(oligos, self.pool, self.block, None)
    }
}
