//! Types d'erreurs pour le codec MolFS

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MolfsError {
    #[error("Amorces non enregistrées pour le pool {pool}, bloc {block}")]
    PrimerMissing { pool: u32, block: u32 },

    #[error("Base invalide: {0}")]
    InvalidBase(char),

    #[error("Oligo malformé: longueur {len}, attendu {expected}")]
    MalformedOligo { len: usize, expected: usize },

    #[error("Checksum CRC32 invalide: attendu {expected:#010x}, obtenu {actual:#010x}")]
    CrcMismatch { expected: u32, actual: u32 },

    #[error("Checksum SHA-256 invalide: attendu {expected}, obtenu {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Adresse hors plage: {0} (max: 524287)")]
    AddressOutOfRange(u32),

    #[error("Espace d'adressage épuisé: {needed} oligos nécessaires, maximum {max}")]
    AddressSpaceExhausted { needed: usize, max: usize },

    #[error("Bloc manquant: {0}")]
    BlockMissing(u32),

    #[error("Erreur IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erreur de sérialisation: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Erreur CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Erreur d'encodage: {0}")]
    Encoding(String),

    #[error("Erreur de décodage: {0}")]
    Decoding(String),
}

pub type Result<T> = std::result::Result<T, MolfsError>;
