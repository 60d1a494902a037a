//! Conteneurs d'oligos (CSV, FASTQ) et sidecar de métadonnées
//!
//! Les colonnes de métadonnées du CSV sont purement indicatives:
//! la classification et l'extraction d'adresse se font toujours
//! depuis l'ADN lui-même.

use std::io::{BufRead, Read, Write};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{MolfsError, Result};

/// Schéma d'encodage inscrit dans les sidecars
pub const SCHEME_NAME: &str = "church-crc32";

/// Enregistrement CSV: un oligo par ligne
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OligoRecord {
    /// Index de bloc (indicatif)
    pub block: u32,
    /// Pool (indicatif)
    pub pool: u32,
    /// Adresse (indicative)
    pub address: u32,
    /// Séquence de l'oligo
    pub oligo: String,
}

/// Écrit un ensemble d'oligos au format CSV
///
/// Les oligos sont supposés en ordre d'adresse, comme produits par
/// l'encodeur de bloc.
pub fn write_csv<W: Write>(writer: W, pool: u32, block: u32, oligos: &[String]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (address, oligo) in oligos.iter().enumerate() {
        csv_writer.serialize(OligoRecord {
            block,
            pool,
            address: address as u32,
            oligo: oligo.clone(),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Lit les oligos d'un conteneur CSV
///
/// Seule la colonne d'oligos est requise: la première colonne dont
/// l'en-tête contient « oligo » (insensible à la casse), sinon la
/// dernière colonne.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column = headers
        .iter()
        .position(|h| h.to_ascii_lowercase().contains("oligo"))
        .unwrap_or_else(|| headers.len().saturating_sub(1));

    let mut oligos = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if let Some(field) = record.get(column) {
            let sequence = field.trim();
            if !sequence.is_empty() {
                oligos.push(sequence.to_string());
            }
        }
    }

    Ok(oligos)
}

/// Lit les séquences d'un fichier FASTQ
///
/// Enregistrements de 4 lignes; seule la ligne de séquence est
/// consommée, les scores de qualité sont ignorés.
pub fn read_fastq<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut sequences = Vec::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        if line_number % 4 == 1 {
            let sequence = line.trim();
            if !sequence.is_empty() {
                sequences.push(sequence.to_string());
            }
        }
    }

    Ok(sequences)
}

/// Sidecar de métadonnées accompagnant chaque bloc encodé
///
/// C'est le seul endroit où la longueur originale du bloc est
/// préservée; sans lui, le décodeur restitue `K · 12` octets et le
/// réassembleur tronque d'après la taille totale du fichier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockMetadata {
    /// Index du bloc dans le fichier
    pub block_index: u32,
    /// Pool de destination
    pub pool: u32,
    /// Longueur du bloc avant bourrage, en octets
    pub original_len: usize,
    /// Nombre d'oligos produits
    pub num_oligos: usize,
    /// Schéma d'encodage
    pub scheme: String,
    /// SHA-256 des octets originaux du bloc
    pub checksum: String,
    /// Horodatage de l'encodage
    pub created_at: DateTime<Utc>,
}

impl BlockMetadata {
    /// Calcule les métadonnées d'un bloc encodé
    pub fn compute(pool: u32, block_index: u32, data: &[u8], num_oligos: usize) -> Self {
        let checksum = format!("{:x}", Sha256::digest(data));

        Self {
            block_index,
            pool,
            original_len: data.len(),
            num_oligos,
            scheme: SCHEME_NAME.to_string(),
            checksum,
            created_at: Utc::now(),
        }
    }

    /// Sérialise le sidecar en JSON
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Relit un sidecar JSON
    pub fn read_json<R: Read>(reader: R) -> Result<Self> {
        let metadata = serde_json::from_reader(reader)?;
        Ok(metadata)
    }

    /// Vérifie le checksum d'un bloc décodé
    pub fn verify_checksum(&self, data: &[u8]) -> Result<()> {
        let actual = format!("{:x}", Sha256::digest(data));
        if actual != self.checksum {
            return Err(MolfsError::ChecksumMismatch {
                expected: self.checksum.clone(),
                actual,
            });
        }
        Ok(())
    }
}
