//! Géométrie fixe des oligos et framing des champs
//!
//! Un oligo est la concaténation de cinq champs contigus:
//!
//! ```text
//! [amorce avant] [adresse 19 nt] [données 96 nt] [CRC32 32 nt] [amorce arrière]
//! ```
//!
//! Les amorces identifient le couple (pool, bloc); les trois champs
//! centraux sont encodés par le code canal et portent un bit par base.

use serde::{Deserialize, Serialize};

use crate::channel::{
    bits_from_bytes, bits_from_value, bytes_from_bits, decode_dna_to_bits, encode_bits_to_dna,
    value_from_bits,
};
use crate::constraints::check_encoded_field;
use crate::crc::crc32;
use crate::error::{MolfsError, Result};

/// Largeur du champ adresse, en bits et en nucléotides
pub const ADDRESS_BITS: usize = 19;

/// Octets de données par oligo
pub const PAYLOAD_BYTES: usize = 12;

/// Largeur du champ données, en bits et en nucléotides
pub const PAYLOAD_BITS: usize = PAYLOAD_BYTES * 8;

/// Largeur du champ CRC32
pub const CRC_BITS: usize = 32;

/// Longueur du cœur d'un oligo (adresse + données + CRC)
pub const CORE_NT: usize = ADDRESS_BITS + PAYLOAD_BITS + CRC_BITS;

/// Longueur d'amorce recommandée (non imposée par le codec)
pub const PRIMER_NT: usize = 22;

/// Nombre maximal d'adresses par bloc (2^19)
pub const MAX_ADDRESSES: usize = 1 << ADDRESS_BITS;

/// Champs extraits d'un oligo bien formé
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOligo {
    /// Amorce avant telle que lue
    pub forward: String,
    /// Amorce arrière telle que lue
    pub reverse: String,
    /// Adresse décodée (19 bits)
    pub address: u32,
    /// Charge utile décodée
    pub payload: [u8; PAYLOAD_BYTES],
    /// CRC32 décodé depuis l'oligo
    pub crc: u32,
}

impl ParsedOligo {
    /// Vérifie le CRC32 de la charge utile contre le champ décodé
    pub fn crc_matches(&self) -> bool {
        crc32(&self.payload) == self.crc
    }

    /// Variante stricte: erreur en cas de CRC divergent
    ///
    /// Le décodeur de blocs compte les écarts au lieu de les lever;
    /// cette variante sert aux appelants qui exigent un oligo intact.
    pub fn ensure_crc(&self) -> Result<()> {
        let actual = crc32(&self.payload);
        if actual != self.crc {
            return Err(MolfsError::CrcMismatch {
                expected: self.crc,
                actual,
            });
        }
        Ok(())
    }
}

/// Construit un oligo complet pour une adresse et une charge utile
///
/// Le CRC32 est calculé sur les 12 octets bruts avant encodage canal.
/// Chaque champ est encodé indépendamment (historique vide), puis
/// vérifié contre l'invariant d'homopolymère avant émission.
pub fn build_oligo(
    forward: &str,
    reverse: &str,
    address: u32,
    payload: &[u8; PAYLOAD_BYTES],
) -> Result<String> {
    if address as usize >= MAX_ADDRESSES {
        return Err(MolfsError::AddressOutOfRange(address));
    }

    let crc = crc32(payload);

    let address_dna = encode_bits_to_dna(&bits_from_value(address, ADDRESS_BITS));
    let payload_dna = encode_bits_to_dna(&bits_from_bytes(payload));
    let crc_dna = encode_bits_to_dna(&bits_from_value(crc, CRC_BITS));

    check_encoded_field(&address_dna)?;
    check_encoded_field(&payload_dna)?;
    check_encoded_field(&crc_dna)?;

    let mut oligo =
        String::with_capacity(forward.len() + CORE_NT + reverse.len());
    oligo.push_str(forward);
    oligo.push_str(&address_dna);
    oligo.push_str(&payload_dna);
    oligo.push_str(&crc_dna);
    oligo.push_str(reverse);

    Ok(oligo)
}

/// Découpe un oligo en champs et décode le cœur
///
/// La longueur attendue est `fwd_len + 147 + rev_len`; tout écart
/// est rejeté comme oligo malformé. Un caractère hors ACGT dans le
/// cœur est signalé séparément (`InvalidBase`).
pub fn parse_oligo(oligo: &str, fwd_len: usize, rev_len: usize) -> Result<ParsedOligo> {
    // Le découpage se fait à offsets d'octets fixes: tout caractère
    // non-ASCII est rejeté avant de trancher
    if let Some(bad) = oligo.chars().find(|c| !c.is_ascii()) {
        return Err(MolfsError::InvalidBase(bad));
    }

    let expected = fwd_len + CORE_NT + rev_len;
    if oligo.len() != expected {
        return Err(MolfsError::MalformedOligo {
            len: oligo.len(),
            expected,
        });
    }

    let forward = &oligo[..fwd_len];
    let address_dna = &oligo[fwd_len..fwd_len + ADDRESS_BITS];
    let payload_dna = &oligo[fwd_len + ADDRESS_BITS..fwd_len + ADDRESS_BITS + PAYLOAD_BITS];
    let crc_dna = &oligo[fwd_len + ADDRESS_BITS + PAYLOAD_BITS..fwd_len + CORE_NT];
    let reverse = &oligo[fwd_len + CORE_NT..];

    let address = value_from_bits(&decode_dna_to_bits(address_dna)?);
    let payload_bytes = bytes_from_bits(&decode_dna_to_bits(payload_dna)?)?;
    let crc = value_from_bits(&decode_dna_to_bits(crc_dna)?);

    let payload: [u8; PAYLOAD_BYTES] = payload_bytes
        .try_into()
        .map_err(|_| MolfsError::Decoding("Charge utile de taille inattendue".to_string()))?;

    Ok(ParsedOligo {
        forward: forward.to_string(),
        reverse: reverse.to_string(),
        address,
        payload,
        crc,
    })
}
