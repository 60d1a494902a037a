//! Code canal bit→base avec évitement des homopolymères
//!
//! Implémentation du schéma de Church et al. (Science 2012):
//! chaque bit est porté par une base parmi deux synonymes
//! ({A,C} pour 0, {G,T} pour 1), ce qui laisse à l'encodeur
//! la liberté de casser les runs d'homopolymères.
//!
//! Le choix entre synonymes est déterministe: la base
//! lexicographiquement plus petite (A pour 0, G pour 1), sauf
//! si elle prolongerait un run de 3 en run de 4; dans ce cas
//! l'autre synonyme est émise. Le décodage ne dépend pas de ce
//! choix: A,C → 0 et G,T → 1 sans état.

use crate::constraints::HOMOPOLYMER_LIMIT;
use crate::error::{MolfsError, Result};

/// Encode une suite de bits en séquence ADN sans homopolymère de 4+
///
/// Chaque champ (adresse, données, CRC) est encodé indépendamment:
/// l'historique démarre vide à chaque appel.
pub fn encode_bits_to_dna(bits: &[bool]) -> String {
    let mut dna = String::with_capacity(bits.len());
    let mut last: Option<char> = None;
    let mut run = 0usize;

    for &bit in bits {
        let (preferred, synonym) = if bit { ('G', 'T') } else { ('A', 'C') };

        // La base préférée ne peut prolonger un run que si elle
        // est identique à la dernière base émise.
        let base = if last == Some(preferred) && run >= HOMOPOLYMER_LIMIT {
            synonym
        } else {
            preferred
        };

        if last == Some(base) {
            run += 1;
        } else {
            last = Some(base);
            run = 1;
        }
        dna.push(base);
    }

    dna
}

/// Décode une séquence ADN en bits
///
/// Échoue sur tout caractère hors {A, C, G, T}.
pub fn decode_dna_to_bits(dna: &str) -> Result<Vec<bool>> {
    dna.chars()
        .map(|base| match base {
            'A' | 'C' => Ok(false),
            'G' | 'T' => Ok(true),
            other => Err(MolfsError::InvalidBase(other)),
        })
        .collect()
}

/// Convertit un entier en bits, MSB en premier
pub fn bits_from_value(value: u32, width: usize) -> Vec<bool> {
    (0..width)
        .rev()
        .map(|i| (value >> i) & 1 == 1)
        .collect()
}

/// Reconstruit un entier depuis des bits MSB en premier
pub fn value_from_bits(bits: &[bool]) -> u32 {
    bits.iter().fold(0, |acc, &b| (acc << 1) | u32::from(b))
}

/// Convertit des octets en bits, octet par octet, MSB en premier
pub fn bits_from_bytes(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1 == 1);
        }
    }
    bits
}

/// Reconstruit des octets depuis des bits MSB en premier
///
/// La longueur d'entrée doit être un multiple de 8.
pub fn bytes_from_bits(bits: &[bool]) -> Result<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return Err(MolfsError::Decoding(format!(
            "Nombre de bits non multiple de 8: {}",
            bits.len()
        )));
    }

    Ok(bits
        .chunks(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::max_homopolymer_run;

    #[test]
    fn test_encode_prefers_smaller_base() {
        // Historique vide: 0 → A, 1 → G
        assert_eq!(encode_bits_to_dna(&[false]), "A");
        assert_eq!(encode_bits_to_dna(&[true]), "G");
        assert_eq!(encode_bits_to_dna(&[false, true, false]), "AGA");
    }

    #[test]
    fn test_encode_breaks_homopolymer_run() {
        // Quatre zéros: AAA puis bascule sur C
        assert_eq!(encode_bits_to_dna(&[false; 4]), "AAAC");
        assert_eq!(encode_bits_to_dna(&[true; 4]), "GGGT");

        // Huit zéros: le run de C retombe à 1 après chaque bascule
        assert_eq!(encode_bits_to_dna(&[false; 8]), "AAACAAAC");
    }

    #[test]
    fn test_encode_never_exceeds_limit() {
        let all_ones = vec![true; 96];
        let dna = encode_bits_to_dna(&all_ones);
        assert!(max_homopolymer_run(&dna) <= HOMOPOLYMER_LIMIT);
        assert!(!dna.contains("GGGG"));
        assert!(!dna.contains("TTTT"));
    }

    #[test]
    fn test_decode_bit_classes() {
        let bits = decode_dna_to_bits("ACGT").unwrap();
        assert_eq!(bits, vec![false, false, true, true]);
    }

    #[test]
    fn test_decode_rejects_non_acgt() {
        assert!(matches!(
            decode_dna_to_bits("ACGN"),
            Err(MolfsError::InvalidBase('N'))
        ));
    }

    #[test]
    fn test_roundtrip_is_tiebreak_agnostic() {
        let bits: Vec<bool> = (0..96).map(|i| i % 3 == 0).collect();
        let dna = encode_bits_to_dna(&bits);
        assert_eq!(decode_dna_to_bits(&dna).unwrap(), bits);
    }

    #[test]
    fn test_value_bits_roundtrip() {
        let bits = bits_from_value(0x5A5A5, 19);
        assert_eq!(bits.len(), 19);
        assert_eq!(value_from_bits(&bits), 0x5A5A5 & 0x7FFFF);
    }

    #[test]
    fn test_bytes_bits_roundtrip() {
        let bytes = [0x00, 0xFF, 0xA5, 0x3C];
        let bits = bits_from_bytes(&bytes);
        assert_eq!(bits.len(), 32);
        assert_eq!(bytes_from_bits(&bits).unwrap(), bytes);
    }

    #[test]
    fn test_bytes_from_bits_rejects_partial_byte() {
        assert!(bytes_from_bits(&[true; 7]).is_err());
    }
}
