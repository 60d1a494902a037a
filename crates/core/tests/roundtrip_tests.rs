//! Tests de roundtrip du codec d'oligos
//!
//! Ces tests vérifient que l'encodage et le décodage préservent
//! l'intégrité des blocs, y compris sous entrées permutées,
//! corrompues ou partielles.

use molfs_core::constraints::max_homopolymer_run;
use molfs_core::oligo::parse_oligo;
use molfs_core::{
    BlockDecoder, BlockEncoder, PrimerRegistry, DEFAULT_FORWARD_PRIMER, DEFAULT_REVERSE_PRIMER,
    PRIMER_NT,
};

fn registry_single() -> PrimerRegistry {
    let mut registry = PrimerRegistry::new();
    registry.register(1, 0, DEFAULT_FORWARD_PRIMER, DEFAULT_REVERSE_PRIMER);
    registry
}

fn registry_two_pools() -> PrimerRegistry {
    let mut registry = registry_single();
    registry.register(2, 0, "AAACCCGGGTTTAAACCCGGGT", "TGGGCCCAAATTTGGGCCCAAA");
    registry
}

#[test]
fn test_single_chunk_roundtrip() {
    // Un seul oligo de 191 nt pour 12 octets
    let registry = registry_single();
    let data: Vec<u8> = (0..12).collect();

    let encoded = BlockEncoder::new(&registry)
        .encode_block(1, 0, &data)
        .unwrap();
    assert_eq!(encoded.oligos.len(), 1);
    assert_eq!(encoded.oligos[0].len(), 191);

    let (decoded, stats) = BlockDecoder::new(&registry)
        .decode_block(&encoded.oligos, 1, 0, Some(12))
        .unwrap();

    assert_eq!(decoded, data);
    assert_eq!(stats.crc_valid, 1);
    assert_eq!(stats.crc_invalid, 0);
    assert_eq!(stats.crc_missing, 0);
    assert_eq!(stats.crc_conflict, 0);
    assert_eq!(stats.unclassified, 0);
    assert_eq!(stats.malformed, 0);
    assert_eq!(stats.invalid_base, 0);
    assert!(stats.missing_addresses.is_empty());
}

#[test]
fn test_partial_final_chunk_roundtrip() {
    // 25 octets: 3 oligos, dernier chunk bourré puis tronqué
    let registry = registry_single();
    let data: Vec<u8> = (0..25).collect();

    let encoded = BlockEncoder::new(&registry)
        .encode_block(1, 0, &data)
        .unwrap();
    assert_eq!(encoded.oligos.len(), 3);

    let (decoded, _) = BlockDecoder::new(&registry)
        .decode_block(&encoded.oligos, 1, 0, Some(25))
        .unwrap();
    assert_eq!(decoded, data);
}

/// Champs encodés d'un oligo aux amorces de 22 nt:
/// (adresse, données, CRC32)
fn encoded_fields(oligo: &str) -> (&str, &str, &str) {
    (
        &oligo[PRIMER_NT..PRIMER_NT + 19],
        &oligo[PRIMER_NT + 19..PRIMER_NT + 115],
        &oligo[PRIMER_NT + 115..PRIMER_NT + 147],
    )
}

#[test]
fn test_homopolymer_stress_all_ones() {
    // 96 bits à 1: jamais de GGGG ni TTTT dans le champ données
    let registry = registry_single();
    let data = vec![0xFFu8; 12];

    let encoded = BlockEncoder::new(&registry)
        .encode_block(1, 0, &data)
        .unwrap();
    let (_, payload, _) = encoded_fields(&encoded.oligos[0]);

    assert!(max_homopolymer_run(payload) <= 3);
    assert!(!payload.contains("GGGG"));
    assert!(!payload.contains("TTTT"));

    let (decoded, stats) = BlockDecoder::new(&registry)
        .decode_block(&encoded.oligos, 1, 0, Some(12))
        .unwrap();
    assert_eq!(decoded, data);
    assert_eq!(stats.crc_valid, 1);
}

#[test]
fn test_homopolymer_stress_all_zeros() {
    let registry = registry_single();
    let data = vec![0x00u8; 12];

    let encoded = BlockEncoder::new(&registry)
        .encode_block(1, 0, &data)
        .unwrap();
    let (_, payload, _) = encoded_fields(&encoded.oligos[0]);

    assert!(!payload.contains("AAAA"));
    assert!(!payload.contains("CCCC"));
}

#[test]
fn test_encoded_fields_homopolymer_free() {
    // Chaque champ encodé reste borné quel que soit le contenu;
    // les champs démarrent chacun avec un historique vide
    let registry = registry_single();
    let data: Vec<u8> = (0..5120).map(|i| (i * 31 % 256) as u8).collect();

    let encoded = BlockEncoder::new(&registry)
        .encode_block(1, 0, &data)
        .unwrap();

    for oligo in &encoded.oligos {
        let (address, payload, crc) = encoded_fields(oligo);
        assert!(max_homopolymer_run(address) <= 3);
        assert!(max_homopolymer_run(payload) <= 3);
        assert!(max_homopolymer_run(crc) <= 3);
    }
}

#[test]
fn test_single_base_corruption_dropped() {
    // Mutation d'une base au milieu du champ données: l'oligo tombe,
    // le bloc revient en zéros avec l'adresse signalée manquante
    let registry = registry_single();
    let data: Vec<u8> = (0..12).collect();

    let encoded = BlockEncoder::new(&registry)
        .encode_block(1, 0, &data)
        .unwrap();

    let oligo = &encoded.oligos[0];
    let position = PRIMER_NT + 19 + 48;
    let mut chars: Vec<char> = oligo.chars().collect();
    chars[position] = match chars[position] {
        'A' => 'G',
        'G' => 'A',
        'C' => 'T',
        _ => 'C',
    };
    let corrupted: String = chars.into_iter().collect();

    let (decoded, stats) = BlockDecoder::new(&registry)
        .decode_block(&[corrupted], 1, 0, Some(12))
        .unwrap();

    assert_eq!(decoded, vec![0u8; 12]);
    assert_eq!(stats.crc_invalid, 1);
    assert_eq!(stats.crc_valid, 0);
    assert_eq!(stats.missing_addresses, vec![0]);
}

#[test]
fn test_corruption_equivalent_to_absence() {
    // Multiset avec un oligo corrompu == multiset sans cet oligo
    let registry = registry_single();
    let data: Vec<u8> = (0..36).collect();

    let encoded = BlockEncoder::new(&registry)
        .encode_block(1, 0, &data)
        .unwrap();

    let mut with_corruption = encoded.oligos.clone();
    let position = PRIMER_NT + 19 + 40;
    let mut chars: Vec<char> = with_corruption[1].chars().collect();
    chars[position] = if chars[position] == 'A' { 'T' } else { 'A' };
    with_corruption[1] = chars.into_iter().collect();

    let mut without = encoded.oligos.clone();
    without.remove(1);

    let decoder = BlockDecoder::new(&registry);
    let (corrupted_result, _) = decoder
        .decode_block(&with_corruption, 1, 0, Some(36))
        .unwrap();
    let (absent_result, _) = decoder.decode_block(&without, 1, 0, Some(36)).unwrap();

    assert_eq!(corrupted_result, absent_result);
}

#[test]
fn test_permuted_input_roundtrip() {
    // L'ordre des oligos est sans effet: l'adresse suffit
    let registry = registry_single();
    let data: Vec<u8> = (0..120).map(|i| (i * 7 % 256) as u8).collect();

    let encoded = BlockEncoder::new(&registry)
        .encode_block(1, 0, &data)
        .unwrap();

    let mut shuffled = encoded.oligos.clone();
    shuffled.reverse();
    shuffled.rotate_left(3);

    let (decoded, stats) = BlockDecoder::new(&registry)
        .decode_block(&shuffled, 1, 0, Some(data.len()))
        .unwrap();

    assert_eq!(decoded, data);
    assert!(stats.is_clean());
}

#[test]
fn test_address_uniqueness() {
    let registry = registry_single();
    let data = vec![0x3Cu8; 144];

    let encoded = BlockEncoder::new(&registry)
        .encode_block(1, 0, &data)
        .unwrap();

    let mut addresses: Vec<u32> = encoded
        .oligos
        .iter()
        .map(|o| parse_oligo(o, PRIMER_NT, PRIMER_NT).unwrap().address)
        .collect();
    addresses.sort_unstable();

    assert_eq!(addresses, (0..12).collect::<Vec<u32>>());
}

#[test]
fn test_classifier_injectivity() {
    // Paires distinctes: chaque oligo revient à son origine
    let registry = registry_two_pools();
    let encoder = BlockEncoder::new(&registry);

    let from_pool1 = encoder.encode_block(1, 0, &[0x01; 24]).unwrap();
    let from_pool2 = encoder.encode_block(2, 0, &[0x02; 24]).unwrap();

    for oligo in &from_pool1.oligos {
        assert_eq!(registry.classify(oligo), Some((1, 0)));
    }
    for oligo in &from_pool2.oligos {
        assert_eq!(registry.classify(oligo), Some((2, 0)));
    }
}

#[test]
fn test_redundant_encodings_agree() {
    // Deux encodages du même bloc sous deux paires d'amorces:
    // chaque jeu, ou leur union, restitue les mêmes octets
    let registry = registry_two_pools();
    let data: Vec<u8> = (0..48).map(|i| (i * 13 % 256) as u8).collect();

    let encoder = BlockEncoder::new(&registry);
    let copy1 = encoder.encode_block(1, 0, &data).unwrap();
    let copy2 = encoder.encode_block(2, 0, &data).unwrap();

    let decoder = BlockDecoder::new(&registry);

    let (from_pool1, _) = decoder
        .decode_block(&copy1.oligos, 1, 0, Some(data.len()))
        .unwrap();
    let (from_pool2, _) = decoder
        .decode_block(&copy2.oligos, 2, 0, Some(data.len()))
        .unwrap();

    let mut union = copy1.oligos.clone();
    union.extend(copy2.oligos.clone());
    let (from_union, _) = decoder
        .decode_block(&union, 1, 0, Some(data.len()))
        .unwrap();

    assert_eq!(from_pool1, data);
    assert_eq!(from_pool2, data);
    assert_eq!(from_union, data);
}

#[test]
fn test_unknown_primer_dropped() {
    // Un oligo aux amorces inconnues est compté, le bloc survit
    let registry = registry_single();
    let data: Vec<u8> = (0..12).collect();

    let encoded = BlockEncoder::new(&registry)
        .encode_block(1, 0, &data)
        .unwrap();

    let mut sequences = encoded.oligos.clone();
    sequences.push(format!("{}{}", "GATTACA", "ACGT".repeat(46)));

    let (decoded, stats) = BlockDecoder::new(&registry)
        .decode_block(&sequences, 1, 0, Some(12))
        .unwrap();

    assert_eq!(decoded, data);
    assert_eq!(stats.unclassified, 1);
    assert_eq!(stats.crc_valid, 1);
}

#[test]
fn test_truncated_oligo_is_malformed() {
    // Amorces intactes mais cœur tronqué: malformé, pas CRC invalide
    let registry = registry_single();
    let data: Vec<u8> = (0..12).collect();

    let encoded = BlockEncoder::new(&registry)
        .encode_block(1, 0, &data)
        .unwrap();

    let oligo = &encoded.oligos[0];
    let truncated = format!(
        "{}{}{}",
        &oligo[..PRIMER_NT + 40],
        &oligo[PRIMER_NT + 52..oligo.len() - PRIMER_NT],
        DEFAULT_REVERSE_PRIMER
    );

    let (_, stats) = BlockDecoder::new(&registry)
        .decode_block(&[truncated], 1, 0, Some(12))
        .unwrap();

    assert_eq!(stats.malformed, 1);
    assert_eq!(stats.crc_invalid, 0);
}

#[test]
fn test_invalid_base_counted_separately() {
    // Caractère hors ACGT dans un oligo bien cadré: compteur dédié
    let registry = registry_single();
    let data: Vec<u8> = (0..12).collect();

    let encoded = BlockEncoder::new(&registry)
        .encode_block(1, 0, &data)
        .unwrap();

    let oligo = &encoded.oligos[0];
    let position = PRIMER_NT + 19 + 48;
    let mut chars: Vec<char> = oligo.chars().collect();
    chars[position] = 'N';
    let polluted: String = chars.into_iter().collect();

    let (_, stats) = BlockDecoder::new(&registry)
        .decode_block(&[polluted], 1, 0, Some(12))
        .unwrap();

    assert_eq!(stats.invalid_base, 1);
    assert_eq!(stats.crc_invalid, 0);
    assert_eq!(stats.malformed, 0);
}

#[test]
fn test_decode_without_expected_len_keeps_padding() {
    // Sans sidecar, le bloc restitué fait K · 12 octets
    let registry = registry_single();
    let data: Vec<u8> = (0..25).collect();

    let encoded = BlockEncoder::new(&registry)
        .encode_block(1, 0, &data)
        .unwrap();
    let (decoded, _) = BlockDecoder::new(&registry)
        .decode_block(&encoded.oligos, 1, 0, None)
        .unwrap();

    assert_eq!(decoded.len(), 36);
    assert_eq!(&decoded[..25], &data[..]);
    assert!(decoded[25..].iter().all(|&b| b == 0));
}
