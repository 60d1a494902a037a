//! Commande de décodage

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

use molfs_core::container::BlockMetadata;
use molfs_core::{reassemble_file, BlockDecoder};

use crate::commands::{load_registry, parse_pool_block, read_container};
use crate::create_spinner;
use crate::display::{print_file_report, print_stats};

pub fn run(
    inputs: Vec<PathBuf>,
    output: PathBuf,
    block_size: usize,
    file_size: Option<usize>,
    primers: Option<PathBuf>,
    ignore_checksum: bool,
) -> Result<()> {
    println!("🧬 Décodage de {} conteneur(s)", inputs.len());

    // 1. Lire les conteneurs et leurs sidecars éventuels
    let spinner = create_spinner("Lecture des conteneurs...");
    let mut sequences = Vec::new();
    let mut sidecars: HashMap<(u32, u32), BlockMetadata> = HashMap::new();
    let mut fallback_keys = Vec::new();

    for path in &inputs {
        sequences.extend(read_container(path)?);

        // Sidecar JSON à côté du conteneur CSV
        let json_path = path.with_extension("json");
        if json_path.is_file() {
            let metadata = BlockMetadata::read_json(
                File::open(&json_path).context("Ouverture du sidecar")?,
            )?;
            sidecars.insert((metadata.pool, metadata.block_index), metadata);
        }

        if let Some(key) = parse_pool_block(path) {
            fallback_keys.push(key);
        }
    }
    if fallback_keys.is_empty() {
        fallback_keys.push((0, 0));
    }
    spinner.finish_with_message(format!("{} séquences lues", sequences.len()));

    // 2. Registre d'amorces
    let registry = load_registry(primers.as_deref(), &fallback_keys)?;

    // 3. Décoder tous les blocs reconnus
    let spinner = create_spinner("Décodage...");
    let decoded = BlockDecoder::new(&registry).decode_all(&sequences);
    let unclassified = decoded.unclassified;

    // Les sidecars portent la longueur originale et le checksum
    // SHA-256 de chaque bloc
    let mut copies = decoded.into_blocks();
    for copy in &mut copies {
        if let Some(metadata) = sidecars.get(&(copy.pool, copy.block)) {
            copy.data.truncate(metadata.original_len);

            if ignore_checksum {
                continue;
            }
            metadata.verify_checksum(&copy.data).with_context(|| {
                format!(
                    "Bloc {} (pool {}) corrompu; --ignore-checksum pour forcer la sortie",
                    copy.block, copy.pool
                )
            })?;
        }
    }
    spinner.finish_with_message(format!("{} bloc(s) décodé(s)", copies.len()));

    // 4. Statistiques par bloc
    for copy in &copies {
        println!("\nPool {}, bloc {}:", copy.pool, copy.block);
        print_stats(&copy.stats);
    }
    if unclassified > 0 {
        println!("\n⚠️  {} séquence(s) non classifiée(s)", unclassified);
    }

    // 5. Réassembler et écrire
    let spinner = create_spinner("Réassemblage...");
    let (data, report) = reassemble_file(copies, block_size, None, file_size);
    std::fs::write(&output, &data)?;
    spinner.finish_with_message(format!(
        "Fichier écrit: {} ({} octets)",
        output.display(),
        data.len()
    ));

    println!();
    print_file_report(&report);

    if report.missing_blocks.is_empty() {
        println!("\n✅ Décodage terminé!");
    } else {
        println!(
            "\n⚠️  Décodage incomplet: blocs manquants {:?}",
            report.missing_blocks
        );
    }

    Ok(())
}
