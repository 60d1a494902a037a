//! Commande d'inspection des statistiques de décodage

use anyhow::Result;
use std::path::PathBuf;

use molfs_core::BlockDecoder;

use crate::commands::{load_registry, parse_pool_block, read_container};
use crate::display::print_stats;

pub fn run(inputs: Vec<PathBuf>, primers: Option<PathBuf>) -> Result<()> {
    let mut sequences = Vec::new();
    let mut fallback_keys = Vec::new();

    for path in &inputs {
        sequences.extend(read_container(path)?);
        if let Some(key) = parse_pool_block(path) {
            fallback_keys.push(key);
        }
    }
    if fallback_keys.is_empty() {
        fallback_keys.push((0, 0));
    }

    println!("🧬 {} séquences lues", sequences.len());

    let registry = load_registry(primers.as_deref(), &fallback_keys)?;
    let decoded = BlockDecoder::new(&registry).decode_all(&sequences);

    if decoded.blocks.is_empty() {
        println!("Aucun bloc reconnu");
    }

    for ((pool, block), copy) in &decoded.blocks {
        println!("\nPool {}, bloc {} ({} octets):", pool, block, copy.data.len());
        print_stats(&copy.stats);
    }

    if decoded.unclassified > 0 {
        println!("\n⚠️  {} séquence(s) non classifiée(s)", decoded.unclassified);
    }

    Ok(())
}
