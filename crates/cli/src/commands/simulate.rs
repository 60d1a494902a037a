//! Commande de simulation de canal bruité

use anyhow::{Context, Result};
use std::fs::File;
use std::path::PathBuf;

use molfs_core::container::write_csv;
use molfs_simulation::{ErrorModel, NoisyChannel};

use crate::commands::{parse_pool_block, read_container};
use crate::create_spinner;

pub fn run(
    input: PathBuf,
    output: PathBuf,
    substitution_rate: f64,
    insertion_rate: f64,
    deletion_rate: f64,
    seed: u64,
) -> Result<()> {
    println!("🧬 Simulation de canal sur: {}", input.display());

    // 1. Lire le conteneur
    let spinner = create_spinner("Lecture des oligos...");
    let oligos = read_container(&input)?;
    spinner.finish_with_message(format!("{} oligos lus", oligos.len()));

    // 2. Transmettre à travers le canal bruité
    let model = ErrorModel {
        substitution_rate,
        insertion_rate,
        deletion_rate,
        seed,
    };
    let mut channel = NoisyChannel::new(model);

    let spinner = create_spinner("Transmission...");
    let (corrupted, metrics) = channel.transmit_all(&oligos);
    spinner.finish_with_message("Transmission effectuée".to_string());

    // 3. Écrire le conteneur corrompu; les colonnes de métadonnées
    // restent indicatives
    let (pool, block) = parse_pool_block(&input).unwrap_or((0, 0));
    write_csv(
        File::create(&output).context("Création du conteneur de sortie")?,
        pool,
        block,
        &corrupted,
    )?;

    println!("\n{}", metrics.format_table());
    println!("\n✅ Conteneur corrompu écrit: {}", output.display());

    Ok(())
}
