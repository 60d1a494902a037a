//! Commande d'encodage

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::path::PathBuf;

use molfs_core::container::write_csv;
use molfs_core::{encode_file, MirrorAll, RoundRobin, SinglePool};

use crate::commands::load_registry;
use crate::{create_progress_bar, create_spinner, StrategyKind};

pub fn run(
    input: PathBuf,
    output: PathBuf,
    block_size: usize,
    strategy: StrategyKind,
    pools: &str,
    primers: Option<PathBuf>,
) -> Result<()> {
    println!("🧬 Encodage de: {}", input.display());

    // 1. Lire le fichier
    let spinner = create_spinner("Lecture du fichier...");
    let data = std::fs::read(&input)?;
    spinner.finish_with_message(format!("Fichier lu ({} octets)", data.len()));

    let pools = parse_pools(pools)?;
    let total_blocks = data.len().div_ceil(block_size) as u32;

    // 2. Construire le registre d'amorces
    let fallback_keys: Vec<(u32, u32)> = pools
        .iter()
        .flat_map(|&pool| (0..total_blocks).map(move |block| (pool, block)))
        .collect();
    let registry = load_registry(primers.as_deref(), &fallback_keys)?;

    // 3. Encoder
    let pb = create_progress_bar(total_blocks as u64, "Encodage des blocs...");
    let encoded = match strategy {
        StrategyKind::Single => encode_file(&registry, &data, block_size, &SinglePool(pools[0]))?,
        StrategyKind::RoundRobin => {
            encode_file(&registry, &data, block_size, &RoundRobin(pools.clone()))?
        }
        StrategyKind::Mirror => {
            encode_file(&registry, &data, block_size, &MirrorAll(pools.clone()))?
        }
    };
    pb.finish_with_message(format!("{} jeux d'oligos générés", encoded.len()));

    // 4. Écrire un conteneur CSV et un sidecar JSON par (pool, bloc)
    std::fs::create_dir_all(&output)?;
    let spinner = create_spinner("Écriture des conteneurs...");

    let mut total_oligos = 0;
    for block in &encoded {
        let csv_path = output.join(format!("pool{}_block{}.csv", block.pool, block.block));
        let json_path = output.join(format!("pool{}_block{}.json", block.pool, block.block));

        write_csv(
            File::create(&csv_path).context("Création du conteneur CSV")?,
            block.pool,
            block.block,
            &block.oligos,
        )?;
        block
            .metadata
            .write_json(File::create(&json_path).context("Création du sidecar")?)?;

        total_oligos += block.oligos.len();
    }
    spinner.finish_with_message(format!("Conteneurs écrits dans {}", output.display()));

    // 5. Statistiques
    println!("\n📊 Statistiques:");
    println!("   Blocs: {}", total_blocks);
    println!("   Jeux d'oligos: {}", encoded.len());
    println!("   Oligos: {}", total_oligos);
    println!("   Longueur d'oligo: 191 nt");

    println!("\n✅ Encodage terminé!");

    Ok(())
}

/// Parse une liste de pools « 1,2,3 »
fn parse_pools(pools: &str) -> Result<Vec<u32>> {
    let parsed: Vec<u32> = pools
        .split(',')
        .map(|p| p.trim().parse())
        .collect::<std::result::Result<_, _>>()
        .context("Liste de pools invalide")?;

    if parsed.is_empty() {
        bail!("Aucun pool fourni");
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pools() {
        assert_eq!(parse_pools("1").unwrap(), vec![1]);
        assert_eq!(parse_pools("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert!(parse_pools("1,x").is_err());
    }
}
