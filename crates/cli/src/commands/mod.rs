//! Sous-commandes du CLI

pub mod decode;
pub mod encode;
pub mod simulate;
pub mod stats;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use molfs_core::container::{read_csv, read_fastq};
use molfs_core::{PrimerRegistry, DEFAULT_FORWARD_PRIMER, DEFAULT_REVERSE_PRIMER};

/// Lit un conteneur d'oligos, CSV ou FASTQ selon l'extension
pub fn read_container(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("Ouverture de {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let oligos = match extension.as_str() {
        "fastq" | "fq" => read_fastq(BufReader::new(file))?,
        _ => read_csv(file)?,
    };

    Ok(oligos)
}

/// Charge un registre d'amorces depuis un fichier JSON
///
/// Sans fichier, la paire universelle est enregistrée pour chaque
/// (pool, bloc) demandé; les blocs ne sont alors discriminables que
/// par leurs adresses, pas par leurs amorces.
pub fn load_registry(
    primers: Option<&Path>,
    fallback_keys: &[(u32, u32)],
) -> Result<PrimerRegistry> {
    match primers {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Ouverture de {}", path.display()))?;
            let registry: PrimerRegistry = serde_json::from_reader(file)
                .with_context(|| format!("Lecture des amorces de {}", path.display()))?;
            Ok(registry)
        }
        None => {
            tracing::warn!(
                "Aucun fichier d'amorces fourni: paire universelle pour {} couples",
                fallback_keys.len()
            );

            let mut registry = PrimerRegistry::new();
            for &(pool, block) in fallback_keys {
                registry.register(pool, block, DEFAULT_FORWARD_PRIMER, DEFAULT_REVERSE_PRIMER);
            }
            Ok(registry)
        }
    }
}

/// Extrait (pool, bloc) d'un nom de fichier `pool{P}_block{B}.csv`
pub fn parse_pool_block(path: &Path) -> Option<(u32, u32)> {
    let stem = path.file_stem()?.to_str()?;
    let (pool_part, block_part) = stem.split_once('_')?;

    let pool = pool_part.strip_prefix("pool")?.parse().ok()?;
    let block = block_part.strip_prefix("block")?.parse().ok()?;

    Some((pool, block))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_pool_block() {
        assert_eq!(
            parse_pool_block(&PathBuf::from("out/pool2_block17.csv")),
            Some((2, 17))
        );
        assert_eq!(parse_pool_block(&PathBuf::from("reads.fastq")), None);
    }
}
