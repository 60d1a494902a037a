//! CLI du codec MolFS

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

mod commands;
mod display;

use commands::{decode, encode, simulate, stats};

#[derive(Parser)]
#[command(name = "molfs")]
#[command(about = "Encodage de fichiers en oligos ADN pour MolFS", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode un fichier en conteneurs d'oligos par (pool, bloc)
    Encode {
        /// Fichier d'entrée
        #[arg(short, long)]
        input: PathBuf,

        /// Répertoire de sortie
        #[arg(short, long)]
        output: PathBuf,

        /// Taille de bloc en octets
        #[arg(short, long, default_value = "5120")]
        block_size: usize,

        /// Stratégie de distribution des blocs
        #[arg(short, long, value_enum, default_value = "single")]
        strategy: StrategyKind,

        /// Pools destinataires, séparés par des virgules
        #[arg(short = 'p', long, default_value = "1")]
        pools: String,

        /// Fichier JSON d'amorces (pool, bloc) → paire
        #[arg(long)]
        primers: Option<PathBuf>,
    },

    /// Décode des conteneurs d'oligos en fichier original
    Decode {
        /// Conteneurs d'entrée (CSV ou FASTQ)
        #[arg(short, long, required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Fichier de sortie
        #[arg(short, long)]
        output: PathBuf,

        /// Taille de bloc en octets
        #[arg(short, long, default_value = "5120")]
        block_size: usize,

        /// Taille du fichier original, pour rogner le bourrage
        #[arg(short = 'f', long)]
        file_size: Option<usize>,

        /// Fichier JSON d'amorces (pool, bloc) → paire
        #[arg(long)]
        primers: Option<PathBuf>,

        /// Ignorer la vérification du checksum des sidecars
        #[arg(long)]
        ignore_checksum: bool,
    },

    /// Applique un canal bruité à un conteneur d'oligos
    Simulate {
        /// Conteneur d'entrée (CSV ou FASTQ)
        #[arg(short, long)]
        input: PathBuf,

        /// Conteneur CSV de sortie
        #[arg(short, long)]
        output: PathBuf,

        /// Taux de substitution (0.0-1.0)
        #[arg(short, long, default_value = "0.01")]
        substitution_rate: f64,

        /// Taux d'insertion (0.0-1.0)
        #[arg(long, default_value = "0.005")]
        insertion_rate: f64,

        /// Taux de délétion (0.0-1.0)
        #[arg(short = 'd', long, default_value = "0.005")]
        deletion_rate: f64,

        /// Seed du générateur
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Décode un conteneur et affiche les statistiques
    Stats {
        /// Conteneurs d'entrée (CSV ou FASTQ)
        #[arg(short, long, required = true, num_args = 1..)]
        inputs: Vec<PathBuf>,

        /// Fichier JSON d'amorces (pool, bloc) → paire
        #[arg(long)]
        primers: Option<PathBuf>,
    },
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum StrategyKind {
    /// Tous les blocs vers le premier pool
    Single,
    /// Répartition cyclique sur les pools
    RoundRobin,
    /// Chaque bloc répliqué sur tous les pools
    Mirror,
}

fn main() -> anyhow::Result<()> {
    molfs_core::logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            input,
            output,
            block_size,
            strategy,
            pools,
            primers,
        } => {
            encode::run(input, output, block_size, strategy, &pools, primers)?;
        }
        Commands::Decode {
            inputs,
            output,
            block_size,
            file_size,
            primers,
            ignore_checksum,
        } => {
            decode::run(inputs, output, block_size, file_size, primers, ignore_checksum)?;
        }
        Commands::Simulate {
            input,
            output,
            substitution_rate,
            insertion_rate,
            deletion_rate,
            seed,
        } => {
            simulate::run(
                input,
                output,
                substitution_rate,
                insertion_rate,
                deletion_rate,
                seed,
            )?;
        }
        Commands::Stats { inputs, primers } => {
            stats::run(inputs, primers)?;
        }
    }

    Ok(())
}

/// Crée une barre de progression
pub fn create_progress_bar(length: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(length);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message(msg.to_string());
    pb
}

/// Crée un spinner
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb
}
