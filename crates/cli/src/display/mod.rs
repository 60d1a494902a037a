//! Affichage des statistiques

pub mod stats;

pub use stats::{print_file_report, print_stats};
