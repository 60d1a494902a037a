//! Tableaux de statistiques de décodage et de réassemblage

use molfs_core::{DecodeStats, FileReport};

/// Affiche les compteurs de décodage d'un bloc
pub fn print_stats(stats: &DecodeStats) {
    println!("{}", stats.format_table());

    if !stats.missing_addresses.is_empty() {
        let preview: Vec<String> = stats
            .missing_addresses
            .iter()
            .take(10)
            .map(|a| a.to_string())
            .collect();
        let suffix = if stats.missing_addresses.len() > 10 {
            format!(" … (+{})", stats.missing_addresses.len() - 10)
        } else {
            String::new()
        };
        println!("   Adresses manquantes: [{}]{}", preview.join(", "), suffix);
    }
}

/// Affiche le rapport de réassemblage d'un fichier
pub fn print_file_report(report: &FileReport) {
    println!(
        "┌────────────────────────────────────┐\n\
         │ Rapport de Réassemblage            │\n\
         ├────────────────────────────────────┤\n\
         │ Blocs attendus   : {:>6}          │\n\
         │ Blocs manquants  : {:>6}          │\n\
         │ Octets restitués : {:>10}      │\n\
         └────────────────────────────────────┘",
        report.total_blocks,
        report.missing_blocks.len(),
        report.total_bytes
    );

    for (block, pool) in &report.served_by {
        println!("   Bloc {} servi par le pool {}", block, pool);
    }
}
