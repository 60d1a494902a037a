//! MolFS Core
//!
//! Codec d'oligos ADN pour le système de fichiers moléculaire:
//! code canal bit→base sans homopolymère, framing à géométrie fixe
//! (amorces + adresse + données + CRC32), encodage et décodage de
//! blocs, registre d'amorces, découpage et réassemblage de fichiers.

pub mod channel;
pub mod codec;
pub mod constraints;
pub mod container;
pub mod crc;
pub mod device;
pub mod error;
pub mod file;
pub mod logging;
pub mod oligo;
pub mod primer;

// Réexportations principales
pub use codec::{BlockDecoder, BlockEncoder, DecodeStats, DecodedBlock, DecodedSet, EncodedBlock};
pub use container::BlockMetadata;
pub use device::{ChurchDevice, MolFsDevice};
pub use error::{MolfsError, Result};
pub use file::{
    encode_file, reassemble_file, split_blocks, Distribution, FileReport, MirrorAll, RoundRobin,
    SinglePool, DEFAULT_BLOCK_SIZE,
};
pub use oligo::{ParsedOligo, ADDRESS_BITS, CORE_NT, MAX_ADDRESSES, PAYLOAD_BYTES, PRIMER_NT};
pub use primer::{PrimerPair, PrimerRegistry, DEFAULT_FORWARD_PRIMER, DEFAULT_REVERSE_PRIMER};
