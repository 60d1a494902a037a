//! Encodeur et décodeur de blocs

pub mod decoder;
pub mod encoder;

pub use decoder::{BlockDecoder, DecodeStats, DecodedBlock, DecodedSet};
pub use encoder::{BlockEncoder, EncodedBlock};
