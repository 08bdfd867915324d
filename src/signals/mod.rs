pub mod consensus;

pub use consensus::ConsensusEngine;
