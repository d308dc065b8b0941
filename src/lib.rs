//! # ByteLab
//!
//! Evolution lab for tiny neural networks grown from bit-packed genomes.
//!
//! The genome codec, genetic operators and network interpreter live in
//! `bytelab_core`; this crate adds the generation driver that runs creatures
//! inside a host-defined [`lab::Habitat`], selects survivors and persists every
//! generation through `bytelab_io`.

pub mod lab;

pub use bytelab_core::{config, creature, dna, error, metrics, selection};
pub use bytelab_data as data;
pub use bytelab_io as io;
pub use lab::{Habitat, Lab};
