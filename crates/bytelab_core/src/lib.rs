//! # ByteLab Core
//!
//! Genome codec, genetic operators and neural network compiler for ByteLab,
//! an evolution lab where tiny neural networks are grown from bit-packed genomes.
//!
//! This crate contains:
//! - The gene bit-field layout and its codec (raw and reranged decoding)
//! - Crossover and mutation over whole-population byte buffers
//! - Dead inner neuron pruning and compilation into a compact network
//! - The tick-synchronous network interpreter (`Creature`)
//! - A population diversity statistic
//! - Selection criteria, configuration and metrics
//!
//! ## Example
//!
//! ```
//! use bytelab_core::config::DnaConfig;
//! use bytelab_core::creature::{Creature, NeuronFunctions};
//! use bytelab_core::dna::ByteDna;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let functions = NeuronFunctions::<f32>::new()
//!     .with_input(|_activation: f32, light: &mut f32| *light)
//!     .with_output(|activation: f32, _light: &mut f32| activation);
//! let dna = ByteDna::new(DnaConfig::default(), 1, 1).unwrap();
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let genomes = dna.random_genomes(1, &mut rng);
//! let mut creature = Creature::new(&dna, &genomes, &functions).unwrap();
//!
//! let mut light = 0.5;
//! creature.tick(&mut light);
//! ```

pub mod config;
pub mod creature;
pub mod dna;
pub mod error;
pub mod metrics;
pub mod selection;

pub use creature::{Capability, Creature, NeuronCapability, NeuronFunctions};
pub use dna::{ByteDna, GeneLayout, Offspring};
pub use error::DnaError;
pub use metrics::{init_logging, Metrics};
pub use selection::{select_survivors, survives};
pub use bytelab_data::{
    Comparison, Connection, Gene, GenerationStats, LabProperties, NeuronCategory, NeuronSlot, RawGene,
    SelectionCriterion, Wiring,
};
