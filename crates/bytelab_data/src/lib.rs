//! Plain data records shared by the ByteLab crates.

pub mod data;

pub use data::gene::{Gene, RawGene, EXTERNAL, INNER};
pub use data::lab::{Comparison, GenerationStats, LabProperties, SelectionCriterion};
pub use data::network::{Connection, Inclusion, NeuronCategory, NeuronSlot, Wiring};
