//! Core data structures for the ByteLab simulation.

pub mod gene;
pub mod lab;
pub mod network;
