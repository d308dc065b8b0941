pub mod macros;

use bytelab_lib::config::{DnaConfig, LabConfig, LabSettings};
use bytelab_lib::creature::NeuronFunctions;
use bytelab_lib::data::{Comparison, RawGene, SelectionCriterion};
use bytelab_lib::dna::ByteDna;
use bytelab_lib::Habitat;
use rand::Rng;
use std::path::PathBuf;

pub const CORRIDOR_WIDTH: i64 = 32;

/// A one-dimensional world: creatures start near the left wall and may step
/// left or right each tick.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct Corridor {
    pub positions: Vec<i64>,
    focused: usize,
}

#[allow(dead_code)]
impl Corridor {
    pub fn position(&self) -> i64 {
        self.positions[self.focused]
    }

    pub fn step(&mut self, dx: i64) {
        let x = &mut self.positions[self.focused];
        *x = (*x + dx).clamp(0, CORRIDOR_WIDTH - 1);
    }
}

impl Habitat for Corridor {
    fn populate<R: Rng>(&mut self, population: usize, rng: &mut R) {
        self.positions = (0..population).map(|_| rng.gen_range(0..8)).collect();
        self.focused = 0;
    }

    fn focus(&mut self, creature: usize) {
        self.focused = creature;
    }

    fn trait_value(&self, creature: usize, name: &str) -> Option<f64> {
        match name {
            "x" => self.positions.get(creature).map(|&x| x as f64),
            _ => None,
        }
    }
}

/// Inputs: bias, normalised position. Outputs: step right, step left.
#[allow(dead_code)]
pub fn corridor_functions() -> NeuronFunctions<Corridor> {
    NeuronFunctions::new()
        .with_input(|_: f32, _: &mut Corridor| 1.0)
        .with_input(|_: f32, corridor: &mut Corridor| {
            corridor.position() as f32 / CORRIDOR_WIDTH as f32
        })
        .with_output(|activation: f32, corridor: &mut Corridor| {
            if activation > 0.5 {
                corridor.step(1);
            }
            activation
        })
        .with_output(|activation: f32, corridor: &mut Corridor| {
            if activation > 0.5 {
                corridor.step(-1);
            }
            activation
        })
}

#[allow(dead_code)]
pub fn temp_save_dir() -> PathBuf {
    std::env::temp_dir().join(format!("bytelab_test_{}", uuid::Uuid::new_v4()))
}

/// Small, seeded corridor lab that keeps right-half creatures.
#[allow(dead_code)]
pub fn corridor_config(save_dir: &std::path::Path, seed: u64) -> LabConfig {
    LabConfig {
        dna: DnaConfig {
            inner_neurons: 2,
            ..Default::default()
        },
        lab: LabSettings {
            name: "corridor".to_string(),
            save_dir: save_dir.to_string_lossy().into_owned(),
            population: 20,
            steps_per_gen: 30,
            gens_per_save: 2,
            seed: Some(seed),
        },
        selection: vec![SelectionCriterion {
            name: "x".to_string(),
            operator: Comparison::Greater,
            value: 16.0,
        }],
    }
}

/// A genome whose every gene wires the bias input to the step-right output at
/// the largest weight.
#[allow(dead_code)]
pub fn right_walker(dna: &ByteDna) -> Vec<u8> {
    let gene = dna.layout().encode(&RawGene {
        source_type: 0,
        source_id: 0,
        sink_type: 0,
        sink_id: 0,
        weight: (1 << dna.config().weight_len) - 1,
    });
    gene.repeat(dna.genome_len())
}
