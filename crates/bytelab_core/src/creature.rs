//! Compiled creatures and their tick-synchronous network evaluation.
//!
//! Input and output neurons carry a host-supplied capability that reads or
//! writes external state; inner neurons pass their activation through
//! unchanged. The external context type `C` is chosen by the host.

use crate::dna::ByteDna;
use crate::error::DnaError;
use bytelab_data::{NeuronCategory, NeuronSlot, Wiring};
use std::fmt;
use std::sync::Arc;

/// A host function attached to an input or output neuron.
///
/// Receives the neuron's activation for this tick and returns the value stored
/// as the neuron's output for the next tick.
pub trait NeuronCapability<C>: Send + Sync {
    fn apply(&self, activation: f32, context: &mut C) -> f32;
}

impl<C, F> NeuronCapability<C> for F
where
    F: Fn(f32, &mut C) -> f32 + Send + Sync,
{
    fn apply(&self, activation: f32, context: &mut C) -> f32 {
        self(activation, context)
    }
}

/// What a neuron does with its activation.
pub enum Capability<C> {
    /// Inner neurons: the activation is the output.
    Identity,
    External(Arc<dyn NeuronCapability<C>>),
}

impl<C> Capability<C> {
    #[must_use]
    pub fn apply(&self, activation: f32, context: &mut C) -> f32 {
        match self {
            Capability::Identity => activation,
            Capability::External(function) => function.apply(activation, context),
        }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        matches!(self, Capability::Identity)
    }
}

impl<C> Clone for Capability<C> {
    fn clone(&self) -> Self {
        match self {
            Capability::Identity => Capability::Identity,
            Capability::External(function) => Capability::External(Arc::clone(function)),
        }
    }
}

impl<C> fmt::Debug for Capability<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Identity => f.write_str("Identity"),
            Capability::External(_) => f.write_str("External"),
        }
    }
}

/// The host's ordered sensor and actuator functions.
pub struct NeuronFunctions<C> {
    inputs: Vec<Arc<dyn NeuronCapability<C>>>,
    outputs: Vec<Arc<dyn NeuronCapability<C>>>,
}

impl<C> Default for NeuronFunctions<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> NeuronFunctions<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_input<F>(mut self, function: F) -> Self
    where
        F: Fn(f32, &mut C) -> f32 + Send + Sync + 'static,
    {
        self.inputs.push(Arc::new(function));
        self
    }

    #[must_use]
    pub fn with_output<F>(mut self, function: F) -> Self
    where
        F: Fn(f32, &mut C) -> f32 + Send + Sync + 'static,
    {
        self.outputs.push(Arc::new(function));
        self
    }

    #[must_use]
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Capability bound to a compiled neuron slot.
    #[must_use]
    pub fn capability(&self, slot: NeuronSlot) -> Capability<C> {
        match slot.category {
            NeuronCategory::Input => Capability::External(Arc::clone(&self.inputs[slot.id])),
            NeuronCategory::Inner => Capability::Identity,
            NeuronCategory::Output => Capability::External(Arc::clone(&self.outputs[slot.id])),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Neuron<C> {
    pub slot: NeuronSlot,
    pub capability: Capability<C>,
}

/// A genome with its compiled network and per-tick neuron state.
///
/// The genome never changes after construction; only neuron outputs change
/// from tick to tick.
#[derive(Clone, Debug)]
pub struct Creature<C> {
    genome: Vec<u8>,
    wiring: Wiring,
    neurons: Vec<Neuron<C>>,
    inputs: Vec<f32>,
    outputs: Vec<f32>,
}

impl<C> Creature<C> {
    /// Prunes and compiles `genome`, then binds the host functions to its neurons.
    ///
    /// `genome` must hold at least one whole genome; only its first
    /// `genome_bytes` are used.
    pub fn new(dna: &ByteDna, genome: &[u8], functions: &NeuronFunctions<C>) -> Result<Self, DnaError> {
        if functions.input_count() != dna.input_count() {
            return Err(DnaError::FunctionCount {
                kind: "input",
                expected: dna.input_count(),
                actual: functions.input_count(),
            });
        }
        if functions.output_count() != dna.output_count() {
            return Err(DnaError::FunctionCount {
                kind: "output",
                expected: dna.output_count(),
                actual: functions.output_count(),
            });
        }

        let genome = dna.first_genome(genome)?.to_vec();
        let wiring = dna.compile(&dna.prune(&genome));
        tracing::debug!(
            neurons = wiring.neuron_count(),
            connections = wiring.connections.len(),
            "Compiled creature"
        );
        Ok(Self::from_wiring(genome, wiring, functions))
    }

    /// Binds host functions to an already compiled network.
    #[must_use]
    pub fn from_wiring(genome: Vec<u8>, wiring: Wiring, functions: &NeuronFunctions<C>) -> Self {
        let neurons: Vec<Neuron<C>> = wiring
            .neurons
            .iter()
            .map(|&slot| Neuron {
                slot,
                capability: functions.capability(slot),
            })
            .collect();
        let count = neurons.len();

        Self {
            genome,
            wiring,
            neurons,
            inputs: vec![0.0; count],
            outputs: vec![0.0; count],
        }
    }

    #[must_use]
    pub fn genome(&self) -> &[u8] {
        &self.genome
    }

    #[must_use]
    pub fn wiring(&self) -> &Wiring {
        &self.wiring
    }

    #[must_use]
    pub fn neurons(&self) -> &[Neuron<C>] {
        &self.neurons
    }

    /// Neuron outputs produced by the last tick, in compiled neuron order.
    #[must_use]
    pub fn outputs(&self) -> &[f32] {
        &self.outputs
    }

    /// Evaluates one tick.
    ///
    /// Every connection first reads the previous tick's outputs into its sink's
    /// accumulator. Only then is each neuron's output recomputed as
    /// `capability(tanh(sum))`, so no connection observes a value produced in
    /// the same tick.
    pub fn tick(&mut self, context: &mut C) {
        self.inputs.iter_mut().for_each(|input| *input = 0.0);

        for conn in &self.wiring.connections {
            self.inputs[conn.sink] += conn.weight * self.outputs[conn.source];
        }

        for ((output, &input), neuron) in self.outputs.iter_mut().zip(&self.inputs).zip(&self.neurons) {
            *output = neuron.capability.apply(input.tanh(), context);
        }
    }
}
