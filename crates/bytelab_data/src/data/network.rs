use serde::{Deserialize, Serialize};

/// Category of a neuron in a compiled network.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NeuronCategory {
    /// Sensor neuron backed by a host input function.
    Input,
    /// Hidden neuron without any external capability.
    Inner,
    /// Actuator neuron backed by a host output function.
    Output,
}

/// A neuron kept by the compiler, identified by its pool index in its category.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NeuronSlot {
    pub category: NeuronCategory,
    pub id: usize,
}

/// A weighted edge between two slots of the compacted neuron array.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Connection {
    pub source: usize,
    pub sink: usize,
    pub weight: f32,
}

/// Which pool entries a genome references, per category.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Inclusion {
    pub inputs: Vec<bool>,
    pub inners: Vec<bool>,
    pub outputs: Vec<bool>,
}

impl Inclusion {
    #[must_use]
    pub fn new(inputs: usize, inners: usize, outputs: usize) -> Self {
        Self {
            inputs: vec![false; inputs],
            inners: vec![false; inners],
            outputs: vec![false; outputs],
        }
    }

    #[must_use]
    pub fn input_count(&self) -> usize {
        self.inputs.iter().filter(|&&kept| kept).count()
    }

    #[must_use]
    pub fn inner_count(&self) -> usize {
        self.inners.iter().filter(|&&kept| kept).count()
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.iter().filter(|&&kept| kept).count()
    }
}

/// Compiled form of a genome: the compact neuron array and its connections.
///
/// Neurons are laid out as kept inputs, then kept inners, then kept outputs,
/// each group in pool order. Connection indices address this array.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Wiring {
    pub neurons: Vec<NeuronSlot>,
    pub connections: Vec<Connection>,
    pub inclusion: Inclusion,
}

impl Wiring {
    #[must_use]
    pub fn neuron_count(&self) -> usize {
        self.neurons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty() && self.connections.is_empty()
    }
}
