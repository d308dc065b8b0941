use serde::{Deserialize, Serialize};

/// Type bit value addressing an input (as source) or an output (as sink).
pub const EXTERNAL: u8 = 0;
/// Type bit value addressing an inner neuron.
pub const INNER: u8 = 1;

/// A gene split into its bit fields, before any reranging.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RawGene {
    /// Source type bit (`EXTERNAL` or `INNER`).
    pub source_type: u8,
    /// Raw source id, `source_id_len` bits wide.
    pub source_id: u64,
    /// Sink type bit (`EXTERNAL` or `INNER`).
    pub sink_type: u8,
    /// Raw sink id, `sink_id_len` bits wide.
    pub sink_id: u64,
    /// Raw weight, `weight_len` bits wide.
    pub weight: u64,
}

/// A gene mapped into its semantic domain: ids index a neuron pool, the weight is real.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Gene {
    pub source_type: u8,
    /// Index into the inputs (`EXTERNAL`) or the inner neurons (`INNER`).
    pub source_id: usize,
    pub sink_type: u8,
    /// Index into the outputs (`EXTERNAL`) or the inner neurons (`INNER`).
    pub sink_id: usize,
    pub weight: f32,
}

impl Gene {
    #[must_use]
    pub fn source_is_inner(&self) -> bool {
        self.source_type == INNER
    }

    #[must_use]
    pub fn sink_is_inner(&self) -> bool {
        self.sink_type == INNER
    }

    /// True when both ends are the same inner neuron.
    #[must_use]
    pub fn is_inner_self_loop(&self) -> bool {
        self.source_is_inner() && self.sink_is_inner() && self.source_id == self.sink_id
    }
}
