//! Reranging of raw gene fields into their semantic domains.
//!
//! Ids are scaled from `[0, 2^id_len)` onto the neuron pool they address and
//! floored; weights are scaled from `[0, 2^weight_len)` onto
//! `[-weight_range / 2, weight_range / 2)`.

use super::ByteDna;
use bytelab_data::{Gene, RawGene, INNER};

fn scale_id(id: u64, id_len: u32, pool: usize) -> usize {
    let span = 2f64.powi(id_len as i32);
    let scaled = ((id as f64 / span) * pool as f64).floor() as usize;
    scaled.min(pool.saturating_sub(1))
}

/// Size of the pool a source or sink id addresses.
fn pool_len(dna: &ByteDna, neuron_type: u8, is_source: bool) -> usize {
    match (neuron_type == INNER, is_source) {
        (true, _) => dna.inner_neurons(),
        (false, true) => dna.input_count(),
        (false, false) => dna.output_count(),
    }
}

#[must_use]
pub fn rerange(dna: &ByteDna, raw: RawGene) -> Gene {
    let config = dna.config();
    let weight_span = 2f64.powi(config.weight_len as i32);
    let weight = (raw.weight as f64 / weight_span) * config.weight_range - config.weight_range * 0.5;

    Gene {
        source_type: raw.source_type,
        source_id: scale_id(
            raw.source_id,
            config.source_id_len,
            pool_len(dna, raw.source_type, true),
        ),
        sink_type: raw.sink_type,
        sink_id: scale_id(
            raw.sink_id,
            config.sink_id_len,
            pool_len(dna, raw.sink_type, false),
        ),
        weight: weight as f32,
    }
}

#[must_use]
pub fn decode_genome_raw(dna: &ByteDna, genome: &[u8]) -> Vec<RawGene> {
    genome
        .chunks_exact(dna.gene_bytes())
        .map(|gene| dna.layout().decode(gene))
        .collect()
}

#[must_use]
pub fn decode_genome(dna: &ByteDna, genome: &[u8]) -> Vec<Gene> {
    genome
        .chunks_exact(dna.gene_bytes())
        .map(|gene| dna.decode(gene))
        .collect()
}
