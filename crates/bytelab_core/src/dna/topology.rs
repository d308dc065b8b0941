//! Genome to network compilation.
//!
//! [`prune`] removes genes that touch inner neurons lacking a real incoming or
//! outgoing edge, and [`compile`] turns the remaining genes into a compact
//! neuron array with connections addressing it.

use super::ByteDna;
use bytelab_data::{Connection, Gene, Inclusion, NeuronCategory, NeuronSlot, Wiring};

/// Single local pass: an inner neuron survives when some gene feeds it from a
/// different neuron and some gene reads it into a different neuron. Self-loops
/// count for neither. Neurons dropped here are not re-checked against their
/// neighbours, so an isolated ring of inner neurons survives.
///
/// Kept genes retain their original bytes and order.
#[must_use]
pub fn prune(dna: &ByteDna, genome: &[u8]) -> Vec<u8> {
    let genes = dna.decode_genome(genome);
    let inner = dna.inner_neurons();
    let mut has_input = vec![false; inner];
    let mut has_output = vec![false; inner];

    for gene in genes.iter().filter(|g| !g.is_inner_self_loop()) {
        if gene.sink_is_inner() {
            has_input[gene.sink_id] = true;
        }
        if gene.source_is_inner() {
            has_output[gene.source_id] = true;
        }
    }

    let kept = |id: usize| has_input[id] && has_output[id];
    let mut optimized = Vec::with_capacity(genome.len());
    for (gene, bytes) in genes.iter().zip(genome.chunks_exact(dna.gene_bytes())) {
        let source_ok = !gene.source_is_inner() || kept(gene.source_id);
        let sink_ok = !gene.sink_is_inner() || kept(gene.sink_id);
        if source_ok && sink_ok {
            optimized.extend_from_slice(bytes);
        }
    }

    tracing::trace!(
        genes = genes.len(),
        kept = optimized.len() / dna.gene_bytes(),
        "Pruned genome"
    );
    optimized
}

/// `tweak[i]` counts the excluded entries before `i`, so `i - tweak[i]` is the
/// compact position of an included entry.
fn tweaks(included: &[bool]) -> Vec<usize> {
    let mut excluded = 0;
    included
        .iter()
        .map(|&kept| {
            let tweak = excluded;
            if !kept {
                excluded += 1;
            }
            tweak
        })
        .collect()
}

fn mark_inclusion(dna: &ByteDna, genes: &[Gene]) -> Inclusion {
    let mut inclusion = Inclusion::new(dna.input_count(), dna.inner_neurons(), dna.output_count());
    for gene in genes {
        if gene.source_is_inner() {
            inclusion.inners[gene.source_id] = true;
        } else {
            inclusion.inputs[gene.source_id] = true;
        }
        if gene.sink_is_inner() {
            inclusion.inners[gene.sink_id] = true;
        } else {
            inclusion.outputs[gene.sink_id] = true;
        }
    }
    inclusion
}

fn slots(included: &[bool], category: NeuronCategory) -> impl Iterator<Item = NeuronSlot> + '_ {
    included
        .iter()
        .enumerate()
        .filter(|&(_, &kept)| kept)
        .map(move |(id, _)| NeuronSlot { category, id })
}

/// Compiles a genome into its compact network.
///
/// The neuron array holds the referenced inputs, then the referenced inners,
/// then the referenced outputs. A connection's source index is
/// `compact_id + source_type * inputs`; its sink index is
/// `inputs + inners * (1 - sink_type) + compact_id`, where `inputs` and
/// `inners` are the kept counts.
#[must_use]
pub fn compile(dna: &ByteDna, genome: &[u8]) -> Wiring {
    let genes = dna.decode_genome(genome);
    let inclusion = mark_inclusion(dna, &genes);

    let input_tweak = tweaks(&inclusion.inputs);
    let inner_tweak = tweaks(&inclusion.inners);
    let output_tweak = tweaks(&inclusion.outputs);

    let inputs = inclusion.input_count();
    let inners = inclusion.inner_count();

    let neurons: Vec<NeuronSlot> = slots(&inclusion.inputs, NeuronCategory::Input)
        .chain(slots(&inclusion.inners, NeuronCategory::Inner))
        .chain(slots(&inclusion.outputs, NeuronCategory::Output))
        .collect();

    let connections = genes
        .iter()
        .map(|gene| {
            let source_type = usize::from(gene.source_type);
            let sink_type = usize::from(gene.sink_type);

            let compact_source = if gene.source_is_inner() {
                gene.source_id - inner_tweak[gene.source_id]
            } else {
                gene.source_id - input_tweak[gene.source_id]
            };
            let compact_sink = if gene.sink_is_inner() {
                gene.sink_id - inner_tweak[gene.sink_id]
            } else {
                gene.sink_id - output_tweak[gene.sink_id]
            };

            Connection {
                source: compact_source + source_type * inputs,
                sink: inputs + inners * (1 - sink_type) + compact_sink,
                weight: gene.weight,
            }
        })
        .collect();

    Wiring {
        neurons,
        connections,
        inclusion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dna::tests::{gene, genome, small_dna};

    const IN: u8 = 0;
    const OUT: u8 = 0;
    const INNER: u8 = 1;

    #[test]
    fn test_prune_keeps_genomes_without_inner_neurons() {
        let dna = small_dna();
        let genome = genome(&[
            gene(&dna, (IN, 0), (OUT, 0), 100),
            gene(&dna, (IN, 3), (OUT, 2), 200),
            gene(&dna, (IN, 1), (OUT, 1), 300),
            gene(&dna, (IN, 0), (OUT, 2), 400),
        ]);
        assert_eq!(dna.prune(&genome), genome);
    }

    #[test]
    fn test_prune_drops_inner_self_loop() {
        let dna = small_dna();
        let loop_gene = gene(&dna, (INNER, 1), (INNER, 1), 7);
        let genome = genome(&[
            gene(&dna, (IN, 0), (OUT, 0), 100),
            loop_gene.clone(),
            gene(&dna, (IN, 1), (OUT, 1), 300),
            loop_gene,
        ]);

        let expected = [genome[0..3].to_vec(), genome[6..9].to_vec()].concat();
        assert_eq!(dna.prune(&genome), expected);
    }

    #[test]
    fn test_prune_keeps_relay_through_inner_neuron() {
        let dna = small_dna();
        let genome = genome(&[
            gene(&dna, (IN, 2), (INNER, 0), 1),
            gene(&dna, (INNER, 0), (OUT, 1), 2),
            gene(&dna, (IN, 0), (INNER, 1), 3), // inner 1 never feeds anything
            gene(&dna, (IN, 0), (OUT, 0), 4),
        ]);

        let optimized = dna.prune(&genome);
        let expected = [genome[0..6].to_vec(), genome[9..12].to_vec()].concat();
        assert_eq!(optimized, expected);
    }

    #[test]
    fn test_prune_is_a_single_local_pass() {
        let dna = small_dna();
        // Two inner neurons feeding each other, with no path from an input or
        // to an output, both pass the local check.
        let genome = genome(&[
            gene(&dna, (INNER, 0), (INNER, 1), 1),
            gene(&dna, (INNER, 1), (INNER, 0), 2),
            gene(&dna, (IN, 0), (OUT, 0), 3),
            gene(&dna, (IN, 1), (OUT, 1), 4),
        ]);
        assert_eq!(dna.prune(&genome), genome);
    }

    #[test]
    fn test_prune_empty_genome() {
        let dna = small_dna();
        assert!(dna.prune(&[]).is_empty());
    }

    #[test]
    fn test_tweaks() {
        assert_eq!(tweaks(&[true, false, true, false, true]), vec![0, 0, 1, 1, 2]);
        assert_eq!(tweaks(&[false, false, true]), vec![0, 1, 2]);
        assert!(tweaks(&[]).is_empty());
    }

    #[test]
    fn test_compile_compacts_and_offsets_indices() {
        let dna = small_dna();
        let genome = genome(&[
            gene(&dna, (IN, 2), (INNER, 1), 0),
            gene(&dna, (INNER, 1), (OUT, 0), 2048),
            gene(&dna, (IN, 0), (OUT, 2), 4095),
        ]);

        let wiring = dna.compile(&genome);

        let slot = |category, id| NeuronSlot { category, id };
        assert_eq!(
            wiring.neurons,
            vec![
                slot(NeuronCategory::Input, 0),
                slot(NeuronCategory::Input, 2),
                slot(NeuronCategory::Inner, 1),
                slot(NeuronCategory::Output, 0),
                slot(NeuronCategory::Output, 2),
            ]
        );

        let indices: Vec<(usize, usize)> = wiring
            .connections
            .iter()
            .map(|c| (c.source, c.sink))
            .collect();
        assert_eq!(indices, vec![(1, 2), (2, 3), (0, 4)]);

        assert_eq!(wiring.connections[0].weight, -4.0);
        assert_eq!(wiring.connections[1].weight, 0.0);
        assert_eq!(wiring.inclusion.inputs, vec![true, false, true, false]);
        assert_eq!(wiring.inclusion.inners, vec![false, true]);
        assert_eq!(wiring.inclusion.outputs, vec![true, false, true]);
    }

    #[test]
    fn test_compile_inner_to_inner() {
        let dna = small_dna();
        let genome = genome(&[
            gene(&dna, (IN, 3), (INNER, 0), 0),
            gene(&dna, (INNER, 0), (INNER, 1), 0),
            gene(&dna, (INNER, 1), (OUT, 1), 0),
        ]);

        let wiring = dna.compile(&genome);
        assert_eq!(wiring.neuron_count(), 4);

        let indices: Vec<(usize, usize)> = wiring
            .connections
            .iter()
            .map(|c| (c.source, c.sink))
            .collect();
        // [input 3, inner 0, inner 1, output 1]
        assert_eq!(indices, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_compile_empty_genome() {
        let dna = small_dna();
        let wiring = dna.compile(&[]);
        assert!(wiring.is_empty());
        assert_eq!(wiring.inclusion.inputs.len(), 4);
    }
}
