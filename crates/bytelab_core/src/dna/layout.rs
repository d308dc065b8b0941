//! Bit-field layout of a gene.
//!
//! From the most significant meaningful bit downward a gene holds
//! `source_type`(1), `source_id`, `sink_type`(1) and `sink_id`; the weight
//! always occupies the lowest `weight_len` bits. Bits above `gene_bits` are
//! padding and never read.

use crate::error::DnaError;
use bytelab_data::RawGene;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneLayout {
    gene_bytes: usize,
    gene_bits: u32,
    source_type_shift: u32,
    source_id_shift: u32,
    sink_type_shift: u32,
    sink_id_shift: u32,
    source_id_mask: u64,
    sink_id_mask: u64,
    weight_mask: u64,
}

fn mask(len: u32) -> u64 {
    if len >= 64 {
        u64::MAX
    } else {
        (1u64 << len) - 1
    }
}

impl GeneLayout {
    pub fn new(
        gene_bytes: usize,
        source_id_len: u32,
        sink_id_len: u32,
        weight_len: u32,
    ) -> Result<Self, DnaError> {
        if !(1..=8).contains(&gene_bytes) {
            return Err(DnaError::GeneWidth(gene_bytes));
        }
        let available = gene_bytes as u32 * 8;
        let needed = 2 + source_id_len + sink_id_len + weight_len;
        if needed > available {
            return Err(DnaError::Layout {
                needed,
                gene_bytes,
                available,
            });
        }

        let source_type_shift = needed - 1;
        let source_id_shift = source_type_shift - source_id_len;
        let sink_type_shift = source_id_shift - 1;
        let sink_id_shift = sink_type_shift - sink_id_len;

        Ok(Self {
            gene_bytes,
            gene_bits: needed,
            source_type_shift,
            source_id_shift,
            sink_type_shift,
            sink_id_shift,
            source_id_mask: mask(source_id_len),
            sink_id_mask: mask(sink_id_len),
            weight_mask: mask(weight_len),
        })
    }

    #[must_use]
    pub fn gene_bytes(&self) -> usize {
        self.gene_bytes
    }

    #[must_use]
    pub fn gene_bits(&self) -> u32 {
        self.gene_bits
    }

    /// Reads a gene as a big-endian unsigned integer.
    #[must_use]
    pub fn read(&self, gene: &[u8]) -> u64 {
        gene[..self.gene_bytes]
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte))
    }

    #[must_use]
    pub fn decode(&self, gene: &[u8]) -> RawGene {
        let g = self.read(gene);
        RawGene {
            source_type: (g >> self.source_type_shift & 1) as u8,
            source_id: g >> self.source_id_shift & self.source_id_mask,
            sink_type: (g >> self.sink_type_shift & 1) as u8,
            sink_id: g >> self.sink_id_shift & self.sink_id_mask,
            weight: g & self.weight_mask,
        }
    }

    /// Packs the fields back into `gene_bytes` bytes. Padding bits come out zero.
    #[must_use]
    pub fn encode(&self, gene: &RawGene) -> Vec<u8> {
        let mut out = vec![0u8; self.gene_bytes];
        self.encode_into(gene, &mut out);
        out
    }

    pub fn encode_into(&self, gene: &RawGene, out: &mut [u8]) {
        let g = (u64::from(gene.source_type) & 1) << self.source_type_shift
            | (gene.source_id & self.source_id_mask) << self.source_id_shift
            | (u64::from(gene.sink_type) & 1) << self.sink_type_shift
            | (gene.sink_id & self.sink_id_mask) << self.sink_id_shift
            | gene.weight & self.weight_mask;
        out[..self.gene_bytes].copy_from_slice(&g.to_be_bytes()[8 - self.gene_bytes..]);
    }
}
