//! The ByteDNA: gene codec, genetic operators, topology compiler and diversity
//! statistic, all working directly on byte buffers.
//!
//! A genome is `genome_len` consecutive genes of `gene_bytes` bytes each, and a
//! population buffer is a plain concatenation of genomes with no header.

pub mod codec;
pub mod crossover;
pub mod diversity;
pub mod layout;
pub mod mutation;
pub mod topology;

pub use crossover::Offspring;
pub use layout::GeneLayout;

use crate::config::DnaConfig;
use crate::error::DnaError;
use bytelab_data::{Gene, RawGene, Wiring};
use rand::Rng;

/// Immutable genome format plus the neuron pool sizes genes are decoded against.
#[derive(Clone, Debug)]
pub struct ByteDna {
    config: DnaConfig,
    layout: GeneLayout,
    input_count: usize,
    output_count: usize,
    mutation_interval: u32,
}

impl ByteDna {
    /// Builds the codec, refusing configurations whose genes cannot be decoded.
    pub fn new(config: DnaConfig, input_count: usize, output_count: usize) -> Result<Self, DnaError> {
        let layout = GeneLayout::new(
            config.gene_bytes,
            config.source_id_len,
            config.sink_id_len,
            config.weight_len,
        )?;

        if config.genome_len == 0 {
            return Err(DnaError::GenomeLength);
        }
        if input_count == 0 {
            return Err(DnaError::EmptyPool("input"));
        }
        if output_count == 0 {
            return Err(DnaError::EmptyPool("output"));
        }
        if config.inner_neurons == 0 {
            return Err(DnaError::EmptyPool("inner"));
        }
        if !(config.mutation_rate > 0.0 && config.mutation_rate <= 1.0) {
            return Err(DnaError::MutationRate(config.mutation_rate));
        }

        let mutation_interval = config.mutation_interval();
        Ok(Self {
            config,
            layout,
            input_count,
            output_count,
            mutation_interval,
        })
    }

    #[must_use]
    pub fn config(&self) -> &DnaConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &GeneLayout {
        &self.layout
    }

    #[must_use]
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        self.output_count
    }

    #[must_use]
    pub fn inner_neurons(&self) -> usize {
        self.config.inner_neurons
    }

    #[must_use]
    pub fn genome_len(&self) -> usize {
        self.config.genome_len
    }

    #[must_use]
    pub fn gene_bytes(&self) -> usize {
        self.layout.gene_bytes()
    }

    /// Bytes taken by one genome.
    #[must_use]
    pub fn genome_bytes(&self) -> usize {
        self.config.genome_len * self.layout.gene_bytes()
    }

    #[must_use]
    pub fn mutation_interval(&self) -> u32 {
        self.mutation_interval
    }

    /// Number of whole genomes in a population buffer.
    #[must_use]
    pub fn genome_count(&self, genomes: &[u8]) -> usize {
        genomes.len() / self.genome_bytes()
    }

    /// Splits a population buffer into genome views. A trailing partial genome is skipped.
    pub fn separate_genomes<'a>(&self, genomes: &'a [u8]) -> std::slice::ChunksExact<'a, u8> {
        genomes.chunks_exact(self.genome_bytes())
    }

    /// A population of `count` genomes made of uniformly random bytes.
    pub fn random_genomes<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<u8> {
        let mut genomes = vec![0u8; self.genome_bytes() * count];
        rng.fill(genomes.as_mut_slice());
        genomes
    }

    /// The first whole genome of `genomes`. Bytes past it are ignored.
    pub fn first_genome<'a>(&self, genomes: &'a [u8]) -> Result<&'a [u8], DnaError> {
        genomes.get(..self.genome_bytes()).ok_or(DnaError::GenomeSize {
            expected: self.genome_bytes(),
            actual: genomes.len(),
        })
    }

    /// A population of `population` copies of the first genome in `genome`.
    pub fn identical_genomes(&self, genome: &[u8], population: usize) -> Result<Vec<u8>, DnaError> {
        Ok(self.first_genome(genome)?.repeat(population))
    }

    #[must_use]
    pub fn decode_raw(&self, gene: &[u8]) -> RawGene {
        self.layout.decode(gene)
    }

    /// Decodes a gene and reranges it into neuron indices and a real weight.
    #[must_use]
    pub fn decode(&self, gene: &[u8]) -> Gene {
        codec::rerange(self, self.layout.decode(gene))
    }

    #[must_use]
    pub fn rerange(&self, gene: RawGene) -> Gene {
        codec::rerange(self, gene)
    }

    #[must_use]
    pub fn decode_genome(&self, genome: &[u8]) -> Vec<Gene> {
        codec::decode_genome(self, genome)
    }

    #[must_use]
    pub fn decode_genome_raw(&self, genome: &[u8]) -> Vec<RawGene> {
        codec::decode_genome_raw(self, genome)
    }

    /// Breeds the next generation from the survivors. See [`crossover::crossover`].
    pub fn crossover<R: Rng>(&self, survivors: Vec<u8>, population: usize, rng: &mut R) -> Offspring {
        crossover::crossover(self, survivors, population, rng)
    }

    /// Flips random bits in place and returns how many genes mutated.
    pub fn mutate<R: Rng>(&self, genomes: &mut [u8], rng: &mut R) -> usize {
        mutation::mutate(self, genomes, rng)
    }

    /// Drops genes touching inner neurons without both a real input and output edge.
    #[must_use]
    pub fn prune(&self, genome: &[u8]) -> Vec<u8> {
        topology::prune(self, genome)
    }

    #[must_use]
    pub fn compile(&self, genome: &[u8]) -> Wiring {
        topology::compile(self, genome)
    }

    /// Column-wise minority bit share of the first `population` genomes, in `[0, 1]`.
    #[must_use]
    pub fn average_distance(&self, genomes: &[u8], population: usize) -> f64 {
        diversity::average_distance(self, genomes, population)
    }
}
