use super::ByteDna;
use rand::Rng;

/// Point mutation over every gene slot of a population buffer.
///
/// Each gene independently draws from `0..mutation_interval`; a zero flips one
/// uniformly chosen bit of one uniformly chosen byte of that gene. Byte length
/// and gene count never change. Returns the number of mutated genes.
pub fn mutate<R: Rng>(dna: &ByteDna, genomes: &mut [u8], rng: &mut R) -> usize {
    let interval = dna.mutation_interval();
    let gene_bytes = dna.gene_bytes();
    let mut mutated = 0;

    for gene in genomes.chunks_exact_mut(gene_bytes) {
        if rng.gen_range(0..interval) == 0 {
            let byte = rng.gen_range(0..gene_bytes);
            let bit = rng.gen_range(0..8u32);
            gene[byte] ^= 0x80 >> bit;
            mutated += 1;
        }
    }

    mutated
}
