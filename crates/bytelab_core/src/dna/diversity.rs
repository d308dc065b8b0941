use super::ByteDna;

/// Population diversity as the normalised minority bit count per column.
///
/// For every meaningful gene bit position across the genome, the genomes
/// holding a 0 and those holding a 1 are counted and the smaller count is
/// accumulated over the first `population` genomes present. The sum is divided
/// by half of `gene_bits * genome_len * population`, so identical genomes score
/// 0.0 and a large uniformly random population scores close to 1.0. A buffer
/// holding fewer genomes than `population` scores proportionally lower.
///
/// This is not the mean pairwise Hamming distance, whose per-column term is
/// `zeros * ones`; it is a cheaper stand-in that grows with it.
#[must_use]
pub fn average_distance(dna: &ByteDna, genomes: &[u8], population: usize) -> f64 {
    let layout = dna.layout();
    let gene_bits = layout.gene_bits() as usize;
    if population == 0 {
        return 0.0;
    }

    let mut ones = vec![0usize; dna.genome_len() * gene_bits];

    let mut counted = 0;
    for genome in dna.separate_genomes(genomes).take(population) {
        for (index, gene) in genome.chunks_exact(dna.gene_bytes()).enumerate() {
            let value = layout.read(gene);
            let column = &mut ones[index * gene_bits..(index + 1) * gene_bits];
            for (bit, count) in column.iter_mut().enumerate() {
                *count += (value >> bit & 1) as usize;
            }
        }
        counted += 1;
    }

    let minority: usize = ones.iter().map(|&one| one.min(counted - one)).sum();
    let total_bits = (ones.len() * population) as f64;
    if total_bits == 0.0 {
        return 0.0;
    }
    minority as f64 / (total_bits * 0.5)
}
