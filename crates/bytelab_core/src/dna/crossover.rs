use super::{mutation, ByteDna};
use rand::seq::SliceRandom;
use rand::Rng;

/// Children bred by [`crossover`], with the population size that was asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Offspring {
    pub genomes: Vec<u8>,
    pub requested: usize,
    genome_bytes: usize,
}

impl Offspring {
    /// Number of whole genomes produced.
    #[must_use]
    pub fn count(&self) -> usize {
        self.genomes.len() / self.genome_bytes
    }

    /// How many genomes short of the requested population the brood is.
    #[must_use]
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.count())
    }

    #[must_use]
    pub fn into_genomes(self) -> Vec<u8> {
        self.genomes
    }
}

/// Single-point crossover at gene boundaries, followed by mutation.
///
/// Survivors are shuffled and paired up in order. With an odd survivor count
/// the last shuffled genome is carried over unchanged. Each couple produces
/// `floor(children_per_couple)` children, and the first couples one more each
/// until the fractional remainder is spent. Children come in complementary
/// pairs sharing one cut point; an odd child count emits only the first of the
/// final pair.
///
/// A brood smaller than `population` is logged and returned as is.
pub fn crossover<R: Rng>(
    dna: &ByteDna,
    survivors: Vec<u8>,
    population: usize,
    rng: &mut R,
) -> Offspring {
    let genome_bytes = dna.genome_bytes();
    let gene_bytes = dna.gene_bytes();

    let trailing = survivors.len() % genome_bytes;
    if trailing != 0 {
        tracing::warn!(
            trailing_bytes = trailing,
            "Ignoring partial genome at the end of the survivor buffer"
        );
    }

    let mut parents: Vec<&[u8]> = survivors.chunks_exact(genome_bytes).collect();
    parents.shuffle(rng);

    let mut children = Vec::with_capacity(population * genome_bytes);

    let singles = parents.len() % 2;
    if singles == 1 {
        if let Some(single) = parents.pop() {
            children.extend_from_slice(single);
        }
    }

    let parents_count = parents.len();
    if parents_count > 0 {
        let needed = population.saturating_sub(singles);
        let children_per_couple = needed as f64 / parents_count as f64 * 2.0;
        let base = children_per_couple.floor();
        let mut extra = ((children_per_couple - base) * (parents_count as f64 * 0.5)).round() as usize;
        let base = base as usize;

        for couple in parents.chunks_exact(2) {
            let (parent0, parent1) = (couple[0], couple[1]);

            let mut children_count = base;
            if extra > 0 {
                children_count += 1;
                extra -= 1;
            }

            for child in (0..children_count).step_by(2) {
                let cut = rng.gen_range(0..dna.genome_len()) * gene_bytes;
                children.extend_from_slice(&parent0[..cut]);
                children.extend_from_slice(&parent1[cut..]);
                if child + 1 < children_count {
                    children.extend_from_slice(&parent1[..cut]);
                    children.extend_from_slice(&parent0[cut..]);
                }
            }
        }
    }

    let mut offspring = Offspring {
        genomes: children,
        requested: population,
        genome_bytes,
    };
    if offspring.shortfall() > 0 {
        tracing::warn!(
            produced = offspring.count(),
            requested = population,
            "Crossover produced a smaller population"
        );
    }

    mutation::mutate(dna, &mut offspring.genomes, rng);
    offspring
}
