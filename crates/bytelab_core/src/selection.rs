//! Survival rules applied to creatures at the end of a generation.

use crate::dna::ByteDna;
use bytelab_data::SelectionCriterion;

/// True when every criterion holds for the traits returned by `lookup`.
///
/// A trait the host cannot report fails its criterion. An empty rule list
/// lets everyone survive.
pub fn survives<F>(criteria: &[SelectionCriterion], mut lookup: F) -> bool
where
    F: FnMut(&str) -> Option<f64>,
{
    criteria.iter().all(|criterion| {
        lookup(&criterion.name)
            .is_some_and(|actual| criterion.operator.holds(actual, criterion.value))
    })
}

/// Concatenates the genomes of surviving creatures in population order.
///
/// `lookup` is called with the creature index and a trait name.
pub fn select_survivors<F>(
    dna: &ByteDna,
    genomes: &[u8],
    criteria: &[SelectionCriterion],
    mut lookup: F,
) -> (Vec<u8>, usize)
where
    F: FnMut(usize, &str) -> Option<f64>,
{
    let mut survivors = Vec::new();
    let mut count = 0;
    for (index, genome) in dna.separate_genomes(genomes).enumerate() {
        if survives(criteria, |name| lookup(index, name)) {
            survivors.extend_from_slice(genome);
            count += 1;
        }
    }
    (survivors, count)
}
