/// Asserts that a diversity value lies in `[0, 1]`.
#[macro_export]
macro_rules! assert_unit_range {
    ($value:expr) => {
        let value = $value;
        assert!(
            (0.0..=1.0).contains(&value),
            "Value {} is outside [0, 1]",
            value
        );
    };
}

/// Asserts the stored generation count and that the genome file matches the
/// per-generation genome counts.
#[macro_export]
macro_rules! assert_stored_generations {
    ($lab:expr, $count:expr) => {
        let stored = $lab
            .store()
            .stored_generations()
            .expect("Failed to count stored generations");
        let (genomes, stats) = $lab.store().load().expect("Stats and genomes disagree");
        assert_eq!(stored, $count, "Expected {} stored generations, found {}", $count, stored);
        let counted: usize = stats.iter().map(|s| s.genomes).sum();
        assert_eq!(genomes.len(), counted * $lab.dna().genome_bytes());
    };
}
