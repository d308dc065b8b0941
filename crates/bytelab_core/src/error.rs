//! Errors raised while building a `ByteDna`, sizing genomes or binding host functions.

use thiserror::Error;

/// Configuration and genome size violations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DnaError {
    /// The gene fields do not fit in the configured byte width.
    #[error("gene fields need {needed} bits but {gene_bytes} gene bytes only hold {available}")]
    Layout {
        needed: u32,
        gene_bytes: usize,
        available: u32,
    },

    /// Genes are read as 64-bit integers, so they span 1 to 8 bytes.
    #[error("gene width must be between 1 and 8 bytes, got {0}")]
    GeneWidth(usize),

    #[error("genome length must be positive")]
    GenomeLength,

    /// A neuron category has no members, so genes could address nothing.
    #[error("{0} neuron pool is empty")]
    EmptyPool(&'static str),

    #[error("mutation rate must be in (0, 1], got {0}")]
    MutationRate(f64),

    /// A buffer shorter than one whole genome.
    #[error("genome needs {expected} bytes, got {actual}")]
    GenomeSize { expected: usize, actual: usize },

    #[error("expected {expected} {kind} functions, got {actual}")]
    FunctionCount {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_display() {
        let err = DnaError::Layout {
            needed: 25,
            gene_bytes: 3,
            available: 24,
        };
        assert_eq!(
            err.to_string(),
            "gene fields need 25 bits but 3 gene bytes only hold 24"
        );
    }

    #[test]
    fn test_function_count_display() {
        let err = DnaError::FunctionCount {
            kind: "input",
            expected: 4,
            actual: 3,
        };
        assert!(err.to_string().contains("4 input functions"));
    }

    #[test]
    fn test_genome_size_display() {
        let err = DnaError::GenomeSize {
            expected: 384,
            actual: 10,
        };
        assert_eq!(err.to_string(), "genome needs 384 bytes, got 10");
    }
}
