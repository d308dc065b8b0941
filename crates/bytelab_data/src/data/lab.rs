use serde::{Deserialize, Serialize};

/// Per-generation statistics stored alongside the genomes.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct GenerationStats {
    /// Number of whole genomes stored for the generation.
    pub genomes: usize,
    /// Number of creatures that met every selection criterion.
    pub survived: usize,
    /// Population-wide genetic diversity in `[0, 1]`.
    pub diversity: f64,
}

/// Lab properties persisted next to the genomes.
///
/// A stored lab can only be resumed by a lab with identical properties, since
/// the raw genome buffers carry no header.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LabProperties {
    pub inputs_len: usize,
    pub outputs_len: usize,
    pub genome_len: usize,
    pub gene_bytes: usize,
    pub inner_neurons: usize,
    pub mutation_interval: u32,
    pub source_id_len: u32,
    pub sink_id_len: u32,
    pub weight_len: u32,
    pub weight_range: f64,
    pub population: usize,
    pub steps_per_gen: usize,
}

impl LabProperties {
    /// Bytes taken by one stored genome.
    #[must_use]
    pub fn genome_bytes(&self) -> usize {
        self.gene_bytes * self.genome_len
    }
}

/// Comparison operator of a selection criterion.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Comparison {
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Greater,
}

impl Comparison {
    #[must_use]
    pub fn holds(self, actual: f64, expected: f64) -> bool {
        match self {
            Comparison::Equal => actual == expected,
            Comparison::Less => actual < expected,
            Comparison::Greater => actual > expected,
        }
    }
}

/// A survival rule on one named creature trait, e.g. `x > 16`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SelectionCriterion {
    pub name: String,
    pub operator: Comparison,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_symbols() {
        let criterion: SelectionCriterion =
            serde_json::from_str(r#"{"name":"x","operator":">","value":16.0}"#)
                .expect("Failed to parse criterion");
        assert_eq!(criterion.operator, Comparison::Greater);
        assert!(criterion.operator.holds(17.0, criterion.value));
        assert!(!criterion.operator.holds(16.0, criterion.value));
    }

    #[test]
    fn test_stats_require_genome_count() {
        let stats: GenerationStats =
            serde_json::from_str(r#"{"genomes":0,"survived":0,"diversity":0.0}"#)
                .expect("Failed to parse stats");
        assert_eq!(stats, GenerationStats::default());
        assert!(serde_json::from_str::<GenerationStats>(r#"{"survived":0,"diversity":0.0}"#).is_err());
    }

    #[test]
    fn test_genome_bytes() {
        let properties = LabProperties {
            inputs_len: 4,
            outputs_len: 4,
            genome_len: 16,
            gene_bytes: 3,
            inner_neurons: 1,
            mutation_interval: 100,
            source_id_len: 5,
            sink_id_len: 5,
            weight_len: 12,
            weight_range: 8.0,
            population: 128,
            steps_per_gen: 128,
        };
        assert_eq!(properties.genome_bytes(), 3 * 16);
    }
}
