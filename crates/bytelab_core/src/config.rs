//! Configuration management for lab parameters.
//!
//! Strongly-typed configuration structures that map to a `lab.toml` file.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `lab.toml` file (overrides defaults, section by section)
//!
//! ## Example `lab.toml`
//!
//! ```toml
//! [dna]
//! genome_len = 16
//! gene_bytes = 3
//! inner_neurons = 2
//! mutation_rate = 0.01
//!
//! [lab]
//! name = "corridor"
//! population = 256
//! seed = 42
//!
//! [[selection]]
//! name = "x"
//! operator = ">"
//! value = 16.0
//! ```

use bytelab_data::{LabProperties, SelectionCriterion};
use serde::{Deserialize, Serialize};

/// Genome encoding and genetic operator parameters.
///
/// A gene holds `2 + source_id_len + sink_id_len + weight_len` bits inside
/// `gene_bytes` big-endian bytes; any spare high bits are padding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DnaConfig {
    /// Genes per genome.
    pub genome_len: usize,
    /// Bytes taken by a single gene.
    pub gene_bytes: usize,
    /// Size of the inner neuron pool.
    pub inner_neurons: usize,
    /// Probability of a bit flip per gene per generation.
    pub mutation_rate: f64,
    pub source_id_len: u32,
    pub sink_id_len: u32,
    pub weight_len: u32,
    /// Total span of connection weights, centred on zero (8.0 gives -4.0..4.0).
    pub weight_range: f64,
}

impl Default for DnaConfig {
    fn default() -> Self {
        Self {
            genome_len: 16,
            gene_bytes: 3,
            inner_neurons: 1,
            mutation_rate: 0.01,
            source_id_len: 5,
            sink_id_len: 5,
            weight_len: 12,
            weight_range: 8.0,
        }
    }
}

impl DnaConfig {
    /// Number of meaningful bits in a gene.
    #[must_use]
    pub fn gene_bits(&self) -> u32 {
        2 + self.source_id_len + self.sink_id_len + self.weight_len
    }

    /// A gene mutates when a draw from `0..interval` hits zero.
    #[must_use]
    pub fn mutation_interval(&self) -> u32 {
        if self.mutation_rate <= 0.0 {
            return u32::MAX;
        }
        (1.0 / self.mutation_rate).round().clamp(1.0, f64::from(u32::MAX)) as u32
    }
}

/// Generation loop and storage parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LabSettings {
    /// Lab name, also the directory name under `save_dir`.
    pub name: String,
    pub save_dir: String,
    pub population: usize,
    pub steps_per_gen: usize,
    /// Generations kept in memory before they are flushed to disk.
    pub gens_per_save: usize,
    pub seed: Option<u64>,
}

impl Default for LabSettings {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            save_dir: "saves".to_string(),
            population: 128,
            steps_per_gen: 128,
            gens_per_save: 100,
            seed: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LabConfig {
    pub dna: DnaConfig,
    pub lab: LabSettings,
    pub selection: Vec<SelectionCriterion>,
}

impl LabConfig {
    /// Validates configuration values.
    ///
    /// Returns an error describing the first invalid field found.
    pub fn validate(&self) -> anyhow::Result<()> {
        // DNA validation
        anyhow::ensure!(self.dna.genome_len > 0, "Genome length must be positive");
        anyhow::ensure!(
            (1..=8).contains(&self.dna.gene_bytes),
            "Gene bytes must be in [1, 8]"
        );
        anyhow::ensure!(
            self.dna.gene_bits() as usize <= self.dna.gene_bytes * 8,
            "Gene fields need {} bits but {} gene bytes only hold {}",
            self.dna.gene_bits(),
            self.dna.gene_bytes,
            self.dna.gene_bytes * 8
        );
        anyhow::ensure!(
            self.dna.inner_neurons > 0,
            "Inner neuron count must be positive"
        );
        anyhow::ensure!(
            self.dna.mutation_rate > 0.0 && self.dna.mutation_rate <= 1.0,
            "Mutation rate must be in (0.0, 1.0]"
        );
        anyhow::ensure!(
            self.dna.weight_range.is_finite() && self.dna.weight_range >= 0.0,
            "Weight range must be finite and non-negative"
        );

        // Lab validation
        anyhow::ensure!(!self.lab.name.is_empty(), "Lab name must not be empty");
        anyhow::ensure!(self.lab.population > 0, "Population must be positive");
        anyhow::ensure!(
            self.lab.gens_per_save > 0,
            "Generations per save must be positive"
        );

        for criterion in &self.selection {
            anyhow::ensure!(
                !criterion.name.is_empty(),
                "Selection criterion names must not be empty"
            );
            anyhow::ensure!(
                criterion.value.is_finite(),
                "Selection criterion '{}' has a non-finite value",
                criterion.name
            );
        }

        Ok(())
    }

    /// Parses and validates configuration from TOML content.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&content)
    }

    /// Properties a lab store is created with, for the host's neuron counts.
    #[must_use]
    pub fn properties(&self, inputs_len: usize, outputs_len: usize) -> LabProperties {
        LabProperties {
            inputs_len,
            outputs_len,
            genome_len: self.dna.genome_len,
            gene_bytes: self.dna.gene_bytes,
            inner_neurons: self.dna.inner_neurons,
            mutation_interval: self.dna.mutation_interval(),
            source_id_len: self.dna.source_id_len,
            sink_id_len: self.dna.sink_id_len,
            weight_len: self.dna.weight_len,
            weight_range: self.dna.weight_range,
            population: self.lab.population,
            steps_per_gen: self.lab.steps_per_gen,
        }
    }

    /// Directory holding this lab's store.
    #[must_use]
    pub fn lab_dir(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.lab.save_dir).join(&self.lab.name)
    }

    /// Digest of every setting that changes what a stored genome means.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.dna).as_bytes());
        hasher.update(format!("{:?}", self.lab.population).as_bytes());
        hasher.update(format!("{:?}", self.lab.steps_per_gen).as_bytes());
        hasher.update(format!("{:?}", self.selection).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytelab_data::Comparison;

    #[test]
    fn test_default_config_validates() {
        let config = LabConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overflowing_gene_fields() {
        let config = LabConfig {
            dna: DnaConfig {
                weight_len: 13,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_mutation_rate() {
        let config = LabConfig {
            dna: DnaConfig {
                mutation_rate: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_population() {
        let config = LabConfig {
            lab: LabSettings {
                population: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mutation_interval_rounds() {
        let dna = DnaConfig {
            mutation_rate: 0.01,
            ..Default::default()
        };
        assert_eq!(dna.mutation_interval(), 100);

        let dna = DnaConfig {
            mutation_rate: 0.3,
            ..Default::default()
        };
        assert_eq!(dna.mutation_interval(), 3);

        let dna = DnaConfig {
            mutation_rate: 1.0,
            ..Default::default()
        };
        assert_eq!(dna.mutation_interval(), 1);
    }

    #[test]
    fn test_from_toml_partial_sections() {
        let config = LabConfig::from_toml(
            r#"
            [dna]
            inner_neurons = 3

            [lab]
            name = "corridor"
            seed = 7

            [[selection]]
            name = "x"
            operator = ">"
            value = 16.0
            "#,
        )
        .expect("Config should parse");

        assert_eq!(config.dna.inner_neurons, 3);
        assert_eq!(config.dna.gene_bytes, 3);
        assert_eq!(config.lab.name, "corridor");
        assert_eq!(config.lab.seed, Some(7));
        assert_eq!(config.lab.population, 128);
        assert_eq!(config.selection.len(), 1);
        assert_eq!(config.selection[0].operator, Comparison::Greater);
    }

    #[test]
    fn test_properties_follow_config() {
        let config = LabConfig::default();
        let properties = config.properties(6, 2);
        assert_eq!(properties.inputs_len, 6);
        assert_eq!(properties.outputs_len, 2);
        assert_eq!(properties.mutation_interval, 100);
        assert_eq!(properties.genome_bytes(), 3 * 16);
        assert_eq!(properties.population, 128);
        assert_eq!(
            config.lab_dir(),
            std::path::Path::new("saves").join("default")
        );
    }

    #[test]
    fn test_fingerprint_consistency() {
        let config1 = LabConfig::default();
        let config2 = LabConfig::default();
        assert_eq!(config1.fingerprint(), config2.fingerprint());

        let config3 = LabConfig {
            dna: DnaConfig {
                genome_len: 8,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_ne!(config1.fingerprint(), config3.fingerprint());
    }
}
