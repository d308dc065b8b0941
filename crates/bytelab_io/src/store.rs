//! On-disk lab store.
//!
//! A lab directory holds three files:
//! - `properties.json`: the [`LabProperties`] the lab was created with
//! - `genomes.bin`: every stored generation's genomes, back to back
//! - `stats.json`: one [`GenerationStats`] entry per stored generation
//!
//! Generations vary in size, so `stats.json` is the index into `genomes.bin`:
//! each entry's `genomes` count says how many whole genomes it occupies.
//! Genome buffers carry no header, so a store only opens for a lab whose
//! properties are identical to the stored ones.

use crate::error::{IoError, Result};
use crate::serialization::{read_json_file, write_json_file};
use bytelab_data::{GenerationStats, LabProperties};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

const PROPERTIES_FILE: &str = "properties.json";
const GENOMES_FILE: &str = "genomes.bin";
const STATS_FILE: &str = "stats.json";

#[derive(Debug)]
pub struct LabStore {
    dir: PathBuf,
    properties: LabProperties,
}

impl LabStore {
    /// Opens the store in `dir`, creating it on first use.
    ///
    /// Fails with [`IoError::Validation`] when the directory already belongs to
    /// a lab with different properties.
    pub fn open<P: AsRef<Path>>(dir: P, properties: LabProperties) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if properties.genome_bytes() == 0 {
            return Err(IoError::validation("A genome must take at least one byte"));
        }
        fs::create_dir_all(&dir).map_err(|e| {
            IoError::FileSystem(e).with_context(format!("creating lab directory {:?}", dir))
        })?;

        let properties_path = dir.join(PROPERTIES_FILE);
        if properties_path.exists() {
            let stored: LabProperties = read_json_file(&properties_path)?;
            if stored != properties {
                return Err(IoError::validation(format!(
                    "Lab at {:?} was created with different properties: stored {:?}, running {:?}",
                    dir, stored, properties
                )));
            }
        } else {
            write_json_file(&properties, &properties_path)?;
        }

        Ok(Self { dir, properties })
    }

    /// True when `dir` already holds a lab store.
    #[must_use]
    pub fn exists<P: AsRef<Path>>(dir: P) -> bool {
        dir.as_ref().join(PROPERTIES_FILE).exists()
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn properties(&self) -> &LabProperties {
        &self.properties
    }

    fn genomes_path(&self) -> PathBuf {
        self.dir.join(GENOMES_FILE)
    }

    fn stats_path(&self) -> PathBuf {
        self.dir.join(STATS_FILE)
    }

    /// Bytes taken by the generations described by `stats`.
    fn span(&self, stats: &[GenerationStats]) -> usize {
        stats.iter().map(|s| s.genomes).sum::<usize>() * self.properties.genome_bytes()
    }

    /// Appends whole generations and their statistics.
    ///
    /// `genomes` must hold exactly the genomes counted by the `stats` entries,
    /// in order. A generation may hold no genomes at all.
    pub fn append(&self, genomes: &[u8], stats: &[GenerationStats]) -> Result<()> {
        let expected = self.span(stats);
        if genomes.len() != expected {
            return Err(IoError::validation(format!(
                "Expected {} bytes for {} generations, got {} bytes",
                expected,
                stats.len(),
                genomes.len()
            )));
        }

        let path = self.genomes_path();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| IoError::FileSystem(e).with_context(format!("opening {:?}", path)))?;
        file.write_all(genomes)?;

        let mut all_stats = self.load_stats()?;
        all_stats.extend_from_slice(stats);
        write_json_file(&all_stats, self.stats_path())
    }

    /// Every stored generation's genomes, concatenated, and their statistics.
    ///
    /// Fails when `genomes.bin` disagrees with the sizes recorded in `stats.json`.
    pub fn load(&self) -> Result<(Vec<u8>, Vec<GenerationStats>)> {
        let path = self.genomes_path();
        let genomes = if path.exists() {
            fs::read(&path)
                .map_err(|e| IoError::FileSystem(e).with_context(format!("reading {:?}", path)))?
        } else {
            Vec::new()
        };
        let stats = self.load_stats()?;
        let expected = self.span(&stats);
        if genomes.len() != expected {
            return Err(IoError::validation(format!(
                "{:?} holds {} bytes but its {} generations account for {}",
                path,
                genomes.len(),
                stats.len(),
                expected
            )));
        }
        Ok((genomes, stats))
    }

    pub fn load_stats(&self) -> Result<Vec<GenerationStats>> {
        let path = self.stats_path();
        if path.exists() {
            read_json_file(path)
        } else {
            Ok(Vec::new())
        }
    }

    pub fn stored_generations(&self) -> Result<usize> {
        Ok(self.load_stats()?.len())
    }

    /// Reads one stored generation, exactly as it was appended, without
    /// loading the whole history.
    pub fn generation(&self, index: usize) -> Result<Vec<u8>> {
        let stats = self.load_stats()?;
        if index >= stats.len() {
            return Err(IoError::not_found(format!(
                "generation {} ({} stored)",
                index,
                stats.len()
            )));
        }

        let offset = self.span(&stats[..index]);
        let mut genomes = vec![0u8; self.span(&stats[index..=index])];
        if genomes.is_empty() {
            return Ok(genomes);
        }
        let path = self.genomes_path();
        let mut file = File::open(&path)
            .map_err(|e| IoError::FileSystem(e).with_context(format!("opening {:?}", path)))?;
        file.seek(SeekFrom::Start(offset as u64))?;
        file.read_exact(&mut genomes)
            .map_err(|e| IoError::FileSystem(e).with_context(format!("reading generation {}", index)))?;
        Ok(genomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_lab_dir() -> PathBuf {
        std::env::temp_dir().join(format!("bytelab_store_{}", uuid::Uuid::new_v4()))
    }

    fn properties() -> LabProperties {
        LabProperties {
            inputs_len: 4,
            outputs_len: 3,
            genome_len: 4,
            gene_bytes: 3,
            inner_neurons: 2,
            mutation_interval: 100,
            source_id_len: 5,
            sink_id_len: 5,
            weight_len: 12,
            weight_range: 8.0,
            population: 2,
            steps_per_gen: 10,
        }
    }

    fn stats(genomes: usize, survived: usize) -> GenerationStats {
        GenerationStats {
            genomes,
            survived,
            diversity: 0.5,
        }
    }

    #[test]
    fn test_append_and_load_roundtrip() {
        let dir = temp_lab_dir();
        let store = LabStore::open(&dir, properties()).unwrap();
        let first: Vec<u8> = (0..24).collect();
        let rest: Vec<u8> = (100..148).collect();

        store.append(&first, &[stats(2, 1)]).unwrap();
        store.append(&rest, &[stats(2, 2), stats(2, 0)]).unwrap();

        let (genomes, all_stats) = store.load().unwrap();
        assert_eq!(genomes, [first, rest.clone()].concat());
        assert_eq!(all_stats, vec![stats(2, 1), stats(2, 2), stats(2, 0)]);
        assert_eq!(store.stored_generations().unwrap(), 3);
        assert_eq!(store.generation(2).unwrap(), rest[24..].to_vec());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_generations_of_varying_size() {
        let dir = temp_lab_dir();
        let store = LabStore::open(&dir, properties()).unwrap();
        let full: Vec<u8> = (0..24).collect();
        let single: Vec<u8> = (50..62).collect();

        store.append(&full, &[stats(2, 1)]).unwrap();
        store.append(&[], &[stats(0, 0)]).unwrap();
        store.append(&single, &[stats(1, 1)]).unwrap();

        assert_eq!(store.stored_generations().unwrap(), 3);
        assert_eq!(store.generation(0).unwrap(), full);
        assert!(store.generation(1).unwrap().is_empty());
        assert_eq!(store.generation(2).unwrap(), single);

        let (genomes, _) = store.load().unwrap();
        assert_eq!(genomes.len(), 36);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_rejects_mismatched_genome_file() {
        let dir = temp_lab_dir();
        let store = LabStore::open(&dir, properties()).unwrap();
        store.append(&[7u8; 12], &[stats(1, 1)]).unwrap();
        fs::write(dir.join(GENOMES_FILE), [7u8; 24]).unwrap();

        assert!(matches!(store.load(), Err(IoError::Validation(_))));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_store() {
        let dir = temp_lab_dir();
        let store = LabStore::open(&dir, properties()).unwrap();

        let (genomes, all_stats) = store.load().unwrap();
        assert!(genomes.is_empty());
        assert!(all_stats.is_empty());
        assert_eq!(store.stored_generations().unwrap(), 0);
        assert!(matches!(store.generation(0), Err(IoError::NotFound(_))));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_reopen_requires_same_properties() {
        let dir = temp_lab_dir();
        LabStore::open(&dir, properties()).unwrap();
        assert!(LabStore::exists(&dir));
        assert!(LabStore::open(&dir, properties()).is_ok());

        let mut changed = properties();
        changed.inner_neurons = 3;
        let result = LabStore::open(&dir, changed);
        assert!(matches!(result, Err(IoError::Validation(_))));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_append_rejects_partial_generation() {
        let dir = temp_lab_dir();
        let store = LabStore::open(&dir, properties()).unwrap();

        let result = store.append(&[0u8; 23], &[stats(2, 1)]);
        assert!(matches!(result, Err(IoError::Validation(_))));
        assert_eq!(store.stored_generations().unwrap(), 0);

        fs::remove_dir_all(&dir).ok();
    }
}
