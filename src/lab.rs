//! Generation driver: breeds, runs, selects and stores generations.

use anyhow::{Context, Result};
use bytelab_core::config::LabConfig;
use bytelab_core::creature::{Creature, NeuronFunctions};
use bytelab_core::dna::ByteDna;
use bytelab_core::metrics::Metrics;
use bytelab_core::selection::select_survivors;
use bytelab_data::GenerationStats;
use bytelab_io::LabStore;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// The world creatures live in during a generation.
///
/// The habitat is the context handed to every input and output function, so
/// those functions act on whichever creature was focused last.
pub trait Habitat {
    /// Resets the habitat for a fresh generation of `population` creatures.
    fn populate<R: Rng>(&mut self, population: usize, rng: &mut R);

    /// Selects the creature the next network tick belongs to.
    fn focus(&mut self, creature: usize);

    /// A named trait of a creature, used by selection criteria.
    fn trait_value(&self, creature: usize, name: &str) -> Option<f64>;
}

/// A running lab bound to its on-disk store.
pub struct Lab<H: Habitat> {
    config: LabConfig,
    dna: ByteDna,
    functions: NeuronFunctions<H>,
    habitat: H,
    store: LabStore,
    rng: ChaCha8Rng,
    metrics: Metrics,
    generation: Option<usize>,
    survivors: Vec<u8>,
    creatures: Vec<Creature<H>>,
    unsaved_genomes: Vec<u8>,
    unsaved_stats: Vec<GenerationStats>,
}

impl<H: Habitat> Lab<H> {
    /// Opens the lab described by `config`, resuming its stored generations.
    ///
    /// Input and output counts come from `functions`. A store created with
    /// different properties refuses to open.
    pub fn new(config: LabConfig, functions: NeuronFunctions<H>, habitat: H) -> Result<Self> {
        config.validate()?;
        let dna = ByteDna::new(
            config.dna.clone(),
            functions.input_count(),
            functions.output_count(),
        )?;

        let dir = config.lab_dir();
        let properties = config.properties(dna.input_count(), dna.output_count());
        let store = LabStore::open(&dir, properties)
            .with_context(|| format!("Failed to open lab store at {}", dir.display()))?;

        let rng = match config.lab.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut lab = Self {
            config,
            dna,
            functions,
            habitat,
            store,
            rng,
            metrics: Metrics::new(),
            generation: None,
            survivors: Vec::new(),
            creatures: Vec::new(),
            unsaved_genomes: Vec::new(),
            unsaved_stats: Vec::new(),
        };
        lab.resume()?;
        Ok(lab)
    }

    /// Continues from the last stored generation.
    ///
    /// Survivors are not persisted, so breeding resumes from the whole last
    /// stored generation, read back exactly as it was stored. An extinct
    /// generation stays extinct.
    fn resume(&mut self) -> Result<()> {
        let stored = self.store.stored_generations()?;
        if stored == 0 {
            return Ok(());
        }

        self.generation = Some(stored - 1);
        self.survivors = self.store.generation(stored - 1)?;
        tracing::info!(
            lab = %self.config.lab.name,
            generations = stored,
            "Resumed lab"
        );
        Ok(())
    }

    /// Runs one generation.
    ///
    /// Without explicit `genomes`, generation 0 is random and later
    /// generations are bred from the last survivors. With `new_gen` the
    /// generation counter advances, survivors are selected and the generation
    /// is queued for storage; otherwise the run is a replay that changes
    /// nothing but the habitat.
    pub fn run_generation(&mut self, genomes: Option<Vec<u8>>, new_gen: bool) -> Result<GenerationStats> {
        let start = Instant::now();
        if new_gen {
            self.generation = Some(self.generation.map_or(0, |generation| generation + 1));
        }

        let population = self.config.lab.population;
        let genomes = match genomes {
            Some(genomes) => genomes,
            None if self.generation.unwrap_or(0) == 0 => {
                self.dna.random_genomes(population, &mut self.rng)
            }
            None => {
                let offspring = self
                    .dna
                    .crossover(self.survivors.clone(), population, &mut self.rng);
                let shortfall = offspring.shortfall();
                if shortfall > 0 {
                    self.metrics.add_to_counter("crossover_shortfall", shortfall as u64);
                }
                offspring.into_genomes()
            }
        };

        self.creatures = self
            .dna
            .separate_genomes(&genomes)
            .map(|genome| Creature::new(&self.dna, genome, &self.functions))
            .collect::<Result<_, _>>()?;

        self.habitat.populate(self.creatures.len(), &mut self.rng);
        for _ in 0..self.config.lab.steps_per_gen {
            for (index, creature) in self.creatures.iter_mut().enumerate() {
                self.habitat.focus(index);
                creature.tick(&mut self.habitat);
            }
        }

        let habitat = &self.habitat;
        let (survivors, survived) = select_survivors(
            &self.dna,
            &genomes,
            &self.config.selection,
            |creature, name| habitat.trait_value(creature, name),
        );
        let stats = GenerationStats {
            genomes: self.creatures.len(),
            survived,
            diversity: self.dna.average_distance(&genomes, population),
        };

        if new_gen {
            self.survivors = survivors;
            self.metrics
                .record_generation(start.elapsed(), self.creatures.len(), survived, stats.diversity);

            // Only whole genomes are stored; a partial tail never became a creature.
            let whole = stats.genomes * self.dna.genome_bytes();
            self.unsaved_genomes.extend_from_slice(&genomes[..whole]);
            self.unsaved_stats.push(stats);

            if self.unsaved_stats.len() >= self.config.lab.gens_per_save {
                self.save()?;
            }
        }

        Ok(stats)
    }

    /// Runs `count` new generations and saves them.
    pub fn run_generations(&mut self, count: usize) -> Result<()> {
        for _ in 0..count {
            self.run_generation(None, true)?;
        }
        self.save()
    }

    /// Writes queued generations to the store.
    pub fn save(&mut self) -> Result<()> {
        if self.unsaved_stats.is_empty() {
            return Ok(());
        }

        let start = Instant::now();
        self.store
            .append(&self.unsaved_genomes, &self.unsaved_stats)
            .context("Failed to save generations")?;
        tracing::info!(
            generations = self.unsaved_stats.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Saved generations"
        );
        self.unsaved_genomes.clear();
        self.unsaved_stats.clear();
        Ok(())
    }

    /// Every stored generation plus the unsaved ones, and their statistics.
    pub fn load(&self) -> Result<(Vec<u8>, Vec<GenerationStats>)> {
        let (mut genomes, mut stats) = self.store.load()?;
        genomes.extend_from_slice(&self.unsaved_genomes);
        stats.extend_from_slice(&self.unsaved_stats);
        Ok((genomes, stats))
    }

    /// Index of the last generation run, `None` before the first.
    #[must_use]
    pub fn generation(&self) -> Option<usize> {
        self.generation
    }

    /// Genomes of the last generation's survivors.
    #[must_use]
    pub fn survivors(&self) -> &[u8] {
        &self.survivors
    }

    /// Creatures of the last generation run.
    #[must_use]
    pub fn creatures(&self) -> &[Creature<H>] {
        &self.creatures
    }

    #[must_use]
    pub fn dna(&self) -> &ByteDna {
        &self.dna
    }

    #[must_use]
    pub fn config(&self) -> &LabConfig {
        &self.config
    }

    #[must_use]
    pub fn habitat(&self) -> &H {
        &self.habitat
    }

    pub fn habitat_mut(&mut self) -> &mut H {
        &mut self.habitat
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    #[must_use]
    pub fn store(&self) -> &LabStore {
        &self.store
    }
}
