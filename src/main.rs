use anyhow::Result;
use bytelab_lib::config::LabConfig;
use bytelab_lib::data::GenerationStats;
use bytelab_lib::dna::ByteDna;
use bytelab_lib::io::LabStore;
use bytelab_lib::metrics::init_logging;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a lab store and write a random generation 0
    Seed {
        #[command(flatten)]
        lab: LabArgs,
    },
    /// Print statistics and network sizes of a stored lab
    Inspect {
        #[command(flatten)]
        lab: LabArgs,

        /// Generation to analyse (defaults to the last stored one)
        #[arg(short, long)]
        generation: Option<usize>,

        /// Print the stored statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug)]
struct LabArgs {
    /// Lab config file path
    #[arg(short, long, default_value = "lab.toml")]
    config: String,

    /// Number of input neurons the host provides
    #[arg(short, long)]
    inputs: usize,

    /// Number of output neurons the host provides
    #[arg(short, long)]
    outputs: usize,
}

impl LabArgs {
    fn open(&self) -> Result<(LabConfig, ByteDna, LabStore)> {
        let config = LabConfig::load(&self.config)?;
        let dna = ByteDna::new(config.dna.clone(), self.inputs, self.outputs)?;
        let store = LabStore::open(
            config.lab_dir(),
            config.properties(self.inputs, self.outputs),
        )?;
        Ok((config, dna, store))
    }
}

fn seed(lab: &LabArgs) -> Result<()> {
    let (config, dna, store) = lab.open()?;
    anyhow::ensure!(
        store.stored_generations()? == 0,
        "Lab at {} already holds generations",
        store.dir().display()
    );

    let mut rng = match config.lab.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let population = config.lab.population;
    let genomes = dna.random_genomes(population, &mut rng);
    // Nothing has been selected yet, so the whole population counts as survivors.
    let stats = GenerationStats {
        genomes: population,
        survived: population,
        diversity: dna.average_distance(&genomes, population),
    };
    store.append(&genomes, &[stats])?;

    println!(
        "Seeded lab '{}' at {} (fingerprint {})",
        config.lab.name,
        store.dir().display(),
        config.fingerprint()
    );
    println!("  population: {}, diversity: {:.4}", population, stats.diversity);
    Ok(())
}

fn inspect(lab: &LabArgs, generation: Option<usize>, json: bool) -> Result<()> {
    let (config, dna, store) = lab.open()?;
    let stats = store.load_stats()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Lab '{}' ({})", config.lab.name, config.fingerprint());
    for (index, generation_stats) in stats.iter().enumerate() {
        println!(
            "  gen {:>5}: genomes {:>5}, survived {:>5}, diversity {:.4}",
            index, generation_stats.genomes, generation_stats.survived, generation_stats.diversity
        );
    }

    let stored = store.stored_generations()?;
    if stored == 0 {
        println!("No stored generations.");
        return Ok(());
    }
    let index = generation.unwrap_or(stored - 1);
    let genomes = store.generation(index)?;

    let mut neurons = 0;
    let mut connections = 0;
    let mut count = 0;
    for genome in dna.separate_genomes(&genomes) {
        let wiring = dna.compile(&dna.prune(genome));
        neurons += wiring.neuron_count();
        connections += wiring.connections.len();
        count += 1;
    }
    let mean = |total: usize| total as f64 / count.max(1) as f64;

    println!("Generation {} ({} genomes):", index, count);
    println!(
        "  diversity: {:.4}",
        dna.average_distance(&genomes, config.lab.population)
    );
    println!("  mean neurons: {:.2}", mean(neurons));
    println!("  mean connections: {:.2}", mean(connections));
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    match &args.command {
        Command::Seed { lab } => seed(lab),
        Command::Inspect {
            lab,
            generation,
            json,
        } => inspect(lab, *generation, *json),
    }
}
