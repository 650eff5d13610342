//! Command-line front end: generate thickness fields and populated
//! environments from a JSON configuration and reflectivity dataset.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use slick_core::{band_statistics, EnvironmentConfig, EnvironmentGenerator, ReflectivityDataset};

#[derive(Parser, Debug)]
#[command(name = "slick", about = "Synthetic oil-film thickness fields and reflectivity cubes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a thickness field only.
    Field {
        /// Environment configuration JSON. Defaults are used when omitted.
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        /// Output JSON file.
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Generate populated environments plus per-band statistics.
    Populate {
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Reflectivity dataset JSON: {"samples": {"<thickness>": [[...], ...]}}.
        #[arg(short, long)]
        dataset: PathBuf,

        /// Seed of the first environment; later ones use seed + i.
        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        /// Number of environments to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,

        /// Output directory.
        #[arg(short, long, default_value = "data/environments")]
        out: PathBuf,
    },

    /// Print the default configuration as JSON.
    DefaultConfig,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Field { config, seed, out } => run_field(config.as_deref(), seed, &out),
        Command::Populate { config, dataset, seed, count, out } => {
            run_populate(config.as_deref(), &dataset, seed, count, &out)
        }
        Command::DefaultConfig => {
            println!("{}", serde_json::to_string_pretty(&EnvironmentConfig::default())?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EnvironmentConfig> {
    let config = match path {
        Some(p) => {
            let text = fs::read_to_string(p).with_context(|| format!("reading config {}", p.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", p.display()))?
        }
        None => EnvironmentConfig::default(),
    };
    config.validate().context("invalid environment configuration")?;
    Ok(config)
}

fn load_dataset(path: &Path) -> Result<ReflectivityDataset> {
    let text = fs::read_to_string(path).with_context(|| format!("reading dataset {}", path.display()))?;
    let dataset: ReflectivityDataset =
        serde_json::from_str(&text).with_context(|| format!("parsing dataset {}", path.display()))?;
    tracing::info!(
        thicknesses = dataset.thicknesses().count(),
        bands = dataset.num_bands(),
        "loaded reflectivity dataset"
    );
    Ok(dataset)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string(value)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

fn run_field(config: Option<&Path>, seed: u64, out: &Path) -> Result<()> {
    let config = load_config(config)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let field = EnvironmentGenerator::new().thickness_field(&config, &mut rng)?;
    tracing::info!(
        shape = %field.shape,
        min = ?field.min_thickness(),
        max = ?field.max_thickness(),
        "generated thickness field"
    );
    write_json(out, &field)
}

fn run_populate(config: Option<&Path>, dataset: &Path, seed: u64, count: usize, out: &Path) -> Result<()> {
    let config = load_config(config)?;
    let dataset = load_dataset(dataset)?;

    let envs = EnvironmentGenerator::new().generate_batch(&config, &dataset, seed, count)?;
    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    for (i, env) in envs.iter().enumerate() {
        write_json(&out.join(format!("env_{i:04}.json")), env)?;
    }

    let cubes: Vec<_> = envs.into_iter().map(|e| e.populated).collect();
    if !cubes.is_empty() {
        let stats = band_statistics(&cubes)?;
        write_json(&out.join("band_stats.json"), &stats)?;
    }
    Ok(())
}
