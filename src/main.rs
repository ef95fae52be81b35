use anyhow::Context;
use clap::Parser;
use geokmeans::{io, KMeans, KMeansConfig, Verbosity};
use rand::prelude::*;
use std::{path::PathBuf, process::ExitCode};

/// Inputs with this many points or fewer are rejected.
const MIN_POINTS: usize = 5;

/// Cluster geographic points with k-means, choosing the number of clusters automatically.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Opts {
    /// Input file of `lat,lon` rows, relative to the input directory
    file: PathBuf,

    /// Directory the input file is looked up in
    #[arg(long, default_value = "inputs")]
    input_dir: PathBuf,

    /// Directory clusters.csv and centroids.csv are written to
    #[arg(long, default_value = "outputs")]
    output_dir: PathBuf,

    /// Amount of concurrent assignment tasks
    #[arg(short, long, default_value_t = 4)]
    workers: usize,

    /// Exclusive upper bound for the cluster-count search
    #[arg(long)]
    max_k: Option<usize>,

    /// Seed for the initial centroid draws (default: wall-clock time, per run)
    #[arg(long)]
    seed: Option<u64>,

    /// More output (-v: per-iteration dumps)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

impl Opts {
    fn verbosity(&self) -> Verbosity {
        match (self.quiet, self.verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, _) => Verbosity::Debug,
        }
    }
}

fn init_logging(verbosity: Verbosity) {
    let level = match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "info",
        Verbosity::Debug => "debug",
    };
    let env = env_logger::Env::default().filter_or("RUST_LOG", level);
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Outcome of a run that did not fail.
enum Outcome {
    Done,
    TooFewPoints,
}

fn run(opts: &Opts) -> anyhow::Result<Outcome> {
    let verbosity = opts.verbosity();

    log::info!("Loading points ...");
    let input = opts.input_dir.join(&opts.file);
    let points = io::load_points::<f64>(&input)?;
    if points.len() <= MIN_POINTS {
        return Ok(Outcome::TooFewPoints);
    }
    log::info!("Loaded {} points", points.len());

    let kmean = KMeans::new(points)?;
    let mut builder = KMeansConfig::build()
        .workers(opts.workers)
        .verbosity(verbosity);
    if let Some(max_k) = opts.max_k {
        builder = builder.max_k(max_k);
    }
    if let Some(seed) = opts.seed {
        builder = builder.random_generator(StdRng::seed_from_u64(seed));
    }
    let conf = builder.build();

    log::info!("Searching for optimal clustering ...");
    let best = kmean.search_optimal_k(&conf)?;
    if !best.converged {
        log::warn!("No cluster count met the stopping criterion, using k={}", best.k);
    }
    log::info!("Optimal no of clusters (k): {}", best.k);

    log::info!("Writing clusters/centroids to disk ...");
    std::fs::create_dir_all(&opts.output_dir)
        .with_context(|| format!("Failed to create {}", opts.output_dir.display()))?;
    let (clusters, centroids) = io::save_clustering(&opts.output_dir, &best.clustering)?;
    log::info!("Wrote {} and {}", clusters.display(), centroids.display());
    Ok(Outcome::Done)
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    init_logging(opts.verbosity());

    match run(&opts) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::TooFewPoints) => {
            eprintln!("Not enough points to run K-Means!");
            ExitCode::from(1)
        }
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::from(2)
        }
    }
}
