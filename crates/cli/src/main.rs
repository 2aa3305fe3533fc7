use anyhow::{Context, Result, ensure};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::{Axis, RatingTable, sample_ratings, synthetic};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use recommender::{Recommendation, UserBasedRecommender};
use similarity::{DEFAULT_NEIGHBORS, DEFAULT_SIMILARITY_THRESHOLD, entity_similarity, nearest_neighbors};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;
use validator::{CheckResult, ValidationReport, run_validation_with};

const RULE_WIDTH: usize = 70;

/// cf-validate - Collaborative filtering validator
#[derive(Parser)]
#[command(name = "cf-validate")]
#[command(
    about = "Validate collaborative-filtering math (cosine, user/item similarity, top-K recommendations)",
    long_about = None
)]
struct Cli {
    /// Defaults to `validate` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct DatasetArgs {
    /// Ratings file (`user::item::rating` lines, or `.json`); defaults to the sample dataset
    #[arg(long)]
    ratings: Option<PathBuf>,
}

impl DatasetArgs {
    fn load(&self) -> Result<Arc<RatingTable>> {
        let table = match &self.ratings {
            Some(path) => RatingTable::load_from_file(path)
                .with_context(|| format!("Failed to load ratings from {}", path.display()))?,
            None => sample_ratings(),
        };
        Ok(Arc::new(table))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the four validation checks against the sample dataset
    Validate,

    /// Similarity of two users (or two items with --items)
    Similarity {
        a: String,
        b: String,

        /// Compare items instead of users
        #[arg(long)]
        items: bool,

        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Most similar users (or items) to one entity
    Neighbors {
        id: String,

        /// Rank items instead of users
        #[arg(long)]
        items: bool,

        /// Number of neighbors to keep
        #[arg(short = 'k', long = "neighbors", default_value_t = DEFAULT_NEIGHBORS)]
        k: usize,

        /// Neighbors must be strictly more similar than this
        #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
        threshold: f64,

        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// User-based recommendations for a user
    Recommend {
        user: String,

        /// Number of neighbors to aggregate
        #[arg(short = 'k', long = "neighbors", default_value_t = DEFAULT_NEIGHBORS)]
        k: usize,

        /// Neighbors must be strictly more similar than this
        #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
        threshold: f64,

        /// Maximum number of recommendations to print
        #[arg(long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Time recommendations on a synthetic dataset
    Benchmark {
        /// Number of synthetic users
        #[arg(long, default_value = "1000")]
        users: usize,

        /// Number of synthetic items
        #[arg(long, default_value = "500")]
        items: usize,

        /// Probability that a user rated a given item
        #[arg(long, default_value = "0.05")]
        density: f64,

        /// Seed for the dataset and the sampled users
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Number of recommendation requests to time
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of neighbors to aggregate
        #[arg(short = 'k', long = "neighbors", default_value_t = DEFAULT_NEIGHBORS)]
        k: usize,
    },
}

fn main() -> ExitCode {
    // Initialize tracing; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Validate);
    let validating = matches!(command, Commands::Validate);

    // Dispatch to appropriate command handler; Ok carries the exit status
    let result: Result<u8> = match command {
        Commands::Validate => handle_validate(),
        Commands::Similarity {
            a,
            b,
            items,
            dataset,
        } => handle_similarity(&dataset, &a, &b, items).map(|()| 0),
        Commands::Neighbors {
            id,
            items,
            k,
            threshold,
            dataset,
        } => handle_neighbors(&dataset, &id, items, k, threshold).map(|()| 0),
        Commands::Recommend {
            user,
            k,
            threshold,
            limit,
            json,
            dataset,
        } => handle_recommend(&dataset, &user, k, threshold, limit, json).map(|()| 0),
        Commands::Benchmark {
            users,
            items,
            density,
            seed,
            requests,
            k,
        } => handle_benchmark(users, items, density, seed, requests, k).map(|()| 0),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            println!("{}", render_error(validating, &err));
            // Full chain, plus a backtrace when RUST_BACKTRACE is set
            eprintln!("{:?}", err);
            ExitCode::FAILURE
        }
    }
}

/// Handle the 'validate' command; returns the exit status of the run
fn handle_validate() -> Result<u8> {
    println!("{}", rule('='));
    println!("Validating Collaborative Filtering Implementation");
    println!("{}", rule('='));

    let table = sample_ratings();
    let report = run_validation_with(&table, |check| print!("{}", render_check(check)))?;

    print!("{}", render_summary(&report));
    Ok(report.exit_code())
}

/// Handle the 'similarity' command
fn handle_similarity(dataset: &DatasetArgs, a: &str, b: &str, items: bool) -> Result<()> {
    let table = dataset.load()?;
    let axis = axis_for(items);

    let sim = entity_similarity(&table, axis, a, b)?;
    println!("{} similarity({}, {}): {:.4}", axis, a, b, sim);
    Ok(())
}

/// Handle the 'neighbors' command
fn handle_neighbors(
    dataset: &DatasetArgs,
    id: &str,
    items: bool,
    k: usize,
    threshold: f64,
) -> Result<()> {
    let table = dataset.load()?;
    let axis = axis_for(items);

    let neighbors = nearest_neighbors(&table, axis, id, threshold, k)?;
    println!(
        "{}",
        format!("Nearest {} neighbors of {}:", axis, id).bold().blue()
    );
    if neighbors.is_empty() {
        println!("  (none above similarity {})", threshold);
    }
    for (i, neighbor) in neighbors.iter().enumerate() {
        println!(
            "{}. {} - Similarity: {:.4}",
            (i + 1).to_string().green(),
            neighbor.id,
            neighbor.similarity
        );
    }
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    dataset: &DatasetArgs,
    user: &str,
    k: usize,
    threshold: f64,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let table = dataset.load()?;

    let mut recommender = UserBasedRecommender::new(table)
        .with_similarity_threshold(threshold)
        .with_neighbors(k);
    if let Some(limit) = limit {
        recommender = recommender.with_limit(limit);
    }

    let recommendations = recommender.recommend(user)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        print_recommendations(user, &recommendations);
    }
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(
    users: usize,
    items: usize,
    density: f64,
    seed: u64,
    requests: usize,
    k: usize,
) -> Result<()> {
    ensure!(users > 0, "--users must be at least 1");
    ensure!(requests > 0, "--requests must be at least 1");

    let start = Instant::now();
    let table = Arc::new(
        synthetic::generate(users, items, density, seed)
            .context("Failed to generate synthetic dataset")?,
    );
    let (n_users, n_items, n_ratings) = table.counts();
    println!(
        "{} Generated {} users, {} items, {} ratings in {:?}",
        "✓".green(),
        n_users,
        n_items,
        n_ratings,
        start.elapsed()
    );

    let recommender = UserBasedRecommender::new(table).with_neighbors(k);

    // Pick random users to request
    let mut rng = StdRng::seed_from_u64(seed);
    let user_ids: Vec<String> = (0..requests)
        .map(|_| synthetic::user_id(rng.random_range(0..users)))
        .collect();

    let mut timings = Vec::with_capacity(requests);
    for user_id in &user_ids {
        let start = Instant::now();
        recommender.recommend(user_id)?;
        timings.push(start.elapsed());
    }
    info!("Timed {} recommendation requests", timings.len());

    let stats = LatencyStats::from_timings(&mut timings);

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", stats.total);
    println!("Average latency: {:?}", stats.average);
    println!("P50 latency: {:?}", stats.p50);
    println!("P95 latency: {:?}", stats.p95);
    println!("P99 latency: {:?}", stats.p99);
    println!("Throughput: {:.2} requests/second", stats.throughput());
    Ok(())
}

/// Summary of recommendation latencies
#[derive(Debug, Clone, Copy, PartialEq)]
struct LatencyStats {
    requests: usize,
    total: Duration,
    average: Duration,
    p50: Duration,
    p95: Duration,
    p99: Duration,
}

impl LatencyStats {
    /// Sorts `timings` in place; `timings` must be non-empty
    fn from_timings(timings: &mut [Duration]) -> Self {
        timings.sort();
        let total: Duration = timings.iter().sum();
        Self {
            requests: timings.len(),
            total,
            average: Duration::from_nanos((total.as_nanos() / timings.len() as u128) as u64),
            p50: percentile(timings, 0.50),
            p95: percentile(timings, 0.95),
            p99: percentile(timings, 0.99),
        }
    }

    fn throughput(&self) -> f64 {
        self.requests as f64 / self.total.as_secs_f64().max(f64::EPSILON)
    }
}

fn axis_for(items: bool) -> Axis {
    if items { Axis::Items } else { Axis::Users }
}

/// Value at quantile `q` of a sorted, non-empty slice
fn percentile(sorted: &[Duration], q: f64) -> Duration {
    let idx = ((sorted.len() as f64 * q) as usize).min(sorted.len() - 1);
    sorted[idx]
}

fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

// Writing to a String cannot fail, so the `fmt::Result`s below are discarded

/// One finished check: banner, numbers, notes, verdict
fn render_check(check: &CheckResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "Test {}: {}", check.number, check.name);
    let _ = writeln!(out, "{}", rule('-'));

    for measurement in &check.measurements {
        let _ = writeln!(out, "{}: {:.4}", measurement.label, measurement.value);
    }
    for note in &check.notes {
        let _ = writeln!(out, "\n{}", note);
    }

    if check.passed() {
        let _ = writeln!(out, "{} {}", "✓".green(), check.success_message);
    } else {
        for failure in check.failures() {
            let _ = writeln!(out, "{} {}", "✗".red(), failure);
        }
    }
    out
}

fn render_summary(report: &ValidationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rule('='));
    if report.passed() {
        let _ = writeln!(out, "{}", "All validation tests passed!".green().bold());
        let _ = writeln!(out, "{}", rule('='));
        let _ = writeln!(out, "\nThe Collaborative Filtering implementation logic is sound.");
        let _ = writeln!(
            out,
            "Production-scale training runs on a distributed compute engine; \
             this run only checks the single-machine math."
        );
    } else {
        let failed: Vec<String> = report
            .failed_checks()
            .map(|check| format!("Test {}", check.number))
            .collect();
        let _ = writeln!(
            out,
            "{} {}",
            "Validation failed:".red().bold(),
            failed.join(", ")
        );
        let _ = writeln!(out, "{}", rule('='));
    }
    out
}

/// Stdout line for an error that aborted a command
fn render_error(validating: bool, err: &anyhow::Error) -> String {
    if validating {
        format!("\n{} Validation failed: {}", "❌".red(), err)
    } else {
        format!("{} {}", "❌".red(), err)
    }
}

/// Helper function to format and print recommendations
fn print_recommendations(user: &str, recommendations: &[Recommendation]) {
    println!(
        "{}",
        format!("Recommendations for {}:", user).bold().blue()
    );
    if recommendations.is_empty() {
        println!("  (no unrated items reachable through similar users)");
    }
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - Score: {:.4}",
            (i + 1).to_string().green(),
            rec.item_id,
            rec.score
        );
    }
}
