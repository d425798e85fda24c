use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pulse_index::config::{self, Config};
use pulse_index::corruption::{CorruptionEngine, CorruptionStore, NewCase};
use pulse_index::diaspora::load_posts;
use pulse_index::election::{ElectionSimulator, PoliticalOntology, MAJORITY_SEATS};
use pulse_index::output;
use pulse_index::ppi::{recent_series, PpiCalculator, PpiFactors};

const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the People Pulse Index from a factors file, or print a synthetic history
    Ppi {
        /// YAML or JSON file with the twelve PPI factors
        #[arg(long, required_unless_present = "history")]
        factors: Option<PathBuf>,
        /// Previous index, for trend detection
        #[arg(long, requires = "factors")]
        previous: Option<f64>,
        /// Print a synthetic series instead
        #[arg(long, conflicts_with = "factors")]
        history: bool,
        /// Days of history, ending now
        #[arg(long, default_value_t = 90)]
        days: u32,
        /// Spacing between history points (e.g. 7d, 12h)
        #[arg(long, default_value = "7d")]
        step: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Corruption sentiment overview, sector risk, or record a new case
    Corruption {
        /// Risk assessment for one sector
        #[arg(long)]
        sector: Option<String>,
        /// YAML or JSON file describing a case to record
        #[arg(long, conflicts_with = "sector")]
        add_case: Option<PathBuf>,
        /// High-profile cases to list
        #[arg(long, default_value_t = 5)]
        cases: usize,
    },
    /// Simulate a parliamentary election
    Election {
        /// Scenario name (see `pulse scenarios`)
        #[arg(long, default_value = "Status Quo")]
        scenario: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List configured election scenarios
    Scenarios,
    /// Two- and three-party coalitions in the current Albanian parliament
    Coalitions {
        /// Seats the coalition must reach
        #[arg(long, default_value_t = MAJORITY_SEATS)]
        threshold: u32,
    },
    /// Diaspora metrics and narrative flows
    Diaspora {
        /// Glob of JSON files, each an array of posts
        #[arg(long)]
        posts: Option<String>,
        /// Use generated sample posts instead
        #[arg(long, required_unless_present = "posts", conflicts_with = "posts")]
        sample: bool,
        #[arg(long, requires = "sample")]
        seed: Option<u64>,
    },
    /// Write the built-in reference data to the config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(
    about = "Voter sentiment scoring: PPI, corruption, elections, diaspora",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/pulse-index/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy)]
struct Output {
    json: bool,
    colors: bool,
}

impl Output {
    fn emit<T: Serialize + ?Sized>(&self, value: &T, human: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", output::format_json(value)?);
        } else {
            println!("{}", human());
        }
        Ok(())
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "pulse=debug,pulse_index=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { force } = cli.command {
        let path = match config_path.map_or_else(config::get_config_path, Ok) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        if let Err(e) = config::write_default_config(&path, force) {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_IO);
        }
        println!("Config written to {}", path.display());
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let out = Output {
        json: cli.json,
        colors: !cli.json && output::should_use_colors(),
    };

    let result = match cli.command {
        Commands::Ppi {
            factors,
            previous,
            history,
            days,
            step,
            seed,
        } => {
            if history {
                run_history(days, &step, seed, out)
            } else if let Some(path) = factors {
                run_ppi(&config, &path, previous, out)
            } else {
                Err(anyhow::anyhow!("Pass --factors FILE or --history"))
            }
        }
        Commands::Corruption {
            sector,
            add_case,
            cases,
        } => {
            let catalog = config.corruption.clone();
            match catalog.state_file.clone() {
                Some(state_file) => run_corruption(
                    &CorruptionEngine::with_state_file(catalog, state_file),
                    sector.as_deref(),
                    add_case.as_deref(),
                    cases,
                    out,
                ),
                None => {
                    if add_case.is_some() {
                        tracing::warn!(
                            "corruption.state_file is not set, the new case will not be kept"
                        );
                    }
                    run_corruption(
                        &CorruptionEngine::in_memory(catalog),
                        sector.as_deref(),
                        add_case.as_deref(),
                        cases,
                        out,
                    )
                }
            }
        }
        Commands::Election { scenario, seed } => run_election(&config, &scenario, seed, out),
        Commands::Scenarios => out.emit(&config.election.scenarios, || {
            output::format_scenarios(&config.election.scenarios, out.colors)
        }),
        Commands::Coalitions { threshold } => {
            let options = PoliticalOntology::default().coalition_options(threshold);
            out.emit(&options, || {
                output::format_coalition_options(&options, threshold, out.colors)
            })
        }
        Commands::Diaspora { posts, sample, seed } => {
            let source = match posts {
                Some(pattern) if !sample => PostSource::Files(pattern),
                _ => PostSource::Sample(seed),
            };
            run_diaspora(&config, source, out)
        }
        Commands::Init { .. } => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(EXIT_IO);
    }

    std::process::exit(EXIT_SUCCESS);
}

fn run_ppi(config: &Config, path: &Path, previous: Option<f64>, out: Output) -> Result<()> {
    let factors: PpiFactors = config::read_document(path)?;
    let missing = factors.missing_fields();
    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "factors missing, confidence reduced");
    }
    let result = PpiCalculator::new(config.ppi.weights).calculate(&factors, previous);
    out.emit(&result, || output::format_ppi(&result, out.colors))
}

fn run_history(days: u32, step: &str, seed: Option<u64>, out: Output) -> Result<()> {
    let step =
        humantime::parse_duration(step).with_context(|| format!("Invalid --step '{}'", step))?;
    let series = recent_series(Utc::now(), days, step, &mut seeded_rng(seed))?;
    out.emit(&series, || output::format_history(&series, out.colors))
}

fn run_corruption<S: CorruptionStore>(
    engine: &CorruptionEngine<S>,
    sector: Option<&str>,
    add_case: Option<&Path>,
    limit: usize,
    out: Output,
) -> Result<()> {
    if let Some(path) = add_case {
        let new_case: NewCase = config::read_document(path)?;
        let case = engine.add_case(new_case)?;
        return out.emit(&case, || format!("Recorded {}", output::format_case(&case, out.colors)));
    }

    if let Some(sector) = sector {
        let risk = engine.sector_risk(sector)?;
        return out.emit(&risk, || output::format_sector_risk(sector, &risk, out.colors));
    }

    let sentiment = engine.sentiment()?;
    let cases = engine.high_profile_cases(limit)?;
    let trends = engine.trends();
    let report = serde_json::json!({
        "sentiment": sentiment,
        "high_profile_cases": cases,
        "trends": trends,
        "heat_map": engine.heat_map()?,
    });
    out.emit(&report, || {
        format!(
            "{}\n{}\n\n{}",
            output::format_sentiment(&sentiment, out.colors),
            output::format_trends(&trends),
            output::format_cases(&cases, out.colors)
        )
    })
}

fn run_election(config: &Config, name: &str, seed: Option<u64>, out: Output) -> Result<()> {
    let election = &config.election;
    let scenario = election.scenario(name).with_context(|| {
        let known: Vec<&str> = election.scenarios.iter().map(|s| s.name.as_str()).collect();
        format!("Unknown scenario '{}'. Known scenarios: {}", name, known.join(", "))
    })?;

    let rules = election.rules();
    let simulator =
        ElectionSimulator::new(election.parties.clone(), election.regions.clone(), rules);
    let result = simulator.simulate(scenario, &mut seeded_rng(seed));
    out.emit(&result, || output::format_simulation(&result, rules.total_seats, out.colors))
}

enum PostSource {
    Files(String),
    Sample(Option<u64>),
}

fn run_diaspora(config: &Config, source: PostSource, out: Output) -> Result<()> {
    let tracker = config.diaspora.tracker();
    let tracked = match source {
        PostSource::Files(pattern) => tracker.track_all(load_posts(&pattern)?),
        PostSource::Sample(seed) => tracker.sample_posts(Utc::now(), &mut seeded_rng(seed)),
    };
    tracing::info!(posts = tracked.len(), "tracking diaspora posts");

    let metrics = tracker.metrics(&tracked);
    out.emit(&metrics, || output::format_metrics(&metrics, out.colors))
}
