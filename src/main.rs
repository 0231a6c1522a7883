use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::exit;
use std::time::Instant;

use scorecast::output;
use scorecast::scoring::{self, ViewerProfile};
use scorecast::stats::Summary;

const EXIT_SUCCESS: i32 = 0;
const EXIT_SIMULATION: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sample every follower/VIP/tier combination and print one summary
    /// table per flag pair (default if no subcommand)
    Sweep,
    /// Sample a single viewer configuration
    Single {
        /// Treat the viewer as a follower
        #[arg(long)]
        follower: bool,

        /// Treat the viewer as a VIP or moderator
        #[arg(long)]
        vip: bool,

        /// Subscription tier, 0 = no subscription
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
        tier: u8,
    },
}

#[derive(Parser, Debug)]
#[command(name = "scorecast")]
#[command(about = "Chat reward score distribution forecaster", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/scorecast/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Samples per configuration (overrides config file)
    #[arg(short, long, global = true)]
    iterations: Option<usize>,

    /// Seed the random source for reproducible output
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Sweep);
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match scorecast::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            exit(EXIT_CONFIG);
        }
    };

    // CLI flags override the config file
    let mut simulation = config.simulation.clone().unwrap_or_default();
    if cli.iterations.is_some() {
        simulation.iterations = cli.iterations;
    }
    if cli.seed.is_some() {
        simulation.seed = cli.seed;
    }

    // Validate simulation settings at startup
    if let Err(errors) = scoring::validate_simulation(&simulation) {
        eprintln!("Simulation config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        exit(EXIT_CONFIG);
    }

    let iterations = simulation.effective_iterations();
    let mut rng = match simulation.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if cli.verbose {
        eprintln!("Running {} samples per configuration", iterations);
        match simulation.seed {
            Some(seed) => eprintln!("Random source seeded with {}", seed),
            None => eprintln!("Random source seeded from entropy"),
        }
    }

    let use_colors = output::should_use_colors();

    match command {
        Commands::Sweep => {
            for vip_or_mod in [false, true] {
                for follower in [false, true] {
                    let title = output::combo_title(follower, vip_or_mod);
                    let mut columns = Vec::new();
                    let mut summaries = Vec::new();

                    for tier in 0..=scoring::MAX_SUB_TIER {
                        let profile = ViewerProfile {
                            follower,
                            vip_or_mod,
                            sub_tier: tier,
                        };
                        let config_start = Instant::now();
                        let samples = match scoring::run_analysis(&profile, iterations, &mut rng) {
                            Ok(samples) => samples,
                            Err(e) => {
                                eprintln!("Simulation error: {}", e);
                                exit(EXIT_SIMULATION);
                            }
                        };
                        if cli.verbose {
                            eprintln!(
                                "  {} tier {}: {} samples in {:?}",
                                title,
                                tier,
                                samples.len(),
                                config_start.elapsed()
                            );
                        }
                        columns.push(output::tier_label(tier));
                        summaries.push(Summary::from_samples(&samples));
                    }

                    let table =
                        output::format_summary_table(&title, &columns, &summaries, use_colors);
                    println!("{}", table);
                    println!();
                }
            }

            if cli.verbose {
                eprintln!("Swept 16 configurations in {:?}", start_time.elapsed());
            }
        }
        Commands::Single {
            follower,
            vip,
            tier,
        } => {
            if let Err(errors) = scoring::validate_tier(tier) {
                for error in errors {
                    eprintln!("  - {}", error);
                }
                exit(EXIT_CONFIG);
            }

            let profile = ViewerProfile {
                follower,
                vip_or_mod: vip,
                sub_tier: tier,
            };
            let samples = match scoring::run_analysis(&profile, iterations, &mut rng) {
                Ok(samples) => samples,
                Err(e) => {
                    eprintln!("Simulation error: {}", e);
                    exit(EXIT_SIMULATION);
                }
            };

            if cli.verbose {
                if let (Some(low), Some(high)) = (samples.first(), samples.last()) {
                    eprintln!("Sampled extremes: {} to {}", low, high);
                }
            }

            let title = output::combo_title(follower, vip);
            let columns = vec![output::tier_label(tier)];
            let summaries = vec![Summary::from_samples(&samples)];
            let table = output::format_summary_table(&title, &columns, &summaries, use_colors);
            println!("{}", table);

            if cli.verbose {
                eprintln!("Done in {:?}", start_time.elapsed());
            }
        }
    }

    exit(EXIT_SUCCESS);
}
