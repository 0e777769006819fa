//! # assess CLI entry point
//!
//! Parses command-line arguments, loads the configuration registry once and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use assess_cli::classify::{run_classify, ClassifyArgs};
use assess_cli::frameworks::run_frameworks;
use assess_cli::overlap::{
    run_also_covered, run_overlaps, run_synergies, AlsoCoveredArgs, OverlapsArgs, SynergiesArgs,
};
use assess_cli::pillars::run_pillars;
use assess_cli::score::{run_quick_check, run_score, QuickCheckArgs, ScoreArgs};
use assess_cli::suggest::{run_suggest, SuggestArgs};
use assess_cli::{find_config_dir, AssessContext, CONFIG_DIR};

/// Compliance self-assessment engine.
///
/// Classifies regulatory exposure, scores maturity answers, builds
/// remediation roadmaps and cross-references frameworks.
#[derive(Parser, Debug)]
#[command(name = "assess", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Configuration directory (contains frameworks/).
    #[arg(long, global = true, value_name = "DIR")]
    config: Option<PathBuf>,

    /// Directory of stored answers, one <framework>.json per framework.
    #[arg(long, global = true, value_name = "DIR", default_value = "answers")]
    answers: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List configured frameworks and the configuration digest.
    Frameworks,

    /// Classify an entity profile under a framework.
    Classify(ClassifyArgs),

    /// Score stored answers for a framework.
    Score(ScoreArgs),

    /// Score a quick-check answer file.
    QuickCheck(QuickCheckArgs),

    /// Suggest answers from equivalent questions in other frameworks.
    Suggest(SuggestArgs),

    /// List overlap mappings for a framework.
    Overlaps(OverlapsArgs),

    /// Overlaps among a set of completed frameworks.
    Synergies(SynergiesArgs),

    /// Other frameworks a recommendation also covers.
    AlsoCovered(AlsoCoveredArgs),

    /// Composite pillar scores.
    Pillars,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config_dir = cli.config.clone().unwrap_or_else(|| {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        find_config_dir(&cwd).unwrap_or_else(|| {
            tracing::warn!("no {CONFIG_DIR}/frameworks found above the current directory; using ./{CONFIG_DIR}");
            PathBuf::from(CONFIG_DIR)
        })
    });
    tracing::debug!(config = %config_dir.display(), answers = %cli.answers.display(), "resolved paths");

    let ctx = match AssessContext::load(&config_dir, &cli.answers) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match &cli.command {
        Commands::Frameworks => run_frameworks(&ctx),
        Commands::Classify(args) => run_classify(&ctx, args),
        Commands::Score(args) => run_score(&ctx, args),
        Commands::QuickCheck(args) => run_quick_check(&ctx, args),
        Commands::Suggest(args) => run_suggest(&ctx, args),
        Commands::Overlaps(args) => run_overlaps(&ctx, args),
        Commands::Synergies(args) => run_synergies(&ctx, args),
        Commands::AlsoCovered(args) => run_also_covered(&ctx, args),
        Commands::Pillars => run_pillars(&ctx),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
