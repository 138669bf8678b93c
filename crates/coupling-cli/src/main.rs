mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{check::CheckArgs, config::ConfigSubcommand, Status};
use std::path::PathBuf;

/// Exit code for failures that prevent evaluation (bad config, git errors).
const EXIT_ERROR: i32 = 2;

#[derive(Parser)]
#[command(
    name = "doc-coupling",
    about = "Check that documentation changes alongside the code it describes",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from meta-process.yaml or .git/)
    #[arg(long, global = true, env = "DOC_COUPLING_ROOT")]
    root: Option<PathBuf>,

    /// Coupling file, relative to the working directory (default:
    /// doc_coupling.config in meta-process.yaml, relative to the root)
    #[arg(long, global = true, env = "DOC_COUPLING_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a change set against the declared couplings
    Check(CheckArgs),

    /// Show which docs are coupled to the given files
    Suggest {
        /// Files to look up (root-relative)
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Inspect and validate the coupling file
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Report broken relative links in markdown files
    Links {
        /// Directory to scan (default: project root)
        dir: Option<PathBuf>,
    },

    /// Write starter meta-process.yaml and coupling files if missing
    Init,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let config = cli.config.as_deref().map(root::resolve_config_flag);
    let config = config.as_deref();

    let result = match cli.command {
        Commands::Check(args) => cmd::check::run(&root, config, args, cli.json),
        Commands::Suggest { files } => cmd::suggest::run(&root, config, &files, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, config, subcommand, cli.json),
        Commands::Links { dir } => cmd::links::run(&root, dir.as_deref(), cli.json),
        Commands::Init => cmd::init::run(&root),
    };

    let code = match result {
        Ok(Status::Clean) => 0,
        Ok(Status::Failed) => 1,
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            EXIT_ERROR
        }
    };
    std::process::exit(code);
}
