mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hud-mockup",
    about = "Generate the annotated HUD mockup SVG (all HUD states side by side) for Figma import",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .git/)
    #[arg(long, global = true, env = "HUD_ROOT")]
    root: Option<PathBuf>,

    /// State file (default: figma/hud-generator/states.yaml, else built-in states)
    #[arg(long, global = true, env = "HUD_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every state and write the SVG document
    Generate {
        /// Output path (default: the state file's `output`)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print the SVG to stdout instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// List the configured states and their scene offsets
    States,

    /// Manage the state file
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
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
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Generate { output, stdout } => {
            cmd::generate::run(&root, config, output, stdout, cli.json)
        }
        Commands::States => cmd::states::run(&root, config, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, config, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
