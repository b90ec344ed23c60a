//! overlay-proxy: attach new containers to the overlay network.
//!
//! The interception core lives in the library; this binary is for trying it
//! out and for checking configuration:
//!   overlay-proxy transform --name web1 < body.json   # rewrite one request
//!   overlay-proxy check                               # validate the config
//!   overlay-proxy init                                # write a starter config

use clap::{Parser, Subcommand};
use colored::Colorize;
use overlay_proxy::cli;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "overlay-proxy",
    version,
    about = "Rewrite container create requests for the overlay network"
)]
struct Cli {
    /// Config file (default: .overlay-proxy.yaml, then ~/.overlay-proxy/config.yaml)
    #[arg(short, long, global = true, env = "OVERLAY_PROXY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a create-container request body and print the result
    Transform {
        /// Container name, as passed in the `name` query parameter
        #[arg(short, long)]
        name: Option<String>,

        /// Request body file (reads stdin if not given)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Validate the config file
    Check,

    /// Write a starter config file
    Init {
        /// Where to write it (default: ./.overlay-proxy.yaml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so `transform` output stays a clean body.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("overlay_proxy=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let args = Cli::parse();

    let result = match args.command {
        Commands::Transform { name, input } => {
            match cli::load_config(args.config.as_deref()) {
                Ok((config, _)) => {
                    cli::transform::run_transform(
                        config,
                        cli::transform::TransformOptions { name, input },
                    )
                    .await
                }
                Err(e) => Err(e),
            }
        }
        Commands::Check => cli::load_config(args.config.as_deref())
            .and_then(|(config, source)| cli::check::run_check(&config, source.as_deref())),
        Commands::Init { output, force } => cli::init::run_init(output, force),
    };

    if let Err(e) = result {
        eprintln!();
        eprintln!("  {} {}", "✗".red().bold(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".dimmed(), cause);
        }
        eprintln!();
        std::process::exit(1);
    }
}
