// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fractal_cli::commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fractal")]
#[command(author = "Maravilla Labs")]
#[command(version)]
#[command(about = "Inspect file-convention route trees", long_about = None)]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Path to the project configuration
    #[arg(short, long, global = true, default_value = "fractal.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new fractal project
    Init {
        /// Project name (defaults to current directory name)
        name: Option<String>,
    },
    /// List discovered modules and their route files
    Modules,
    /// Print the resolved route tree
    Routes {
        /// Module to print (defaults to every mounted module)
        module: Option<String>,
        /// Print JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
    /// Navigate to a URL and print its breadcrumb trail
    Crumbs {
        /// URL to navigate to, e.g. /dashboard/invoices/42
        url: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with the specified log level
    let filter = EnvFilter::try_new(&cli.log_level)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    match cli.command {
        Commands::Init { name } => {
            commands::init::run(name).await
        }
        Commands::Modules => {
            commands::modules::run(&cli.config).await
        }
        Commands::Routes { module, json } => {
            commands::routes::run(&cli.config, module, json).await
        }
        Commands::Crumbs { url, json } => {
            commands::crumbs::run(&cli.config, &url, json).await
        }
    }
}
