// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Solace - a journaling and mental-wellness companion.
//!
//! This is the binary entry point for the Solace server.

use clap::{Parser, Subcommand};

mod serve;

/// Solace - a journaling and mental-wellness companion.
#[derive(Parser, Debug)]
#[command(name = "solace", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Solace web server.
    Serve,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match solace_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            solace_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("solace serve failed: {e}");
                std::process::exit(1);
            }
        }
        None => {
            println!("solace: use --help for available commands");
        }
    }
}
