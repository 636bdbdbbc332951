//! # tickseq
//!
//! The main binary for the tickseq intro sequencer.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                apps/tickseq (THE BINARY)             │
//! │                                                      │
//! │  ┌─────────────┐   ┌──────────────┐   ┌───────────┐  │
//! │  │    CLI      │   │    Config    │   │ Save file │  │
//! │  │   (clap)    │   │ (toml/serde) │   │   (I/O)   │  │
//! │  └──────┬──────┘   └──────┬───────┘   └─────┬─────┘  │
//! │         └─────────────────┼─────────────────┘        │
//! │                           ▼                          │
//! │                   ┌───────────────┐                  │
//! │                   │ tickseq-core  │                  │
//! │                   │  (THE LOGIC)  │                  │
//! │                   └───────────────┘                  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Run the intro headless and print the hand-off timeline
//! tickseq intro --events
//!
//! # Classify a map
//! tickseq classify --group 10 --num 5
//!
//! # Manage a save block
//! tickseq save init -f game.sav
//! tickseq save warp -f game.sav --group 26 --num 1
//! ```

use clap::Parser;
use tickseq::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // TICKSEQ_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("TICKSEQ_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tickseq=info,tickseq_core=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  ╔╦╗╦╔═╗╦╔═╔═╗╔═╗╔═╗
   ║ ║║  ╠╩╗╚═╗║╣ ║═╬╗
   ╩ ╩╚═╝╩ ╩╚═╝╚═╝╚═╝╚

  Intro sequencer v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
