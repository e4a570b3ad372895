use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod errors;
mod handlers;
mod state;
mod ui;

use errors::map_dashboard_error;
use state::AppState;

/// Inventory Dashboard - Browse inventory cards, relationship networks and image galleries
///
/// Examples:
///   # Show the inventory with every facet on its first option
///   invdash inventory -c dashboard.json
///
///   # Pick facet values one by one (later facets only offer what is left)
///   invdash inventory -c dashboard.json -s Componente=1 -s Resultado=1.1 -s "Cultivos Asociados=arroz"
///
///   # List the options of one facet given earlier picks
///   invdash options -c dashboard.json -f Resultado -s Componente=1
///
///   # Export a network for Graphviz or vis-network
///   invdash network -c dashboard.json -n Arroz --format dot -o arroz.dot
///
///   # Page through a gallery
///   invdash gallery -c dashboard.json -n Cafe --page 2
#[derive(Parser, Debug)]
#[command(name = "invdash")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Filtering Logic:\n  \
    - Facets are applied in configured order; each offers only values left by earlier picks\n  \
    - Exact facets match the whole cell, case-sensitive\n  \
    - Multi-value facets match if the chosen tag occurs anywhere in the cell, ignoring case\n  \
    - 'all' on a multi-value facet applies no constraint\n  \
    - A pick that is not offered falls back to the first option")]
struct Cli {
    /// Path to the dashboard JSON configuration
    #[arg(short, long, global = true, value_name = "FILE", default_value = "dashboard.json")]
    config: PathBuf,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter the inventory and print product cards
    Inventory {
        /// Facet choice (format: column=value, can be specified multiple times)
        #[arg(short, long = "select", value_name = "COLUMN=VALUE")]
        selections: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the options one facet offers once earlier facets resolve (unpicked ones take their default)
    Options {
        /// Facet column to list options for
        #[arg(short, long, value_name = "COLUMN")]
        facet: String,

        /// Earlier facet choice (format: column=value)
        #[arg(short, long = "select", value_name = "COLUMN=VALUE")]
        selections: Vec<String>,
    },
    /// Render a relationship network and its interpretation table
    Network {
        /// Network name as configured
        #[arg(short, long)]
        name: String,

        #[arg(long, value_enum, default_value_t = NetworkFormat::Summary)]
        format: NetworkFormat,

        /// Write the graph export here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Show one page of an image gallery
    Gallery {
        /// Gallery name as configured
        #[arg(short, long)]
        name: String,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// List configured networks and galleries
    Views,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NetworkFormat {
    /// Node and edge listing with weighted degrees
    Summary,
    /// Graphviz DOT for static plots
    Dot,
    /// vis-network JSON for interactive plots
    Vis,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let state = AppState::load_from_file(cli.config)?;

    match cli.command {
        Command::Inventory { selections, json } => {
            handlers::inventory_handlers::show_inventory(&state, &selections, json)
        }
        Command::Options { facet, selections } => {
            handlers::inventory_handlers::show_options(&state, &facet, &selections)
        }
        Command::Network {
            name,
            format,
            output,
        } => handlers::network_handlers::show_network(&state, &name, format, output.as_deref()),
        Command::Gallery { name, page } => {
            handlers::gallery_handlers::show_gallery(&state, &name, page)
        }
        Command::Views => {
            ui::print_views(&state.config);
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        let (title, message, details) = map_dashboard_error(&err);
        ui::print_error(&title, &message, &details);
        process::exit(1);
    }
}
