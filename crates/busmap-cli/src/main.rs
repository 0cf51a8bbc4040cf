use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod commands;

#[derive(Parser, Debug)]
#[command(author, version, about = "busmap transit catalogue utilities")]
struct Cli {
    /// Request document path; standard input when omitted.
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Output path; standard output when omitted.
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer the document's stat requests as a response document.
    Stats,
    /// Render the transit network as an SVG map.
    Map,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Stats => commands::stats::handle_stats(cli.input.as_deref(), cli.output.as_deref()),
        Command::Map => commands::map::handle_map(cli.input.as_deref(), cli.output.as_deref()),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
