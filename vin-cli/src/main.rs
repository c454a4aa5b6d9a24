use clap::{Parser, Subcommand};
use color_eyre::Result;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use client::ReportClient;
use shared::{data::VinReport, summary};

mod client;

/// Looks up vehicle reports from the web-app.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Address of the web-app, e.g. `localhost:8000` or `https://reports.example.com`.
    #[arg(long, default_value = "localhost:8000")]
    server: String,
    /// Print the raw JSON report instead of a summary.
    #[arg(long)]
    json: bool,
    /// Log every request made to the server.
    #[arg(long)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Query every registry dataset for a VIN.
    Lookup { vin: String },
    /// Fetch one of the demo reports (1 to 5).
    Mock { code: i32 },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level = if cli.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        ConfigBuilder::new().build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let client = ReportClient::new(&cli.server)?;
    let report = match &cli.command {
        Command::Lookup { vin } => client.lookup(vin)?,
        Command::Mock { code } => client.mock(*code)?,
    };

    print(&report, cli.json)
}

fn print(report: &VinReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", summary::render(report));
    }
    Ok(())
}
