use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tuvi_core::{build_chart, overlay_for_year, BirthFacts, Gender, HourBucket, OutputFormat, TuViConfig};

#[derive(Parser, Debug)]
#[command(name = "tuvi", version, about = "Lập lá số Tử Vi", long_about = None)]
struct Args {
    /// Full name shown on the chart
    #[arg(long)]
    name: String,
    /// male | female
    #[arg(long)]
    gender: Gender,
    /// Solar birth date, YYYY-MM-DD
    #[arg(long)]
    date: NaiveDate,
    /// Birth hour window, e.g. 09:00-11:00
    #[arg(long)]
    hour: HourBucket,
    /// Lunar year to compute decade and year pointers for
    #[arg(long)]
    year: Option<i32>,
    /// Print JSON regardless of the configured output
    #[arg(long)]
    json: bool,
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match TuViConfig::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)))
        .with_writer(std::io::stderr)
        .init();

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &TuViConfig) -> Result<(), Box<dyn std::error::Error>> {
    let facts = BirthFacts::new(&args.name, args.gender, args.date, args.hour);
    let chart = build_chart(&facts, &config.calendar())?;
    info!("chart built for {} ({})", chart.summary.full_name, chart.summary.year_pillar);
    let overlay = args.year.map(|year| overlay_for_year(&chart, year));

    let format = if args.json { OutputFormat::Json } else { config.output };
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "chart": chart, "overlay": overlay });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Debug => {
            println!("{:#?}", chart);
            if let Some(overlay) = overlay {
                println!("{:#?}", overlay);
            }
        }
    }
    Ok(())
}
