mod altitude;
mod config;
mod lifecycle;
mod query;
mod web;

use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;

use crate::altitude::{QueryResult, Statistics};
use crate::config::Config;
use crate::lifecycle::{Controller, HttpTransport, LifecycleState};
use crate::query::QueryForm;

#[derive(Parser)]
#[command(name = "alt-o-mat")]
#[command(about = "Satellite altitude profiles from an orbit propagation service")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<String>,
    /// Base URL of the altitude service
    #[arg(long, global = true, env = "ALTITUDE_API_BASE")]
    api_base: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the query dashboard and API
    Serve,
    /// Run a single altitude query and print the result
    Query(QueryArgs),
}

#[derive(Args)]
struct QueryArgs {
    /// NORAD catalog id
    #[arg(long)]
    catalog_id: String,
    /// Window start in local time, YYYY-MM-DDTHH:mm:ss
    #[arg(long)]
    start: String,
    /// Window end in local time, YYYY-MM-DDTHH:mm:ss
    #[arg(long)]
    end: String,
    /// Sampling step in seconds
    #[arg(long, default_value = "60")]
    step: String,
    /// Print the raw result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref(), cli.api_base) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Serve => serve(config).await,
        Commands::Query(args) => query(config, args).await,
    }
}

async fn serve(config: Config) -> ExitCode {
    match web::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn query(config: Config, args: QueryArgs) -> ExitCode {
    let transport = match HttpTransport::from_config(&config.backend) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("HTTP client error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let controller = Controller::new(transport);

    let form = QueryForm::new(args.catalog_id, &args.start, &args.end, args.step);
    let attempt = match controller.submit(&form) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Invalid query: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = attempt.settled().await {
        eprintln!("Query task failed: {}", e);
        return ExitCode::FAILURE;
    }

    match controller.state() {
        LifecycleState::Succeeded { result } if args.json => {
            match serde_json::to_string_pretty(&result) {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error encoding result: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        LifecycleState::Succeeded { result } => {
            print_result(&result);
            ExitCode::SUCCESS
        }
        LifecycleState::Failed { message } => {
            eprintln!("Query failed: {}", message);
            ExitCode::FAILURE
        }
        other => {
            eprintln!("Query did not settle (state: {})", other.label());
            ExitCode::FAILURE
        }
    }
}

fn print_result(result: &QueryResult) {
    println!(
        "NORAD {}: {} to {} every {}s",
        result.catalog_id, result.window_start, result.window_end, result.step_seconds
    );
    println!(
        "TLE {} (epoch {}), Earth radius {} km",
        result.metadata.source_label,
        result.metadata.epoch_timestamp,
        result.metadata.reference_radius_km
    );

    match Statistics::from_samples(&result.samples) {
        Ok(stats) => println!(
            "min {:.3} km, max {:.3} km, mean {:.3} km, range {:.3} km",
            stats.min, stats.max, stats.mean, stats.range
        ),
        Err(e) => println!("{}", e),
    }

    for (i, sample) in result.samples.iter().enumerate() {
        println!(
            "  {}: {} {:.3} km",
            i + 1,
            sample.timestamp,
            sample.altitude_km
        );
    }
}
