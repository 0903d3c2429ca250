use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use tripplanner::{TripPlanner, TripPlannerConfig, TripPlannerError, TripRequest, logging, web};

#[derive(Parser)]
#[command(name = "tripplanner")]
#[command(about = "Plan a trip between two cities: route, budget, weather, safety and places")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./tripplanner.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Plan a trip and print the result
    Plan {
        /// Origin city
        #[arg(long)]
        from: String,

        /// Destination city
        #[arg(long)]
        to: String,

        /// Number of nights at the destination
        #[arg(long, default_value_t = 3)]
        nights: u32,

        /// Number of travelers
        #[arg(long, default_value_t = 1)]
        travelers: u32,

        /// Travel mode: road or flight
        #[arg(long, default_value = "road")]
        mode: String,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the cities available without live geocoding
    Cities,
    /// Run the HTTP API
    Serve {
        /// Port to listen on (overrides configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

async fn run(cli: Cli) -> Result<()> {
    let config = TripPlannerConfig::load_from_path(cli.config.as_deref())
        .context("Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose);

    let port = config.server.port;
    let planner = TripPlanner::new(config).context("Failed to start trip planner")?;

    match cli.command {
        Command::Plan {
            from,
            to,
            nights,
            travelers,
            mode,
            json,
        } => {
            let request = TripRequest::parse(from, to, nights, travelers, &mode)?;
            let plan = planner.plan(&request).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print!("{plan}");
            }
        }
        Command::Cities => {
            for city in planner.geo().known_cities() {
                match &city.province {
                    Some(province) => {
                        println!("{:<14} {:<20} {}", city.name, province, city.format_coordinates());
                    }
                    None => println!("{:<14} {:<20} {}", city.name, "", city.format_coordinates()),
                }
            }
        }
        Command::Serve { port: port_override } => {
            web::run(Arc::new(planner), port_override.unwrap_or(port)).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<TripPlannerError>() {
                Some(error) if error.is_user_error() => eprintln!("❌ {}", error.user_message()),
                _ => eprintln!("❌ {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
