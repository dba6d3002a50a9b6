// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flightcost_core::loader::{load_reference_data, read_numbered_rows};
use flightcost_core::{
    BookingRequest, EvaluationConfig, Flight, FlightResult, HomeBase, ReferenceData,
    Rejection, ValidationMode,
};
use log::LevelFilter;
use serde::Serialize;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Airports table (code, name, distance from MAN, distance from LGW)
    #[arg(long, env = "FLIGHTCOST_AIRPORTS")]
    airports: PathBuf,

    /// Aircraft table (type, cost per seat, max range, economy, business, first)
    #[arg(long, env = "FLIGHTCOST_AIRCRAFT")]
    aircraft: PathBuf,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, env = "FLIGHTCOST_CONFIG")]
    config: Option<PathBuf>,

    /// Report every failed rule instead of only the first
    #[arg(long, global = true)]
    all_failures: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single flight
    Evaluate {
        /// Home base code (MAN or LGW)
        home_base: String,
        /// Overseas airport code
        overseas: String,
        /// Aircraft type, quoted if it contains spaces
        aircraft_type: String,
        economy_booked: u32,
        business_booked: u32,
        first_class_booked: u32,
        economy_price: f64,
        business_price: f64,
        first_class_price: f64,
    },
    /// Evaluate every row of a bookings file, each independently
    Batch { bookings: PathBuf },
    /// List the airports table
    Airports,
    /// List the aircraft table
    Aircraft,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Outcome {
    Accepted {
        route: String,
        aircraft: String,
        distance: f64,
        seats: u64,
        #[serde(flatten)]
        result: FlightResult,
    },
    Rejected {
        route: String,
        aircraft: String,
        reasons: Vec<String>,
    },
    Invalid {
        /// Line in the bookings file, header included
        line: u64,
        reason: String,
    },
}

impl Outcome {
    fn from_evaluation(request: &BookingRequest, evaluation: Result<Flight, Rejection>) -> Self {
        let route = format!(
            "{}->{}",
            request.home_base(),
            request.overseas_airport_code().trim()
        );
        let aircraft = request.aircraft_type().trim().to_string();
        match evaluation {
            Ok(flight) => Outcome::Accepted {
                route,
                aircraft,
                distance: flight.distance(),
                seats: flight.total_seats(),
                result: flight.result().rounded(),
            },
            Err(rejection) => Outcome::Rejected {
                route,
                aircraft,
                reasons: rejection.violations().iter().map(|v| v.to_string()).collect(),
            },
        }
    }

    fn print(&self) {
        match self {
            Outcome::Accepted {
                route,
                aircraft,
                distance,
                seats,
                result,
            } => {
                println!("[ok] {} on {} ({} seats, {} distance units)", route, aircraft, seats, distance);
                println!("     income {:.2}  cost {:.2}  profit {:.2}", result.income, result.cost, result.profit);
            }
            Outcome::Rejected {
                route,
                aircraft,
                reasons,
            } => {
                println!("[x]  {} on {}", route, aircraft);
                for reason in reasons {
                    println!("     {}", reason);
                }
            }
            Outcome::Invalid { line, reason } => {
                println!("[!]  line {}: {}", line, reason);
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(EvaluationConfig::default_path);
    let mut config = EvaluationConfig::load(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;
    if cli.all_failures {
        config.validation_mode = ValidationMode::CollectAll;
    }

    let reference: Arc<ReferenceData> = Arc::new(
        load_reference_data(&cli.airports, &cli.aircraft, &config)
            .context("Failed to load reference tables")?,
    );

    match &cli.command {
        Commands::Evaluate {
            home_base,
            overseas,
            aircraft_type,
            economy_booked,
            business_booked,
            first_class_booked,
            economy_price,
            business_price,
            first_class_price,
        } => {
            let base = HomeBase::from_code(home_base)
                .ok_or_else(|| anyhow::anyhow!("Unknown home base '{}'. Use MAN or LGW.", home_base))?;
            let request = BookingRequest::new(
                base,
                overseas.as_str(),
                aircraft_type.as_str(),
                [*economy_booked, *business_booked, *first_class_booked],
                [*economy_price, *business_price, *first_class_price],
            )?;
            let evaluation = Flight::with_config(request.clone(), Arc::clone(&reference), &config);
            emit(&[Outcome::from_evaluation(&request, evaluation)], cli.json)?;
        }
        Commands::Batch { bookings } => {
            let rows = read_numbered_rows(bookings, config.delimiter_byte()?)
                .with_context(|| format!("Failed to read bookings {}", bookings.display()))?;
            let outcomes: Vec<Outcome> = rows
                .iter()
                .map(|(line, row)| match BookingRequest::from_row(row.as_slice()) {
                    Ok(request) => {
                        let evaluation =
                            Flight::with_config(request.clone(), Arc::clone(&reference), &config);
                        Outcome::from_evaluation(&request, evaluation)
                    }
                    Err(e) => Outcome::Invalid {
                        line: *line,
                        reason: e.to_string(),
                    },
                })
                .collect();
            emit(&outcomes, cli.json)?;
        }
        Commands::Airports => {
            for airport in reference.airports.iter() {
                println!(
                    "{:<5} {:<36} MAN {:>7} LGW {:>7}",
                    airport.code, airport.name, airport.distance_from_base_a, airport.distance_from_base_b
                );
            }
        }
        Commands::Aircraft => {
            for aircraft in reference.aircraft.iter() {
                println!(
                    "{:<22} {}{:<6} range {:>6}  seats {}/{}/{}",
                    aircraft.aircraft_type,
                    config.currency_symbol,
                    aircraft.cost_per_seat_per_hundred,
                    aircraft.max_range,
                    aircraft.economy_capacity,
                    aircraft.business_capacity,
                    aircraft.first_class_capacity
                );
            }
        }
    }

    Ok(())
}

fn emit(outcomes: &[Outcome], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcomes)?);
    } else {
        for outcome in outcomes {
            outcome.print();
        }
    }
    Ok(())
}
