//! Gridvalue CLI - fantasy value analysis from the terminal

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use gridvalue::core::{
    analyze_constructors, analyze_drivers, generate_constructor_recommendations,
    generate_recommendations,
};
use gridvalue::error::validate_budget;
use gridvalue::models::ConstructorAnalysis;
use gridvalue::providers::{
    FantasyClient, FantasyConfig, MockProvider, OpenF1Client, OpenF1Config, PricingProvider,
    TelemetryProvider,
};

#[derive(Parser)]
#[command(name = "gridvalue")]
#[command(author, version, about = "F1 fantasy value analyzer CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use offline fixture data instead of live upstream APIs
    #[arg(long)]
    mock: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the latest meeting and its practice sessions
    Sessions,

    /// Analyze driver pace and pricing for a session
    Drivers {
        /// Session key (defaults to the latest practice session)
        #[arg(short, long)]
        session: Option<u32>,
    },

    /// Recommend budget-constrained swaps
    Recommend {
        /// Available budget in millions
        #[arg(short, long, default_value = "0.0")]
        budget: f64,

        /// Session key (defaults to the latest practice session)
        #[arg(short, long)]
        session: Option<u32>,

        /// Show constructor swaps instead of driver swaps
        #[arg(long)]
        constructors: bool,

        /// Number of recommendations to show
        #[arg(long, default_value = "10")]
        top: usize,

        /// Prompt for the budget instead of taking it from --budget
        #[arg(short, long)]
        interactive: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.mock {
        let provider = MockProvider::new();
        run(&cli.command, &provider, &provider).await
    } else {
        let openf1 = OpenF1Client::new(OpenF1Config::default())?;
        let fantasy = FantasyClient::new(FantasyConfig::default())?;
        run(&cli.command, &openf1, &fantasy).await
    }
}

async fn run<T, P>(command: &Commands, telemetry: &T, pricing: &P) -> Result<()>
where
    T: TelemetryProvider,
    P: PricingProvider,
{
    match command {
        Commands::Sessions => show_sessions(telemetry).await,
        Commands::Drivers { session } => show_drivers(telemetry, pricing, *session).await,
        Commands::Recommend {
            budget,
            session,
            constructors,
            top,
            interactive,
        } => {
            let budget = if *interactive {
                prompt_budget()?
            } else {
                *budget
            };
            validate_budget(budget)?;
            show_recommendations(telemetry, pricing, *session, budget, *constructors, *top).await
        }
    }
}

fn prompt_budget() -> Result<f64> {
    let budget: f64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Available budget (M)")
        .default(0.0)
        .validate_with(|v: &f64| validate_budget(*v).map_err(|e| e.to_string()))
        .interact_text()?;
    Ok(budget)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

async fn show_sessions<T: TelemetryProvider>(telemetry: &T) -> Result<()> {
    let pb = spinner("Fetching meeting schedule...");
    let meeting = telemetry.latest_meeting().await?;
    pb.finish_and_clear();

    let Some(meeting) = meeting else {
        println!("{}", "No meeting found (off-season?)".yellow());
        return Ok(());
    };

    let sessions = telemetry.practice_sessions(meeting.meeting_key).await?;

    println!(
        "{} ({}, {})",
        meeting.meeting_name.bold(),
        meeting.circuit_short_name,
        meeting.year
    );
    for session in &sessions {
        println!(
            "  {:<12} key={:<6} {}",
            session.session_name,
            session.session_key,
            session.date_start.dimmed()
        );
    }

    Ok(())
}

async fn show_drivers<T, P>(telemetry: &T, pricing: &P, session: Option<u32>) -> Result<()>
where
    T: TelemetryProvider,
    P: PricingProvider,
{
    let pb = spinner("Analyzing drivers...");
    let drivers = analyze_drivers(telemetry, pricing, session).await?;
    pb.finish_and_clear();

    if drivers.is_empty() {
        println!("{}", "No session data available".yellow());
        return Ok(());
    }

    println!("{}", drivers[0].session_name.bold());
    println!(
        "{}",
        format!(
            "{:<4} {:<22} {:<16} {:>9} {:>7} {:>7} {:>7}",
            "#", "Driver", "Team", "Best Lap", "Price", "Δ", "Value"
        )
        .bold()
    );

    for driver in &drivers {
        println!(
            "{:<4} {:<22} {:<16} {:>9} {:>7} {:>7} {:>7}",
            driver.driver_number,
            format!("{} {}", driver.first_name, driver.last_name),
            driver.team_name,
            format_lap(driver.best_lap_time),
            format_price(driver.price),
            format_signed(driver.price_change),
            driver
                .value_score
                .map(|v| format!("{:.3}", v))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    Ok(())
}

async fn show_recommendations<T, P>(
    telemetry: &T,
    pricing: &P,
    session: Option<u32>,
    budget: f64,
    constructors: bool,
    top: usize,
) -> Result<()>
where
    T: TelemetryProvider,
    P: PricingProvider,
{
    let pb = spinner("Generating recommendations...");
    let drivers = analyze_drivers(telemetry, pricing, session).await?;

    if constructors {
        let teams: Vec<ConstructorAnalysis> = analyze_constructors(&drivers, pricing).await?;
        pb.finish_and_clear();

        let recs = generate_constructor_recommendations(&teams, budget);
        print_header(budget, recs.len());
        for rec in recs.iter().take(top) {
            println!(
                "  {} {} {}",
                rec.constructor_out.name.red(),
                "->".dimmed(),
                rec.constructor_in.name.green()
            );
            println!("    {}", rec.reason.dimmed());
        }
    } else {
        pb.finish_and_clear();

        let recs = generate_recommendations(&drivers, budget);
        print_header(budget, recs.len());
        for rec in recs.iter().take(top) {
            println!(
                "  {} {} {}",
                rec.driver_out.name_acronym.red(),
                "->".dimmed(),
                rec.driver_in.name_acronym.green()
            );
            println!("    {}", rec.reason.dimmed());
        }
    }

    Ok(())
}

fn print_header(budget: f64, count: usize) {
    println!(
        "{} (budget {:.1}M, {} candidates)",
        "Swap recommendations".bold(),
        budget,
        count
    );
    if count == 0 {
        println!("  {}", "No improving swaps within budget".yellow());
    }
}

fn format_lap(lap: Option<f64>) -> String {
    lap.map(|l| format!("{:.3}s", l)).unwrap_or_else(|| "-".to_string())
}

fn format_price(price: Option<f64>) -> String {
    price
        .map(|p| format!("{:.1}M", p))
        .unwrap_or_else(|| "-".to_string())
}

fn format_signed(value: Option<f64>) -> String {
    match value {
        Some(v) if v > 0.0 => format!("+{:.1}", v),
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }
}
