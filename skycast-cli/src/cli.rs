use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};

use skycast_core::{
    Config, OpenWeatherClient, SearchHistory, Units, WeatherReport, WeatherService,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store your OpenWeatherMap API key.
    Configure,

    /// Show weather for a location and exit.
    Show {
        /// Location name, e.g. "Kyiv" or "London,UK".
        location: String,

        /// Unit system: "metric" or "imperial".
        #[arg(long, default_value = "metric")]
        units: String,
    },

    /// Prompt loop: repeated queries with an in-session search history.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, units } => {
                let units = Units::try_from(units.as_str())?;
                let service = build_service()?;

                let report = service.query(&location, units).await?;

                print_report(&report);
                Ok(())
            }
            Command::Interactive => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let api_key = Text::new("OpenWeatherMap API key:")
        .prompt()
        .context("Failed to read API key")?;

    let mut config = Config::load()?;
    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

fn build_service() -> anyhow::Result<WeatherService> {
    let config = Config::load()?;
    let api_key = config.require_api_key()?;

    let client = OpenWeatherClient::new(api_key.to_owned());
    Ok(WeatherService::new(
        Box::new(client),
        Arc::new(SearchHistory::new()),
    ))
}

async fn interactive() -> anyhow::Result<()> {
    let service = build_service()?;

    println!("Type a location, \"history\" to list past searches, or \"quit\" to exit.");

    loop {
        let location = Text::new("Location:").prompt().context("Prompt failed")?;
        let trimmed = location.trim();

        match trimmed {
            "quit" | "exit" => break,
            "history" => {
                if service.history().is_empty() {
                    println!("No searches yet.");
                } else {
                    for line in service.history().snapshot() {
                        println!("{line}");
                    }
                }
                continue;
            }
            _ => {}
        }

        let labels: Vec<&str> = Units::all().iter().map(|u| u.label()).collect();
        let choice = Select::new("Units:", labels)
            .prompt()
            .context("Prompt failed")?;
        let units = Units::all()
            .iter()
            .copied()
            .find(|u| u.label() == choice)
            .unwrap_or_default();

        match service.query(trimmed, units).await {
            Ok(report) => print_report(&report),
            Err(err) => eprintln!("Error: {err}"),
        }
    }

    Ok(())
}

fn print_report(report: &WeatherReport) {
    let units = report.units;

    println!("Location: {}", report.current.location_name);
    println!(
        "Temperature: {} {}",
        report.current.temperature,
        units.temp_suffix()
    );
    println!("Humidity: {}%", report.current.humidity_pct);
    println!(
        "Wind Speed: {} {}",
        report.current.wind_speed,
        units.speed_suffix()
    );
    println!(
        "Condition: {} {}",
        report.current.condition,
        report.icon.glyph()
    );

    println!();
    println!("5-Day Forecast:");
    for entry in &report.daily {
        println!(
            "{} - {} {} - {}",
            entry.timestamp,
            entry.temperature,
            units.temp_suffix(),
            entry.condition
        );
    }
}
