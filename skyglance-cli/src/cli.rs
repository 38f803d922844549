use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Password, PasswordDisplayMode, Text};
use skyglance_core::{
    Config, Coordinate, LocationProvider, Outcome, TemperatureUnit, WeatherSession,
    config::{DEFAULT_GEOLOCATION_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_WEATHER_ENDPOINT},
    convert,
    location::{FixedLocation, IpLocation},
    provider::provider_from_config,
    resolve_icon,
};
use std::process::ExitCode;
use tracing::{debug, info};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyglance", version, about = "Current weather at a glance")]
pub struct Cli {
    /// Log debug details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and endpoints in the config file.
    Configure,

    /// Show the current weather here, or at the given coordinate.
    Show {
        /// Latitude in degrees; locates by IP address when omitted.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in degrees.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Accuracy in meters reported for --lat/--lon. Zero or less is never used.
        #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
        accuracy: f64,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,

        /// Offer to refresh after each result.
        #[arg(long)]
        watch: bool,
    },

    /// Print the icon for an OpenWeather condition code.
    Icon {
        #[arg(allow_negative_numbers = true)]
        code: i64,

        /// Use the night variant where one exists.
        #[arg(long)]
        night: bool,
    },

    /// Convert a Kelvin temperature the way `show` does.
    Convert {
        #[arg(allow_negative_numbers = true)]
        kelvin: f64,

        /// Two-letter country code; "US" selects Fahrenheit.
        #[arg(long, default_value = "")]
        country: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { lat, lon, accuracy, json, watch } => {
                let config = Config::load()?;
                let location: Box<dyn LocationProvider> = match (lat, lon) {
                    (Some(lat), Some(lon)) => {
                        debug!(lat, lon, accuracy, "using coordinates from the command line");
                        Box::new(FixedLocation::single(Coordinate::new(lat, lon), accuracy))
                    }
                    _ => {
                        debug!(endpoint = config.geolocation_endpoint(), "locating by IP address");
                        Box::new(
                            IpLocation::from_config(&config)
                                .context("Failed to set up IP location lookup")?,
                        )
                    }
                };
                let weather =
                    provider_from_config(&config).context("Failed to set up weather provider")?;

                show(WeatherSession::new(location, weather), json, watch).await
            }
            Command::Icon { code, night } => {
                println!("{}", resolve_icon(code, night));
                Ok(ExitCode::SUCCESS)
            }
            Command::Convert { kelvin, country } => {
                let unit = TemperatureUnit::for_country(&country);
                println!("{}{}", convert(kelvin, &country), unit.symbol());
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// Process exit status for a finished run: 0 when weather was shown, 1 otherwise.
fn exit_status(outcome: &Outcome) -> u8 {
    match outcome {
        Outcome::Display(_) => 0,
        Outcome::Status(_) => 1,
    }
}

async fn show(session: WeatherSession, json: bool, watch: bool) -> anyhow::Result<ExitCode> {
    loop {
        let outcome = session.refresh().await;

        if json {
            println!("{}", output::render_json(&outcome)?);
        } else {
            println!("{}", output::render_human(&outcome, Local::now()));
        }

        // The status line was already printed; only the exit code reports failure.
        if !watch {
            return Ok(ExitCode::from(exit_status(&outcome)));
        }

        let again = Confirm::new("Refresh?")
            .with_default(true)
            .prompt()
            .context("Failed to read refresh prompt")?;
        if !again {
            info!("refresh loop ended by user");
            return Ok(ExitCode::from(exit_status(&outcome)));
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key (leave empty for none):")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let weather_endpoint = Text::new("Weather endpoint:")
        .with_default(config.weather_endpoint())
        .prompt()?;
    config.weather_endpoint =
        Some(weather_endpoint).filter(|url| url.as_str() != DEFAULT_WEATHER_ENDPOINT);

    let geolocation_endpoint = Text::new("IP geolocation endpoint:")
        .with_default(config.geolocation_endpoint())
        .prompt()?;
    config.geolocation_endpoint =
        Some(geolocation_endpoint).filter(|url| url.as_str() != DEFAULT_GEOLOCATION_ENDPOINT);

    let timeout = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS))
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;
    config.request_timeout_secs = Some(timeout).filter(|t| *t != DEFAULT_REQUEST_TIMEOUT_SECS);

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["skyglance", "show", "--lat", "-33.87", "--lon", "151.21"])
            .expect("args should parse");

        match cli.command {
            Command::Show { lat, lon, accuracy, json, watch } => {
                assert_eq!(lat, Some(-33.87));
                assert_eq!(lon, Some(151.21));
                assert_eq!(accuracy, 10.0);
                assert!(!json);
                assert!(!watch);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn show_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["skyglance", "show", "--lat", "1.0"]).is_err());
    }

    #[test]
    fn failed_refresh_exits_non_zero() {
        let shown = Outcome::Display(skyglance_core::DisplayState {
            display_temperature: "5°".into(),
            display_icon: skyglance_core::IconId::Overcast,
            display_location_name: "Hamburg".into(),
        });

        assert_eq!(exit_status(&shown), 0);
        assert_eq!(exit_status(&Outcome::Status("Internet appears down!".into())), 1);
    }

    #[test]
    fn icon_parses_night_flag() {
        let cli = Cli::try_parse_from(["skyglance", "-v", "icon", "800", "--night"])
            .expect("args should parse");

        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Icon { code: 800, night: true }));
    }
}
