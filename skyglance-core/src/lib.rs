//! Core library for the `skyglance` CLI.
//!
//! This crate defines:
//! - Pure display helpers: temperature conversion, day/night classification and
//!   condition-code to icon mapping
//! - Abstractions over weather and location providers
//! - The refresh cycle tying them together
//! - Configuration handling
//!
//! It is used by `skyglance-cli`, but can also back other front ends.

pub mod config;
pub mod daynight;
pub mod error;
pub mod icon;
pub mod location;
pub mod model;
pub mod provider;
pub mod session;
pub mod units;

pub use config::Config;
pub use daynight::is_night;
pub use error::{LocationError, WeatherError};
pub use icon::{IconId, resolve_icon};
pub use location::LocationProvider;
pub use model::{Coordinate, DisplayState, LocationFix, WeatherReading};
pub use provider::WeatherProvider;
pub use session::{Outcome, WeatherSession};
pub use units::{TemperatureUnit, convert};
