use reqwest::StatusCode;

/// Shown when the weather request never produced a usable response.
pub const NETWORK_DOWN_MESSAGE: &str = "Internet appears down!";
/// Shown when the provider answered but the body could not be used.
pub const BAD_DATA_MESSAGE: &str = "Weather data unavailable";
/// Shown when no usable location fix arrived.
pub const NO_LOCATION_MESSAGE: &str = "Location unavailable";

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather provider returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("weather response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("weather response is missing `{0}`")]
    MissingField(&'static str),

    #[error("weather response field `{field}` is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl WeatherError {
    /// True for failures that happened before a usable body arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, WeatherError::Transport(_) | WeatherError::Status { .. })
    }

    /// The single line the user sees for this failure.
    pub fn status_message(&self) -> &'static str {
        if self.is_transport() {
            NETWORK_DOWN_MESSAGE
        } else {
            BAD_DATA_MESSAGE
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("location unavailable: {0}")]
    Unavailable(String),

    #[error("location lookup failed: {0}")]
    Transport(#[from] reqwest::Error),
}
