use chrono::{DateTime, Local};
use skyglance_core::{DisplayState, Outcome};

/// Multi-line, human-readable rendering of a refresh outcome.
pub fn render_human(outcome: &Outcome, at: DateTime<Local>) -> String {
    match outcome {
        Outcome::Display(state) => render_state(state, at),
        Outcome::Status(message) => message.clone(),
    }
}

fn render_state(state: &DisplayState, at: DateTime<Local>) -> String {
    format!(
        "{}\n{}  {}\nupdated {}",
        state.display_location_name,
        state.display_temperature,
        state.display_icon,
        at.format("%H:%M"),
    )
}

pub fn render_json(outcome: &Outcome) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}
