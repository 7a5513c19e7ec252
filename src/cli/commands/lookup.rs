use crate::config::Config;
use crate::models::weather::WeatherCondition;
use crate::services::{LookupError, LookupOutcome};
use crate::state::SharedState;

pub async fn cmd_lookup(
    config: Config,
    city: &str,
    user_id: Option<String>,
) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;

    match state.lookup.lookup(city, user_id).await {
        Ok(outcome) => print_outcome(&outcome),
        Err(LookupError::EmptyCity) => println!("Usage: weatherboard lookup <city>"),
        Err(e) => println!("✗ {e}"),
    }

    state.store.close().await
}

fn print_outcome(outcome: &LookupOutcome) {
    let weather = &outcome.weather;
    let condition = weather
        .current_condition()
        .unwrap_or(WeatherCondition::Unknown);

    println!("{}", weather.city);
    println!("{:-<50}", "");
    if let Some(temperature) = weather.current_number("temperature_2m") {
        println!("Now: {temperature} °C, {}", condition.description());
    }
    for entry in &weather.hourly {
        println!(
            "  {}  {:>9}  {:>4}  {}",
            entry.time,
            entry
                .temperature
                .map_or_else(|| "n/a".to_string(), |t| format!("{t:.1} °C")),
            entry
                .precipitation_probability
                .map_or_else(|| "n/a".to_string(), |p| format!("{p}%")),
            entry.condition().map_or("n/a", WeatherCondition::description)
        );
    }
    println!();
    println!("Recorded for visitor {}", outcome.user_id);
}
