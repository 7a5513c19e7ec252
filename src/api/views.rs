//! Server-rendered HTML pages.
//!
//! Templates are embedded at compile time and registered once. Handlebars
//! HTML-escapes every `{{value}}`, so view models carry plain text.

use handlebars::{Handlebars, RenderError};
use serde::Serialize;

use crate::db::HistoryEntry;
use crate::models::weather::{DisplayWeather, WeatherCondition};

const TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("templates/layout.hbs")),
    ("search_form", include_str!("templates/search_form.hbs")),
    ("index", include_str!("templates/index.hbs")),
    ("weather", include_str!("templates/weather.hbs")),
    ("history", include_str!("templates/history.hbs")),
    ("error", include_str!("templates/error.hbs")),
];

const MISSING: &str = "n/a";

#[derive(Serialize)]
struct IndexView<'a> {
    title: &'a str,
    prefill: &'a str,
    last_city: Option<&'a str>,
}

#[derive(Serialize)]
struct Reading {
    label: &'static str,
    value: String,
}

#[derive(Serialize)]
struct HourRow<'a> {
    time: &'a str,
    temperature: String,
    precipitation: String,
    condition: &'static str,
}

#[derive(Serialize)]
struct WeatherView<'a> {
    title: String,
    prefill: &'a str,
    city: &'a str,
    condition: &'static str,
    readings: Vec<Reading>,
    hours: Vec<HourRow<'a>>,
}

#[derive(Serialize)]
struct HistoryView<'a> {
    title: &'a str,
    entries: &'a [HistoryEntry],
}

#[derive(Serialize)]
struct ErrorView<'a> {
    title: &'a str,
    message: &'a str,
}

fn or_missing<T>(value: Option<T>, render: impl FnOnce(T) -> String) -> String {
    value.map_or_else(|| MISSING.to_string(), render)
}

/// Page renderer shared by all handlers.
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> anyhow::Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);

        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, *source)
                .map_err(|e| anyhow::anyhow!("template '{name}' is invalid: {e}"))?;
        }

        Ok(Self { registry })
    }

    pub fn index_page(&self, last_city: Option<&str>) -> Result<String, RenderError> {
        self.registry.render(
            "index",
            &IndexView {
                title: "Weather forecast",
                prefill: last_city.unwrap_or_default(),
                last_city,
            },
        )
    }

    pub fn weather_page(&self, weather: &DisplayWeather) -> Result<String, RenderError> {
        let reading = |label, key, unit: &str| Reading {
            label,
            value: or_missing(weather.current_number(key), |v| format!("{v}{unit}")),
        };

        let view = WeatherView {
            title: format!("Weather in {}", weather.city),
            prefill: &weather.city,
            city: &weather.city,
            condition: weather
                .current_condition()
                .unwrap_or(WeatherCondition::Unknown)
                .description(),
            readings: vec![
                reading("Temperature", "temperature_2m", " °C"),
                reading("Feels like", "apparent_temperature", " °C"),
                reading("Humidity", "relative_humidity_2m", "%"),
                reading("Precipitation", "precipitation", " mm"),
                reading("Wind", "wind_speed_10m", " km/h"),
            ],
            hours: weather
                .hourly
                .iter()
                .map(|entry| HourRow {
                    time: &entry.time,
                    temperature: or_missing(entry.temperature, |t| format!("{t} °C")),
                    precipitation: or_missing(entry.precipitation_probability, |p| {
                        format!("{p}%")
                    }),
                    condition: entry.condition().map_or(MISSING, WeatherCondition::description),
                })
                .collect(),
        };

        self.registry.render("weather", &view)
    }

    pub fn history_page(&self, entries: &[HistoryEntry]) -> Result<String, RenderError> {
        self.registry.render(
            "history",
            &HistoryView {
                title: "Search history",
                entries,
            },
        )
    }

    pub fn error_page(&self, message: &str) -> Result<String, RenderError> {
        self.registry.render(
            "error",
            &ErrorView {
                title: "Error",
                message,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::weather::HourlyEntry;
    use serde_json::json;

    fn views() -> Views {
        Views::new().unwrap()
    }

    #[test]
    fn test_index_prefills_last_city() {
        let html = views().index_page(Some("Казань")).unwrap();
        assert!(html.contains(r#"value="Казань""#));
        assert!(html.contains("Last searched: Казань"));

        let html = views().index_page(None).unwrap();
        assert!(html.contains(r#"value="""#));
        assert!(!html.contains("Last searched"));
    }

    #[test]
    fn test_user_input_is_escaped() {
        let views = views();

        let html = views
            .index_page(Some(r#""><script>alert(1)</script>"#))
            .unwrap();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));

        let html = views.error_page("<b>bold</b>").unwrap();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn test_weather_page_lists_hours() {
        let weather = DisplayWeather {
            city: "Москва".to_string(),
            current: json!({ "temperature_2m": 20.5, "weather_code": 3 })
                .as_object()
                .cloned()
                .unwrap(),
            hourly: vec![
                HourlyEntry {
                    time: "2023-01-01T00:00".to_string(),
                    temperature: Some(19.8),
                    precipitation_probability: Some(10),
                    weather_code: Some(61),
                },
                HourlyEntry {
                    time: "2023-01-01T01:00".to_string(),
                    temperature: None,
                    precipitation_probability: None,
                    weather_code: None,
                },
            ],
        };

        let html = views().weather_page(&weather).unwrap();
        assert!(html.contains("<h1>Москва</h1>"));
        assert!(html.contains("<title>Weather in Москва</title>"));
        assert!(html.contains("20.5 °C"));
        assert!(html.contains("Cloudy"));
        assert!(html.contains(
            "<td>2023-01-01T00:00</td><td>19.8 °C</td><td>10%</td><td>Rain</td>"
        ));
        assert!(html.contains("<td>2023-01-01T01:00</td><td>n/a</td><td>n/a</td><td>n/a</td>"));
        assert!(html.contains("<dt>Wind</dt><dd>n/a</dd>"));
    }

    #[test]
    fn test_history_page() {
        let views = views();

        let html = views.history_page(&[]).unwrap();
        assert!(html.contains("No searches yet."));

        let html = views
            .history_page(&[HistoryEntry {
                city: "Казань".to_string(),
                time: "2024-05-01 10:00:00".to_string(),
            }])
            .unwrap();
        assert!(html.contains("<span class=\"city\">Казань</span>"));
        assert!(!html.contains("No searches yet."));
    }
}
