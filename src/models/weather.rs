//! Typed shapes for the geocoding and forecast payloads, and the display view
//! built from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::limits::HOURLY_ENTRIES;

/// First match returned by the geocoder.
///
/// Only the coordinates are required; everything else the geocoder sends is
/// kept as-is in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Forecast response after validation.
///
/// `current` stays an untyped object because it is handed to the view unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub current: Map<String, Value>,
    pub hourly: HourlySeries,
}

/// Parallel arrays indexed by hour. Each array must be present, but the
/// provider sends `null` for hours it has no value for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub precipitation_probability: Vec<Option<i32>>,
    pub weather_code: Vec<Option<i32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyEntry {
    pub time: String,
    pub temperature: Option<f64>,
    pub precipitation_probability: Option<i32>,
    pub weather_code: Option<i32>,
}

impl HourlyEntry {
    #[must_use]
    pub fn condition(&self) -> Option<WeatherCondition> {
        self.weather_code.map(WeatherCondition::from_wmo_code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayWeather {
    pub city: String,
    pub current: Map<String, Value>,
    pub hourly: Vec<HourlyEntry>,
}

impl DisplayWeather {
    #[must_use]
    pub fn current_number(&self, key: &str) -> Option<f64> {
        self.current.get(key).and_then(Value::as_f64)
    }

    #[must_use]
    pub fn current_condition(&self) -> Option<WeatherCondition> {
        self.current
            .get("weather_code")
            .and_then(Value::as_i64)
            .and_then(|code| i32::try_from(code).ok())
            .map(WeatherCondition::from_wmo_code)
    }
}

/// Reshapes a forecast for display.
///
/// Hourly entries are zipped positionally and truncated to the first
/// [`HOURLY_ENTRIES`] hours or the shortest array, whichever is smaller.
#[must_use]
pub fn format_weather_data(payload: &ForecastPayload, city: &str) -> DisplayWeather {
    let series = &payload.hourly;

    let hourly = series
        .time
        .iter()
        .zip(&series.temperature_2m)
        .zip(&series.precipitation_probability)
        .zip(&series.weather_code)
        .take(HOURLY_ENTRIES)
        .map(
            |(((time, temperature), precipitation_probability), weather_code)| HourlyEntry {
                time: time.clone(),
                temperature: *temperature,
                precipitation_probability: *precipitation_probability,
                weather_code: *weather_code,
            },
        )
        .collect();

    DisplayWeather {
        city: city.to_string(),
        current: payload.current.clone(),
        hourly,
    }
}

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    HeavyRain,
    Snow,
    Sleet,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// See: <https://open-meteo.com/en/docs#weathervariables>
    #[must_use]
    pub const fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=2 => Self::PartlyCloudy,
            3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            56 | 57 | 66 | 67 => Self::Sleet,
            61 | 63 | 80 => Self::Rain,
            65 | 81 | 82 => Self::HeavyRain,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::HeavyRain => "Heavy rain",
            Self::Snow => "Snow",
            Self::Sleet => "Sleet",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(hours: usize) -> ForecastPayload {
        ForecastPayload {
            current: json!({ "temperature_2m": 20.5, "weather_code": 0 })
                .as_object()
                .cloned()
                .unwrap(),
            hourly: HourlySeries {
                time: (0..hours).map(|h| format!("2023-01-01T{h:02}:00")).collect(),
                temperature_2m: (0..hours).map(|h| Some(h as f64 / 2.0)).collect(),
                precipitation_probability: (0..hours).map(|h| Some(h as i32)).collect(),
                weather_code: (0..hours).map(|h| Some((h % 4) as i32)).collect(),
            },
        }
    }

    #[test]
    fn test_format_two_hours() {
        let payload: ForecastPayload = serde_json::from_value(json!({
            "current": { "temperature_2m": 20.5, "weather_code": 0 },
            "hourly": {
                "time": ["2023-01-01T00:00", "2023-01-01T01:00"],
                "temperature_2m": [19.8, 19.2],
                "precipitation_probability": [0, 10],
                "weather_code": [0, 1]
            }
        }))
        .unwrap();

        let result = format_weather_data(&payload, "Москва");

        assert_eq!(result.city, "Москва");
        assert_eq!(result.current, payload.current);
        assert_eq!(
            result.hourly,
            vec![
                HourlyEntry {
                    time: "2023-01-01T00:00".to_string(),
                    temperature: Some(19.8),
                    precipitation_probability: Some(0),
                    weather_code: Some(0),
                },
                HourlyEntry {
                    time: "2023-01-01T01:00".to_string(),
                    temperature: Some(19.2),
                    precipitation_probability: Some(10),
                    weather_code: Some(1),
                },
            ]
        );
    }

    #[test]
    fn test_format_truncates_to_a_day() {
        let payload = payload(48);
        let result = format_weather_data(&payload, "Казань");

        assert_eq!(result.hourly.len(), HOURLY_ENTRIES);
        for (i, entry) in result.hourly.iter().enumerate() {
            assert_eq!(entry.time, payload.hourly.time[i]);
            assert_eq!(entry.temperature, payload.hourly.temperature_2m[i]);
            assert_eq!(
                entry.precipitation_probability,
                payload.hourly.precipitation_probability[i]
            );
            assert_eq!(entry.weather_code, payload.hourly.weather_code[i]);
        }
    }

    #[test]
    fn test_format_uses_shortest_series() {
        let mut payload = payload(24);
        payload.hourly.weather_code.truncate(5);

        let result = format_weather_data(&payload, "Казань");
        assert_eq!(result.hourly.len(), 5);
    }

    #[test]
    fn test_missing_hourly_array_fails_to_parse() {
        let parsed = serde_json::from_value::<ForecastPayload>(json!({
            "current": {},
            "hourly": { "time": [], "temperature_2m": [], "weather_code": [] }
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_null_hours_pass_through() {
        let payload: ForecastPayload = serde_json::from_value(json!({
            "current": { "temperature_2m": 20.5 },
            "hourly": {
                "time": ["2023-01-01T00:00", "2023-01-01T01:00"],
                "temperature_2m": [19.8, null],
                "precipitation_probability": [null, 10],
                "weather_code": [0, null]
            }
        }))
        .unwrap();

        let result = format_weather_data(&payload, "Москва");

        assert_eq!(result.hourly.len(), 2);
        assert_eq!(result.hourly[0].precipitation_probability, None);
        assert_eq!(result.hourly[0].condition(), Some(WeatherCondition::Clear));
        assert_eq!(result.hourly[1].temperature, None);
        assert_eq!(result.hourly[1].condition(), None);
    }

    #[test]
    fn test_location_keeps_unknown_fields() {
        let location: Location = serde_json::from_value(json!({
            "id": 524901,
            "name": "Москва",
            "latitude": 55.75222,
            "longitude": 37.61556,
            "country": "Россия",
            "admin1": "Москва"
        }))
        .unwrap();

        assert_eq!(location.name.as_deref(), Some("Москва"));
        assert_eq!(location.extra.get("id"), Some(&json!(524901)));
        assert!(location.timezone.is_none());
    }

    #[test]
    fn test_current_condition() {
        let weather = format_weather_data(&payload(1), "Москва");
        assert_eq!(weather.current_condition(), Some(WeatherCondition::Clear));
        assert_eq!(weather.current_number("temperature_2m"), Some(20.5));
    }

    #[test]
    fn test_wmo_codes() {
        assert_eq!(WeatherCondition::from_wmo_code(0), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_wmo_code(2), WeatherCondition::PartlyCloudy);
        assert_eq!(WeatherCondition::from_wmo_code(48), WeatherCondition::Fog);
        assert_eq!(WeatherCondition::from_wmo_code(66), WeatherCondition::Sleet);
        assert_eq!(WeatherCondition::from_wmo_code(82), WeatherCondition::HeavyRain);
        assert_eq!(WeatherCondition::from_wmo_code(99), WeatherCondition::Thunderstorm);
        assert_eq!(WeatherCondition::from_wmo_code(-1), WeatherCondition::Unknown);
        assert_eq!(WeatherCondition::Snow.description(), "Snow");
    }
}
