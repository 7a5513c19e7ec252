/// Reference cities seeded on every start: (name, latitude, longitude).
pub const SEED_CITIES: &[(&str, f64, f64)] = &[
    ("Москва", 55.7558, 37.6173),
    ("Санкт-Петербург", 59.9343, 30.3351),
    ("Новосибирск", 55.0084, 82.9357),
    ("Екатеринбург", 56.8389, 60.6057),
    ("Казань", 55.7887, 49.1221),
];

/// `searches.timestamp` layout. Sorts lexicographically and shares its prefix
/// with SQLite's `CURRENT_TIMESTAMP`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

pub mod limits {

    pub const HISTORY_LIMIT: u64 = 20;

    pub const AUTOCOMPLETE_LIMIT: u64 = 10;

    pub const STATS_LIMIT: u64 = 20;

    pub const HOURLY_ENTRIES: usize = 24;
}

pub mod cookies {

    pub const LAST_CITY: &str = "last_city";

    pub const USER_ID: &str = "user_id";

    pub const LAST_CITY_MAX_AGE_DAYS: i64 = 30;

    pub const USER_ID_MAX_AGE_DAYS: i64 = 365;
}

pub mod messages {

    pub const DEFAULT_ERROR: &str = "An error occurred";

    pub const WEATHER_UNAVAILABLE: &str = "Could not retrieve weather data";

    pub const INTERNAL_ERROR: &str = "An internal error occurred";
}

pub mod open_meteo {

    pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

    pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

    pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,precipitation,wind_speed_10m,weather_code";

    pub const HOURLY_FIELDS: &str = "temperature_2m,precipitation_probability,weather_code";

    pub const FORECAST_DAYS: u8 = 1;
}
