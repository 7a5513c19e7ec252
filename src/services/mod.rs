pub mod forecast;
pub use forecast::ForecastSource;

pub mod identity;
pub use identity::mint_user_id;

pub mod lookup;
pub use lookup::{LookupError, LookupOutcome, WeatherLookupService};
