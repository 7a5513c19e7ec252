mod cities;
mod history;
mod lookup;
mod prune;
mod stats;

pub use cities::cmd_cities;
pub use history::cmd_history;
pub use lookup::cmd_lookup;
pub use prune::cmd_prune;
pub use stats::cmd_stats;
