use crate::config::Config;
use crate::db::Store;

pub async fn cmd_cities(config: &Config, query: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let cities = store.autocomplete_cities(query).await;

    if cities.is_empty() {
        println!("No cities match '{query}'.");
    } else {
        for city in cities {
            println!("{city}");
        }
    }

    store.close().await
}
