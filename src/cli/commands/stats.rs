use crate::config::Config;
use crate::db::Store;

pub async fn cmd_stats(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let stats = store.get_city_stats().await;

    if stats.is_empty() {
        println!("No searches recorded yet.");
    } else {
        println!("{:<30} {:>8}", "City", "Searches");
        println!("{:-<39}", "");
        for stat in stats {
            println!("{:<30} {:>8}", stat.city, stat.count);
        }
    }

    store.close().await
}
