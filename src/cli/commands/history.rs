use crate::config::Config;
use crate::db::Store;

pub async fn cmd_history(config: &Config, user_id: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let entries = store.get_user_history(user_id).await;

    if entries.is_empty() {
        println!("No search history for {user_id}.");
    } else {
        println!("Recent searches (last {}):", entries.len());
        println!("{:-<50}", "");
        for entry in entries {
            println!("{:<30} {}", entry.city, entry.time);
        }
    }

    store.close().await
}
