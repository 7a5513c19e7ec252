use crate::config::Config;
use crate::db::Store;

pub async fn cmd_prune(config: &Config, days: Option<u32>) -> anyhow::Result<()> {
    let Some(days) = days.or(config.history.retention_days) else {
        anyhow::bail!("No retention period: pass --days or set history.retention_days");
    };
    if days == 0 {
        anyhow::bail!("--days must be > 0");
    }

    let store = Store::new(&config.general.database_path).await?;
    let removed = store.prune_searches(days).await?;
    println!("✓ Removed {removed} search records older than {days} days");

    store.close().await
}
