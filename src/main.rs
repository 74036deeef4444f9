use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};

use todo_api::{api, config, db, metrics};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("todo_api=info".parse()?)
        )
        .init();

    info!("Starting todo-api v{}", env!("CARGO_PKG_VERSION"));

    let cfg = config::load()?;
    info!("Configuration loaded");

    let pool = db::init(&cfg.database).await?;
    info!("Database initialized");

    let store = db::TodoStore::new(pool.clone());
    let metrics = Arc::new(metrics::TodoMetrics::default());

    if let Err(e) = api::serve(cfg, store, metrics).await {
        error!("Todo API terminated: {:#}", e);
        pool.close().await;
        return Err(e);
    }

    pool.close().await;
    info!("bye!");
    Ok(())
}
