use std::io;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trend_hive::{Inputs, Queen, launch};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout is reserved for the warning and the result
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trend_hive=info")))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    let inputs = Inputs::new();
    launch(|key| std::env::var(key).ok(), Queen::new, &inputs, &mut io::stdout()).await?;

    Ok(())
}
