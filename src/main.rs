// main.rs
use std::sync::Arc;

use page_admin::{api, config::Config, state::AppState};
use poem::listener::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let address = config.server_address();
    let state = Arc::new(AppState::connect(config).await?);

    info!(%address, "page admin listening");
    poem::Server::new(TcpListener::bind(address))
        .run(api::routes(state))
        .await?;
    Ok(())
}
