use photodrop_api::setup;
use photodrop_api::state::AppState;
use photodrop_core::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let state = AppState::from_config(config.clone());
    let router = setup::setup_routes(state)?;

    setup::start_server(&config, router).await?;

    Ok(())
}
