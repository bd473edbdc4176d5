use tubely_api::{setup, telemetry};
use tubely_core::Config;

// mimalloc keeps fragmentation low on musl-based container images.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    telemetry::init_tracing(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    let (_state, router) = setup::initialize_app(config.clone()).await?;

    setup::server::start_server(&config, router).await?;

    Ok(())
}
