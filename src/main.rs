use tokio::net::TcpListener;
use tracing::info;
use weave::{app, config::Config, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    telemetry::init_subscriber(&config)?;

    let app = app(&config);
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Server starting at http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
