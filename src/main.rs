use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use what_day_is_it::{AppState, Settings, SystemTimezone, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let settings = Settings::from_env();
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    if let Some(dir) = &settings.asset_dir {
        info!("development mode, reading page template from {}", dir.display());
    }

    let server_zone = SystemTimezone.detect();
    match server_zone {
        Some(zone) => info!("dating pages in {} when the browser reports no zone", zone.name()),
        None => info!("dating pages in server local time when the browser reports no zone"),
    }

    let state = AppState::new(settings, server_zone)?;
    info!("subscriptions go to {}", state.client.endpoint());

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
