//! Backend entry-point: loads settings, opens the pool, and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use blog_backend::config::AppSettings;
use blog_backend::inbound::http::health::HealthState;
use blog_backend::outbound::persistence::DbPool;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load configuration")?;
    let bind_addr = settings.bind_addr()?;
    let pool = DbPool::new(settings.pool_config()?)
        .await
        .wrap_err("failed to open the database pool")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        &ServerConfig::new(bind_addr, pool.clone()),
    )
    .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    pool.close();
    outcome.wrap_err("server terminated abnormally")
}
