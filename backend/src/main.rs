//! LMIS backend entry-point.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use std::net::IpAddr;
use std::path::PathBuf;

use actix_web::web;
use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultEnv;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use lmis_backend::inbound::http::health::HealthState;
use lmis_backend::settings::{ServerSettings, SettingsOverrides};
use server::{ServerConfig, build_http_state, create_server};

/// `lmis-backend` command arguments. Flags override the environment.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "lmis-backend",
    about = "Serve the LMIS learner and user REST API",
    version
)]
struct CliArgs {
    /// Listen address. Falls back to `LMIS_BIND_HOST`.
    #[arg(long, value_name = "addr")]
    host: Option<IpAddr>,
    /// Listen port. Falls back to `PORT`.
    #[arg(long, value_name = "port")]
    port: Option<u16>,
    /// Learner snapshot file. Falls back to `LMIS_LEARNERS_FILE`.
    #[arg(long = "learners-file", value_name = "path")]
    learners_file: Option<PathBuf>,
}

impl From<CliArgs> for SettingsOverrides {
    fn from(args: CliArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            learners_file: args.learners_file,
        }
    }
}

/// Install the global JSON subscriber.
fn init_tracing() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
        .map_err(|err| eyre!(err))
        .wrap_err("failed to install tracing subscriber")
}

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let args = CliArgs::parse();
    let settings = ServerSettings::from_env(&DefaultEnv::new())
        .and_then(|settings| settings.with_overrides(args.into()))
        .wrap_err("invalid server settings")?;

    let http_state = build_http_state(&settings).await;
    let health_state = web::Data::new(HealthState::new());
    let bind_addr = settings.bind_addr();
    let server = create_server(health_state, ServerConfig::new(bind_addr, http_state))
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;

    info!(%bind_addr, "server listening");
    server.await.wrap_err("server terminated with an error")
}
