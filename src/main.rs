use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use calorie_tracker::config::AppConfig;
use calorie_tracker::db::Database;
use calorie_tracker::gateway::{self, state::AppState};
use calorie_tracker::logging;
use calorie_tracker::user_auth::TokenService;

#[derive(Parser, Debug)]
#[command(name = "calorie_tracker")]
#[command(about = "Calorie Tracker REST API server")]
#[command(version)]
struct Cli {
    /// Config environment: loads config/<env>.yaml
    #[arg(short, long, env = "APP_ENV", default_value = "dev")]
    env: String,

    /// Override gateway.port from the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Apply database migrations before serving
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = AppConfig::load(&cli.env)?;
    let _log_guard = logging::init_logging(&app_config);
    app_config.validate()?;

    tracing::info!(env = %cli.env, version = gateway::handlers::health::VERSION, "Starting calorie tracker");

    let secret = app_config.auth.jwt_secret.as_deref().unwrap_or_default();
    let tokens = TokenService::new(secret, app_config.session_ttl())
        .context("invalid auth configuration")?;

    let postgres_url = app_config.postgres_url.as_deref().unwrap_or_default();
    let db = Database::connect(postgres_url)
        .await
        .context("failed to connect to PostgreSQL")?;
    if cli.migrate {
        db.migrate().await.context("failed to apply migrations")?;
    }

    let state = AppState::with_database(Arc::new(db), Arc::new(tokens));
    let port = cli.port.unwrap_or(app_config.gateway.port);

    gateway::run_server(&app_config.gateway.host, port, state).await
}
