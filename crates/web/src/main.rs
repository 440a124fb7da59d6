use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use storage::Database;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use voting::VotingEngine;
use voting::memory::{MemoryStore, Seed};
use voting::notifier::BroadcastNotifier;
use voting::postgres::PgStore;
use voting::store::Stores;

mod app;
mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::{Config, StorageBackend};
use features::{ballots, contests, notifications, results, scores};
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        contests::handlers::get_contest_state,
        contests::handlers::set_contest_state,
        scores::handlers::get_scores,
        scores::handlers::submit_scores,
        scores::handlers::get_judge_progress,
        ballots::handlers::list_specialty_contests,
        ballots::handlers::cast_ballot,
        ballots::handlers::list_ballots,
        ballots::handlers::get_user_ballot,
        ballots::handlers::delete_ballot,
        results::handlers::get_aggregated_results,
        results::handlers::get_published_results,
        notifications::handlers::subscribe,
    ),
    components(
        schemas(
            storage::dto::voting::SetStateRequest,
            storage::dto::voting::ContestStateResponse,
            storage::dto::voting::StateTransitionResponse,
            storage::dto::voting::ScoreEntry,
            storage::dto::voting::SubmitScoresRequest,
            storage::dto::voting::CastBallotRequest,
            storage::dto::voting::JudgeProgressResponse,
            storage::dto::results::RankedEntry,
            storage::dto::results::AggregatedResults,
            storage::dto::results::PublishSummary,
            storage::dto::results::PublishedResultsResponse,
            storage::models::ContestType,
            storage::models::VoteState,
            storage::models::UserRole,
            storage::models::ScoreWithJudge,
            storage::models::SpecialtyContest,
            storage::models::Ballot,
            storage::models::SnapshotEntry,
        )
    ),
    tags(
        (name = "contests", description = "Contest voting state"),
        (name = "scores", description = "Judge score ledger"),
        (name = "ballots", description = "Specialty contests and ballots"),
        (name = "results", description = "Live and published results"),
        (name = "notifications", description = "Real-time notifications over WebSocket"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting car show voting API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let stores = match config.storage_backend {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;
            Stores::shared(Arc::new(connect_postgres(database_url).await?))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, all votes are lost on shutdown");
            let store = match &config.seed_file {
                Some(path) => MemoryStore::from_seed(load_seed(path)?),
                None => MemoryStore::new(),
            };
            Stores::shared(Arc::new(store))
        }
    };

    let notifier = BroadcastNotifier::new(config.notify_channel_capacity);
    let engine = VotingEngine::new(stores, Arc::new(notifier.clone()));

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty, every protected endpoint will reject requests");
    } else {
        tracing::info!("Loaded {} API key(s)", api_keys.len());
    }

    let app = app::router(AppState { engine, notifier }, api_keys)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive());

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn connect_postgres(database_url: &str) -> anyhow::Result<PgStore> {
    tracing::info!(
        "Connecting to database at: {}",
        database_url.split('@').next_back().unwrap_or("unknown")
    );
    let db = Database::new(database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    Ok(PgStore::new(db))
}

fn load_seed(path: &Path) -> anyhow::Result<Seed> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let seed: Seed = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;

    tracing::info!(
        users = seed.users.len(),
        cars = seed.cars.len(),
        specialty_contests = seed.specialty_contests.len(),
        "Loaded seed file"
    );
    Ok(seed)
}
