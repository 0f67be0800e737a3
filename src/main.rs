mod auth;
mod booking;
mod config;
mod error;
mod models;
mod routes;
mod slots;
mod store;

use axum::{extract::State, routing::get, Json, Router};
use clap::{Parser, Subcommand};
use config::Config;
use error::AppError;
use sqlx::PgPool;
use store::PgStore;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::models::user::UserRole;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub store: PgStore,
    pub config: Config,
}

#[derive(Parser)]
#[command(version, about = "Sports ground booking server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create an admin account, or promote an existing one and reset its password
    CreateAdmin {
        #[arg(long)]
        email: String,
    },
}

async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let row: (i32,) = sqlx::query_as("SELECT 1").fetch_one(&state.db).await?;
    Ok(Json(serde_json::json!({ "status": "ok", "db": row.0 == 1 })))
}

async fn create_admin(db: &PgPool, email: &str) -> Result<(), AppError> {
    let email = routes::auth::normalize_email(email)?;
    let password = rpassword::prompt_password("Password: ")
        .map_err(|e| AppError::Internal(format!("Failed to read password: {e}")))?;
    auth::password::validate_password(&password)?;
    let password_hash = auth::password::hash_password(&password)?;

    sqlx::query(
        "INSERT INTO users (email, password_hash, role)
         VALUES ($1, $2, $3)
         ON CONFLICT (email) DO UPDATE
         SET password_hash = EXCLUDED.password_hash, role = EXCLUDED.role, updated_at = now()",
    )
    .bind(&email)
    .bind(&password_hash)
    .bind(UserRole::Admin)
    .execute(db)
    .await?;

    tracing::info!(%email, "admin account ready");
    Ok(())
}

fn app(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/api/health", get(health))
        .merge(routes::api_router());

    if let Some(dir) = &state.config.static_dir {
        let index = format!("{dir}/index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env();

    let db = PgPool::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    sqlx::migrate!()
        .run(&db)
        .await
        .expect("failed to run migrations");

    if let Some(Command::CreateAdmin { email }) = cli.command {
        if let Err(e) = create_admin(&db, &email).await {
            tracing::error!("could not create admin: {e}");
            std::process::exit(1);
        }
        return;
    }

    let addr = config.bind_addr();
    let state = AppState {
        store: PgStore::new(db.clone()),
        db,
        config,
    };

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");
    tracing::info!("listening on {}", addr);
    axum::serve(listener, app(state))
        .await
        .expect("server error");
}
