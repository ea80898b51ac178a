mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes::AppStateInner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halaqa=debug,halaqa_db=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path = std::env::var("HALAQA_DB_PATH").unwrap_or_else(|_| "halaqa.db".into());
    let host = std::env::var("HALAQA_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("HALAQA_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    let db = halaqa_db::Database::open(&PathBuf::from(&db_path))?;
    let state = Arc::new(AppStateInner { db });

    let app = Router::new()
        .route("/schema/tables/{table}", get(routes::table_contract))
        .route("/schema/enums/{name}", get(routes::enum_values))
        .route(
            "/tables/{table}/rows",
            get(routes::list_rows).post(routes::insert_row),
        )
        .route("/tables/{table}/rows/{id}", patch(routes::update_row))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Halaqa server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
