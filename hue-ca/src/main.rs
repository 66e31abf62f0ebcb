//! hue-ca (Color Analysis) - seasonal color-type service
//!
//! Classifies questionnaires into one of four seasons and keeps each
//! owner's color profile in the local database.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

use hue_ca::auth::HeaderAuthProvider;
use hue_ca::vision::HttpVisionClient;
use hue_ca::{build_router, AppState};
use hue_common::config::{database_path, resolve_root_folder, ServiceSettings, ROOT_FOLDER_ENV};
use hue_common::db::init_database;
use hue_common::store::{FsImageStore, SqliteAnalysisStore};
use hue_common::{ColorAnalyzer, ProfileRepository};

#[derive(Parser, Debug)]
#[command(name = "hue-ca")]
#[command(about = "Seasonal color analysis service")]
#[command(version)]
struct Args {
    /// Root folder holding hue.db and stored images
    #[arg(long)]
    root_folder: Option<String>,

    /// Port to listen on (overrides the http_port setting)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting HUE Color Analysis (hue-ca) v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), ROOT_FOLDER_ENV);
    std::fs::create_dir_all(&root_folder)
        .with_context(|| format!("Creating root folder {}", root_folder.display()))?;
    info!("Root folder: {}", root_folder.display());

    let db_path = database_path(&root_folder);
    let pool = match init_database(&db_path).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database {}: {}", db_path.display(), e);
            return Err(e.into());
        }
    };

    let settings = ServiceSettings::load(&pool).await?;

    let analyzer = match settings.vision_endpoint.as_deref() {
        Some(endpoint) => match HttpVisionClient::new(endpoint, settings.vision_timeout) {
            Ok(client) => {
                info!("Vision analysis enabled: {}", endpoint);
                ColorAnalyzer::with_vision(Arc::new(client), settings.vision_timeout)
            }
            Err(e) => {
                warn!("Vision client unavailable, questionnaire only: {}", e);
                ColorAnalyzer::questionnaire_only()
            }
        },
        None => {
            info!("No vision endpoint configured, questionnaire only");
            ColorAnalyzer::questionnaire_only()
        }
    };

    let repository = Arc::new(ProfileRepository::new(Arc::new(SqliteAnalysisStore::new(pool))));
    let images = Arc::new(FsImageStore::new(root_folder.join("images")));

    let state = AppState::new(
        repository,
        analyzer,
        Arc::new(HeaderAuthProvider),
        images,
        settings.max_image_bytes,
    );
    let app = build_router(state);

    let port = args.port.unwrap_or(settings.http_port);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Binding {}", addr))?;
    info!("hue-ca listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
