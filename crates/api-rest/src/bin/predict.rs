//! Standalone premium prediction REST API server binary.
//!
//! ## Purpose
//! Loads the premium classifier once and serves predictions.
//!
//! ## Intended use
//! Useful for development when only the predictor is needed. The workspace's main
//! `care-run` binary runs the patient and prediction APIs concurrently.

use care_core::{CoreConfig, Predictor, MODEL_VERSION};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the prediction REST API server
///
/// # Environment Variables
/// - `CARE_PREDICT_ADDR`: Server address (default: "0.0.0.0:8000")
/// - `CARE_MODEL_PATH`: Model artifact (default: "model/model.json")
///
/// # Errors
/// Returns an error if the model cannot be loaded, the address cannot be bound, or the
/// HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("care_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("CARE_PREDICT_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());

    let cfg = CoreConfig::from_env_values(
        std::env::var("CARE_PATIENT_FILE").ok(),
        std::env::var("CARE_MODEL_PATH").ok(),
    )?;

    let predictor = Predictor::load(cfg.model_path(), MODEL_VERSION)?;

    tracing::info!("-- Starting prediction REST API on {}", addr);

    let app = api_rest::predict::router(predictor);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
