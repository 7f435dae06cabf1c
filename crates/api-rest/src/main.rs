//! Standalone patient REST API server binary.
//!
//! ## Purpose
//! Runs the patient record API on its own.
//!
//! ## Intended use
//! Useful for development when only the patient store is needed. The workspace's main
//! `care-run` binary runs the patient and prediction APIs concurrently.

use care_core::{CoreConfig, PatientService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the patient REST API server
///
/// # Environment Variables
/// - `CARE_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `CARE_PATIENT_FILE`: JSON file holding every patient (default: "patients.json")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
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

    let addr = std::env::var("CARE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::from_env_values(
        std::env::var("CARE_PATIENT_FILE").ok(),
        std::env::var("CARE_MODEL_PATH").ok(),
    )?;

    tracing::info!(
        "-- Starting patient REST API on {} (store: {})",
        addr,
        cfg.patient_file().display()
    );

    let app = api_rest::patients::router(PatientService::from_config(&cfg));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
