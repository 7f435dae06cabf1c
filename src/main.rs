use care_core::{CoreConfig, PatientService, Predictor, MODEL_VERSION};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the care services
///
/// Starts both REST servers concurrently:
/// - patient record API on port 3000 (configurable via CARE_REST_ADDR)
/// - premium prediction API on port 8000 (configurable via CARE_PREDICT_ADDR)
///
/// The premium model is loaded once before either server starts.
///
/// # Environment Variables
/// - `CARE_REST_ADDR`: patient API address (default: "0.0.0.0:3000")
/// - `CARE_PREDICT_ADDR`: prediction API address (default: "0.0.0.0:8000")
/// - `CARE_PATIENT_FILE`: JSON file holding every patient (default: "patients.json")
/// - `CARE_MODEL_PATH`: model artifact (default: "model/model.json")
///
/// # Returns
/// * `Ok(())` - If servers start and run successfully
/// * `Err(anyhow::Error)` - If configuration, model loading or a server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("care_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("care_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("CARE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let predict_addr =
        std::env::var("CARE_PREDICT_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());

    let cfg = CoreConfig::from_env_values(
        std::env::var("CARE_PATIENT_FILE").ok(),
        std::env::var("CARE_MODEL_PATH").ok(),
    )?;
    let predictor = Predictor::load(cfg.model_path(), MODEL_VERSION)?;

    tracing::info!("++ Starting patient REST on {}", rest_addr);
    tracing::info!("++ Starting prediction REST on {}", predict_addr);

    let patients_app = api_rest::patients::router(PatientService::from_config(&cfg));
    let predict_app = api_rest::predict::router(predictor);

    let patients_listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    let predict_listener = tokio::net::TcpListener::bind(&predict_addr).await?;

    let patients_server = tokio::spawn(async move { axum::serve(patients_listener, patients_app).await });
    let predict_server = tokio::spawn(async move { axum::serve(predict_listener, predict_app).await });

    // Run both
    let (patients_result, predict_result) = tokio::join!(patients_server, predict_server);
    patients_result??;
    predict_result??;

    Ok(())
}
