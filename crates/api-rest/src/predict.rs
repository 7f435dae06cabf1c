//! Insurance premium prediction endpoints.
//!
//! The predictor is loaded once at startup and shared read-only by every
//! request.

use api_shared::{
    ApiError, ErrorRes, HealthRes, HealthService, MessageRes, PredictReq, PredictRes,
    PredictionRes,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::{get, post},
    Router,
};
use care_core::{Applicant, Predictor};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct PredictState {
    predictor: Predictor,
    health: HealthService,
}

#[derive(OpenApi)]
#[openapi(
    paths(home, health, predict),
    components(schemas(MessageRes, HealthRes, ErrorRes, PredictReq, PredictRes, PredictionRes))
)]
pub struct PredictApiDoc;

/// Build the prediction API router, including Swagger UI.
pub fn router(predictor: Predictor) -> Router {
    let health_service = HealthService::new(predictor.version());

    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", PredictApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(PredictState {
            predictor,
            health: health_service,
        })
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome message", body = MessageRes))
)]
#[axum::debug_handler]
async fn home() -> Json<MessageRes> {
    Json(MessageRes::new(
        "Welcome to Insurance Premium Prediction API. Use the /predict endpoint to get predictions.",
    ))
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Health check response", body = HealthRes))
)]
/// Health check endpoint, reporting the loaded model version.
#[axum::debug_handler]
async fn health(State(state): State<PredictState>) -> Json<HealthRes> {
    Json(state.health.check_health())
}

#[utoipa::path(
    post,
    path = "/predict",
    request_body = PredictReq,
    responses(
        (status = 200, description = "Predicted premium category", body = PredictRes),
        (status = 422, description = "Invalid applicant fields", body = ErrorRes),
        (status = 500, description = "Prediction failed", body = ErrorRes)
    )
)]
/// Predict the insurance premium category for one applicant.
///
/// The applicant is validated and its derived attributes (BMI, age group,
/// lifestyle risk, city tier) are computed before the classifier runs. Any
/// classifier failure is reported as 500.
#[axum::debug_handler]
async fn predict(
    State(state): State<PredictState>,
    payload: Result<Json<PredictReq>, JsonRejection>,
) -> Result<Json<PredictRes>, ApiError> {
    let Json(req) = payload?;

    let applicant = Applicant::new(req.into()).map_err(|e| {
        tracing::warn!("predict rejected: {}", e);
        ApiError::from(e)
    })?;

    let prediction = state
        .predictor
        .predict(&applicant.features())
        .map_err(|e| ApiError::Internal(format!("An error occurred during prediction: {e}")))?;

    tracing::info!(
        "predicted {} ({:.3}) for tier {} applicant",
        prediction.predicted_class,
        prediction.confidence_score,
        applicant.city_tier().number()
    );

    Ok(Json(PredictRes {
        response: prediction.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use care_core::model::{CategoricalColumn, LogisticClassifier, ModelArtifact, NumericColumn};
    use care_core::{Classifier, CoreError, CoreResult, FeatureRecord};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn artifact() -> ModelArtifact {
        ModelArtifact {
            version: "1.0.0".into(),
            classes: vec!["High".into(), "Low".into(), "Medium".into()],
            numeric: vec![NumericColumn {
                feature: "income_lpa".into(),
                mean: 10.0,
                scale: 10.0,
            }],
            categorical: vec![CategoricalColumn {
                feature: "age_group".into(),
                categories: vec![
                    "young".into(),
                    "adult".into(),
                    "middle_aged".into(),
                    "senior".into(),
                ],
            }],
            coefficients: vec![
                vec![1.0, -1.0, 0.0, 0.5, 1.0],
                vec![-1.0, 1.0, 0.5, 0.0, -1.0],
                vec![0.0, 0.0, 0.0, 0.0, 0.0],
            ],
            intercepts: vec![0.0, 0.0, 0.2],
        }
    }

    fn app() -> Router {
        let classifier = LogisticClassifier::from_artifact(artifact()).unwrap();
        router(Predictor::new(Arc::new(classifier), "1.0.0"))
    }

    struct Broken;

    impl Classifier for Broken {
        fn classes(&self) -> &[String] {
            &[]
        }

        fn predict_proba(&self, _features: &FeatureRecord) -> CoreResult<Vec<f64>> {
            Err(CoreError::Prediction("feature names mismatch".into()))
        }
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = body.map_or_else(Body::empty, |v| Body::from(v.to_string()));
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn applicant() -> Value {
        json!({
            "age": 67,
            "height": 1.62,
            "weight": 81.0,
            "city": "  jaipur",
            "income_lpa": 35,
            "smoker": true,
            "occupation": "retired"
        })
    }

    #[tokio::test]
    async fn home_and_health() {
        let (status, body) = send(app(), "GET", "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().contains("/predict"));

        let (status, body) = send(app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy", "model_version": "1.0.0"}));
    }

    #[tokio::test]
    async fn predict_returns_distribution() {
        let (status, body) = send(app(), "POST", "/predict", Some(applicant())).await;
        assert_eq!(status, StatusCode::OK);

        let res = &body["Response"];
        assert_eq!(res["predicted_class"], "High");
        let probs = res["class_probabilities"].as_object().unwrap();
        assert_eq!(probs.len(), 3);
        let total: f64 = probs.values().map(|v| v.as_f64().unwrap()).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert_eq!(res["confidence_score"], probs["High"]);
    }

    #[tokio::test]
    async fn invalid_occupation_is_422() {
        let mut body = applicant();
        body["occupation"] = json!("pirate");
        let (status, body) = send(app(), "POST", "/predict", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "occupation");
    }

    #[tokio::test]
    async fn non_positive_height_is_422() {
        let mut body = applicant();
        body["height"] = json!(0);
        let (status, body) = send(app(), "POST", "/predict", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "height");
    }

    #[tokio::test]
    async fn classifier_failure_is_500() {
        let app = router(Predictor::new(Arc::new(Broken), "1.0.0"));
        let (status, body) = send(app, "POST", "/predict", Some(applicant())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["detail"],
            "An error occurred during prediction: feature names mismatch"
        );
    }
}
