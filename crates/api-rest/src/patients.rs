//! Patient record endpoints.
//!
//! Each handler performs one full read-modify-write of the patient store via
//! [`PatientService`]. Missing patients are reported as 404 on lookup and as
//! 400 on edit and delete.

use api_shared::{
    ApiError, EditQuery, ErrorRes, MessageRes, PatientMapRes, PatientReq, PatientRes,
    PatientUpdateReq, SortQuery,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use care_core::{CoreError, PatientService};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state for the patient API
///
/// Holds the patient service, which owns the store collaborator. Tests swap the
/// file-backed store for an in-memory one.
#[derive(Clone)]
pub struct PatientState {
    patients: PatientService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        home,
        about,
        view,
        view_patient,
        sort_patients,
        create_patient,
        update_patient,
        delete_patient,
    ),
    components(schemas(
        MessageRes,
        ErrorRes,
        PatientReq,
        PatientRes,
        PatientMapRes,
        PatientUpdateReq,
    ))
)]
pub struct PatientApiDoc;

/// Build the patient API router, including Swagger UI.
pub fn router(patients: PatientService) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/view", get(view))
        .route("/patient/:patient_id", get(view_patient))
        .route("/sort", get(sort_patients))
        .route("/create", post(create_patient))
        .route("/edit", put(update_patient))
        .route("/delete/:patient_id", delete(delete_patient))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", PatientApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(PatientState { patients })
}

fn log_rejection(action: &str, err: CoreError) -> ApiError {
    match &err {
        CoreError::Validation { .. } | CoreError::Conflict(_) | CoreError::NotFound(_) => {
            tracing::warn!("{} rejected: {}", action, err)
        }
        _ => tracing::error!("{} failed: {:?}", action, err),
    }
    ApiError::from(err)
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome message", body = MessageRes))
)]
#[axum::debug_handler]
async fn home() -> Json<MessageRes> {
    Json(MessageRes::new("Patient Management System API"))
}

#[utoipa::path(
    get,
    path = "/about",
    responses((status = 200, description = "About message", body = MessageRes))
)]
#[axum::debug_handler]
async fn about() -> Json<MessageRes> {
    Json(MessageRes::new(
        "A fully functional API to manage your patient records",
    ))
}

#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "All patients keyed by id", body = PatientMapRes),
        (status = 500, description = "Patient file could not be read", body = ErrorRes)
    )
)]
/// List every patient in the store, keyed by id.
#[axum::debug_handler]
async fn view(State(state): State<PatientState>) -> Result<Json<PatientMapRes>, ApiError> {
    let records = state
        .patients
        .get_all()
        .map_err(|e| log_rejection("view", e))?;
    Ok(Json(records.into()))
}

#[utoipa::path(
    get,
    path = "/patient/{patient_id}",
    params(("patient_id" = String, Path, description = "ID of the patient in the DB")),
    responses(
        (status = 200, description = "Patient record", body = PatientRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Patient file could not be read", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn view_patient(
    State(state): State<PatientState>,
    Path(patient_id): Path<String>,
) -> Result<Json<PatientRes>, ApiError> {
    let patient = state
        .patients
        .get(&patient_id)
        .map_err(|e| log_rejection("view patient", e))?;
    Ok(Json(patient.into()))
}

#[utoipa::path(
    get,
    path = "/sort",
    params(SortQuery),
    responses(
        (status = 200, description = "Patients ordered by the chosen field", body = [PatientRes]),
        (status = 400, description = "Invalid sort field or order", body = ErrorRes),
        (status = 500, description = "Patient file could not be read", body = ErrorRes)
    )
)]
/// List patients sorted by height, weight or BMI.
///
/// Invalid `sort_by` or `order_by` values are rejected with 400 before the
/// store is read.
#[axum::debug_handler]
async fn sort_patients(
    State(state): State<PatientState>,
    query: Result<Query<SortQuery>, QueryRejection>,
) -> Result<Json<Vec<PatientRes>>, ApiError> {
    let Query(query) = query?;

    let patients = state
        .patients
        .list_sorted(&query.sort_by, &query.order_by)
        .map_err(|e| match e {
            CoreError::Validation { field, message } => {
                tracing::warn!("sort rejected: invalid {}", field);
                ApiError::BadRequest {
                    detail: format!("invalid {field}: {message}"),
                    field: Some(field),
                }
            }
            other => log_rejection("sort", other),
        })?;

    Ok(Json(patients.into_iter().map(PatientRes::from).collect()))
}

#[utoipa::path(
    post,
    path = "/create",
    request_body = PatientReq,
    responses(
        (status = 201, description = "Patient created", body = MessageRes),
        (status = 400, description = "Patient already exists", body = ErrorRes),
        (status = 422, description = "Invalid patient fields", body = ErrorRes),
        (status = 500, description = "Patient file could not be written", body = ErrorRes)
    )
)]
/// Create a new patient record.
///
/// BMI and verdict are computed from height and weight; the id must not
/// already exist.
#[axum::debug_handler]
async fn create_patient(
    State(state): State<PatientState>,
    payload: Result<Json<PatientReq>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageRes>), ApiError> {
    let Json(req) = payload?;

    state
        .patients
        .create(req.into())
        .map_err(|e| log_rejection("create", e))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageRes::new("patient created successfully")),
    ))
}

#[utoipa::path(
    put,
    path = "/edit",
    params(EditQuery),
    request_body = PatientUpdateReq,
    responses(
        (status = 201, description = "Patient updated", body = MessageRes),
        (status = 400, description = "Patient not found", body = ErrorRes),
        (status = 422, description = "Invalid patient fields", body = ErrorRes),
        (status = 500, description = "Patient file could not be written", body = ErrorRes)
    )
)]
/// Update some fields of an existing patient.
///
/// Omitted fields keep their stored values. The merged record is validated
/// again and BMI and verdict are recomputed.
#[axum::debug_handler]
async fn update_patient(
    State(state): State<PatientState>,
    query: Result<Query<EditQuery>, QueryRejection>,
    payload: Result<Json<PatientUpdateReq>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageRes>), ApiError> {
    let Query(query) = query?;
    let Json(req) = payload?;

    state
        .patients
        .update(&query.patient_id, req.into())
        .map_err(|e| log_rejection("update", e).not_found_as_bad_request())?;

    Ok((StatusCode::CREATED, Json(MessageRes::new("patient updated"))))
}

#[utoipa::path(
    delete,
    path = "/delete/{patient_id}",
    params(("patient_id" = String, Path, description = "ID of the patient to delete")),
    responses(
        (status = 200, description = "Patient deleted", body = MessageRes),
        (status = 400, description = "Patient not found", body = ErrorRes),
        (status = 500, description = "Patient file could not be written", body = ErrorRes)
    )
)]
#[axum::debug_handler]
async fn delete_patient(
    State(state): State<PatientState>,
    Path(patient_id): Path<String>,
) -> Result<Json<MessageRes>, ApiError> {
    state
        .patients
        .delete(&patient_id)
        .map_err(|e| log_rejection("delete", e).not_found_as_bad_request())?;

    Ok(Json(MessageRes::new("patient deleted")))
}
