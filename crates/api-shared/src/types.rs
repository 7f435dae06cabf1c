//! Request and response bodies shared by the REST handlers.
//!
//! These mirror the wire format exactly; conversion into validated core types
//! happens in the handlers via the `From` impls below.

use care_core::{ApplicantInput, PatientInput, PatientUpdate, Prediction, StoredPatient, Verdict};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

impl MessageRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub model_version: String,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictReq {
    /// Age of the applicant in years
    pub age: i64,
    /// Height in metres
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    pub city: String,
    /// Yearly income after tax, in lakh per annum
    pub income_lpa: i64,
    pub smoker: bool,
    /// One of retired, freelancer, student, government_job, business_owner, unemployed, private_job
    pub occupation: String,
}

impl From<PredictReq> for ApplicantInput {
    fn from(req: PredictReq) -> Self {
        ApplicantInput {
            age: req.age,
            height: req.height,
            weight: req.weight,
            city: req.city,
            income_lpa: req.income_lpa,
            smoker: req.smoker,
            occupation: req.occupation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionRes {
    pub predicted_class: String,
    pub confidence_score: f64,
    pub class_probabilities: BTreeMap<String, f64>,
}

impl From<Prediction> for PredictionRes {
    fn from(p: Prediction) -> Self {
        Self {
            predicted_class: p.predicted_class,
            confidence_score: p.confidence_score,
            class_probabilities: p.class_probabilities,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictRes {
    #[serde(rename = "Response")]
    pub response: PredictionRes,
}

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientReq {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: i64,
    /// One of male, female, others
    pub gender: String,
    /// Height in metres
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
}

impl From<PatientReq> for PatientInput {
    fn from(req: PatientReq) -> Self {
        PatientInput {
            id: req.id,
            name: req.name,
            city: req.city,
            age: req.age,
            gender: req.gender,
            height: req.height,
            weight: req.weight,
        }
    }
}

/// Partial update; omitted fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientUpdateReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl From<PatientUpdateReq> for PatientUpdate {
    fn from(req: PatientUpdateReq) -> Self {
        PatientUpdate {
            name: req.name,
            city: req.city,
            age: req.age,
            gender: req.gender,
            height: req.height,
            weight: req.weight,
        }
    }
}

/// A stored patient. The id is the key it was looked up by and is not repeated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientRes {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub verdict: String,
}

impl From<StoredPatient> for PatientRes {
    fn from(p: StoredPatient) -> Self {
        Self {
            name: p.name,
            city: p.city,
            age: p.age,
            gender: p.gender.as_str().to_string(),
            height: p.height,
            weight: p.weight,
            bmi: p.bmi,
            verdict: match p.verdict {
                Verdict::Underweight => "Underweight",
                Verdict::Normal => "Normal",
                Verdict::Obese => "Obese",
            }
            .to_string(),
        }
    }
}

/// Every stored patient keyed by id, in store order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PatientMapRes(pub IndexMap<String, PatientRes>);

impl From<care_core::PatientRecords> for PatientMapRes {
    fn from(records: care_core::PatientRecords) -> Self {
        Self(
            records
                .into_iter()
                .map(|(id, patient)| (id, PatientRes::from(patient)))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// Sort on the basis of height, weight or bmi
    pub sort_by: String,
    /// asc or desc
    #[serde(default = "default_order")]
    pub order_by: String,
}

fn default_order() -> String {
    "asc".into()
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EditQuery {
    pub patient_id: String,
}
