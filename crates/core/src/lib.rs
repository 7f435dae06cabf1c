//! # Care Core
//!
//! Core business logic for the patient record and premium prediction services.
//!
//! This crate contains pure data operations:
//! - Applicant validation and derived attributes (BMI, age group, lifestyle risk, city tier)
//! - Patient records with derived BMI and verdict
//! - The flat-file patient store and its read-modify-write operations
//! - Loading and running the premium classifier
//!
//! **No API concerns**: HTTP servers, routing and status codes belong in `api-rest` and
//! `api-shared`.

pub mod applicant;
pub mod city;
pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod patient;
pub mod repositories;
pub mod validation;

pub use applicant::{AgeGroup, Applicant, ApplicantInput, FeatureRecord, LifestyleRisk, Occupation};
pub use city::{normalise_city, CityTier};
pub use config::CoreConfig;
pub use constants::{DEFAULT_MODEL_PATH, DEFAULT_PATIENT_FILE, MODEL_VERSION};
pub use error::{CoreError, CoreResult};
pub use model::{Classifier, Prediction, Predictor};
pub use patient::{Gender, Patient, PatientInput, PatientUpdate, StoredPatient, Verdict};
pub use repositories::patients::{PatientService, SortField, SortOrder};
pub use repositories::store::{InMemoryStore, JsonFileStore, PatientRecords, PatientStore};
