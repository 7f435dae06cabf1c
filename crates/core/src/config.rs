//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the
//! services. Request handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_MODEL_PATH, DEFAULT_PATIENT_FILE};
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    patient_file: PathBuf,
    model_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if either path is empty.
    pub fn new(patient_file: PathBuf, model_path: PathBuf) -> CoreResult<Self> {
        if patient_file.as_os_str().is_empty() {
            return Err(CoreError::InvalidInput(
                "patient file path cannot be empty".into(),
            ));
        }
        if model_path.as_os_str().is_empty() {
            return Err(CoreError::InvalidInput(
                "model path cannot be empty".into(),
            ));
        }

        Ok(Self {
            patient_file,
            model_path,
        })
    }

    /// Build a configuration from optional raw values, typically read from
    /// `CARE_PATIENT_FILE` and `CARE_MODEL_PATH`.
    ///
    /// Missing or whitespace-only values fall back to the defaults.
    pub fn from_env_values(
        patient_file: Option<String>,
        model_path: Option<String>,
    ) -> CoreResult<Self> {
        fn or_default(value: Option<String>, default: &str) -> PathBuf {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        }

        Self::new(
            or_default(patient_file, DEFAULT_PATIENT_FILE),
            or_default(model_path, DEFAULT_MODEL_PATH),
        )
    }

    pub fn patient_file(&self) -> &Path {
        &self.patient_file
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}
