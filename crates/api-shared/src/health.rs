use crate::types::HealthRes;

/// Health reporting for the prediction service.
///
/// The reported model version is fixed when the service is constructed; the
/// model is never reloaded.
#[derive(Clone, Debug)]
pub struct HealthService {
    model_version: String,
}

impl HealthService {
    pub fn new(model_version: impl Into<String>) -> Self {
        Self {
            model_version: model_version.into(),
        }
    }

    pub fn check_health(&self) -> HealthRes {
        HealthRes {
            status: "healthy".into(),
            model_version: self.model_version.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_fixed_version() {
        let res = HealthService::new(care_core::MODEL_VERSION).check_health();
        assert_eq!(res.status, "healthy");
        assert_eq!(res.model_version, "1.0.0");
    }
}
