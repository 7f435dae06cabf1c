use crate::applicant::FeatureRecord;
use crate::model::artifact::LogisticClassifier;
use crate::{CoreError, CoreResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// A trained classifier over [`FeatureRecord`]s.
///
/// The class labels are fixed when the classifier is constructed and
/// `predict_proba` returns one probability per label, in the same order.
pub trait Classifier: Send + Sync {
    fn classes(&self) -> &[String];

    fn predict_proba(&self, features: &FeatureRecord) -> CoreResult<Vec<f64>>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub predicted_class: String,
    /// Highest class probability.
    pub confidence_score: f64,
    pub class_probabilities: BTreeMap<String, f64>,
}

/// Process-wide, read-only wrapper around the loaded classifier.
#[derive(Clone)]
pub struct Predictor {
    classifier: Arc<dyn Classifier>,
    version: String,
}

impl Predictor {
    pub fn new(classifier: Arc<dyn Classifier>, version: impl Into<String>) -> Self {
        Self {
            classifier,
            version: version.into(),
        }
    }

    /// Load a [`LogisticClassifier`] artifact from disk.
    ///
    /// # Errors
    ///
    /// Returns the read, parse or shape error from the artifact.
    pub fn load(path: &Path, version: impl Into<String>) -> CoreResult<Self> {
        let classifier = LogisticClassifier::load(path)?;
        tracing::info!(
            "loaded premium model {} ({} classes) from {}",
            classifier.version(),
            classifier.classes().len(),
            path.display()
        );
        Ok(Self::new(Arc::new(classifier), version))
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn classes(&self) -> &[String] {
        self.classifier.classes()
    }

    /// Predict the premium category for one feature record.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Prediction` if the classifier fails or returns a
    /// probability vector that does not line up with its labels.
    pub fn predict(&self, features: &FeatureRecord) -> CoreResult<Prediction> {
        let classes = self.classifier.classes();
        let probabilities = self.classifier.predict_proba(features)?;

        if probabilities.len() != classes.len() {
            return Err(CoreError::Prediction(format!(
                "classifier returned {} probabilities for {} classes",
                probabilities.len(),
                classes.len()
            )));
        }

        let (best, confidence) = probabilities
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, p)| match best {
                Some((_, top)) if top >= p => best,
                _ => Some((i, p)),
            })
            .ok_or_else(|| CoreError::Prediction("classifier has no classes".into()))?;

        if !confidence.is_finite() {
            return Err(CoreError::Prediction(
                "classifier returned a non-finite probability".into(),
            ));
        }

        Ok(Prediction {
            predicted_class: classes[best].clone(),
            confidence_score: confidence,
            class_probabilities: classes.iter().cloned().zip(probabilities).collect(),
        })
    }
}
