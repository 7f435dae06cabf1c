//! Serialisable multinomial logistic classifier.
//!
//! A feature record is encoded as the standardised numeric columns followed
//! by one-hot categorical columns, in the order the artifact lists them, then
//! scored with `softmax(W·x + b)`.

use crate::applicant::FeatureRecord;
use crate::model::predictor::Classifier;
use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumn {
    pub feature: String,
    pub mean: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub feature: String,
    pub categories: Vec<String>,
}

/// On-disk model description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: String,
    pub classes: Vec<String>,
    #[serde(default)]
    pub numeric: Vec<NumericColumn>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumn>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl ModelArtifact {
    /// # Errors
    ///
    /// Returns `CoreError::ModelRead` if the file cannot be read and
    /// `CoreError::ModelParse` if it is not a valid artifact document.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(CoreError::ModelRead)?;
        serde_json::from_str(&contents).map_err(CoreError::ModelParse)
    }

    /// Number of encoded input columns.
    pub fn width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }
}

/// Classifier built from a validated [`ModelArtifact`].
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    artifact: ModelArtifact,
}

impl LogisticClassifier {
    /// Check the artifact's shape.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidModel` when there are fewer than two classes,
    /// the coefficient or intercept counts do not match the classes, or a
    /// coefficient row does not match the encoded width.
    pub fn from_artifact(artifact: ModelArtifact) -> CoreResult<Self> {
        let classes = artifact.classes.len();
        if classes < 2 {
            return Err(CoreError::InvalidModel(
                "at least two classes are required".into(),
            ));
        }
        if artifact.coefficients.len() != classes || artifact.intercepts.len() != classes {
            return Err(CoreError::InvalidModel(format!(
                "expected {} coefficient rows and intercepts, found {} and {}",
                classes,
                artifact.coefficients.len(),
                artifact.intercepts.len()
            )));
        }

        let width = artifact.width();
        if let Some(row) = artifact.coefficients.iter().position(|r| r.len() != width) {
            return Err(CoreError::InvalidModel(format!(
                "coefficient row {} has {} values, expected {}",
                row,
                artifact.coefficients[row].len(),
                width
            )));
        }

        Ok(Self { artifact })
    }

    pub fn load(path: &Path) -> CoreResult<Self> {
        Self::from_artifact(ModelArtifact::load(path)?)
    }

    pub fn version(&self) -> &str {
        &self.artifact.version
    }

    fn encode(&self, features: &FeatureRecord) -> CoreResult<Vec<f64>> {
        let mut row = Vec::with_capacity(self.artifact.width());

        for column in &self.artifact.numeric {
            let value = features.numeric(&column.feature).ok_or_else(|| {
                CoreError::Prediction(format!("unknown numeric feature '{}'", column.feature))
            })?;
            // zero-variance columns are centred only
            let scale = if column.scale == 0.0 { 1.0 } else { column.scale };
            row.push((value - column.mean) / scale);
        }

        for column in &self.artifact.categorical {
            let value = features.categorical(&column.feature).ok_or_else(|| {
                CoreError::Prediction(format!(
                    "unknown categorical feature '{}'",
                    column.feature
                ))
            })?;
            if !column.categories.iter().any(|c| c == value) {
                return Err(CoreError::Prediction(format!(
                    "found unknown category '{}' in column '{}'",
                    value, column.feature
                )));
            }
            row.extend(
                column
                    .categories
                    .iter()
                    .map(|c| if c == value { 1.0 } else { 0.0 }),
            );
        }

        Ok(row)
    }
}

impl Classifier for LogisticClassifier {
    fn classes(&self) -> &[String] {
        &self.artifact.classes
    }

    fn predict_proba(&self, features: &FeatureRecord) -> CoreResult<Vec<f64>> {
        let x = self.encode(features)?;

        let scores: Vec<f64> = self
            .artifact
            .coefficients
            .iter()
            .zip(&self.artifact.intercepts)
            .map(|(w, b)| w.iter().zip(&x).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect();

        Ok(softmax(&scores))
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::applicant::{Applicant, ApplicantInput};

    pub(crate) fn artifact() -> ModelArtifact {
        ModelArtifact {
            version: "1.0.0".into(),
            classes: vec!["High".into(), "Low".into(), "Medium".into()],
            numeric: vec![NumericColumn {
                feature: "bmi".into(),
                mean: 25.0,
                scale: 5.0,
            }],
            categorical: vec![CategoricalColumn {
                feature: "lifestyle_risk".into(),
                categories: vec!["high".into(), "medium".into(), "low".into()],
            }],
            coefficients: vec![
                vec![0.5, 2.0, 0.0, -1.0],
                vec![-0.5, -1.0, 0.0, 1.5],
                vec![0.0, 0.0, 0.5, 0.0],
            ],
            intercepts: vec![0.0, 0.0, 0.0],
        }
    }

    pub(crate) fn features(smoker: bool, weight: f64) -> FeatureRecord {
        Applicant::new(ApplicantInput {
            age: 40,
            height: 1.7,
            weight,
            city: "Pune".into(),
            income_lpa: 10,
            smoker,
            occupation: "student".into(),
        })
        .unwrap()
        .features()
    }

    #[test]
    fn probabilities_sum_to_one() {
        let classifier = LogisticClassifier::from_artifact(artifact()).unwrap();
        for (smoker, weight) in [(true, 100.0), (false, 55.0), (true, 70.0)] {
            let p = classifier.predict_proba(&features(smoker, weight)).unwrap();
            assert_eq!(p.len(), 3);
            assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
            assert!(p.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn high_risk_scores_high_class() {
        let classifier = LogisticClassifier::from_artifact(artifact()).unwrap();
        let p = classifier.predict_proba(&features(true, 100.0)).unwrap();
        assert!(p[0] > p[1] && p[0] > p[2]);
    }

    #[test]
    fn rejects_mis_shaped_artifacts() {
        let mut bad = artifact();
        bad.coefficients[1].pop();
        assert!(matches!(
            LogisticClassifier::from_artifact(bad),
            Err(CoreError::InvalidModel(_))
        ));

        let mut bad = artifact();
        bad.intercepts.pop();
        assert!(matches!(
            LogisticClassifier::from_artifact(bad),
            Err(CoreError::InvalidModel(_))
        ));

        let mut bad = artifact();
        bad.classes.truncate(1);
        assert!(matches!(
            LogisticClassifier::from_artifact(bad),
            Err(CoreError::InvalidModel(_))
        ));
    }

    #[test]
    fn unknown_columns_fail_at_prediction_time() {
        let mut mismatched = artifact();
        mismatched.numeric[0].feature = "cholesterol".into();
        let classifier = LogisticClassifier::from_artifact(mismatched).unwrap();
        let err = classifier.predict_proba(&features(false, 60.0)).unwrap_err();
        assert!(matches!(err, CoreError::Prediction(_)));

        let mut mismatched = artifact();
        mismatched.categorical[0].categories = vec!["a".into(), "b".into(), "c".into()];
        let classifier = LogisticClassifier::from_artifact(mismatched).unwrap();
        let err = classifier.predict_proba(&features(false, 60.0)).unwrap_err();
        assert!(err.to_string().contains("unknown category 'low'"));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, serde_json::to_string(&artifact()).unwrap()).unwrap();

        let classifier = LogisticClassifier::load(&path).unwrap();
        assert_eq!(classifier.version(), "1.0.0");
        assert_eq!(classifier.classes(), ["High", "Low", "Medium"]);

        std::fs::write(&path, "[]").unwrap();
        assert!(matches!(
            LogisticClassifier::load(&path),
            Err(CoreError::ModelParse(_))
        ));
    }
}
