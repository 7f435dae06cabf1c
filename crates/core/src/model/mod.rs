//! Premium classifier: artifact format and prediction.
//!
//! The classifier is loaded once at startup and shared read-only for the
//! lifetime of the process. There is no reload and no cross-check between the
//! artifact's expected columns and the feature record beyond what happens at
//! prediction time.

pub mod artifact;
pub mod predictor;

pub use artifact::{CategoricalColumn, LogisticClassifier, ModelArtifact, NumericColumn};
pub use predictor::{Classifier, Prediction, Predictor};
