//! Loading and invocation of the pre-trained risk classifier.
//!
//! The artifact is a black box from the pipeline's point of view: the loader
//! validates its shape against the trained feature order and everything else
//! is a load-and-call contract. Training lives outside this repository.

use crate::scoring::domain::{FeatureVector, FEATURE_NAMES};
use serde::Deserialize;
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ModelError {
    Artifact {
        path: PathBuf,
        source: std::io::Error,
    },
    Malformed(serde_json::Error),
    FeatureCount {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    FeatureOrder {
        position: usize,
        expected: &'static str,
        found: String,
    },
    DegenerateScale {
        feature: &'static str,
    },
    NonFiniteFeature {
        feature: &'static str,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Artifact { path, source } => {
                write!(f, "cannot read model artifact {}: {}", path.display(), source)
            }
            ModelError::Malformed(err) => write!(f, "model artifact is not valid JSON: {}", err),
            ModelError::FeatureCount {
                field,
                expected,
                found,
            } => write!(
                f,
                "model artifact field '{}' has {} entries, expected {}",
                field, found, expected
            ),
            ModelError::FeatureOrder {
                position,
                expected,
                found,
            } => write!(
                f,
                "model artifact declares feature '{}' at position {}, expected '{}'",
                found, position, expected
            ),
            ModelError::DegenerateScale { feature } => {
                write!(f, "model artifact scale for '{}' must be positive", feature)
            }
            ModelError::NonFiniteFeature { feature } => {
                write!(f, "encoded feature '{}' is not finite", feature)
            }
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::Artifact { source, .. } => Some(source),
            ModelError::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

/// Serialized form of the trained classifier: feature names in trained
/// order, standardization parameters, and logistic coefficients.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskModelArtifact {
    pub model_name: String,
    pub model_version: String,
    pub features: Vec<String>,
    pub means: Vec<f64>,
    pub scales: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Pre-trained binary classifier, loaded once and shared read-only.
///
/// Construction is the expensive, fallible part; prediction is cheap and
/// deterministic given fixed weights.
#[derive(Debug, Clone)]
pub struct RiskModel {
    name: String,
    version: String,
    means: Vec<f64>,
    scales: Vec<f64>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl RiskModel {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ModelError::Artifact {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        let artifact: RiskModelArtifact =
            serde_json::from_reader(reader).map_err(ModelError::Malformed)?;
        Self::from_artifact(artifact)
    }

    /// Validates the artifact against the trained feature order. A mismatch
    /// here would otherwise corrupt every prediction silently.
    pub fn from_artifact(artifact: RiskModelArtifact) -> Result<Self, ModelError> {
        let expected = FEATURE_NAMES.len();
        if artifact.features.len() != expected {
            return Err(ModelError::FeatureCount {
                field: "features",
                expected,
                found: artifact.features.len(),
            });
        }
        for (position, (declared, trained)) in artifact
            .features
            .iter()
            .zip(FEATURE_NAMES.iter())
            .enumerate()
        {
            if declared != trained {
                return Err(ModelError::FeatureOrder {
                    position,
                    expected: *trained,
                    found: declared.clone(),
                });
            }
        }
        for (field, values) in [
            ("means", &artifact.means),
            ("scales", &artifact.scales),
            ("coefficients", &artifact.coefficients),
        ] {
            if values.len() != expected {
                return Err(ModelError::FeatureCount {
                    field,
                    expected,
                    found: values.len(),
                });
            }
        }
        for (feature, scale) in FEATURE_NAMES.iter().zip(artifact.scales.iter()) {
            if *scale <= 0.0 || !scale.is_finite() {
                return Err(ModelError::DegenerateScale { feature: *feature });
            }
        }

        Ok(Self {
            name: artifact.model_name,
            version: artifact.model_version,
            means: artifact.means,
            scales: artifact.scales,
            coefficients: artifact.coefficients,
            intercept: artifact.intercept,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Probability of the positive (approve) class for an encoded applicant.
    ///
    /// Errors only on non-finite encoded values; those surface per submission
    /// and never fall back to a default score.
    pub fn predict_probability(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let values = features.values();
        for (feature, value) in FEATURE_NAMES.iter().zip(values.iter()) {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteFeature { feature: *feature });
            }
        }

        let mut logit = self.intercept;
        for index in 0..values.len() {
            let standardized = (values[index] - self.means[index]) / self.scales[index];
            logit += self.coefficients[index] * standardized;
        }

        Ok(sigmoid(logit))
    }
}

fn sigmoid(logit: f64) -> f64 {
    1.0 / (1.0 + (-logit).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::ApplicantInput;
    use crate::scoring::encoder;

    fn artifact() -> RiskModelArtifact {
        RiskModelArtifact {
            model_name: "FlowScore".to_string(),
            model_version: "10.3".to_string(),
            features: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            means: vec![0.0; 13],
            scales: vec![1.0; 13],
            coefficients: vec![0.0; 13],
            intercept: 0.0,
        }
    }

    fn input() -> ApplicantInput {
        ApplicantInput {
            revenue_current: 120.0,
            revenue_prior: 100.0,
            business_score: 75.0,
            debt_ratio: 200.0,
            current_ratio: 120.0,
            late_payment_ratio: 5.0,
            avg_transaction_hour: 14.0,
            avg_delay_days: 0.0,
            transaction_volatility: 0.2,
            ceo_credit_score: 850.0,
        }
    }

    #[test]
    fn zero_weights_predict_even_odds() {
        let model = RiskModel::from_artifact(artifact()).expect("artifact loads");
        let probability = model
            .predict_probability(&encoder::encode(&input()))
            .expect("prediction succeeds");
        assert!((probability - 0.5).abs() < 1e-12);
    }

    #[test]
    fn prediction_is_deterministic() {
        let mut weighted = artifact();
        weighted.coefficients[0] = 0.9;
        weighted.means[0] = 65.0;
        weighted.scales[0] = 15.0;
        weighted.intercept = 0.35;
        let model = RiskModel::from_artifact(weighted).expect("artifact loads");

        let vector = encoder::encode(&input());
        let first = model.predict_probability(&vector).expect("prediction");
        let second = model.predict_probability(&vector).expect("prediction");
        assert_eq!(first, second);
    }

    #[test]
    fn reordered_features_are_rejected() {
        let mut reordered = artifact();
        reordered.features.swap(0, 1);
        match RiskModel::from_artifact(reordered) {
            Err(ModelError::FeatureOrder { position: 0, .. }) => {}
            other => panic!("expected feature order rejection, got {other:?}"),
        }
    }

    #[test]
    fn short_coefficient_vector_is_rejected() {
        let mut truncated = artifact();
        truncated.coefficients.pop();
        match RiskModel::from_artifact(truncated) {
            Err(ModelError::FeatureCount {
                field: "coefficients",
                expected: 13,
                found: 12,
            }) => {}
            other => panic!("expected coefficient count rejection, got {other:?}"),
        }
    }

    #[test]
    fn zero_scale_is_rejected() {
        let mut degenerate = artifact();
        degenerate.scales[4] = 0.0;
        match RiskModel::from_artifact(degenerate) {
            Err(ModelError::DegenerateScale { feature }) => assert_eq!(feature, "Debt_Ratio"),
            other => panic!("expected degenerate scale rejection, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_encoded_value_is_rejected() {
        let model = RiskModel::from_artifact(artifact()).expect("artifact loads");
        let mut vector = encoder::encode(&input());
        vector.debt_ratio = f64::NAN;
        match model.predict_probability(&vector) {
            Err(ModelError::NonFiniteFeature { feature }) => assert_eq!(feature, "Debt_Ratio"),
            other => panic!("expected non-finite rejection, got {other:?}"),
        }
    }

    #[test]
    fn missing_artifact_names_the_path() {
        match RiskModel::from_path("does-not-exist/flowscore.json") {
            Err(ModelError::Artifact { path, .. }) => {
                assert!(path.to_string_lossy().contains("does-not-exist"));
            }
            other => panic!("expected artifact error, got {other:?}"),
        }
    }

    #[test]
    fn higher_debt_lowers_approval_probability() {
        let mut weighted = artifact();
        weighted.coefficients[4] = -0.6;
        weighted.means[4] = 220.0;
        weighted.scales[4] = 140.0;
        let model = RiskModel::from_artifact(weighted).expect("artifact loads");

        let low_debt = model
            .predict_probability(&encoder::encode(&input()))
            .expect("prediction");
        let mut leveraged = input();
        leveraged.debt_ratio = 450.0;
        let high_debt = model
            .predict_probability(&encoder::encode(&leveraged))
            .expect("prediction");
        assert!(high_debt < low_debt);
    }
}
