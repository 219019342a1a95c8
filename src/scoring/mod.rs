pub mod domain;
pub mod encoder;
mod explain;
mod grade;
mod radar;

pub use explain::{explain, peer_benchmarks};

use crate::model::{ModelError, RiskModel};
use domain::{
    ApplicantInput, FactorList, Grade, PeerBenchmark, RadarProfile, Recommendation, ScoreResult,
};
use serde::Serialize;

/// Full derived output for one applicant submission.
///
/// Recomputed wholesale on every submission; the caller owns the value and
/// replaces it outright on the next run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditAssessment {
    pub score: ScoreResult,
    pub factors: FactorList,
    pub peer_benchmarks: Vec<PeerBenchmark>,
    pub radar: RadarProfile,
}

/// Stateless pipeline facade over the loaded classifier.
///
/// Holds the model read-only, so one engine is shared across requests
/// without locking.
pub struct AssessmentEngine {
    model: RiskModel,
}

impl AssessmentEngine {
    pub fn new(model: RiskModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &RiskModel {
        &self.model
    }

    /// Runs encode -> predict -> grade -> explain synchronously.
    ///
    /// Deterministic: identical input yields an identical assessment.
    pub fn assess(&self, input: &ApplicantInput) -> Result<CreditAssessment, ModelError> {
        let vector = encoder::encode(input);
        let approval_probability = self.model.predict_probability(&vector)?;
        let risk_score = (1.0 - approval_probability) * 100.0;

        let score = ScoreResult {
            approval_probability,
            risk_score,
            grade: Grade::from_risk_score(risk_score),
            recommendation: Recommendation::from_probability(approval_probability),
        };

        let factors = explain::explain(input, vector.sales_growth, vector.late_pay_fraction);
        let peer_benchmarks = explain::peer_benchmarks(input);
        let radar = RadarProfile::from_input(input, vector.sales_growth, vector.late_pay_fraction);

        Ok(CreditAssessment {
            score,
            factors,
            peer_benchmarks,
            radar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RiskModelArtifact;
    use super::domain::FEATURE_NAMES;

    fn engine(intercept: f64) -> AssessmentEngine {
        let artifact = RiskModelArtifact {
            model_name: "FlowScore".to_string(),
            model_version: "10.3".to_string(),
            features: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            means: vec![0.0; 13],
            scales: vec![1.0; 13],
            coefficients: vec![0.0; 13],
            intercept,
        };
        AssessmentEngine::new(RiskModel::from_artifact(artifact).expect("artifact loads"))
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
    fn assessment_is_idempotent() {
        let engine = engine(1.2);
        let first = engine.assess(&input()).expect("assessment succeeds");
        let second = engine.assess(&input()).expect("assessment succeeds");
        assert_eq!(first, second);
    }

    #[test]
    fn even_odds_grade_warning_but_approve() {
        // Zero weights put the probability at exactly 0.5 -> risk 50.
        let engine = engine(0.0);
        let assessment = engine.assess(&input()).expect("assessment succeeds");
        assert!((assessment.score.risk_score - 50.0).abs() < 1e-9);
        assert_eq!(assessment.score.grade, Grade::C);
        assert_eq!(assessment.score.recommendation, Recommendation::Approve);
    }

    #[test]
    fn strong_intercept_grades_prime() {
        // sigmoid(5) ~ 0.9933 -> risk ~ 0.67.
        let engine = engine(5.0);
        let assessment = engine.assess(&input()).expect("assessment succeeds");
        assert_eq!(assessment.score.grade, Grade::A);
        assert_eq!(assessment.score.recommendation, Recommendation::Approve);
    }

    #[test]
    fn assessment_carries_all_derived_sections() {
        let engine = engine(0.0);
        let assessment = engine.assess(&input()).expect("assessment succeeds");
        assert_eq!(assessment.peer_benchmarks.len(), 3);
        assert!(!assessment.factors.positive.is_empty());
        assert!(assessment.radar.business_credit > 0.0);
    }
}
