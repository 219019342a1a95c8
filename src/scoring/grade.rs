use super::domain::{Grade, Recommendation};

impl Grade {
    /// Fixed, non-configurable risk-score thresholds.
    pub fn from_risk_score(risk_score: f64) -> Self {
        if risk_score >= 80.0 {
            Self::D
        } else if risk_score >= 50.0 {
            Self::C
        } else if risk_score >= 20.0 {
            Self::B
        } else {
            Self::A
        }
    }
}

impl Recommendation {
    /// Approve at probability 0.5 and above. Derived from the probability
    /// rather than the grade; the score-50 grade boundary coincides with it
    /// because risk = (1 - probability) * 100.
    pub fn from_probability(approval_probability: f64) -> Self {
        if approval_probability >= 0.5 {
            Self::Approve
        } else {
            Self::Reject
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_table_holds_at_boundaries() {
        let cases = [
            (0.0, Grade::A),
            (19.999, Grade::A),
            (20.0, Grade::B),
            (49.999, Grade::B),
            (50.0, Grade::C),
            (79.999, Grade::C),
            (80.0, Grade::D),
            (100.0, Grade::D),
        ];
        for (risk_score, expected) in cases {
            assert_eq!(
                Grade::from_risk_score(risk_score),
                expected,
                "risk score {risk_score}"
            );
        }
    }

    #[test]
    fn probability_one_half_approves() {
        assert_eq!(
            Recommendation::from_probability(0.5),
            Recommendation::Approve
        );
        assert_eq!(
            Recommendation::from_probability(0.4999),
            Recommendation::Reject
        );
    }

    #[test]
    fn risk_score_fifty_is_warning_grade_yet_approved() {
        // Scenario: probability exactly 0.5 -> risk exactly 50.
        let probability: f64 = 0.5;
        let risk_score = (1.0 - probability) * 100.0;
        assert_eq!(Grade::from_risk_score(risk_score), Grade::C);
        assert_eq!(
            Recommendation::from_probability(probability),
            Recommendation::Approve
        );
    }

    #[test]
    fn grade_labels_read_as_expected() {
        assert_eq!(Grade::A.label(), "Prime");
        assert_eq!(Grade::D.label(), "High Risk");
    }
}
