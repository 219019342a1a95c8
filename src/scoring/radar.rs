use super::domain::{ApplicantInput, RadarProfile};

impl RadarProfile {
    /// Normalizes five capability dimensions to [0, 1] for rendering.
    ///
    /// Reverse-coded metrics (payment share, volatility) flip so that larger
    /// always means stronger. Growth is shifted by 0.5 so that flat revenue
    /// lands mid-scale.
    pub fn from_input(input: &ApplicantInput, sales_growth: f64, late_pay_fraction: f64) -> Self {
        Self {
            business_credit: clamp_unit(input.business_score / 100.0),
            growth: clamp_unit(sales_growth + 0.5),
            payment_attitude: clamp_unit(1.0 - late_pay_fraction),
            fund_stability: clamp_unit(1.0 - input.transaction_volatility),
            ceo_credit: clamp_unit((input.ceo_credit_score - 500.0) / 500.0),
        }
    }
}

fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn dimensions_follow_the_normalization_rules() {
        let radar = RadarProfile::from_input(&input(), 0.2, 0.05);
        assert!((radar.business_credit - 0.75).abs() < 1e-12);
        assert!((radar.growth - 0.7).abs() < 1e-12);
        assert!((radar.payment_attitude - 0.95).abs() < 1e-12);
        assert!((radar.fund_stability - 0.8).abs() < 1e-12);
        assert!((radar.ceo_credit - 0.7).abs() < 1e-12);
    }

    #[test]
    fn dimensions_clamp_to_unit_interval() {
        let mut extreme = input();
        extreme.ceo_credit_score = 1100.0;
        let radar = RadarProfile::from_input(&extreme, 0.9, 0.05);
        assert_eq!(radar.ceo_credit, 1.0);
        assert_eq!(radar.growth, 1.0);

        extreme.ceo_credit_score = 400.0;
        let radar = RadarProfile::from_input(&extreme, -0.8, 0.05);
        assert_eq!(radar.ceo_credit, 0.0);
        assert_eq!(radar.growth, 0.0);
    }
}
