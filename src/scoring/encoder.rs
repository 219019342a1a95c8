use super::domain::{ApplicantInput, FeatureVector};

/// Default for the weekend transaction share the intake form does not ask for.
const DEFAULT_WEEKEND_TX_RATIO: f64 = 0.0;
/// Default operating-margin change, a typical healthy-company value.
const DEFAULT_OPM_CHANGE: f64 = 0.02;
/// Default revenue per employee.
const DEFAULT_REV_PER_EMP: f64 = 300_000.0;
/// Default employee headcount momentum.
const DEFAULT_EMP_MOMENTUM: f64 = 0.05;

/// Maps raw applicant metrics into the fixed-order vector the model expects.
///
/// Pure arithmetic, never fails. Growth with no prior-period baseline is
/// defined as zero rather than treated as an error.
pub fn encode(input: &ApplicantInput) -> FeatureVector {
    FeatureVector {
        business_score: input.business_score,
        sales_growth: sales_growth(input.revenue_current, input.revenue_prior),
        late_pay_fraction: input.late_payment_ratio / 100.0,
        avg_delay_days: input.avg_delay_days,
        debt_ratio: input.debt_ratio,
        current_ratio: normalize_current_ratio(input.current_ratio),
        transaction_volatility: input.transaction_volatility,
        avg_transaction_hour: input.avg_transaction_hour,
        ceo_credit_score: input.ceo_credit_score,
        weekend_tx_ratio: DEFAULT_WEEKEND_TX_RATIO,
        operating_margin_change: DEFAULT_OPM_CHANGE,
        revenue_per_employee: DEFAULT_REV_PER_EMP,
        employee_momentum: DEFAULT_EMP_MOMENTUM,
    }
}

pub(crate) fn sales_growth(current: f64, prior: f64) -> f64 {
    if prior > 0.0 {
        (current - prior) / prior
    } else {
        0.0
    }
}

/// Callers supply the current ratio either as a percentage (120) or as a
/// fraction (1.2). Anything above 10 is read as a percentage; the boundary
/// value 10 itself passes through unchanged.
fn normalize_current_ratio(raw: f64) -> f64 {
    if raw > 10.0 {
        raw / 100.0
    } else {
        raw
    }
}
