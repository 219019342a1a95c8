use serde::{Deserialize, Serialize};

/// Raw metrics supplied by the caller for one applicant company.
///
/// Values arrive as entered; the encoder owns unit normalization. No range
/// enforcement happens here beyond numeric deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantInput {
    /// Current-period revenue.
    pub revenue_current: f64,
    /// Prior-period revenue; zero means no baseline exists.
    pub revenue_prior: f64,
    /// Business credit bureau score, 0-100.
    pub business_score: f64,
    /// Debt ratio as a percentage.
    pub debt_ratio: f64,
    /// Current ratio, percentage or fraction (see encoder heuristic).
    pub current_ratio: f64,
    /// Share of payments settled in the afternoon window, percentage.
    pub late_payment_ratio: f64,
    /// Average settlement hour of day.
    pub avg_transaction_hour: f64,
    /// Average payment delay in days.
    pub avg_delay_days: f64,
    /// Cash-flow volatility, 0.0-1.0.
    pub transaction_volatility: f64,
    /// CEO personal credit score.
    pub ceo_credit_score: f64,
}

/// Feature names in the exact order the classifier was trained with.
///
/// The artifact loader cross-checks its declared names against this list;
/// any reordering would silently corrupt predictions otherwise.
pub const FEATURE_NAMES: [&str; 13] = [
    "Biz_Score",
    "Sales_Growth",
    "Late_Pay_Ratio",
    "Avg_Delay_Days",
    "Debt_Ratio",
    "Current_Ratio",
    "Tx_Volatility",
    "Avg_Tx_Hour",
    "CEO_Score",
    "Weekend_Tx_Ratio",
    "OPM_Change",
    "Rev_Per_Emp",
    "Emp_Momentum",
];

/// Encoded model input. Field order mirrors [`FEATURE_NAMES`].
///
/// The trailing four fields are fixed defaults standing in for metrics the
/// intake surface does not collect yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    pub business_score: f64,
    pub sales_growth: f64,
    pub late_pay_fraction: f64,
    pub avg_delay_days: f64,
    pub debt_ratio: f64,
    pub current_ratio: f64,
    pub transaction_volatility: f64,
    pub avg_transaction_hour: f64,
    pub ceo_credit_score: f64,
    pub weekend_tx_ratio: f64,
    pub operating_margin_change: f64,
    pub revenue_per_employee: f64,
    pub employee_momentum: f64,
}

impl FeatureVector {
    /// Field values in trained order, ready for the classifier.
    pub fn values(&self) -> [f64; 13] {
        [
            self.business_score,
            self.sales_growth,
            self.late_pay_fraction,
            self.avg_delay_days,
            self.debt_ratio,
            self.current_ratio,
            self.transaction_volatility,
            self.avg_transaction_hour,
            self.ceo_credit_score,
            self.weekend_tx_ratio,
            self.operating_margin_change,
            self.revenue_per_employee,
            self.employee_momentum,
        ]
    }
}

/// Risk bucket derived from the risk score, A best through D worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "Prime",
            Self::B => "Watch",
            Self::C => "Warning",
            Self::D => "High Risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Approve,
    Reject,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

/// Classifier outcome plus the values derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Probability of the positive (approve) class, 0.0-1.0.
    pub approval_probability: f64,
    /// (1 - probability) * 100, higher is riskier.
    pub risk_score: f64,
    pub grade: Grade,
    pub recommendation: Recommendation,
}

/// One human-readable judgment signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    pub title: &'static str,
    pub detail: String,
}

/// Positive and negative factors derived from raw inputs.
///
/// This is a heuristic reading of the inputs, not feature attribution from
/// the model internals.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FactorList {
    pub positive: Vec<Factor>,
    pub negative: Vec<Factor>,
}

/// An applicant metric held against a fixed industry reference value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerBenchmark {
    pub metric: &'static str,
    pub applicant: f64,
    pub reference: f64,
    /// True when the applicant strictly exceeds the safe reference.
    pub exceeds_reference: bool,
}

/// Five capability dimensions, each independently clamped to [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarProfile {
    pub business_credit: f64,
    pub growth: f64,
    pub payment_attitude: f64,
    pub fund_stability: f64,
    pub ceo_credit: f64,
}
