use super::domain::{ApplicantInput, Factor, FactorList, PeerBenchmark};

/// Afternoon settlement share above this fraction reads as liquidity strain.
const AFTERNOON_STRAIN_FRACTION: f64 = 0.20;
/// Afternoon settlement share below this fraction reads as a healthy habit.
const AFTERNOON_HEALTHY_FRACTION: f64 = 0.05;
/// Delays beyond this many days signal a repayment-capacity concern.
const DELAY_CONCERN_DAYS: f64 = 5.0;
/// Debt ratio above this percentage signals capital impairment.
const DEBT_IMPAIRMENT_PCT: f64 = 300.0;
/// Debt ratio below this percentage signals a sound capital structure.
const DEBT_SOUND_PCT: f64 = 100.0;
/// Growth above this fraction counts as high growth.
const HIGH_GROWTH_FRACTION: f64 = 0.2;

/// Fixed industry references for the peer comparison. Illustrative
/// benchmarks, not computed from any cohort dataset.
const PEER_AFTERNOON_PCT: f64 = 10.0;
const PEER_DEBT_PCT: f64 = 200.0;
const PEER_DELAY_DAYS: f64 = 5.0;

/// Derives positive and negative judgment factors from the raw inputs.
///
/// Each rule tests mutually exclusive branches of one metric; several rules
/// deliberately leave a neutral zone that contributes to neither list.
pub fn explain(input: &ApplicantInput, sales_growth: f64, late_pay_fraction: f64) -> FactorList {
    let mut factors = FactorList::default();

    if late_pay_fraction > AFTERNOON_STRAIN_FRACTION {
        factors.negative.push(Factor {
            title: "Liquidity-strain signal",
            detail: format!(
                "afternoon settlement share {:.1}% exceeds the 20% stress threshold",
                late_pay_fraction * 100.0
            ),
        });
    } else if late_pay_fraction < AFTERNOON_HEALTHY_FRACTION {
        factors.positive.push(Factor {
            title: "Healthy payment habit",
            detail: format!(
                "afternoon settlement share {:.1}% stays under 5%",
                late_pay_fraction * 100.0
            ),
        });
    }

    if input.avg_delay_days > DELAY_CONCERN_DAYS {
        factors.negative.push(Factor {
            title: "Repayment-capacity concern",
            detail: format!(
                "average payment delay of {:.1} day(s) past the {DELAY_CONCERN_DAYS:.0}-day tolerance",
                input.avg_delay_days
            ),
        });
    } else {
        factors.positive.push(Factor {
            title: "Consistent repayment",
            detail: format!(
                "average payment delay of {:.1} day(s) within tolerance",
                input.avg_delay_days
            ),
        });
    }

    if input.debt_ratio > DEBT_IMPAIRMENT_PCT {
        factors.negative.push(Factor {
            title: "Capital-impairment risk",
            detail: format!(
                "debt ratio {:.0}% above the {DEBT_IMPAIRMENT_PCT:.0}% ceiling",
                input.debt_ratio
            ),
        });
    } else if input.debt_ratio < DEBT_SOUND_PCT {
        factors.positive.push(Factor {
            title: "Sound capital structure",
            detail: format!(
                "debt ratio {:.0}% under {DEBT_SOUND_PCT:.0}%",
                input.debt_ratio
            ),
        });
    }

    if sales_growth < 0.0 {
        factors.negative.push(Factor {
            title: "Revenue contraction",
            detail: format!(
                "revenue declined {:.1}% against the prior period",
                sales_growth.abs() * 100.0
            ),
        });
    } else if sales_growth > HIGH_GROWTH_FRACTION {
        factors.positive.push(Factor {
            title: "High growth",
            detail: format!(
                "revenue grew {:.1}% against the prior period",
                sales_growth * 100.0
            ),
        });
    }

    factors
}

/// Holds three applicant metrics against fixed safe references, flagging a
/// metric only when it strictly exceeds its reference.
pub fn peer_benchmarks(input: &ApplicantInput) -> Vec<PeerBenchmark> {
    [
        ("afternoon_payment_ratio", input.late_payment_ratio, PEER_AFTERNOON_PCT),
        ("debt_ratio", input.debt_ratio, PEER_DEBT_PCT),
        ("avg_delay_days", input.avg_delay_days, PEER_DELAY_DAYS),
    ]
    .into_iter()
    .map(|(metric, applicant, reference)| PeerBenchmark {
        metric,
        applicant,
        reference,
        exceeds_reference: applicant > reference,
    })
    .collect()
}
