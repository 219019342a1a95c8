//! CSV batch scoring: one applicant per row, one assessment per row.
//!
//! A malformed or unpredictable row is recorded as a per-row error; the
//! remaining rows still score.

use crate::model::ModelError;
use crate::scoring::{AssessmentEngine, CreditAssessment};
use std::fmt;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum BatchError {
    Io(std::io::Error),
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchError::Io(err) => write!(f, "failed to read batch input: {}", err),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[derive(Debug)]
pub enum BatchRowError {
    Csv(csv::Error),
    Model(ModelError),
}

impl fmt::Display for BatchRowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchRowError::Csv(err) => write!(f, "invalid row: {}", err),
            BatchRowError::Model(err) => write!(f, "prediction failed: {}", err),
        }
    }
}

impl std::error::Error for BatchRowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchRowError::Csv(err) => Some(err),
            BatchRowError::Model(err) => Some(err),
        }
    }
}

/// Outcome for one CSV row. `row` is 1-based, counting data rows after the
/// header.
#[derive(Debug)]
pub struct BatchRecord {
    pub row: usize,
    pub assessment: Result<CreditAssessment, BatchRowError>,
}

pub fn score_path<P: AsRef<Path>>(
    path: P,
    engine: &AssessmentEngine,
) -> Result<Vec<BatchRecord>, BatchError> {
    let file = std::fs::File::open(path)?;
    Ok(score_reader(file, engine))
}

pub fn score_reader<R: Read>(reader: R, engine: &AssessmentEngine) -> Vec<BatchRecord> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, row) in csv_reader
        .deserialize::<crate::scoring::domain::ApplicantInput>()
        .enumerate()
    {
        let assessment = match row {
            Ok(input) => engine.assess(&input).map_err(BatchRowError::Model),
            Err(err) => Err(BatchRowError::Csv(err)),
        };
        records.push(BatchRecord {
            row: index + 1,
            assessment,
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RiskModel, RiskModelArtifact};
    use crate::scoring::domain::{Grade, FEATURE_NAMES};
    use std::io::Cursor;

    fn engine() -> AssessmentEngine {
        let artifact = RiskModelArtifact {
            model_name: "FlowScore".to_string(),
            model_version: "10.3".to_string(),
            features: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            means: vec![0.0; 13],
            scales: vec![1.0; 13],
            coefficients: vec![0.0; 13],
            intercept: 2.0,
        };
        AssessmentEngine::new(RiskModel::from_artifact(artifact).expect("artifact loads"))
    }

    const HEADER: &str = "revenue_current,revenue_prior,business_score,debt_ratio,current_ratio,late_payment_ratio,avg_transaction_hour,avg_delay_days,transaction_volatility,ceo_credit_score";

    #[test]
    fn scores_every_well_formed_row() {
        let csv = format!(
            "{HEADER}\n120,100,75,200,120,5,14,0,0.2,850\n80,100,40,350,90,25,16,8,0.7,600\n"
        );
        let records = score_reader(Cursor::new(csv), &engine());
        assert_eq!(records.len(), 2);
        for record in &records {
            let assessment = record.assessment.as_ref().expect("row scores");
            // Intercept 2.0 -> probability ~0.88 regardless of row inputs.
            assert_eq!(assessment.score.grade, Grade::A);
        }
        assert!(records[1]
            .assessment
            .as_ref()
            .expect("row scores")
            .factors
            .negative
            .iter()
            .any(|factor| factor.title == "Capital-impairment risk"));
    }

    #[test]
    fn malformed_row_does_not_abort_the_batch() {
        let csv = format!(
            "{HEADER}\n120,100,75,200,120,5,14,0,0.2,850\nnot-a-number,100,75,200,120,5,14,0,0.2,850\n90,100,60,150,110,8,13,2,0.3,700\n"
        );
        let records = score_reader(Cursor::new(csv), &engine());
        assert_eq!(records.len(), 3);
        assert!(records[0].assessment.is_ok());
        assert!(matches!(
            records[1].assessment,
            Err(BatchRowError::Csv(_))
        ));
        assert!(records[2].assessment.is_ok());
        assert_eq!(records[2].row, 3);
    }

    #[test]
    fn missing_file_reports_io_error() {
        match score_path("does-not-exist.csv", &engine()) {
            Err(BatchError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
