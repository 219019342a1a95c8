//! Narrative report generation through an external chat-completion API.
//!
//! The prompt is a deterministic template fill; everything probabilistic
//! lives on the provider side. A failed call surfaces as an error and never
//! disturbs the already-computed assessment.

use crate::scoring::domain::{ApplicantInput, ScoreResult};
use crate::scoring::encoder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Single system instruction sent with every narrative request.
const SYSTEM_INSTRUCTION: &str =
    "You are a corporate credit analyst. Write in a professional financial-report tone, markdown format.";

#[derive(Debug)]
pub enum NarrativeError {
    /// No credential was configured at startup; the capability is off.
    NotConfigured,
    Http(reqwest::Error),
    Api { status: u16, message: String },
    EmptyResponse,
}

impl fmt::Display for NarrativeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NarrativeError::NotConfigured => {
                write!(f, "narrative generation is not configured (missing API credential)")
            }
            NarrativeError::Http(err) => write!(f, "narrative service unreachable: {}", err),
            NarrativeError::Api { status, message } => {
                write!(f, "narrative service returned {}: {}", status, message)
            }
            NarrativeError::EmptyResponse => {
                write!(f, "narrative service returned no completion text")
            }
        }
    }
}

impl std::error::Error for NarrativeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NarrativeError::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NarrativeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

/// Fills the report template from the applicant metrics and computed score.
///
/// Pure string assembly; calling it twice with the same values yields the
/// same prompt.
pub fn build_prompt(input: &ApplicantInput, score: &ScoreResult) -> String {
    let sales_growth = encoder::sales_growth(input.revenue_current, input.revenue_prior);
    format!(
        "Write a credit review report for a trade-credit applicant with the following profile.\n\
         \n\
         Financials:\n\
         - revenue growth: {growth:.1}% year over year\n\
         - debt ratio: {debt:.0}%\n\
         - current ratio: {current:.0}%\n\
         \n\
         Payment behavior:\n\
         - afternoon settlement share: {late:.1}%\n\
         - average payment delay: {delay:.1} day(s)\n\
         - cash-flow volatility: {volatility:.2}\n\
         \n\
         Model verdict:\n\
         - risk score: {risk:.1} / 100\n\
         - grade: {grade:?} ({grade_label})\n\
         - recommendation: {recommendation}\n\
         \n\
         Cover the overall judgment, the main strengths and weaknesses, and\n\
         suggested monitoring conditions for the account.",
        growth = sales_growth * 100.0,
        debt = input.debt_ratio,
        current = input.current_ratio,
        late = input.late_payment_ratio,
        delay = input.avg_delay_days,
        volatility = input.transaction_volatility,
        risk = score.risk_score,
        grade = score.grade,
        grade_label = score.grade.label(),
        recommendation = score.recommendation.label(),
    )
}

/// Connection settings for the chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct NarrativeConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Client for the external text-generation collaborator.
///
/// One request per user trigger, no retries; multi-second latency is
/// expected and tolerated.
pub struct NarrativeClient {
    client: reqwest::Client,
    config: NarrativeConfig,
}

impl NarrativeClient {
    pub fn new(config: NarrativeConfig) -> Result<Self, NarrativeError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'))
    }

    /// Sends the built prompt and returns the completion text verbatim.
    pub async fn generate(&self, prompt: &str) -> Result<String, NarrativeError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(NarrativeError::Api { status, message });
        }

        let completion: ChatResponse = response.json().await?;
        let narrative = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        if narrative.trim().is_empty() {
            return Err(NarrativeError::EmptyResponse);
        }

        Ok(narrative)
    }
}
