use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use flowscore::batch;
use flowscore::config::AppConfig;
use flowscore::error::AppError;
use flowscore::model::RiskModel;
use flowscore::report::{build_prompt, NarrativeClient, NarrativeError};
use flowscore::routes::{assessment_router, AssessmentState};
use flowscore::scoring::domain::ApplicantInput;
use flowscore::scoring::{AssessmentEngine, CreditAssessment};
use flowscore::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct OpsState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "FlowScore",
    about = "Score trade-credit applicants with the FlowScore risk model",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assess a single applicant and render the result to stdout
    Assess(AssessArgs),
    /// Score a CSV of applicants, one assessment line per row
    Batch(BatchArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// Current-period revenue
    #[arg(long, default_value_t = 120.0)]
    revenue_current: f64,
    /// Prior-period revenue
    #[arg(long, default_value_t = 100.0)]
    revenue_prior: f64,
    /// Business credit score (0-100)
    #[arg(long, default_value_t = 75.0)]
    business_score: f64,
    /// Debt ratio (%)
    #[arg(long, default_value_t = 200.0)]
    debt_ratio: f64,
    /// Current ratio (%)
    #[arg(long, default_value_t = 120.0)]
    current_ratio: f64,
    /// Afternoon settlement share (%)
    #[arg(long, default_value_t = 5.0)]
    late_payment_ratio: f64,
    /// Average settlement hour (0-24)
    #[arg(long, default_value_t = 14.0)]
    avg_transaction_hour: f64,
    /// Average payment delay (days)
    #[arg(long, default_value_t = 0.0)]
    avg_delay_days: f64,
    /// Cash-flow volatility (0.0-1.0)
    #[arg(long, default_value_t = 0.2)]
    transaction_volatility: f64,
    /// CEO personal credit score
    #[arg(long, default_value_t = 850.0)]
    ceo_credit_score: f64,
    /// Also request the LLM narrative report
    #[arg(long)]
    narrative: bool,
}

impl AssessArgs {
    fn applicant(&self) -> ApplicantInput {
        ApplicantInput {
            revenue_current: self.revenue_current,
            revenue_prior: self.revenue_prior,
            business_score: self.business_score,
            debt_ratio: self.debt_ratio,
            current_ratio: self.current_ratio,
            late_payment_ratio: self.late_payment_ratio,
            avg_transaction_hour: self.avg_transaction_hour,
            avg_delay_days: self.avg_delay_days,
            transaction_volatility: self.transaction_volatility,
            ceo_credit_score: self.ceo_credit_score,
        }
    }
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// CSV file with one applicant per row
    #[arg(long)]
    input: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Assess(args) => run_assess(args).await,
        Command::Batch(args) => run_batch(args),
    }
}

fn load_engine(config: &AppConfig) -> Result<AssessmentEngine, AppError> {
    // Missing or malformed artifact is fatal; the service must never fall
    // back to a default score.
    let model = RiskModel::from_path(&config.model.artifact_path)?;
    info!(
        model = model.name(),
        version = model.version(),
        "risk model loaded"
    );
    Ok(AssessmentEngine::new(model))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let engine = Arc::new(load_engine(&config)?);
    let narrative = match config.narrative.clone() {
        Some(narrative_config) => Some(Arc::new(NarrativeClient::new(narrative_config)?)),
        None => None,
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let ops_state = OpsState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(ops_state)
        .merge(assessment_router(AssessmentState {
            engine,
            narrative: narrative.clone(),
        }))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        narrative_available = narrative.is_some(),
        "flowscore assessment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = load_engine(&config)?;
    let applicant = args.applicant();
    let assessment = engine.assess(&applicant)?;

    render_assessment(&assessment);

    if args.narrative {
        let narrative_config = config
            .narrative
            .ok_or(AppError::Narrative(NarrativeError::NotConfigured))?;
        let client = NarrativeClient::new(narrative_config)?;
        let prompt = build_prompt(&applicant, &assessment.score);
        let narrative = client.generate(&prompt).await?;
        println!("\nNarrative report\n{narrative}");
    }

    Ok(())
}

fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = load_engine(&config)?;
    let records = batch::score_path(&args.input, &engine)?;

    for record in &records {
        match &record.assessment {
            Ok(assessment) => println!(
                "row {}: risk {:.1}, grade {:?} ({}), {}",
                record.row,
                assessment.score.risk_score,
                assessment.score.grade,
                assessment.score.grade.label(),
                assessment.score.recommendation.label(),
            ),
            Err(err) => println!("row {}: skipped ({err})", record.row),
        }
    }

    Ok(())
}

fn render_assessment(assessment: &CreditAssessment) {
    println!("FlowScore assessment");
    println!(
        "Risk score {:.1} | grade {:?} ({}) | recommendation: {}",
        assessment.score.risk_score,
        assessment.score.grade,
        assessment.score.grade.label(),
        assessment.score.recommendation.label(),
    );
    println!(
        "Approval probability {:.1}%",
        assessment.score.approval_probability * 100.0
    );

    if assessment.factors.negative.is_empty() {
        println!("\nRisk factors: none detected");
    } else {
        println!("\nRisk factors");
        for factor in &assessment.factors.negative {
            println!("- {}: {}", factor.title, factor.detail);
        }
    }

    if !assessment.factors.positive.is_empty() {
        println!("\nStrengths");
        for factor in &assessment.factors.positive {
            println!("- {}: {}", factor.title, factor.detail);
        }
    }

    println!("\nPeer comparison");
    for benchmark in &assessment.peer_benchmarks {
        let flag = if benchmark.exceeds_reference {
            " [exceeds safe threshold]"
        } else {
            ""
        };
        println!(
            "- {}: {:.1} vs reference {:.1}{}",
            benchmark.metric, benchmark.applicant, benchmark.reference, flag
        );
    }

    println!("\nCapability radar (0-1)");
    println!("- business credit: {:.2}", assessment.radar.business_credit);
    println!("- growth: {:.2}", assessment.radar.growth);
    println!("- payment attitude: {:.2}", assessment.radar.payment_attitude);
    println!("- fund stability: {:.2}", assessment.radar.fund_stability);
    println!("- ceo credit: {:.2}", assessment.radar.ceo_credit);
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<OpsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
