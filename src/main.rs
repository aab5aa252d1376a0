use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use instant_match::config::AppConfig;
use instant_match::error::AppError;
use instant_match::telemetry;
use instant_match::workflows::matching::{
    match_router, GeoPoint, InMemoryBoard, InMemoryDirectory, InstantMatchService,
    LoggingHirePublisher, MarketplaceRole, MatchShortlist, MatchWeights, TaskDraft,
    WorkerAvailability, WorkerRegistration, DEFAULT_SHORTLIST_SIZE,
};
use instant_match::workflows::roster::RosterImporter;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

type AppService = InstantMatchService<InMemoryDirectory, InMemoryBoard, LoggingHirePublisher>;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Instant Match Service",
    about = "Run and demonstrate the marketplace instant-match service from the command line",
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
    /// Rank a roster against a task and print the shortlist
    Match(MatchArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Worker roster CSV to preload into the directory
    #[arg(long)]
    roster: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct MatchArgs {
    /// Worker roster CSV forming the candidate pool
    #[arg(long)]
    roster: PathBuf,
    /// Task category tag
    #[arg(long)]
    category: String,
    /// Task site latitude in decimal degrees
    #[arg(long)]
    lat: f64,
    /// Task site longitude in decimal degrees
    #[arg(long)]
    lng: f64,
    /// Offered pay amount
    #[arg(long)]
    pay: u32,
    /// Task title shown in the output
    #[arg(long, default_value = "Ad-hoc task")]
    title: String,
    /// Shortlist length
    #[arg(long)]
    top: Option<usize>,
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
        Command::Match(args) => run_match(args),
    }
}

fn build_service(shortlist_size: usize) -> Arc<AppService> {
    let directory = Arc::new(InMemoryDirectory::default());
    let board = Arc::new(InMemoryBoard::default());
    let notifier = Arc::new(LoggingHirePublisher);
    Arc::new(
        InstantMatchService::new(directory, board, notifier, MatchWeights::default())
            .with_shortlist_size(shortlist_size),
    )
}

fn preload_roster(service: &AppService, path: &PathBuf) -> Result<usize, AppError> {
    let registrations = RosterImporter::from_path(path)?;
    let count = registrations.len();
    for registration in registrations {
        service.register_worker(registration)?;
    }
    Ok(count)
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

    let service = build_service(config.matching.shortlist_size);
    if let Some(roster) = args.roster.as_ref() {
        let count = preload_roster(&service, roster)?;
        info!(count, roster = %roster.display(), "preloaded worker roster");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(match_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "instant match service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
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

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        roster,
        category,
        lat,
        lng,
        pay,
        title,
        top,
    } = args;

    let registrations = RosterImporter::from_path(roster)?;
    let shortlist = demo_shortlist(
        registrations,
        title.clone(),
        category.clone(),
        GeoPoint { lat, lng },
        pay,
        top,
    )?;

    render_shortlist(&title, &category, &shortlist);
    Ok(())
}

/// Build a throwaway service around an imported roster and rank one task.
fn demo_shortlist(
    registrations: Vec<WorkerRegistration>,
    title: String,
    category: String,
    location: GeoPoint,
    pay_amount: u32,
    top: Option<usize>,
) -> Result<MatchShortlist, AppError> {
    let service = build_service(top.unwrap_or(DEFAULT_SHORTLIST_SIZE));

    for registration in registrations {
        service.register_worker(registration)?;
    }

    let poster = service.register_worker(WorkerRegistration {
        display_name: "CLI poster".to_string(),
        location,
        role: MarketplaceRole::Poster,
        availability: WorkerAvailability::Offline,
        rating: 0.0,
        completed_tasks: 0,
        skills: Vec::new(),
        proof_links: Vec::new(),
    })?;

    let task = service.post_task(TaskDraft {
        title,
        category,
        location,
        pay_amount,
        posted_by: poster.worker_id.clone(),
    })?;

    let shortlist = service.shortlist(&task.task_id, &poster.worker_id)?;
    Ok(shortlist)
}

fn render_shortlist(title: &str, category: &str, shortlist: &MatchShortlist) {
    println!("Instant match shortlist");
    println!(
        "Task: {} (category {}, scores out of {})",
        title, category, shortlist.score_ceiling
    );

    if shortlist.candidates.is_empty() {
        println!("\nNo eligible workers in the roster");
        return;
    }

    println!();
    for (rank, candidate) in shortlist.candidates.iter().enumerate() {
        println!(
            "{}. {} ({}) | score {} | {:.1} km",
            rank + 1,
            candidate.display_name,
            candidate.worker_id.0,
            candidate.score,
            candidate.distance_km
        );
        for component in &candidate.components {
            println!("   {:?}: {:.1} ({})", component.factor, component.points, component.notes);
        }
    }
}
