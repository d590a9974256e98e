#![forbid(unsafe_code)]

use genoscope_classify::{SequenceClassifier, DEFAULT_K};
use genoscope_server::{build_router, ApiConfig, AppState, PredictionService};
use genoscope_store::PredictionStore;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_path(name: &str, default: &str) -> PathBuf {
    PathBuf::from(env::var(name).unwrap_or_else(|_| default.to_string()))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("GENOSCOPE_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("GENOSCOPE_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let model_dir = env_path("GENOSCOPE_MODEL_DIR", "artifacts/dnabert_finetuned");
    let reference_csv = env_path("GENOSCOPE_REFERENCE_CSV", "artifacts/genome_reference.csv");
    let db_path = env_path("GENOSCOPE_DB_PATH", "predictions.db");
    let uploads_dir = env_path("GENOSCOPE_UPLOADS_DIR", "uploads");
    let kmer_len = env_usize("GENOSCOPE_KMER_LEN", DEFAULT_K);

    std::fs::create_dir_all(&uploads_dir)
        .map_err(|e| format!("cannot create uploads dir '{}': {e}", uploads_dir.display()))?;

    let store = PredictionStore::new(&db_path);
    store
        .init()
        .map_err(|e| format!("store init failed: {e}"))?;

    // Label mapping needs the reference dataset; the model needs the artifact
    // dir. Both load once here and stay read-only for the process lifetime.
    let classifier = SequenceClassifier::from_artifacts(&model_dir, &reference_csv, kmer_len)
        .map_err(|e| format!("classifier load failed: {e}"))?;
    info!(
        labels = classifier.labels().len(),
        kmer_len, "classifier ready"
    );

    let api = ApiConfig {
        max_body_bytes: env_usize("GENOSCOPE_MAX_BODY_BYTES", 4 * 1024 * 1024),
        uploads_dir,
    };
    let service = PredictionService::new(Arc::new(classifier), store);
    let state = AppState::new(Arc::new(service), api);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind failed on {bind_addr}: {e}"))?;
    info!("genoscope-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}
