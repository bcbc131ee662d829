use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use facematch_api::RestApi;
use facematch_core::{
    Error, FaceExtractor, InMemoryRegistry, PresenceVerifier, RecognitionService, Registry,
    DEFAULT_THRESHOLD,
};
use facematch_extract::RemoteExtractor;
use facematch_storage::DiskRegistry;

/// A face-embedding identity registry and matching service
#[derive(Parser, Debug)]
#[command(name = "facematch")]
#[command(about = "Register face embeddings and match probes against them", long_about = None)]
struct Args {
    /// Data directory for the persistent registry; omit to keep records in memory
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Base URL of the face-embedding extraction service
    #[arg(long, default_value = "http://localhost:8191")]
    extractor_url: String,

    /// Embedding length produced by the extraction service
    #[arg(long, default_value_t = 128)]
    dimension: usize,

    /// Maximum embedding distance at which two faces count as the same person
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f32,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if args.dimension == 0 {
        return Err(Error::InvalidConfig("embedding dimension must be at least 1".to_string()).into());
    }
    if !args.threshold.is_finite() || args.threshold < 0.0 {
        return Err(Error::InvalidConfig(format!(
            "threshold must be a non-negative number, got {}",
            args.threshold
        ))
        .into());
    }

    info!("Starting facematch v{}", env!("CARGO_PKG_VERSION"));
    info!("HTTP API port: {}", args.http_port);
    info!("Extractor: {}", args.extractor_url);
    info!("Embedding dimension: {}", args.dimension);
    info!("Match threshold: {}", args.threshold);

    let registry: Arc<dyn Registry> = match &args.data_dir {
        Some(dir) => {
            info!("Registry backend: persistent ({:?})", dir);
            Arc::new(DiskRegistry::open(dir, args.dimension)?)
        }
        None => {
            info!("Registry backend: in-memory");
            Arc::new(InMemoryRegistry::new(args.dimension))
        }
    };

    let extractor: Arc<dyn FaceExtractor> =
        Arc::new(RemoteExtractor::new(&args.extractor_url, args.dimension));

    let service = Arc::new(RecognitionService::new(
        registry,
        extractor.clone(),
        args.threshold,
    ));
    let verifier = Arc::new(PresenceVerifier::new(extractor, args.threshold));

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(service, verifier, http_port).await {
                eprintln!("HTTP server error: {}", e);
            }
        })
    });

    info!("facematch started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
