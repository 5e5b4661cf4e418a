//! QIG recovery HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use qig::config::Config;
use qig::derive::{AddressDeriver, FingerprintDeriver};
use qig::gateway::{AppState, create_router_with_state};
use qig::known::known_phrases;
use qig::search::{Evaluator, SearchController};
use qig::store::CandidateStoreHandle;
use qig::targets::TargetRegistry;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
 ██████╗ ██╗ ██████╗
██╔═══██╗██║██╔════╝
██║   ██║██║██║  ███╗
██║▄▄ ██║██║██║   ██║
╚██████╔╝██║╚██████╔╝
 ╚══▀▀═╝ ╚═╝ ╚═════╝

    VALIDATE. SCORE. RANK.
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        chunk_size = config.chunk_size,
        "QIG recovery starting"
    );

    let targets = Arc::new(TargetRegistry::from_addresses(&config.target_addresses)?);
    tracing::info!(count = targets.len(), "Target addresses loaded");

    let deriver = Arc::new(FingerprintDeriver::default());
    let self_test = deriver.self_test();
    if self_test.success {
        tracing::info!(deriver = deriver.name(), "Deriver self-test passed");
    } else {
        tracing::warn!(deriver = deriver.name(), error = ?self_test.error, "Deriver self-test failed");
    }

    let store = CandidateStoreHandle::with_capacity(config.candidate_capacity);
    let evaluator =
        Evaluator::new(deriver, store, targets).with_settings(config.evaluator_settings());
    let controller = Arc::new(SearchController::new(evaluator, config.search_settings()));

    let state = AppState::new(Arc::clone(&controller), known_phrases()?);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(controller))
        .await?;

    tracing::info!("QIG recovery shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("QIG_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(rt) = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    else {
        return 1;
    };

    rt.block_on(async {
        let Ok(client) = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
        else {
            return 1;
        };

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal<D>(controller: Arc<SearchController<D>>)
where
    D: AddressDeriver + 'static,
{
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    if controller.stop() {
        tracing::info!("Stopped running search session");
    }
}
