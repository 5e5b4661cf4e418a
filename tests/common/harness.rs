//! Test server harness.

use qig::derive::MockDeriver;
use qig::gateway::{AppState, create_router_with_state};
use qig::known::known_phrases;
use qig::search::{Evaluator, EvaluatorSettings, SearchController, SearchSettings};
use qig::store::CandidateStoreHandle;
use qig::targets::TargetRegistry;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

pub const TEST_TARGET: &str = "fpaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

pub struct TestServerConfig {
    pub deriver: MockDeriver,
    pub threshold: f64,
    pub chunk_size: usize,
    pub candidate_capacity: usize,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            deriver: MockDeriver::new(),
            threshold: qig::HIGH_PHI_THRESHOLD,
            chunk_size: 5,
            candidate_capacity: 100,
        }
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub state: AppState<MockDeriver>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns a server on an ephemeral port with a [`MockDeriver`] and one target,
/// [`TEST_TARGET`].
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;

    let targets = TargetRegistry::from_addresses([TEST_TARGET])
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    let evaluator = Evaluator::new(
        Arc::new(config.deriver),
        CandidateStoreHandle::with_capacity(config.candidate_capacity),
        Arc::new(targets),
    )
    .with_settings(EvaluatorSettings {
        threshold: config.threshold,
        derive_timeout: None,
    });
    let controller = Arc::new(SearchController::new(
        evaluator,
        SearchSettings {
            chunk_size: config.chunk_size,
            chunk_delay: Duration::ZERO,
            event_log_capacity: 200,
        },
    ));

    let known = known_phrases().map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;
    let state = AppState::new(controller, known);
    let app = create_router_with_state(state.clone());

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server_handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
    });

    wait_for_server_ready(
        addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr,
        state,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
