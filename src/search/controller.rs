use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{info, instrument, warn};

use super::cancel::CancellationToken;
use super::error::{SearchError, SearchResult};
use super::evaluator::Evaluator;
use super::events::EventLog;
use super::stats::{RateSampler, SearchStats, format_runtime};
use super::types::{FoundPhrase, SearchOutcome, SearchState, SearchStatus, SearchStrategy};
use crate::constants::{DEFAULT_CHUNK_DELAY_MS, DEFAULT_CHUNK_SIZE, DEFAULT_EVENT_LOG_CAPACITY};
use crate::derive::AddressDeriver;
use crate::phrase::Phrase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Phrases per chunk; cancellation is checked before each chunk.
    pub chunk_size: usize,
    /// Pause between chunks. Zero still yields to the runtime.
    pub chunk_delay: Duration,
    pub event_log_capacity: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_delay: Duration::from_millis(DEFAULT_CHUNK_DELAY_MS),
            event_log_capacity: DEFAULT_EVENT_LOG_CAPACITY,
        }
    }
}

/// Proof that [`SearchController::start`] admitted a session; consumed by
/// [`SearchController::run`].
#[derive(Debug)]
pub struct SessionTicket {
    strategy: SearchStrategy,
    token: CancellationToken,
}

impl SessionTicket {
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Token that stops this session at the next chunk boundary.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

#[derive(Debug)]
struct Session {
    state: SearchState,
    strategy: Option<SearchStrategy>,
    tested: u64,
    high_phi: u64,
    failed: u64,
    started_at: Option<Instant>,
    finished_at: Option<Instant>,
    sampler: RateSampler,
    token: Option<CancellationToken>,
    outcome: Option<SearchOutcome>,
}

impl Session {
    fn idle() -> Self {
        Self {
            state: SearchState::Idle,
            strategy: None,
            tested: 0,
            high_phi: 0,
            failed: 0,
            started_at: None,
            finished_at: None,
            sampler: RateSampler::default(),
            token: None,
            outcome: None,
        }
    }
}

/// Single-session search driver.
///
/// At most one session runs at a time. Units run sequentially in input order, so the first
/// matching phrase wins. Stats are recomputed whenever [`stats`](Self::stats) is called.
pub struct SearchController<D> {
    evaluator: Evaluator<D>,
    settings: SearchSettings,
    session: Mutex<Session>,
    events: EventLog,
}

impl<D> std::fmt::Debug for SearchController<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("evaluator", &self.evaluator)
            .field("settings", &self.settings)
            .field("state", &self.session.lock().state)
            .finish()
    }
}

impl<D> SearchController<D>
where
    D: AddressDeriver + 'static,
{
    pub fn new(evaluator: Evaluator<D>, settings: SearchSettings) -> Self {
        let settings = SearchSettings {
            chunk_size: settings.chunk_size.max(1),
            ..settings
        };
        Self {
            evaluator,
            events: EventLog::with_capacity(settings.event_log_capacity),
            settings,
            session: Mutex::new(Session::idle()),
        }
    }

    pub fn evaluator(&self) -> &Evaluator<D> {
        &self.evaluator
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn state(&self) -> SearchState {
        self.session.lock().state
    }

    pub fn outcome(&self) -> Option<SearchOutcome> {
        self.session.lock().outcome.clone()
    }

    /// Opens a session, resetting stats. Fails while another session is running.
    pub fn start(&self, strategy: SearchStrategy) -> SearchResult<SessionTicket> {
        let token = CancellationToken::new();
        {
            let mut session = self.session.lock();
            if session.state.is_running() {
                return Err(SearchError::AlreadyRunning);
            }

            let now = Instant::now();
            *session = Session::idle();
            session.state = SearchState::Running;
            session.strategy = Some(strategy);
            session.started_at = Some(now);
            session.sampler.reset(now, 0);
            session.token = Some(token.clone());
        }

        self.events.info(format!("Starting {strategy} search"));
        Ok(SessionTicket { strategy, token })
    }

    /// Requests cancellation of the running session.
    ///
    /// Returns `false` if nothing is running or a stop was already requested.
    pub fn stop(&self) -> bool {
        let session = self.session.lock();
        match (&session.state, &session.token) {
            (SearchState::Running, Some(token)) if !token.is_cancelled() => {
                token.cancel();
                drop(session);
                self.events.info("Search stop requested");
                true
            }
            _ => false,
        }
    }

    /// Opens a session and runs it to completion.
    pub async fn search(
        &self,
        strategy: SearchStrategy,
        phrases: Vec<Phrase>,
    ) -> SearchResult<SearchOutcome> {
        let ticket = self.start(strategy)?;
        Ok(self.run(ticket, phrases).await)
    }

    /// Drives a started session over `phrases` in chunks.
    ///
    /// Cancellation is observed at chunk boundaries, before and after each chunk, so an in-flight
    /// unit always completes and no delay follows a stop. A unit whose derivation fails is recorded
    /// in the event log and skipped. The first match ends the session immediately.
    #[instrument(skip_all, fields(strategy = %ticket.strategy, phrases = phrases.len()))]
    pub async fn run(&self, ticket: SessionTicket, phrases: Vec<Phrase>) -> SearchOutcome {
        let chunk_count = phrases.len().div_ceil(self.settings.chunk_size);

        for (chunk_index, chunk) in phrases.chunks(self.settings.chunk_size).enumerate() {
            if ticket.token.is_cancelled() {
                self.events.info("Search stopped");
                return self.finish(SearchState::Stopped, None);
            }

            let mut chunk_tested = 0u64;
            let mut chunk_high_phi = 0u64;

            for phrase in chunk {
                match self.evaluator.evaluate(phrase).await {
                    Ok(unit) => {
                        chunk_tested += 1;
                        let found = FoundPhrase::from_unit(&unit);
                        {
                            let mut session = self.session.lock();
                            session.tested += 1;
                            if unit.is_high_phi() {
                                session.high_phi += 1;
                            }
                        }

                        if let Some(found) = found {
                            self.events.success(format!(
                                "MATCH FOUND! Address {} matches target",
                                found.address
                            ));
                            return self.finish(SearchState::Found, Some(found));
                        }

                        if let Some(candidate) = &unit.candidate {
                            chunk_high_phi += 1;
                            self.events.success(format!(
                                "High-Φ candidate found: {:.1}% - {}",
                                candidate.score,
                                preview(&candidate.phrase, 50)
                            ));
                        }
                    }
                    Err(e) => {
                        self.session.lock().failed += 1;
                        self.events.error(format!(
                            "Error evaluating '{}': {}",
                            preview(phrase.as_str(), 30),
                            e
                        ));
                    }
                }
            }

            self.events.info(format!(
                "Batch: {chunk_tested} phrases tested, {chunk_high_phi} high-Φ candidates"
            ));

            if ticket.token.is_cancelled() {
                self.events.info("Search stopped");
                return self.finish(SearchState::Stopped, None);
            }

            if chunk_index + 1 < chunk_count {
                if self.settings.chunk_delay.is_zero() {
                    tokio::task::yield_now().await;
                } else {
                    tokio::time::sleep(self.settings.chunk_delay).await;
                }
            }
        }

        self.finish(SearchState::Completed, None)
    }

    fn finish(&self, state: SearchState, found: Option<FoundPhrase>) -> SearchOutcome {
        let mut session = self.session.lock();
        session.state = state;
        session.finished_at = Some(Instant::now());
        session.token = None;

        let outcome = SearchOutcome {
            state,
            strategy: session.strategy.unwrap_or(SearchStrategy::Batch),
            tested: session.tested,
            high_phi_count: session.high_phi,
            failed: session.failed,
            found,
        };
        session.outcome = Some(outcome.clone());
        drop(session);

        if state == SearchState::Found {
            info!(tested = outcome.tested, "Search found a matching phrase");
        } else if outcome.failed > 0 {
            warn!(
                state = %state,
                tested = outcome.tested,
                failed = outcome.failed,
                "Search finished with failed units"
            );
        } else {
            info!(
                state = %state,
                tested = outcome.tested,
                high_phi = outcome.high_phi_count,
                "Search finished"
            );
        }
        outcome
    }

    /// Samples stats now.
    pub fn stats(&self) -> SearchStats {
        self.stats_at(Instant::now())
    }

    /// Samples stats as of `now`.
    pub fn stats_at(&self, now: Instant) -> SearchStats {
        let mut session = self.session.lock();
        let is_searching = session.state.is_running();

        let rate = if is_searching {
            let tested = session.tested;
            session.sampler.sample(now, tested)
        } else {
            0.0
        };

        let elapsed = match (session.started_at, session.finished_at) {
            (Some(start), Some(end)) => end.saturating_duration_since(start),
            (Some(start), None) => now.saturating_duration_since(start),
            _ => Duration::ZERO,
        };

        SearchStats {
            tested: session.tested,
            rate,
            high_phi_count: session.high_phi,
            runtime: format_runtime(elapsed),
            is_searching,
        }
    }

    /// Stats, outcome and event log in one snapshot.
    pub fn status(&self) -> SearchStatus {
        let stats = self.stats();
        let session = self.session.lock();
        SearchStatus {
            state: session.state,
            strategy: session.strategy,
            stats,
            outcome: session.outcome.clone(),
            events: self.events.snapshot(),
        }
    }
}

/// First `max` characters of `text`, with an ellipsis when truncated.
fn preview(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
