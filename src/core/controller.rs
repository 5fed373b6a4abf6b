//! Session controller.
//!
//! Owns the single `Session` and is the only thing allowed to mutate it.
//! Analysis runs are revealed progressively by one sequential task per run;
//! every step checks it still belongs to the latest run before touching state,
//! so a superseded run can never interleave claims with its successor.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, instrument, warn};

use crate::adapters::ClaimSource;
use crate::config::RevealSettings;
use crate::domain::{Claim, Report, Session};

use super::error::AnalysisError;
use super::export::ReportWriter;
use super::generator::DEFAULT_LABEL;

/// Delays used by the reveal sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    /// Wait before the first claim is revealed
    pub initial_delay: Duration,

    /// Wait between subsequent reveals
    pub interval: Duration,

    /// Upper bound on a single call to the claim source
    pub analysis_timeout: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self::from(&RevealSettings::default())
    }
}

impl From<&RevealSettings> for RevealTiming {
    fn from(settings: &RevealSettings) -> Self {
        Self {
            initial_delay: Duration::from_millis(settings.initial_delay_ms),
            interval: Duration::from_millis(settings.interval_ms),
            analysis_timeout: Duration::from_secs(settings.analysis_timeout_seconds),
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every generated claim was revealed
    Completed { revealed: usize },

    /// A newer run started before this one finished; its remaining steps were dropped
    Superseded,

    /// The claim source failed; `revealed` partial claims were kept
    Failed { error: String, revealed: usize },
}

/// Handle to a spawned reveal sequence
pub struct RunHandle {
    run_id: u64,
    task: JoinHandle<RunOutcome>,
}

impl RunHandle {
    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    /// Wait for the reveal sequence to finish
    pub async fn wait(self) -> Result<RunOutcome> {
        self.task
            .await
            .with_context(|| format!("Reveal task for run {} did not complete", self.run_id))
    }
}

struct Shared {
    session: watch::Sender<Session>,
    source: Arc<dyn ClaimSource>,
    timing: RevealTiming,
    default_label: String,
}

/// Single owner of a `Session`
#[derive(Clone)]
pub struct SessionController {
    shared: Arc<Shared>,
}

impl SessionController {
    /// Create a controller around a claim source
    pub fn new(source: Arc<dyn ClaimSource>, timing: RevealTiming) -> Self {
        Self::with_default_label(source, timing, DEFAULT_LABEL)
    }

    /// Create a controller with a custom label for analyses without a selected file
    pub fn with_default_label(
        source: Arc<dyn ClaimSource>,
        timing: RevealTiming,
        default_label: impl Into<String>,
    ) -> Self {
        let (session, _) = watch::channel(Session::new());
        Self {
            shared: Arc::new(Shared {
                session,
                source,
                timing,
                default_label: default_label.into(),
            }),
        }
    }

    /// Current session state
    pub fn snapshot(&self) -> Session {
        self.shared.session.borrow().clone()
    }

    /// Watch session changes (one notification per mutation)
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.shared.session.subscribe()
    }

    /// Record the selected file name. An empty name clears the selection.
    pub fn select_file(&self, name: impl Into<String>) {
        let name = name.into();
        debug!(file = %name, "File selected");
        self.shared.session.send_modify(|session| {
            session.input_label = name;
        });
    }

    /// Start a new analysis run.
    ///
    /// Results are cleared and the session enters the running state before
    /// this returns; claims are then revealed by a background task. Calling
    /// this again while a run is in progress supersedes that run.
    ///
    /// Must be called from within a tokio runtime.
    pub fn analyze(&self) -> RunHandle {
        let mut run_id = 0;
        let mut label = String::new();

        self.shared.session.send_modify(|session| {
            session.run_id += 1;
            session.results.clear();
            session.is_analyzing = true;
            session.last_error = None;

            run_id = session.run_id;
            label = if session.input_label.is_empty() {
                self.shared.default_label.clone()
            } else {
                session.input_label.clone()
            };
        });

        info!(run_id, label = %label, source = self.shared.source.name(), "Analysis started");

        let shared = Arc::clone(&self.shared);
        let task = tokio::spawn(reveal(shared, run_id, label));

        RunHandle { run_id, task }
    }

    /// Snapshot the current input and results. Never mutates the session.
    pub fn export_report(&self) -> Report {
        Report::from_session(&self.shared.session.borrow(), Utc::now())
    }

    /// Snapshot the session and hand it to a report writer
    pub async fn export_to(&self, writer: &dyn ReportWriter) -> Result<PathBuf> {
        let report = self.export_report();
        writer.write(&report).await
    }
}

/// Generate claims for one run and reveal them in order
#[instrument(skip(shared, label))]
async fn reveal(shared: Arc<Shared>, run_id: u64, label: String) -> RunOutcome {
    let generated = match timeout(shared.timing.analysis_timeout, shared.source.analyze(&label)).await
    {
        Ok(result) => result,
        Err(_) => Err(AnalysisError::Timeout {
            seconds: shared.timing.analysis_timeout.as_secs(),
        }),
    };

    let (claims, failure) = match generated {
        Ok(claims) => (claims, None),
        Err(err) => {
            let message = err.to_string();
            (err.into_partial_claims(), Some(message))
        }
    };

    let mut revealed = 0;
    for (index, claim) in claims.into_iter().enumerate() {
        let delay = if index == 0 {
            shared.timing.initial_delay
        } else {
            shared.timing.interval
        };
        sleep(delay).await;

        if !shared.append_if_current(run_id, claim) {
            debug!(revealed, "Run superseded, dropping remaining reveals");
            return RunOutcome::Superseded;
        }
        revealed += 1;
    }

    if !shared.finish_if_current(run_id, failure.clone()) {
        debug!("Run superseded before completion");
        return RunOutcome::Superseded;
    }

    match failure {
        Some(error) => {
            warn!(%error, revealed, "Analysis failed");
            RunOutcome::Failed { error, revealed }
        }
        None => {
            info!(revealed, "Analysis completed");
            RunOutcome::Completed { revealed }
        }
    }
}

impl Shared {
    /// Append a claim if `run_id` is still the latest run
    fn append_if_current(&self, run_id: u64, claim: Claim) -> bool {
        let mut claim = Some(claim);
        self.session.send_if_modified(|session| {
            if session.run_id != run_id {
                return false;
            }
            if let Some(claim) = claim.take() {
                session.results.push(claim);
            }
            true
        });
        claim.is_none()
    }

    /// Leave the running state if `run_id` is still the latest run
    fn finish_if_current(&self, run_id: u64, error: Option<String>) -> bool {
        self.session.send_if_modified(|session| {
            if session.run_id != run_id {
                return false;
            }
            session.is_analyzing = false;
            session.last_error = error;
            true
        })
    }
}
