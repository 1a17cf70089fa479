//! Background scan scheduler
//!
//! Runs scan-and-verify passes for the document layer. At most one pass is
//! in flight; a new pass is refused until the previous one has finished or
//! been cancelled and joined.
//!
//! A pass verifies its segments (usually paragraphs) one batch at a time and
//! checks for cancellation between segments. Each batch applies its cache
//! writes under a single lock acquisition, so a cancelled pass never leaves a
//! half-applied response behind.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;

use super::error::{Result, SpellError};
use super::protocol::ServiceFailure;
use super::service::{BatchVerification, SpellingService};
use super::word::FontWord;
use crate::config::ScanConfig;

/// Outcome of one scan pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Verified segments, in the order they were scanned
    pub segments: Vec<BatchVerification>,
    pub cancelled: bool,
    /// First service failure seen during the pass
    pub failure: Option<ServiceFailure>,
}

impl ScanReport {
    pub fn wrong_words(&self) -> impl Iterator<Item = &FontWord> {
        self.segments
            .iter()
            .flat_map(|segment| segment.wrong_words())
            .map(|verified| &verified.word)
    }
}

/// Single-flight runner for background verification passes
pub struct ScanScheduler {
    service: Arc<SpellingService>,
    config: ScanConfig,
    enabled: AtomicBool,
    cancel_tx: watch::Sender<bool>,
    /// Set by `trigger`, cleared by the pass task when it finishes
    running: Arc<AtomicBool>,
    pass: Mutex<Option<JoinHandle<ScanReport>>>,
    reports: mpsc::UnboundedSender<ScanReport>,
}

impl ScanScheduler {
    /// Create an enabled scheduler. Every finished or cancelled pass is
    /// published on the returned receiver.
    pub fn new(
        service: Arc<SpellingService>,
        config: ScanConfig,
    ) -> (Self, mpsc::UnboundedReceiver<ScanReport>) {
        let (cancel_tx, _) = watch::channel(false);
        let (reports, report_rx) = mpsc::unbounded_channel();

        let scheduler = Self {
            service,
            config,
            enabled: AtomicBool::new(true),
            cancel_tx,
            running: Arc::new(AtomicBool::new(false)),
            pass: Mutex::new(None),
            reports,
        };
        (scheduler, report_rx)
    }

    pub fn service(&self) -> &Arc<SpellingService> {
        &self.service
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn is_busy(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start a pass over `segments` unless one is already running
    pub async fn trigger(&self, segments: Vec<Vec<FontWord>>) -> Result<()> {
        if !self.is_enabled() {
            return Err(SpellError::SchedulerDisabled);
        }

        let mut slot = self.pass.lock().await;
        // `disable` flips the flag under this lock
        if !self.is_enabled() {
            return Err(SpellError::SchedulerDisabled);
        }
        if self.is_busy() {
            return Err(SpellError::PassInProgress);
        }

        self.running.store(true, Ordering::SeqCst);
        self.cancel_tx.send_replace(false);
        let cancel_rx = self.cancel_tx.subscribe();
        let service = self.service.clone();
        let reports = self.reports.clone();
        let running = self.running.clone();
        let pause = Duration::from_millis(self.config.elapsed_ms);
        let settle = Duration::from_millis(self.config.waiting_time_ms);

        tracing::debug!(segments = segments.len(), "Scan pass started");

        *slot = Some(tokio::spawn(async move {
            let report = run_pass(service, segments, pause, settle, cancel_rx).await;
            let _ = reports.send(report.clone());
            running.store(false, Ordering::SeqCst);
            report
        }));

        Ok(())
    }

    /// Cancel the running pass, wait for it, then start a new one
    pub async fn restart(&self, segments: Vec<Vec<FontWord>>) -> Result<()> {
        self.cancel();
        self.join().await;
        self.trigger(segments).await
    }

    /// Ask the running pass to stop at its next checkpoint
    pub fn cancel(&self) {
        self.cancel_tx.send_replace(true);
    }

    /// Wait for the current pass, if any, and return its report
    pub async fn join(&self) -> Option<ScanReport> {
        let handle = self.pass.lock().await.take()?;
        match handle.await {
            Ok(report) => Some(report),
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                tracing::error!(error = %e, "Scan pass aborted");
                None
            }
        }
    }

    /// Stop scanning: refuse new passes, cancel and join the current one
    pub async fn disable(&self) -> Option<ScanReport> {
        {
            let _slot = self.pass.lock().await;
            self.enabled.store(false, Ordering::SeqCst);
            self.cancel();
        }
        let report = self.join().await;
        tracing::info!("Scan scheduler disabled");
        report
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
        tracing::info!("Scan scheduler enabled");
    }
}

async fn run_pass(
    service: Arc<SpellingService>,
    segments: Vec<Vec<FontWord>>,
    pause: Duration,
    settle: Duration,
    mut cancel_rx: watch::Receiver<bool>,
) -> ScanReport {
    let mut report = ScanReport::default();
    let total = segments.len();

    for (index, segment) in segments.into_iter().enumerate() {
        if *cancel_rx.borrow() {
            report.cancelled = true;
            break;
        }

        tokio::select! {
            verification = service.verify_many(&segment) => {
                if report.failure.is_none() {
                    report.failure = verification.failure.clone();
                }
                report.segments.push(verification);
            }
            _ = cancel_rx.changed() => {
                report.cancelled = true;
                break;
            }
        }

        let wait = if index + 1 < total { pause } else { settle };
        if wait.is_zero() {
            continue;
        }
        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = cancel_rx.changed() => {
                report.cancelled = index + 1 < total;
                break;
            }
        }
    }

    tracing::debug!(
        verified = report.segments.len(),
        cancelled = report.cancelled,
        "Scan pass finished"
    );
    report
}
