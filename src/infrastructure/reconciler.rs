// src/infrastructure/reconciler.rs
//! Background sweep that repairs drift between the article store and the
//! search index left behind by failed best-effort index writes.

use crate::application::{commands::articles::ArticleCommandService, ports::time::Clock};
use chrono::{DateTime, TimeDelta, Utc};
use std::{sync::Arc, time::Duration};
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::{error, info};

pub struct SearchIndexReconciler {
    commands: Arc<ArticleCommandService>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

/// Each sweep re-reads one extra interval so rows committed while the
/// previous sweep was running are not skipped. Rows whose index write failed
/// hold the watermark back until a sweep gets them through.
fn next_watermark(
    started_at: DateTime<Utc>,
    interval: Duration,
    oldest_failure: Option<DateTime<Utc>>,
) -> DateTime<Utc> {
    let overlap = TimeDelta::from_std(interval).unwrap_or(TimeDelta::zero());
    let next = started_at
        .checked_sub_signed(overlap)
        .unwrap_or(DateTime::UNIX_EPOCH);
    oldest_failure.map_or(next, |failed_at| next.min(failed_at))
}

impl SearchIndexReconciler {
    pub fn new(
        commands: Arc<ArticleCommandService>,
        clock: Arc<dyn Clock>,
        interval: Duration,
    ) -> Self {
        Self {
            commands,
            clock,
            interval,
        }
    }

    /// Runs until the returned handle is aborted. The first sweep covers the
    /// whole table; later ones only recent changes.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run().await })
    }

    /// Runs one sweep from `since` and returns where the next one starts.
    /// A failed sweep leaves the watermark unchanged.
    pub async fn sweep(&self, since: DateTime<Utc>) -> DateTime<Utc> {
        let started_at = self.clock.now();
        match self.commands.reconcile_search_index(since).await {
            Ok(report) => next_watermark(started_at, self.interval, report.oldest_failure),
            Err(err) => {
                error!(error = %err, since = %since, "search index reconciliation failed");
                since
            }
        }
    }

    async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut watermark = DateTime::UNIX_EPOCH;

        info!(interval_secs = self.interval.as_secs(), "search index reconciler started");
        loop {
            ticker.tick().await;
            watermark = self.sweep(watermark).await;
        }
    }
}
