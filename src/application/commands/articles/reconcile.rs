// src/application/commands/articles/reconcile.rs
use super::{ArticleCommandService, sync::SyncAction};
use crate::{
    application::{dto::ReconcileReportDto, error::ApplicationResult},
    domain::article::ChangeCursor,
};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

pub const RECONCILE_BATCH_SIZE: i64 = 200;

impl ArticleCommandService {
    /// Re-applies index state for every article touched at or after `since`.
    ///
    /// Store failures abort the sweep; per-document index failures are
    /// counted, and the oldest one is reported so the next run starts there.
    pub async fn reconcile_search_index(
        &self,
        since: DateTime<Utc>,
    ) -> ApplicationResult<ReconcileReportDto> {
        let mut report = ReconcileReportDto::default();
        let mut cursor = ChangeCursor::starting_at(since);

        loop {
            let batch = self
                .articles
                .list_changed_after(cursor, RECONCILE_BATCH_SIZE)
                .await?;
            let Some(last) = batch.last() else {
                break;
            };
            cursor = ChangeCursor::after(last);
            let exhausted = i64::try_from(batch.len()).unwrap_or(i64::MAX) < RECONCILE_BATCH_SIZE;

            for article in &batch {
                report.scanned += 1;
                match self.sync_document(article).await {
                    Ok(SyncAction::Upserted) => report.upserted += 1,
                    Ok(SyncAction::Removed) => report.removed += 1,
                    Err(err) => {
                        report.failed += 1;
                        report.oldest_failure = Some(
                            report
                                .oldest_failure
                                .map_or(article.updated_at, |at| at.min(article.updated_at)),
                        );
                        warn!(article_id = %article.id, error = %err, "reconciliation could not sync article");
                    }
                }
            }

            if exhausted {
                break;
            }
        }

        info!(
            since = %since,
            scanned = report.scanned,
            upserted = report.upserted,
            removed = report.removed,
            failed = report.failed,
            "search index reconciliation finished"
        );
        Ok(report)
    }
}
