//! Weekly report: windowed read → digest → render → send → archive.
//!
//! Archiving happens only after a successful send. A transport failure
//! propagates with the window still in the live table, so the next run
//! picks it up again.

use anyhow::Context;
use chrono::{Days, NaiveDate};
use gaceta_ai::Analyst;
use gaceta_core::{Config, StoredRecord};
use gaceta_mail::{MailPayload, MailTransport, render};
use gaceta_store::RegulationStore;
use tracing::{info, warn};

/// Reportable outcome of one report run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReportOutcome {
    /// Rows found in the report window.
    pub window_rows: usize,
    /// Rows actually mailed (after the top-N cap).
    pub mailed_rows: usize,
    pub sent: bool,
    /// Rows removed by the post-send archive pass.
    pub archived: usize,
}

/// Run one weekly report pass for the window ending `today`.
pub async fn run_report<A, R, T>(
    store: &R,
    analyst: &A,
    transport: &T,
    config: &Config,
    today: NaiveDate,
) -> anyhow::Result<ReportOutcome>
where
    A: Analyst + Sync,
    R: RegulationStore + Sync,
    T: MailTransport + Sync,
{
    let mut outcome = ReportOutcome::default();
    let window_days = config.window_days.max(1);
    let start = today
        .checked_sub_days(Days::new(u64::from(window_days) - 1))
        .context("report window start out of range")?;
    let period_label = format!("the last {window_days} days");

    let rows = store
        .read_window(start, today)
        .context("reading report window")?;
    outcome.window_rows = rows.len();

    if rows.is_empty() {
        if config.skip_empty_report {
            info!(%start, %today, "empty report window, skipping send");
            return Ok(outcome);
        }
        info!(%start, %today, "empty report window, sending no-data notice");
        let payload = MailPayload::new(
            render::subject(today),
            render::empty_notice_html(&period_label),
            &config.recipients,
        );
        transport
            .send(&payload)
            .await
            .context("sending no-data notice")?;
        outcome.sent = true;
        // Nothing to archive; an empty window is never archived as success.
        return Ok(outcome);
    }

    let mailed = rank_for_report(rows.clone(), config.report_top_n);
    outcome.mailed_rows = mailed.len();

    // One digest call over the top slice; a failure falls back to the
    // deterministic local block rather than failing the run.
    let digest_slice = &mailed[..mailed.len().min(config.digest_top_n)];
    let digest = match analyst.digest(digest_slice, &period_label).await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "digest generation failed, using fallback");
            render::fallback_digest(digest_slice, &period_label, rows.len())
        }
    };

    let payload = MailPayload::new(
        render::subject(today),
        render::report_html(&mailed, &digest),
        &config.recipients,
    );
    transport
        .send(&payload)
        .await
        .context("sending weekly report")?;
    outcome.sent = true;

    // Send succeeded; now the window's past can be retired.
    outcome.archived = store.archive(start).context("archiving reported window")?;

    info!(
        window_rows = outcome.window_rows,
        mailed_rows = outcome.mailed_rows,
        archived = outcome.archived,
        %start,
        %today,
        "report run complete"
    );
    Ok(outcome)
}

/// Order rows for the email: relevance descending, most recent first on
/// ties, identity key as the final tie-break; keep the top `n`.
fn rank_for_report(mut rows: Vec<StoredRecord>, n: usize) -> Vec<StoredRecord> {
    rows.sort_by(|a, b| {
        b.relevance_score
            .cmp(&a.relevance_score)
            .then_with(|| b.publication_date.cmp(&a.publication_date))
            .then_with(|| a.identity_key().cmp(&b.identity_key()))
    });
    rows.truncate(n);
    rows
}
