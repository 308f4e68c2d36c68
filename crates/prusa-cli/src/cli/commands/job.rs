//! `prusactl pause|resume|cancel` – act on the current print job.

use anyhow::{bail, Result};
use prusa_core::client::{PrinterClient, PrinterStatus};
use prusa_core::format::{format_time, JobAction};

/// Run `action` on the job reported by the printer. `confirmed` gates destructive actions.
pub async fn run_job_action(
    client: &PrinterClient,
    action: JobAction,
    confirmed: bool,
) -> Result<()> {
    let status = client.status().await?;
    let job_id = check_action(&status, action, confirmed)?;

    match action {
        JobAction::Pause => client.pause_job(job_id).await?,
        JobAction::Resume => client.resume_job(job_id).await?,
        JobAction::Cancel => client.cancel_job(job_id).await?,
    }
    tracing::info!(job_id, %action, "job action sent");
    println!("{}", done_message(action));
    Ok(())
}

/// Validate that `action` applies to the current state; returns the job id.
pub(crate) fn check_action(
    status: &PrinterStatus,
    action: JobAction,
    confirmed: bool,
) -> Result<u64> {
    let Some(job_id) = status.job_id() else {
        bail!("no active print job");
    };
    let state = status.state();
    if !state.allows(action) {
        bail!("cannot {action} while printer is {state}");
    }
    if action == JobAction::Cancel && !confirmed {
        let progress = status.job.as_ref().map(|j| (j.progress, j.time_printing));
        let detail = progress
            .map(|(p, t)| format!(" (progress {p:.1}%, printed {})", format_time(t)))
            .unwrap_or_default();
        bail!("cancelling job {job_id}{detail} cannot be undone; re-run with --yes");
    }
    Ok(job_id)
}

fn done_message(action: JobAction) -> &'static str {
    match action {
        JobAction::Pause => "Print Paused",
        JobAction::Resume => "Print Resumed",
        JobAction::Cancel => "Print Cancelled",
    }
}
