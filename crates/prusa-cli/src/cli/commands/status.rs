//! `prusactl status [--watch]` – printer state, job progress and temperatures.

use anyhow::Result;
use prusa_core::client::{PrinterClient, PrinterInfo, PrinterStatus};
use prusa_core::format::{fan_percent, format_time, temperature_status};
use std::fmt::Write as _;
use std::time::Duration;

pub async fn run_status(client: &PrinterClient, watch: bool, interval: Duration) -> Result<()> {
    // Printer identity is nice to have; a failure here must not hide the status.
    let info = match client.info().await {
        Ok(i) => Some(i),
        Err(e) => {
            tracing::warn!("printer info unavailable: {e}");
            None
        }
    };

    loop {
        let status = client.status().await?;
        print!("{}", render_status(&status, info.as_ref()));
        if !watch || status.state().is_idle() {
            return Ok(());
        }
        tokio::time::sleep(interval).await;
        println!();
    }
}

fn temperature_line(label: &str, current: f64, target: f64) -> String {
    format!(
        "  {:<8} {:.1}°C / {}°C  ({})\n",
        label,
        current,
        target,
        temperature_status(current, target).label()
    )
}

pub(crate) fn render_status(status: &PrinterStatus, info: Option<&PrinterInfo>) -> String {
    let p = &status.printer;
    let mut out = String::new();
    if let Some(info) = info {
        match info.subtitle() {
            Some(sub) => {
                let _ = writeln!(out, "{} ({})", info.title(), sub);
            }
            None => {
                let _ = writeln!(out, "{}", info.title());
            }
        }
    }
    let _ = writeln!(out, "Status: {}", status.state());

    if let Some(job) = status.job.as_ref().filter(|j| j.id.is_some()) {
        let _ = write!(out, "Progress: {:.1}%", job.progress);
        if job.time_remaining > 0 {
            let _ = write!(out, ", {} remaining", format_time(job.time_remaining));
        }
        if job.time_printing > 0 {
            let _ = write!(out, ", {} elapsed", format_time(job.time_printing));
        }
        out.push('\n');
        let actions: Vec<String> = status
            .state()
            .available_actions()
            .iter()
            .map(|a| a.to_string())
            .collect();
        if !actions.is_empty() {
            let _ = writeln!(out, "Actions: {}", actions.join(", "));
        }
    }

    out.push_str("Temperatures:\n");
    out.push_str(&temperature_line("Nozzle", p.temp_nozzle, p.target_nozzle));
    out.push_str(&temperature_line("Bed", p.temp_bed, p.target_bed));

    out.push_str("Print settings:\n");
    let _ = writeln!(out, "  {:<8} {:.2}mm", "Z", p.axis_z);
    let _ = writeln!(out, "  {:<8} {}%{}", "Flow", p.flow, adjusted(p.flow));
    let _ = writeln!(out, "  {:<8} {}%{}", "Speed", p.speed, adjusted(p.speed));
    let _ = writeln!(out, "  {:<8} {}%", "Fan", fan_percent(p.fan_print));
    out
}

fn adjusted(pct: i64) -> &'static str {
    if pct == 100 {
        ""
    } else {
        " (adjusted)"
    }
}
