//! PrusaLink v1 response bodies. Missing fields default so older firmware still parses.

use serde::{Deserialize, Serialize};

use crate::format::PrinterState;

/// `GET /api/v1/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrinterStatus {
    #[serde(default)]
    pub printer: PrinterTelemetry,
    #[serde(default)]
    pub job: Option<JobStatus>,
}

impl PrinterStatus {
    pub fn state(&self) -> PrinterState {
        PrinterState::parse(&self.printer.state)
    }

    /// Id of the current job, if the printer reports one.
    pub fn job_id(&self) -> Option<u64> {
        self.job.as_ref().and_then(|j| j.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterTelemetry {
    pub state: String,
    pub temp_nozzle: f64,
    pub target_nozzle: f64,
    pub temp_bed: f64,
    pub target_bed: f64,
    pub axis_z: f64,
    pub flow: i64,
    pub speed: i64,
    pub fan_print: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobStatus {
    pub id: Option<u64>,
    pub progress: f64,
    /// Seconds.
    pub time_remaining: u64,
    /// Seconds.
    pub time_printing: u64,
}

/// `GET /api/v1/info`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterInfo {
    pub name: Option<String>,
    pub hostname: Option<String>,
    pub serial: Option<String>,
    #[serde(alias = "printer_type")]
    pub model: Option<String>,
    pub nozzle_diameter: Option<f64>,
}

impl PrinterInfo {
    /// Title for the printer: model, falling back to a generic name.
    pub fn title(&self) -> &str {
        self.model.as_deref().unwrap_or("Prusa Printer")
    }

    /// Name shown under the title: configured name, else host name.
    pub fn subtitle(&self) -> Option<&str> {
        self.name.as_deref().or(self.hostname.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_printing_status() {
        let json = r#"{
            "job": {"id": 42, "progress": 37.5, "time_remaining": 3900, "time_printing": 1200},
            "printer": {
                "state": "PRINTING", "temp_nozzle": 214.8, "target_nozzle": 215.0,
                "temp_bed": 59.9, "target_bed": 60.0, "axis_z": 2.4,
                "flow": 100, "speed": 100, "fan_print": 80
            }
        }"#;
        let s: PrinterStatus = serde_json::from_str(json).unwrap();
        assert_eq!(s.state(), PrinterState::Printing);
        assert_eq!(s.job_id(), Some(42));
        assert_eq!(s.printer.fan_print, 80);
        assert!((s.job.unwrap().progress - 37.5).abs() < 1e-9);
    }

    #[test]
    fn parse_idle_status_without_job() {
        let json = r#"{"printer": {"state": "IDLE", "temp_nozzle": 22.1}}"#;
        let s: PrinterStatus = serde_json::from_str(json).unwrap();
        assert_eq!(s.state(), PrinterState::Idle);
        assert_eq!(s.job_id(), None);
        assert_eq!(s.printer.target_nozzle, 0.0);
    }

    #[test]
    fn parse_info_with_printer_type_alias() {
        let json = r#"{"hostname": "prusa-mk4", "serial": "SN1", "printer_type": "MK4"}"#;
        let i: PrinterInfo = serde_json::from_str(json).unwrap();
        assert_eq!(i.title(), "MK4");
        assert_eq!(i.subtitle(), Some("prusa-mk4"));
    }

    #[test]
    fn info_defaults() {
        let i = PrinterInfo::default();
        assert_eq!(i.title(), "Prusa Printer");
        assert_eq!(i.subtitle(), None);
    }
}
