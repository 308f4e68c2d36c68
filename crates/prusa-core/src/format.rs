//! Printer state, durations and temperatures rendered for humans.

use std::fmt;

/// Printer state as reported by PrusaLink (`printer.state`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrinterState {
    Idle,
    Printing,
    Paused,
    Finished,
    Stopped,
    Error,
    /// Anything else (BUSY, ATTENTION, READY...), kept verbatim.
    Other(String),
}

/// Job actions that make sense in a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobAction {
    Pause,
    Resume,
    Cancel,
}

impl PrinterState {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "IDLE" => PrinterState::Idle,
            "PRINTING" => PrinterState::Printing,
            "PAUSED" => PrinterState::Paused,
            "FINISHED" => PrinterState::Finished,
            "STOPPED" => PrinterState::Stopped,
            "ERROR" => PrinterState::Error,
            _ => PrinterState::Other(s.trim().to_string()),
        }
    }

    pub fn available_actions(&self) -> &'static [JobAction] {
        match self {
            PrinterState::Printing => &[JobAction::Pause, JobAction::Cancel],
            PrinterState::Paused => &[JobAction::Resume, JobAction::Cancel],
            _ => &[],
        }
    }

    pub fn allows(&self, action: JobAction) -> bool {
        self.available_actions().contains(&action)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PrinterState::Idle)
    }
}

impl fmt::Display for PrinterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrinterState::Idle => "IDLE",
            PrinterState::Printing => "PRINTING",
            PrinterState::Paused => "PAUSED",
            PrinterState::Finished => "FINISHED",
            PrinterState::Stopped => "STOPPED",
            PrinterState::Error => "ERROR",
            PrinterState::Other(s) => s.as_str(),
        };
        f.write_str(s)
    }
}

impl fmt::Display for JobAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JobAction::Pause => "pause",
            JobAction::Resume => "resume",
            JobAction::Cancel => "cancel",
        })
    }
}

/// `"2h 5m"` when at least an hour, else `"5m"`.
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureStatus {
    NotHeating,
    AtTarget,
    NearTarget,
    Heating,
}

impl TemperatureStatus {
    pub fn label(self) -> &'static str {
        match self {
            TemperatureStatus::NotHeating => "Not heating",
            TemperatureStatus::AtTarget => "At target temperature",
            TemperatureStatus::NearTarget => "Near target temperature",
            TemperatureStatus::Heating => "Heating",
        }
    }
}

/// Within 2°C of target is "at", within 5°C is "near". A zero target means the heater is off.
pub fn temperature_status(current: f64, target: f64) -> TemperatureStatus {
    if target == 0.0 {
        return TemperatureStatus::NotHeating;
    }
    let diff = (current - target).abs();
    if diff <= 2.0 {
        TemperatureStatus::AtTarget
    } else if diff <= 5.0 {
        TemperatureStatus::NearTarget
    } else {
        TemperatureStatus::Heating
    }
}

pub fn fan_percent(raw: i64) -> i64 {
    raw.clamp(0, 100)
}

/// Guidance shown after a failure where the printer never answered.
pub fn troubleshooting(host: &str) -> String {
    format!(
        "Troubleshooting Steps:\n\
         1. Check if printer is powered on\n\
         2. Verify printer IP address ({host})\n\
         3. Ensure you're on the same network\n\
         4. Try accessing printer web interface"
    )
}
