use crate::core::config::Config;
use crate::core::manager::{ConnectorVerdict, DispatchReport};
use crate::core::record::{Action, DataRecord};
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use dirs::home_dir;
use serde::Serialize;
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Struct written for each dispatch.
#[derive(Debug, Serialize)]
pub struct DispatchRecord {
    pub session_id: String,
    pub timestamp: String,
    pub action: Action,
    pub record: DataRecord,
    /// "valid", "invalid" or "fault"
    pub status: String,
    pub verdicts: Vec<ConnectorVerdict>,
    pub details: String,
}

impl DispatchRecord {
    pub fn from_report(cfg: &Config, action: Action, record: &DataRecord, report: &DispatchReport) -> Self {
        Self {
            session_id: cfg.session_id.clone(),
            timestamp: Utc::now().to_rfc3339(),
            action,
            record: record.clone(),
            status: if report.valid { "valid" } else { "invalid" }.into(),
            verdicts: report.verdicts.clone(),
            details: String::new(),
        }
    }

    pub fn from_fault(cfg: &Config, action: Action, record: &DataRecord, err: &anyhow::Error) -> Self {
        Self {
            session_id: cfg.session_id.clone(),
            timestamp: Utc::now().to_rfc3339(),
            action,
            record: record.clone(),
            status: "fault".into(),
            verdicts: Vec::new(),
            details: format!("{:#}", err),
        }
    }
}

/// Telemetry directory: FANOUT_TELEMETRY_DIR, else ~/.fanout/telemetry
pub fn telemetry_dir(cfg: &Config) -> Option<PathBuf> {
    if let Some(dir) = &cfg.telemetry_dir {
        return Some(dir.clone());
    }
    home_dir().map(|mut p| {
        p.push(".fanout");
        p.push("telemetry");
        p
    })
}

/// Append a DispatchRecord to the session's JSONL file and human-readable log.
/// No-op when telemetry is disabled.
pub fn write_dispatch_record(cfg: &Config, rec: &DispatchRecord) -> Result<()> {
    if !cfg.telemetry {
        return Ok(());
    }

    let dir = telemetry_dir(cfg).ok_or_else(|| anyhow!("could not determine telemetry output path"))?;
    create_dir_all(&dir).with_context(|| format!("creating telemetry directory {}", dir.display()))?;

    // JSONL file
    let jsonl_path = dir.join(format!("fanout_dispatch_{}.jsonl", cfg.session_id));
    let mut jf = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&jsonl_path)
        .with_context(|| format!("opening telemetry file {}", jsonl_path.display()))?;
    let j = serde_json::to_string(rec)?;
    writeln!(jf, "{}", j)?;

    // Human-readable log
    let log_path = dir.join(format!("fanout_dispatch_{}.log", cfg.session_id));
    let mut lf = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening human log {}", log_path.display()))?;

    writeln!(lf, "================================================================")?;
    writeln!(lf, "SESSION   : {}", rec.session_id)?;
    writeln!(lf, "TIMESTAMP : {}", rec.timestamp)?;
    writeln!(lf, "ACTION    : {}", rec.action)?;
    writeln!(lf, "STATUS    : {}", rec.status)?;
    for v in &rec.verdicts {
        writeln!(
            lf,
            "CONNECTOR : {} -> {}",
            v.connector,
            if v.accepted { "accepted" } else { "rejected" }
        )?;
    }
    if !rec.details.is_empty() {
        writeln!(lf, "DETAILS   : {}", rec.details)?;
    }
    writeln!(lf)?;

    Ok(())
}
