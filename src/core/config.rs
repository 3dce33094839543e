use anyhow::{anyhow, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// What a dispatch does when a connector returns an error instead of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultPolicy {
    /// Propagate the first fault; later connectors are not invoked.
    #[default]
    Abort,
    /// Invoke every connector, then report all faults together.
    Exhaustive,
}

impl FromStr for FaultPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(FaultPolicy::Abort),
            "exhaustive" => Ok(FaultPolicy::Exhaustive),
            other => Err(anyhow!(
                "unknown fault policy '{}' (expected 'abort' or 'exhaustive')",
                other
            )),
        }
    }
}

impl fmt::Display for FaultPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultPolicy::Abort => f.write_str("abort"),
            FaultPolicy::Exhaustive => f.write_str("exhaustive"),
        }
    }
}

/// Settings shared by the dispatcher, the reference connectors and the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub fault_policy: FaultPolicy,

    /// Session ID stamped into telemetry records.
    pub session_id: String,

    /// If true, every dispatch is appended to the telemetry files.
    pub telemetry: bool,

    /// Overrides the default telemetry directory.
    pub telemetry_dir: Option<PathBuf>,

    /// Size of the discrete action space used by the gym connector.
    pub gym_actions: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fault_policy: FaultPolicy::default(),
            session_id: format!("FANOUT-{}", Utc::now().format("%Y%m%d%H%M%S")),
            telemetry: false,
            telemetry_dir: None,
            gym_actions: 3,
        }
    }
}

impl Config {
    /// Loads config from environment variables if present.
    /// - FANOUT_FAULT_POLICY = "abort" | "exhaustive"
    /// - FANOUT_SESSION_ID = custom ID
    /// - FANOUT_TELEMETRY = "1" enables telemetry
    /// - FANOUT_TELEMETRY_DIR = telemetry output directory
    /// - FANOUT_GYM_ACTIONS = action space size (> 0)
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::load`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();

        if let Some(v) = lookup("FANOUT_FAULT_POLICY") {
            cfg.fault_policy = v.parse()?;
        }

        if let Some(id) = lookup("FANOUT_SESSION_ID") {
            if !id.trim().is_empty() {
                cfg.session_id = id;
            }
        }

        if let Some(v) = lookup("FANOUT_TELEMETRY") {
            if v == "1" || v.eq_ignore_ascii_case("true") {
                cfg.telemetry = true;
            }
        }

        if let Some(dir) = lookup("FANOUT_TELEMETRY_DIR") {
            if !dir.trim().is_empty() {
                cfg.telemetry_dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(v) = lookup("FANOUT_GYM_ACTIONS") {
            let n: i64 = v
                .trim()
                .parse()
                .map_err(|e| anyhow!("FANOUT_GYM_ACTIONS '{}' is not an integer: {}", v, e))?;
            if n <= 0 {
                return Err(anyhow!("FANOUT_GYM_ACTIONS must be > 0, got {}", n));
            }
            cfg.gym_actions = n;
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let cfg = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.fault_policy, FaultPolicy::Abort);
        assert!(!cfg.telemetry);
        assert!(cfg.telemetry_dir.is_none());
        assert_eq!(cfg.gym_actions, 3);
        assert!(cfg.session_id.starts_with("FANOUT-"));
    }

    #[test]
    fn reads_every_variable() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("FANOUT_FAULT_POLICY", "Exhaustive"),
            ("FANOUT_SESSION_ID", "run-42"),
            ("FANOUT_TELEMETRY", "true"),
            ("FANOUT_TELEMETRY_DIR", "/tmp/fanout"),
            ("FANOUT_GYM_ACTIONS", "5"),
        ]))
        .unwrap();
        assert_eq!(cfg.fault_policy, FaultPolicy::Exhaustive);
        assert_eq!(cfg.session_id, "run-42");
        assert!(cfg.telemetry);
        assert_eq!(cfg.telemetry_dir, Some(PathBuf::from("/tmp/fanout")));
        assert_eq!(cfg.gym_actions, 5);
    }

    #[test]
    fn blank_session_id_keeps_default() {
        let cfg = Config::from_lookup(lookup_from(&[("FANOUT_SESSION_ID", "  ")])).unwrap();
        assert!(cfg.session_id.starts_with("FANOUT-"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_lookup(lookup_from(&[("FANOUT_FAULT_POLICY", "retry")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("FANOUT_GYM_ACTIONS", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("FANOUT_GYM_ACTIONS", "many")])).is_err());
    }
}
