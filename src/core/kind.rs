use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::connectors::gym::GymConnector;
use crate::connectors::stateful::StatefulConnector;
use crate::core::config::Config;
use crate::core::connector::Connector;

/// Known connector variants. Only used to construct connectors; dispatch
/// itself goes through the [`Connector`] trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectorKind {
    #[serde(rename = "stateful")]
    Stateful,
    #[serde(rename = "openai-gym")]
    OpenAiGym,
}

impl ConnectorKind {
    pub const ALL: [ConnectorKind; 2] = [ConnectorKind::Stateful, ConnectorKind::OpenAiGym];

    pub fn tag(self) -> &'static str {
        match self {
            ConnectorKind::Stateful => "stateful",
            ConnectorKind::OpenAiGym => "openai-gym",
        }
    }

    /// Build a fresh connector of this kind.
    pub fn build(self, cfg: &Config) -> Box<dyn Connector> {
        match self {
            ConnectorKind::Stateful => Box::new(StatefulConnector::default()),
            ConnectorKind::OpenAiGym => Box::new(GymConnector::new(cfg.gym_actions)),
        }
    }
}

impl FromStr for ConnectorKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        ConnectorKind::ALL
            .into_iter()
            .find(|k| k.tag().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let tags: Vec<&str> = ConnectorKind::ALL.iter().map(|k| k.tag()).collect();
                anyhow!("unknown connector kind '{}' (expected one of: {})", wanted, tags.join(", "))
            })
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
