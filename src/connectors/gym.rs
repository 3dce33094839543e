use anyhow::Result;

use crate::core::connector::Connector;
use crate::core::record::{Action, DataRecord};

/// Simulation-environment connector over a discrete action space `0..n`.
#[derive(Debug)]
pub struct GymConnector {
    n_actions: i64,
    steps: u64,
}

impl GymConnector {
    pub fn new(n_actions: i64) -> Self {
        Self {
            n_actions,
            steps: 0,
        }
    }

    pub fn n_actions(&self) -> i64 {
        self.n_actions
    }

    /// Number of accepted actions so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl Default for GymConnector {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Connector for GymConnector {
    fn name(&self) -> &str {
        "openai-gym"
    }

    fn apply_action(&mut self, action: Action, _record: &DataRecord) -> Result<bool> {
        if !(0..self.n_actions).contains(&action.id()) {
            return Ok(false);
        }
        self.steps += 1;
        Ok(true)
    }
}
