use anyhow::Result;
use std::collections::BTreeSet;

use crate::core::connector::Connector;
use crate::core::record::{Action, DataRecord};

/// Accepts actions from an allowed set and remembers the last one accepted.
#[derive(Debug, Default)]
pub struct StatefulConnector {
    /// `None` accepts every action.
    allowed: Option<BTreeSet<Action>>,
    last_action: Option<Action>,
    accepted: u64,
    rejected: u64,
}

impl StatefulConnector {
    pub fn with_allowed<I>(actions: I) -> Self
    where
        I: IntoIterator<Item = Action>,
    {
        Self {
            allowed: Some(actions.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}

impl Connector for StatefulConnector {
    fn name(&self) -> &str {
        "stateful"
    }

    fn apply_action(&mut self, action: Action, _record: &DataRecord) -> Result<bool> {
        let ok = self
            .allowed
            .as_ref()
            .map_or(true, |set| set.contains(&action));

        if ok {
            self.last_action = Some(action);
            self.accepted += 1;
        } else {
            self.rejected += 1;
        }
        Ok(ok)
    }
}
