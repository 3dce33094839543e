use anyhow::Result;
use serde::Serialize;

use crate::core::config::FaultPolicy;
use crate::core::connector::Connector;
use crate::core::error::{ConnectorFault, DispatchError};
use crate::core::logger;
use crate::core::record::{Action, DataRecord};

/// One connector's answer within a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectorVerdict {
    pub connector: String,
    pub accepted: bool,
}

/// Outcome of a dispatch: the combined flag plus each verdict in call order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub valid: bool,
    pub verdicts: Vec<ConnectorVerdict>,
}

/// Ordered, append-only set of connectors that every action is broadcast to.
#[derive(Default)]
pub struct ConnectorManager {
    connectors: Vec<Box<dyn Connector>>,
    policy: FaultPolicy,
}

impl ConnectorManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: FaultPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FaultPolicy {
        self.policy
    }

    /// Append a connector. Duplicates are allowed and each is called.
    pub fn register(&mut self, connector: Box<dyn Connector>) {
        self.connectors.push(connector);
    }

    pub fn add_connector(&mut self, connector: Box<dyn Connector>) {
        self.register(connector);
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    /// Connector names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.connectors.iter().map(|c| c.name()).collect()
    }

    /// Broadcast `action` and `record` to every connector; true only if all accept.
    ///
    /// A rejection never stops the broadcast. With no connectors registered
    /// the result is `true`.
    pub fn dispatch(&mut self, action: Action, record: &DataRecord) -> Result<bool> {
        Ok(self.dispatch_report(action, record)?.valid)
    }

    pub fn apply_action(&mut self, action: Action, record: &DataRecord) -> Result<bool> {
        self.dispatch(action, record)
    }

    /// Like [`ConnectorManager::dispatch`], but keeps every connector's verdict.
    pub fn dispatch_report(&mut self, action: Action, record: &DataRecord) -> Result<DispatchReport> {
        let mut valid = true;
        let mut verdicts = Vec::with_capacity(self.connectors.len());
        let mut faults = Vec::new();
        let policy = self.policy;

        for (position, connector) in self.connectors.iter_mut().enumerate() {
            match connector.apply_action(action, record) {
                Ok(accepted) => {
                    if !accepted {
                        valid = false;
                    }
                    verdicts.push(ConnectorVerdict {
                        connector: connector.name().to_string(),
                        accepted,
                    });
                }
                Err(error) => match policy {
                    FaultPolicy::Abort => {
                        return Err(error.context(format!(
                            "connector #{} '{}' failed on action {}",
                            position,
                            connector.name(),
                            action
                        )));
                    }
                    FaultPolicy::Exhaustive => {
                        logger::warn(&format!(
                            "connector #{} '{}' failed on action {}: {:#}",
                            position,
                            connector.name(),
                            action,
                            error
                        ));
                        faults.push(ConnectorFault {
                            position,
                            connector: connector.name().to_string(),
                            error,
                        });
                    }
                },
            }
        }

        if !faults.is_empty() {
            return Err(DispatchError::ConnectorFaults { valid, faults }.into());
        }

        Ok(DispatchReport { valid, verdicts })
    }
}
