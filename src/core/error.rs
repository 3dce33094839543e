use std::fmt;
use thiserror::Error;

/// A connector that returned an error instead of a verdict.
#[derive(Debug)]
pub struct ConnectorFault {
    /// Registration index of the connector.
    pub position: usize,
    pub connector: String,
    pub error: anyhow::Error,
}

impl fmt::Display for ConnectorFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} '{}': {:#}", self.position, self.connector, self.error)
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Raised under the exhaustive fault policy, after every connector ran.
    /// `valid` is the AND of the connectors that did answer.
    #[error("{} connector(s) faulted during dispatch: {}", .faults.len(), join_faults(.faults))]
    ConnectorFaults {
        valid: bool,
        faults: Vec<ConnectorFault>,
    },
}

fn join_faults(faults: &[ConnectorFault]) -> String {
    faults
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
