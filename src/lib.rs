//! fanout - broadcast one action to every registered connector and
//! reduce their verdicts into a single boolean.

pub mod connectors;
pub mod core;

pub use crate::core::config::{Config, FaultPolicy};
pub use crate::core::connector::Connector;
pub use crate::core::error::{ConnectorFault, DispatchError};
pub use crate::core::kind::ConnectorKind;
pub use crate::core::manager::{ConnectorManager, ConnectorVerdict, DispatchReport};
pub use crate::core::record::{Action, DataRecord};
