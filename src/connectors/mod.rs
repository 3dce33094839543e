//! Reference connectors built by [`crate::core::kind::ConnectorKind`].
//!
//! Both are intentionally thin: they validate an action and keep a counter
//! so their side effects can be observed.

pub mod gym;
pub mod stateful;
