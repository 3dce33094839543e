use anyhow::Result;
use std::cell::RefCell;
use std::rc::Rc;

use crate::core::record::{Action, DataRecord};

/// Common trait every connector must implement.
pub trait Connector {
    /// Human-friendly name used in reports and error context.
    fn name(&self) -> &str;

    /// Apply `action` against `record`.
    ///
    /// `Ok(true)` accepts the action, `Ok(false)` rejects it. An `Err` is a
    /// fault; what happens next is up to the dispatcher's fault policy.
    fn apply_action(&mut self, action: Action, record: &DataRecord) -> Result<bool>;
}

/// Registrable handle to a connector owned elsewhere.
///
/// Lets the same connector object be registered more than once, and lets the
/// owner inspect its state after dispatching.
pub struct SharedConnector<C: Connector> {
    name: String,
    inner: Rc<RefCell<C>>,
}

impl<C: Connector> SharedConnector<C> {
    pub fn new(inner: &Rc<RefCell<C>>) -> Self {
        let name = inner.borrow().name().to_string();
        Self {
            name,
            inner: Rc::clone(inner),
        }
    }
}

impl<C: Connector> Connector for SharedConnector<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply_action(&mut self, action: Action, record: &DataRecord) -> Result<bool> {
        self.inner.borrow_mut().apply_action(action, record)
    }
}
