use std::sync::Arc;

use shared::{
    domain::{NotifyLevel, ShiftParameters, UiRegion},
    error::ShiftError,
};
use tokio::sync::watch;

pub trait UiHost: Send + Sync {
    /// `None` once the UI has been torn down; callers treat that as nothing to do.
    fn context(&self) -> Option<UiContext>;
    fn redraw(&self, regions: &[UiRegion]);
    fn notify(&self, level: NotifyLevel, message: &str);
}

#[derive(Debug, Clone)]
pub struct UiContext {
    pub current_frame: i32,
    pub parameters: ParameterStore,
}

/// Shared, observable home of the [`ShiftParameters`] the UI edits.
///
/// Clones share the same record. Readers get owned copies, so a value taken
/// with [`ParameterStore::snapshot`] never changes under its holder.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    inner: Arc<watch::Sender<ShiftParameters>>,
}

impl ParameterStore {
    pub fn new(initial: ShiftParameters) -> Self {
        let (tx, _) = watch::channel(initial);
        Self {
            inner: Arc::new(tx),
        }
    }

    pub fn snapshot(&self) -> ShiftParameters {
        *self.inner.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ShiftParameters> {
        self.inner.subscribe()
    }

    /// Applies a UI edit. The record is left untouched if the edited value is invalid.
    pub fn edit(
        &self,
        apply: impl FnOnce(&mut ShiftParameters),
    ) -> Result<ShiftParameters, ShiftError> {
        let mut next = self.snapshot();
        apply(&mut next);
        next.validate()?;
        self.inner.send_replace(next);
        Ok(next)
    }

    pub fn reset(&self, params: ShiftParameters) {
        self.inner.send_replace(params);
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(ShiftParameters::default())
    }
}

#[cfg(test)]
#[path = "tests/host_tests.rs"]
mod tests;
