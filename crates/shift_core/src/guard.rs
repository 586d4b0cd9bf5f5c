//! Single-flight guard around the agent call.
//!
//! Acquisition is exclusive-or-fail: a second caller gets [`AlreadyInFlight`]
//! immediately instead of queueing behind the first. The busy flag lives in a
//! `watch` channel so the UI can grey out its commit control while a request
//! is outstanding.

use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a time shift request is already in flight")]
pub struct AlreadyInFlight;

#[derive(Debug)]
pub struct SingleFlight {
    busy: watch::Sender<bool>,
}

impl SingleFlight {
    pub fn new() -> Self {
        let (busy, _) = watch::channel(false);
        Self { busy }
    }

    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    pub fn try_enter(&self) -> Result<FlightPermit<'_>, AlreadyInFlight> {
        // Check-and-set happens under the channel's lock.
        let acquired = self.busy.send_if_modified(|busy| {
            if *busy {
                false
            } else {
                *busy = true;
                true
            }
        });
        if !acquired {
            return Err(AlreadyInFlight);
        }

        debug!("single-flight guard acquired");
        Ok(FlightPermit { busy: &self.busy })
    }
}

impl Default for SingleFlight {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use = "dropping the permit releases the guard immediately"]
#[derive(Debug)]
pub struct FlightPermit<'a> {
    busy: &'a watch::Sender<bool>,
}

impl Drop for FlightPermit<'_> {
    fn drop(&mut self) {
        self.busy.send_replace(false);
        debug!("single-flight guard released");
    }
}

#[cfg(test)]
#[path = "tests/guard_tests.rs"]
mod tests;
