use std::sync::Arc;

use shared::{
    domain::{NotifyLevel, ShiftOutcome, ShiftParameters, ShiftPhase, ShiftRequest, SHIFT_REGIONS},
    error::ShiftError,
};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::{
    agent::TimeShiftAgent,
    guard::{FlightPermit, SingleFlight},
    host::UiHost,
};

pub const SHIFT_SUCCESS_MESSAGE: &str = "Time shift success";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoContext,
    NotActive,
}

#[derive(Debug)]
#[must_use]
pub enum CommitOutcome {
    Applied,
    Failed(ShiftError),
    /// Another commit still holds the guard; no agent call was made.
    AlreadyInFlight,
    Skipped(SkipReason),
}

impl CommitOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

pub struct ShiftController {
    host: Arc<dyn UiHost>,
    agent: Arc<dyn TimeShiftAgent>,
    guard: SingleFlight,
    phase: watch::Sender<ShiftPhase>,
}

impl ShiftController {
    pub fn new(host: Arc<dyn UiHost>, agent: Arc<dyn TimeShiftAgent>) -> Self {
        let (phase, _) = watch::channel(ShiftPhase::Idle);
        Self {
            host,
            agent,
            guard: SingleFlight::new(),
            phase,
        }
    }

    pub fn phase(&self) -> ShiftPhase {
        *self.phase.borrow()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<ShiftPhase> {
        self.phase.subscribe()
    }

    /// True while an agent call is outstanding. The phase stays `Active` during
    /// that time, so this is what the commit control should be bound to.
    pub fn is_committing(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn subscribe_busy(&self) -> watch::Receiver<bool> {
        self.guard.subscribe()
    }

    pub fn begin(&self) {
        let Some(ctx) = self.host.context() else {
            debug!("no UI context; ignoring time shift begin");
            return;
        };

        let frame_type = ctx.parameters.snapshot().frame_type;
        ctx.parameters
            .reset(ShiftParameters::reset_at(frame_type, ctx.current_frame));
        self.phase.send_replace(ShiftPhase::Active);
        self.host.redraw(&SHIFT_REGIONS);
        info!(frame = ctx.current_frame, %frame_type, "time shift started");
    }

    pub fn cancel(&self) {
        let previous = self.phase.send_replace(ShiftPhase::Idle);
        self.host.redraw(&SHIFT_REGIONS);
        if previous == ShiftPhase::Active {
            info!("time shift cancelled");
        }
    }

    pub async fn commit(&self) -> CommitOutcome {
        let Some(ctx) = self.host.context() else {
            debug!("no UI context; ignoring time shift commit");
            return CommitOutcome::Skipped(SkipReason::NoContext);
        };
        if self.phase() != ShiftPhase::Active {
            debug!("no time shift in progress; ignoring commit");
            return CommitOutcome::Skipped(SkipReason::NotActive);
        }

        // Taken before the first await so UI edits during the call cannot leak in.
        let request = ShiftRequest::from(ctx.parameters.snapshot());

        let permit = match self.guard.try_enter() {
            Ok(permit) => permit,
            Err(err) => {
                warn!(%err, "ignoring duplicate time shift commit");
                return CommitOutcome::AlreadyInFlight;
            }
        };
        let _scope = CommitScope {
            permit: Some(permit),
            phase: &self.phase,
        };

        let (start, end) = request.interval;
        info!(
            frame_type = %request.frame_type,
            start,
            end,
            displacement = request.displacement,
            "requesting time shift"
        );

        let result = match self.agent.shift(request).await {
            Ok(ShiftOutcome::Applied) => Ok(()),
            Ok(ShiftOutcome::Failed(message)) => Err(ShiftError::Rejected(message)),
            Err(source) => Err(ShiftError::transport(source)),
        };

        match result {
            Ok(()) => {
                self.host.redraw(&SHIFT_REGIONS);
                self.host.notify(NotifyLevel::Info, SHIFT_SUCCESS_MESSAGE);
                info!(frame_type = %request.frame_type, "time shift applied");
                CommitOutcome::Applied
            }
            Err(err) => {
                error!(
                    error = ?err,
                    transport = err.is_transport(),
                    frame_type = %request.frame_type,
                    start,
                    end,
                    displacement = request.displacement,
                    "failed to shift time"
                );
                self.host.redraw(&SHIFT_REGIONS);
                self.host.notify(NotifyLevel::Error, &err.user_message());
                CommitOutcome::Failed(err)
            }
        }
    }
}

/// Releases the permit and then returns the phase to idle on every exit path,
/// including a panicking host callback or the commit future being dropped.
struct CommitScope<'a> {
    permit: Option<FlightPermit<'a>>,
    phase: &'a watch::Sender<ShiftPhase>,
}

impl Drop for CommitScope<'_> {
    fn drop(&mut self) {
        drop(self.permit.take());
        self.phase.send_replace(ShiftPhase::Idle);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
