use anyhow::Result;
use async_trait::async_trait;
use shared::domain::{ShiftOutcome, ShiftRequest};

/// `Ok(ShiftOutcome::Failed(_))` means the agent answered and refused; `Err(_)`
/// means the call never produced an answer. Implementations are not expected to
/// tolerate overlapping calls, which is why the controller single-flights them.
#[async_trait]
pub trait TimeShiftAgent: Send + Sync {
    async fn shift(&self, request: ShiftRequest) -> Result<ShiftOutcome>;
}
