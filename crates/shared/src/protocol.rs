use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{FrameType, ShiftOutcome, ShiftRequest};

/// Path the HTTP shifting agent serves, relative to its base URL.
pub const TIME_SHIFT_PATH: &str = "/api/time-shift";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeShiftRequest {
    pub request_id: Uuid,
    pub frame_type: FrameType,
    pub start: i32,
    pub end: i32,
    pub displacement: i32,
}

impl TimeShiftRequest {
    pub fn new(request: ShiftRequest) -> Self {
        let (start, end) = request.interval;
        Self {
            request_id: Uuid::new_v4(),
            frame_type: request.frame_type,
            start,
            end,
            displacement: request.displacement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeShiftResponse {
    pub ok: bool,
    #[serde(default)]
    pub msg: String,
}

impl From<TimeShiftResponse> for ShiftOutcome {
    fn from(value: TimeShiftResponse) -> Self {
        if value.ok {
            ShiftOutcome::Applied
        } else {
            ShiftOutcome::Failed(value.msg)
        }
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
