use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ShiftError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameType {
    #[default]
    Control,
    Position,
    Both,
}

impl FrameType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Control => "control",
            Self::Position => "position",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for FrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameType {
    type Err = ShiftError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "control" => Ok(Self::Control),
            "position" => Ok(Self::Position),
            "both" => Ok(Self::Both),
            other => Err(ShiftError::InvalidParameters(format!(
                "unknown frame type '{other}'"
            ))),
        }
    }
}

/// Editable state of a pending time shift, as bound to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShiftParameters {
    pub frame_type: FrameType,
    pub start: i32,
    pub end: i32,
    pub displacement: i32,
}

impl ShiftParameters {
    pub fn reset_at(frame_type: FrameType, frame: i32) -> Self {
        Self {
            frame_type,
            start: frame,
            end: frame,
            displacement: 0,
        }
    }

    /// `start <= end` is deliberately not checked; the user may still be dragging.
    pub fn validate(&self) -> Result<(), ShiftError> {
        if self.start < 0 {
            return Err(ShiftError::InvalidParameters(format!(
                "start frame must be non-negative, got {}",
                self.start
            )));
        }
        if self.end < 0 {
            return Err(ShiftError::InvalidParameters(format!(
                "end frame must be non-negative, got {}",
                self.end
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRequest {
    pub frame_type: FrameType,
    pub interval: (i32, i32),
    pub displacement: i32,
}

impl From<ShiftParameters> for ShiftRequest {
    fn from(params: ShiftParameters) -> Self {
        Self {
            frame_type: params.frame_type,
            interval: (params.start, params.end),
            displacement: params.displacement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftOutcome {
    Applied,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftPhase {
    #[default]
    Idle,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiRegion {
    View3d,
    DopesheetEditor,
}

/// Surfaces that display the shift interval and must be redrawn on every transition.
pub const SHIFT_REGIONS: [UiRegion; 2] = [UiRegion::View3d, UiRegion::DopesheetEditor];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotifyLevel {
    Info,
    Error,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
