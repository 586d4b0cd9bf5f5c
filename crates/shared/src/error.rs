use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShiftError {
    /// The agent received the request and refused it.
    #[error("{0}")]
    Rejected(String),
    /// The call to the agent itself broke before a verdict came back.
    #[error("{source:#}")]
    Transport { source: anyhow::Error },
    #[error("invalid shift parameters: {0}")]
    InvalidParameters(String),
}

impl ShiftError {
    pub fn transport(source: anyhow::Error) -> Self {
        Self::Transport { source }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Text shown to the user in the error notification.
    pub fn user_message(&self) -> String {
        format!("Time shift failed: {self}")
    }
}
