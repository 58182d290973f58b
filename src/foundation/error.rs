/// Crate-wide result alias.
pub type GrooveResult<T> = Result<T, GrooveError>;

#[derive(thiserror::Error, Debug)]
/// Errors produced while normalizing, disentangling or synthesizing wheels.
///
/// Every variant is fatal for the wheel it concerns: no partial or approximated
/// geometry is ever returned alongside an error.
pub enum GrooveError {
    /// No valid split of a channel's triggers across two wheels exists.
    #[error("infeasible disentanglement for channel '{channel}': {reason}")]
    Infeasible {
        /// Channel whose triggers could not be separated.
        channel: String,
        /// Human-readable cause.
        reason: String,
    },

    /// Input that cannot describe a wheel at all (empty, duplicated, oversized).
    #[error("degenerate input: {0}")]
    Degenerate(String),

    /// A value outside its documented range.
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON (de)serialization failure at the crate boundary.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other boundary failure (IO, SVG output).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GrooveError {
    /// Build an [`GrooveError::Infeasible`] error for `channel`.
    pub fn infeasible(channel: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Infeasible {
            channel: channel.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`GrooveError::Degenerate`] error.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::Degenerate(msg.into())
    }

    /// Build a [`GrooveError::Validation`] error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GrooveError::Serde`] error.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Channel named by an infeasibility error, if any.
    pub fn channel(&self) -> Option<&str> {
        match self {
            Self::Infeasible { channel, .. } => Some(channel),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
