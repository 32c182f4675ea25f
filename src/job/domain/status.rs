//! Job status state machine.

use super::ParseJobStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a generation job.
///
/// ```text
/// generating -> generating | deploying | failed
/// deploying  -> ready | failed
/// ready      -> expired
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Orchestration or synthesis in progress.
    Generating,
    /// Source produced, deployment in progress.
    Deploying,
    /// Deployed and reachable.
    Ready,
    /// A stage failed.
    Failed,
    /// Retired by the expiry sweep.
    Expired,
}

impl JobStatus {
    /// Every status in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Generating,
        Self::Deploying,
        Self::Ready,
        Self::Failed,
        Self::Expired,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generating => "generating",
            Self::Deploying => "deploying",
            Self::Ready => "ready",
            Self::Failed => "failed",
            Self::Expired => "expired",
        }
    }

    /// Returns whether the pipeline is finished with the job.
    ///
    /// `ready` is terminal for the pipeline; only the expiry sweep moves it
    /// on.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Failed | Self::Expired)
    }

    /// Returns whether `self -> to` is allowed.
    ///
    /// `generating -> generating` records the orchestration without a
    /// status change.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (
                Self::Generating,
                Self::Generating | Self::Deploying | Self::Failed
            ) | (Self::Deploying, Self::Ready | Self::Failed)
                | (Self::Ready, Self::Expired)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for JobStatus {
    type Error = ParseJobStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ParseJobStatusError(value.to_owned()))
    }
}
