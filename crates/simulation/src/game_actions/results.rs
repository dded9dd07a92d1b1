use std::fmt;

use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::placement::PlacementError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Encode, Decode)]
pub enum ActionResult {
    Success,
    /// The action succeeded but the caller should see a warning
    /// (e.g. a refresh rate that had to be clamped).
    SuccessWithWarning(String),
    Error(ActionError),
}

impl ActionResult {
    /// Returns `true` for both `Success` and `SuccessWithWarning`.
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success | ActionResult::SuccessWithWarning(_))
    }

    /// Extract the warning string if present.
    pub fn warning(&self) -> Option<&str> {
        match self {
            ActionResult::SuccessWithWarning(w) => Some(w.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Encode, Decode)]
pub enum ActionError {
    OutOfBounds,
    NothingToPlace,
    LevelLocked { required: u32, current: u32 },
    InsufficientFunds { cost: i64, available: i64 },
    /// Hyperspeed is already running or still cooling down.
    HyperSpeedUnavailable,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::OutOfBounds => write!(f, "position is outside the map"),
            ActionError::NothingToPlace => write!(f, "nothing to place"),
            ActionError::LevelLocked { required, .. } => write!(f, "requires level {required}"),
            ActionError::InsufficientFunds { .. } => write!(f, "insufficient funds"),
            ActionError::HyperSpeedUnavailable => write!(f, "hyperspeed is not available yet"),
        }
    }
}

impl From<PlacementError> for ActionError {
    fn from(err: PlacementError) -> Self {
        match err {
            PlacementError::OutOfBounds { .. } => ActionError::OutOfBounds,
            PlacementError::NothingToPlace => ActionError::NothingToPlace,
            PlacementError::LevelLocked { required, current } => {
                ActionError::LevelLocked { required, current }
            }
            PlacementError::InsufficientFunds { cost, available } => {
                ActionError::InsufficientFunds { cost, available }
            }
        }
    }
}
