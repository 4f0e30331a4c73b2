// SPDX-License-Identifier: GPL-3.0-only
use crate::models::action::SessionAction;
use crate::models::status::SessionStatus;

/// Errors raised by the session core and its models
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Cannot {action} while session is {from}")]
    InvalidTransition {
        from: SessionStatus,
        action: SessionAction,
    },

    #[error("Precondition violated for {action}: {reason}")]
    PreconditionViolated {
        action: SessionAction,
        reason: &'static str,
    },

    #[error("Confidence {0} is outside [0, 1]")]
    InvalidConfidence(f32),

    #[error("Timing value `{field}` must be greater than zero")]
    InvalidTiming { field: &'static str },
}
