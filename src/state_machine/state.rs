use std::fmt;

use serde::{Deserialize, Serialize};

use super::job::JobStatus;
use crate::guard::Role;

/// A requested move of a job from one status to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Claim,
    Submit,
    Approve,
    Reject,
}

impl Transition {
    /// The stored identity the caller must match, if any. Anyone may claim.
    pub fn required_role(self) -> Option<Role> {
        match self {
            Transition::Claim => None,
            Transition::Submit => Some(Role::Worker),
            Transition::Approve | Transition::Reject => Some(Role::Client),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Claim => write!(f, "claim"),
            Transition::Submit => write!(f, "submit"),
            Transition::Approve => write!(f, "approve"),
            Transition::Reject => write!(f, "reject"),
        }
    }
}

/// The job transition table.
///
/// ```text
///   Open → Claimed → Submitted → Approved
///                             ↘ Rejected
/// ```
///
/// Approved and Rejected are terminal.
pub struct StateMachine;

impl StateMachine {
    /// Compute the status a job moves to, or `None` if `transition` is not
    /// allowed from `status`. Pure: callers decide whether to apply it.
    pub fn next(status: JobStatus, transition: Transition) -> Option<JobStatus> {
        if status.is_terminal() {
            return None;
        }

        match (status, transition) {
            (JobStatus::Open, Transition::Claim) => Some(JobStatus::Claimed),
            (JobStatus::Claimed, Transition::Submit) => Some(JobStatus::Submitted),
            (JobStatus::Submitted, Transition::Approve) => Some(JobStatus::Approved),
            (JobStatus::Submitted, Transition::Reject) => Some(JobStatus::Rejected),
            _ => None,
        }
    }
}
