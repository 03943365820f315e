use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// Lifecycle status of a job. The discriminants are the on-wire `status`
/// byte returned by `GetJob`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum JobStatus {
    #[default]
    Open = 0,
    Claimed = 1,
    Submitted = 2,
    Approved = 3,
    Rejected = 4,
}

impl JobStatus {
    /// Approved and Rejected have no outgoing transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Approved | JobStatus::Rejected)
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for JobStatus {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(JobStatus::Open),
            1 => Ok(JobStatus::Claimed),
            2 => Ok(JobStatus::Submitted),
            3 => Ok(JobStatus::Approved),
            4 => Ok(JobStatus::Rejected),
            other => Err(other),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Open => write!(f, "OPEN"),
            JobStatus::Claimed => write!(f, "CLAIMED"),
            JobStatus::Submitted => write!(f, "SUBMITTED"),
            JobStatus::Approved => write!(f, "APPROVED"),
            JobStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// A single posting in the marketplace.
///
/// Every field is fixed-width so records can be copied out of the registry
/// as a read snapshot and written back whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Job {
    /// Equal to the record's index in the registry.
    pub job_id: u64,
    pub price: u64,
    pub client_address: Identity,
    /// [`Identity::NULL`] until the job is claimed.
    pub worker_address: Identity,
    pub status: JobStatus,
    /// Always zero: no time source is wired into the contract.
    pub created_at: u32,
}

impl Job {
    pub fn new(job_id: u64, price: u64, client_address: Identity) -> Self {
        Self {
            job_id,
            price,
            client_address,
            worker_address: Identity::NULL,
            status: JobStatus::Open,
            created_at: 0,
        }
    }

    pub fn has_worker(&self) -> bool {
        !self.worker_address.is_null()
    }
}
