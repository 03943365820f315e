//! The ledger-facing contract interface.
//!
//! [`Qlance`] exposes the marketplace as seven fixed-width operations. Read
//! functions take only their input; procedures also take the [`Invocation`]
//! the host built for the call. Every procedure failure is reported as
//! [`STATUS_FAILED`] with no further detail.

use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::lifecycle::JobLifecycle;

pub const STATUS_OK: u8 = 0;
pub const STATUS_FAILED: u8 = 1;

/// Per-call context supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    /// The identity that signed the transaction carrying this call.
    pub invocator: Identity,
}

impl Invocation {
    pub fn new(invocator: Identity) -> Self {
        Self { invocator }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GetJobsCountOutput {
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GetJobInput {
    pub job_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GetJobOutput {
    pub job_id: u64,
    pub price: u64,
    pub status: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PostJobInput {
    pub price: u64,
}

/// `job_id` is 0 both for the very first job and when the registry is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PostJobOutput {
    pub job_id: u64,
}

/// Input of ClaimJob, SubmitWork, ApproveWork and RejectWork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct JobInput {
    pub job_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusOutput {
    pub status: u8,
}

impl StatusOutput {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

impl<E> From<Result<(), E>> for StatusOutput {
    fn from(result: Result<(), E>) -> Self {
        Self {
            status: if result.is_ok() {
                STATUS_OK
            } else {
                STATUS_FAILED
            },
        }
    }
}

/// Contract state as replicated on every node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Qlance {
    lifecycle: JobLifecycle,
}

impl Qlance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lifecycle(&self) -> &JobLifecycle {
        &self.lifecycle
    }

    pub fn get_jobs_count(&self) -> GetJobsCountOutput {
        GetJobsCountOutput {
            count: self.lifecycle.query().count(),
        }
    }

    pub fn get_job(&self, input: GetJobInput) -> GetJobOutput {
        let view = self.lifecycle.query().lookup(input.job_id);
        GetJobOutput {
            job_id: view.job_id,
            price: view.price,
            status: view.status,
        }
    }

    pub fn post_job(&mut self, inv: &Invocation, input: PostJobInput) -> PostJobOutput {
        PostJobOutput {
            job_id: self
                .lifecycle
                .post(input.price, &inv.invocator)
                .unwrap_or(0),
        }
    }

    pub fn claim_job(&mut self, inv: &Invocation, input: JobInput) -> StatusOutput {
        self.lifecycle.claim(input.job_id, &inv.invocator).into()
    }

    pub fn submit_work(&mut self, inv: &Invocation, input: JobInput) -> StatusOutput {
        self.lifecycle.submit(input.job_id, &inv.invocator).into()
    }

    pub fn approve_work(&mut self, inv: &Invocation, input: JobInput) -> StatusOutput {
        self.lifecycle.approve(input.job_id, &inv.invocator).into()
    }

    pub fn reject_work(&mut self, inv: &Invocation, input: JobInput) -> StatusOutput {
        self.lifecycle.reject(input.job_id, &inv.invocator).into()
    }
}
