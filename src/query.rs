//! Read-only views over the job registry.

use serde::Serialize;

use crate::registry::JobRegistry;
use crate::state_machine::Job;

/// The public slice of a job returned by lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct JobView {
    pub job_id: u64,
    pub price: u64,
    pub status: u8,
}

impl JobView {
    /// What `lookup` returns for an unknown id. Bit-identical to a real job 0
    /// posted with price 0 that is still Open.
    pub const NOT_FOUND: JobView = JobView {
        job_id: 0,
        price: 0,
        status: 0,
    };
}

impl From<&Job> for JobView {
    fn from(job: &Job) -> Self {
        Self {
            job_id: job.job_id,
            price: job.price,
            status: job.status.as_u8(),
        }
    }
}

pub struct QueryService<'a> {
    registry: &'a JobRegistry,
}

impl<'a> QueryService<'a> {
    pub fn new(registry: &'a JobRegistry) -> Self {
        Self { registry }
    }

    pub fn count(&self) -> u64 {
        self.registry.len()
    }

    /// Ledger-facing lookup; unknown ids yield [`JobView::NOT_FOUND`].
    pub fn lookup(&self, job_id: u64) -> JobView {
        self.find(job_id).unwrap_or(JobView::NOT_FOUND)
    }

    /// Like [`lookup`](Self::lookup), but tells absence apart from job 0.
    pub fn find(&self, job_id: u64) -> Option<JobView> {
        self.registry.get(job_id).map(JobView::from)
    }
}
