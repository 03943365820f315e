//! The job lifecycle: validates and applies transitions against the registry.
//!
//! Every mutating call follows the same shape: copy the stored record, check
//! the transition table and the caller against that copy, and only then
//! write the updated record back. A refused call never touches state.

use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;
use crate::guard::AuthorizationGuard;
use crate::identity::Identity;
use crate::query::QueryService;
use crate::registry::JobRegistry;
use crate::state_machine::{JobStatus, StateMachine, Transition};

/// Marketplace state plus the rules for changing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobLifecycle {
    registry: JobRegistry,
    total_jobs_completed: u64,
}

impl JobLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    pub fn query(&self) -> QueryService<'_> {
        QueryService::new(&self.registry)
    }

    /// Number of jobs that reached Approved.
    pub fn total_jobs_completed(&self) -> u64 {
        self.total_jobs_completed
    }

    /// Post a new Open job on behalf of `caller`.
    pub fn post(&mut self, price: u64, caller: &Identity) -> Result<u64, LifecycleError> {
        match self.registry.create(price, *caller) {
            Ok(job_id) => {
                tracing::info!(job_id, price, client = %caller, "job posted");
                Ok(job_id)
            }
            Err(e) => {
                tracing::debug!(error = %e, "post refused");
                Err(e)
            }
        }
    }

    pub fn claim(&mut self, job_id: u64, caller: &Identity) -> Result<(), LifecycleError> {
        self.apply(job_id, caller, Transition::Claim).map(|_| ())
    }

    pub fn submit(&mut self, job_id: u64, caller: &Identity) -> Result<(), LifecycleError> {
        self.apply(job_id, caller, Transition::Submit).map(|_| ())
    }

    pub fn approve(&mut self, job_id: u64, caller: &Identity) -> Result<(), LifecycleError> {
        self.apply(job_id, caller, Transition::Approve).map(|_| ())
    }

    pub fn reject(&mut self, job_id: u64, caller: &Identity) -> Result<(), LifecycleError> {
        self.apply(job_id, caller, Transition::Reject).map(|_| ())
    }

    /// Validate `transition` for `caller` on a copy of the job, then commit it.
    pub fn apply(
        &mut self,
        job_id: u64,
        caller: &Identity,
        transition: Transition,
    ) -> Result<JobStatus, LifecycleError> {
        let result = self.try_apply(job_id, caller, transition);
        match &result {
            Ok(status) => {
                tracing::info!(job_id, %transition, %status, caller = %caller, "job transitioned");
            }
            Err(e) => {
                tracing::debug!(job_id, %transition, caller = %caller, error = %e, "transition refused");
            }
        }
        result
    }

    fn try_apply(
        &mut self,
        job_id: u64,
        caller: &Identity,
        transition: Transition,
    ) -> Result<JobStatus, LifecycleError> {
        let snapshot = *self
            .registry
            .get(job_id)
            .ok_or(LifecycleError::JobNotFound(job_id))?;

        let next = StateMachine::next(snapshot.status, transition).ok_or(
            LifecycleError::InvalidTransition {
                job_id,
                status: snapshot.status,
                transition,
            },
        )?;

        if let Some(role) = transition.required_role()
            && !AuthorizationGuard::permits(role, &snapshot, caller)
        {
            return Err(LifecycleError::Unauthorized { job_id, role });
        }

        let mut updated = snapshot;
        updated.status = next;
        if transition == Transition::Claim {
            updated.worker_address = *caller;
        }

        self.registry.replace(job_id, updated)?;
        if next == JobStatus::Approved {
            self.total_jobs_completed += 1;
        }
        Ok(next)
    }
}
