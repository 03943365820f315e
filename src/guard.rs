//! Caller authorization for job transitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::state_machine::Job;

/// Which stored identity a transition is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The identity that claimed the job.
    Worker,
    /// The identity that posted the job.
    Client,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Worker => write!(f, "worker"),
            Role::Client => write!(f, "client"),
        }
    }
}

/// Stateless check that the invocator holds `role` on a job.
pub struct AuthorizationGuard;

impl AuthorizationGuard {
    pub fn permits(role: Role, job: &Job, caller: &Identity) -> bool {
        let required = match role {
            Role::Worker => &job.worker_address,
            Role::Client => &job.client_address,
        };
        required == caller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::JobStatus;

    const CLIENT: Identity = Identity([1; 32]);
    const WORKER: Identity = Identity([2; 32]);
    const STRANGER: Identity = Identity([3; 32]);

    fn claimed_job() -> Job {
        let mut job = Job::new(0, 100, CLIENT);
        job.worker_address = WORKER;
        job.status = JobStatus::Claimed;
        job
    }

    #[test]
    fn worker_role_matches_only_worker() {
        let job = claimed_job();
        assert!(AuthorizationGuard::permits(Role::Worker, &job, &WORKER));
        assert!(!AuthorizationGuard::permits(Role::Worker, &job, &CLIENT));
        assert!(!AuthorizationGuard::permits(Role::Worker, &job, &STRANGER));
    }

    #[test]
    fn client_role_matches_only_client() {
        let job = claimed_job();
        assert!(AuthorizationGuard::permits(Role::Client, &job, &CLIENT));
        assert!(!AuthorizationGuard::permits(Role::Client, &job, &WORKER));
        assert!(!AuthorizationGuard::permits(Role::Client, &job, &STRANGER));
    }

    #[test]
    fn null_caller_matches_unclaimed_worker_slot() {
        // The guard is a plain equality check; keeping NULL callers away from
        // unclaimed jobs is the status check's job, not the guard's.
        let job = Job::new(0, 100, CLIENT);
        assert!(AuthorizationGuard::permits(Role::Worker, &job, &Identity::NULL));
    }
}
