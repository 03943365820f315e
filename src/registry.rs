//! Fixed-capacity job storage.
//!
//! [`JobRegistry`] preallocates [`JOB_CAPACITY`] slots up front and fills
//! them in order. A job's id is the slot it was written to, and the counter
//! of used slots only ever grows.

use serde::{Deserialize, Serialize};

use crate::error::{LifecycleError, QlanceError};
use crate::identity::Identity;
use crate::state_machine::{Job, JobStatus};

/// Maximum number of jobs the marketplace will ever hold.
pub const JOB_CAPACITY: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RegistrySnapshot", try_from = "RegistrySnapshot")]
pub struct JobRegistry {
    jobs: Box<[Job]>,
    counter: u64,
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl JobRegistry {
    pub fn new() -> Self {
        Self {
            jobs: vec![Job::default(); JOB_CAPACITY].into_boxed_slice(),
            counter: 0,
        }
    }

    /// Number of jobs ever posted.
    pub fn len(&self) -> u64 {
        self.counter
    }

    pub fn is_empty(&self) -> bool {
        self.counter == 0
    }

    pub fn capacity(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_full(&self) -> bool {
        self.counter as usize >= self.jobs.len()
    }

    /// Append a new Open job owned by `client` and return its id.
    pub fn create(&mut self, price: u64, client: Identity) -> Result<u64, LifecycleError> {
        if self.is_full() {
            return Err(LifecycleError::RegistryFull {
                capacity: self.capacity(),
            });
        }

        let job_id = self.counter;
        self.jobs[job_id as usize] = Job::new(job_id, price, client);
        self.counter += 1;
        Ok(job_id)
    }

    pub fn get(&self, job_id: u64) -> Option<&Job> {
        if job_id >= self.counter {
            return None;
        }
        self.jobs.get(job_id as usize)
    }

    /// Overwrite an existing record in one step. Only the lifecycle calls
    /// this, after it has validated the change against a copy of the record.
    pub(crate) fn replace(&mut self, job_id: u64, job: Job) -> Result<(), LifecycleError> {
        if job_id >= self.counter || job.job_id != job_id {
            return Err(LifecycleError::JobNotFound(job_id));
        }
        match self.jobs.get_mut(job_id as usize) {
            Some(slot) => {
                *slot = job;
                Ok(())
            }
            None => Err(LifecycleError::JobNotFound(job_id)),
        }
    }

    /// The posted jobs, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs[..self.counter as usize].iter()
    }
}

/// Serialized form: only the posted prefix of the slot array.
#[derive(Serialize, Deserialize)]
struct RegistrySnapshot {
    jobs: Vec<Job>,
}

impl From<JobRegistry> for RegistrySnapshot {
    fn from(registry: JobRegistry) -> Self {
        Self {
            jobs: registry.iter().copied().collect(),
        }
    }
}

impl TryFrom<RegistrySnapshot> for JobRegistry {
    type Error = QlanceError;

    fn try_from(snapshot: RegistrySnapshot) -> Result<Self, Self::Error> {
        if snapshot.jobs.len() > JOB_CAPACITY {
            return Err(QlanceError::Snapshot(format!(
                "{} jobs exceed capacity {JOB_CAPACITY}",
                snapshot.jobs.len()
            )));
        }

        let mut registry = JobRegistry::new();
        for (index, job) in snapshot.jobs.into_iter().enumerate() {
            if job.job_id != index as u64 {
                return Err(QlanceError::Snapshot(format!(
                    "job at index {index} has id {}",
                    job.job_id
                )));
            }
            if (job.status == JobStatus::Open) == job.has_worker() {
                return Err(QlanceError::Snapshot(format!(
                    "job {} is {} with worker {}",
                    job.job_id, job.status, job.worker_address
                )));
            }
            registry.jobs[index] = job;
            registry.counter += 1;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT: Identity = Identity([1; 32]);

    #[test]
    fn create_assigns_sequential_ids() {
        let mut registry = JobRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.create(100, CLIENT), Ok(0));
        assert_eq!(registry.create(200, CLIENT), Ok(1));
        assert_eq!(registry.len(), 2);

        let job = registry.get(1).unwrap();
        assert_eq!(job.job_id, 1);
        assert_eq!(job.price, 200);
        assert_eq!(job.status, JobStatus::Open);
        assert_eq!(job.worker_address, Identity::NULL);
    }

    #[test]
    fn get_past_counter_is_none() {
        let mut registry = JobRegistry::new();
        assert!(registry.get(0).is_none());
        registry.create(5, CLIENT).unwrap();
        assert!(registry.get(0).is_some());
        assert!(registry.get(1).is_none());
        assert!(registry.get(u64::MAX).is_none());
    }

    #[test]
    fn create_fails_at_capacity() {
        let mut registry = JobRegistry::new();
        for i in 0..JOB_CAPACITY as u64 {
            assert_eq!(registry.create(i, CLIENT), Ok(i));
        }
        assert!(registry.is_full());
        assert_eq!(
            registry.create(1, CLIENT),
            Err(LifecycleError::RegistryFull {
                capacity: JOB_CAPACITY
            })
        );
        assert_eq!(registry.len(), JOB_CAPACITY as u64);
    }

    #[test]
    fn replace_overwrites_in_place() {
        let mut registry = JobRegistry::new();
        registry.create(100, CLIENT).unwrap();

        let mut job = *registry.get(0).unwrap();
        job.status = JobStatus::Claimed;
        job.worker_address = Identity([2; 32]);
        registry.replace(0, job).unwrap();

        assert_eq!(registry.get(0), Some(&job));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn replace_rejects_unknown_or_mismatched_ids() {
        let mut registry = JobRegistry::new();
        registry.create(100, CLIENT).unwrap();
        let job = *registry.get(0).unwrap();

        assert_eq!(
            registry.replace(1, job),
            Err(LifecycleError::JobNotFound(1))
        );

        let mut moved = job;
        moved.job_id = 7;
        assert_eq!(
            registry.replace(0, moved),
            Err(LifecycleError::JobNotFound(0))
        );
        assert_eq!(registry.get(0), Some(&job));
    }

    #[test]
    fn snapshot_keeps_only_posted_jobs() {
        let mut registry = JobRegistry::new();
        registry.create(10, CLIENT).unwrap();
        registry.create(20, CLIENT).unwrap();

        let json = serde_json::to_value(&registry).unwrap();
        assert_eq!(json["jobs"].as_array().unwrap().len(), 2);

        let restored: JobRegistry = serde_json::from_value(json).unwrap();
        assert_eq!(restored, registry);
        assert_eq!(restored.capacity(), JOB_CAPACITY);
    }

    #[test]
    fn snapshot_rejects_gaps_in_ids() {
        let mut registry = JobRegistry::new();
        registry.create(10, CLIENT).unwrap();
        registry.create(20, CLIENT).unwrap();

        let mut json = serde_json::to_value(&registry).unwrap();
        json["jobs"][1]["job_id"] = 5.into();
        assert!(serde_json::from_value::<JobRegistry>(json).is_err());
    }

    #[test]
    fn snapshot_rejects_claimed_job_without_worker() {
        let mut registry = JobRegistry::new();
        registry.create(10, CLIENT).unwrap();
        let mut job = *registry.get(0).unwrap();
        job.status = JobStatus::Submitted;
        job.worker_address = Identity([2; 32]);
        registry.replace(0, job).unwrap();

        let mut json = serde_json::to_value(&registry).unwrap();
        assert!(serde_json::from_value::<JobRegistry>(json.clone()).is_ok());

        json["jobs"][0]["worker_address"] = "00".repeat(32).into();
        assert!(serde_json::from_value::<JobRegistry>(json).is_err());
    }

    #[test]
    fn snapshot_rejects_open_job_with_worker() {
        let mut registry = JobRegistry::new();
        registry.create(10, CLIENT).unwrap();

        let mut json = serde_json::to_value(&registry).unwrap();
        json["jobs"][0]["worker_address"] = "02".repeat(32).into();
        assert!(serde_json::from_value::<JobRegistry>(json).is_err());
    }
}
