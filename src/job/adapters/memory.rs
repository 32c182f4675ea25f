//! Process-local job store.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use crate::job::{
    domain::{Job, JobId, JobStatus, StatusUpdate, UserId},
    ports::{JobStore, JobStoreError, JobStoreResult},
};

/// Thread-safe in-memory job store. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobStore {
    jobs: Arc<RwLock<HashMap<JobId, Job>>>,
}

impl InMemoryJobStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(err: &PoisonError<T>) -> JobStoreError {
    JobStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn create(&self, job: Job) -> JobStoreResult<Job> {
        let mut jobs = self.jobs.write().map_err(|err| poisoned(&err))?;
        if jobs.contains_key(&job.id()) {
            return Err(JobStoreError::Duplicate(job.id()));
        }
        jobs.insert(job.id(), job.clone());
        Ok(job)
    }

    async fn update_status(&self, id: JobId, update: StatusUpdate) -> JobStoreResult<Job> {
        let mut jobs = self.jobs.write().map_err(|err| poisoned(&err))?;
        let job = jobs.get_mut(&id).ok_or(JobStoreError::NotFound(id))?;
        job.apply(update)?;
        Ok(job.clone())
    }

    async fn get(&self, id: JobId) -> JobStoreResult<Option<Job>> {
        let jobs = self.jobs.read().map_err(|err| poisoned(&err))?;
        Ok(jobs.get(&id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        limit: usize,
        offset: usize,
    ) -> JobStoreResult<Vec<Job>> {
        let jobs = self.jobs.read().map_err(|err| poisoned(&err))?;
        let mut owned: Vec<&Job> = jobs
            .values()
            .filter(|job| job.user_id() == Some(user_id))
            .collect();
        owned.sort_by_key(|job| Reverse(job.created_at()));
        Ok(owned
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn status_counts(&self) -> JobStoreResult<BTreeMap<JobStatus, usize>> {
        let jobs = self.jobs.read().map_err(|err| poisoned(&err))?;
        let mut counts = BTreeMap::new();
        for job in jobs.values() {
            *counts.entry(job.status()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
