//! cronvoy-client: boundary contracts for the remote scheduler service,
//! the platform application inventory, and the task-launching collaborator,
//! plus reqwest-backed implementations of the remote ones.
//!
//! Every remote operation may legitimately come back *absent* (no scheduler
//! service bound on the platform side), which is distinct from an empty
//! collection and from a transport error. Absent results are `Ok(None)`.

pub mod http;
mod wire;

use async_trait::async_trait;
use thiserror::Error;

use cronvoy_types::{ApplicationSummary, Job, JobHistory, JobListPage, JobSchedule, StagedTask};

/// Faults raised at the remote boundary.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("scheduler API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Contract of the platform's job/schedule API.
///
/// Retry and timeout policy live behind this trait, never in the engine.
#[async_trait]
pub trait SchedulerClient: Send + Sync {
    /// Create an executable job owned by the given application.
    async fn create_job(
        &self,
        application_id: &str,
        name: &str,
        command: &str,
    ) -> Result<Option<Job>, ClientError>;

    /// Delete a job; the remote side drops its triggers with it.
    async fn delete_job(&self, job_id: &str) -> Result<(), ClientError>;

    /// Attach a cron trigger to an existing job.
    async fn attach_schedule(
        &self,
        job_id: &str,
        expression: &str,
    ) -> Result<Option<JobSchedule>, ClientError>;

    /// Fetch one page of the job listing. Pages are 1-based.
    async fn list_jobs(&self, page: u32) -> Result<Option<JobListPage>, ClientError>;

    /// Fetch the triggers attached to a job.
    async fn list_schedules(&self, job_id: &str) -> Result<Vec<JobSchedule>, ClientError>;

    /// Kick off an ad-hoc run of a job outside its trigger.
    async fn execute_job(&self, job_id: &str) -> Result<(), ClientError>;

    /// Fetch the run history of a job, newest first as the service reports it.
    async fn list_job_histories(&self, job_id: &str) -> Result<Vec<JobHistory>, ClientError>;
}

/// Contract of the platform's application inventory.
#[async_trait]
pub trait AppInventory: Send + Sync {
    async fn list_applications(&self) -> Result<Vec<ApplicationSummary>, ClientError>;
}

/// Sibling collaborator that stages a task for launching and hands back the
/// launch command the remote job should carry.
pub trait TaskLauncher: Send + Sync {
    fn stage(&self, task: &StagedTask) -> String;
}

/// Default stager: the artifact reference is the invocation command and the
/// request's command-line arguments are appended to it.
#[derive(Debug, Default)]
pub struct ArtifactCommandLauncher;

impl TaskLauncher for ArtifactCommandLauncher {
    fn stage(&self, task: &StagedTask) -> String {
        if task.command_line_args.is_empty() {
            return task.artifact.clone();
        }
        let mut command = task.artifact.clone();
        for arg in &task.command_line_args {
            command.push(' ');
            command.push_str(arg);
        }
        command
    }
}
