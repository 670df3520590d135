//! The reconciliation engine: schedule, unschedule, list, execute.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::SchedulerError;
use crate::policy::check_schedule_name;
use crate::resolver::AppDirectory;
use crate::translate::cron_expression;
use cronvoy_client::{AppInventory, SchedulerClient, TaskLauncher};
use cronvoy_types::{
    Job, JobHistory, LEGACY_CRON_EXPRESSION_KEY, ScheduleInfo, ScheduleRequest, StagedTask,
};

/// Reconciles logical schedules against the remote scheduler service.
///
/// Each public operation is a strictly sequential chain of awaits; no step
/// runs concurrently with another step of the same invocation, because each
/// depends on the previous result. No state is kept across calls, so
/// concurrent invocations only race at the remote service, which arbitrates
/// name uniqueness itself.
pub struct Scheduler {
    client: Arc<dyn SchedulerClient>,
    inventory: Arc<dyn AppInventory>,
    launcher: Arc<dyn TaskLauncher>,
}

impl Scheduler {
    pub fn new(
        client: Arc<dyn SchedulerClient>,
        inventory: Arc<dyn AppInventory>,
        launcher: Arc<dyn TaskLauncher>,
    ) -> Self {
        Self {
            client,
            inventory,
            launcher,
        }
    }

    /// Create a schedule: validate, create the backing job, attach the cron
    /// trigger. If the trigger attach fails the freshly created job is
    /// deleted again so no untriggered orphan accumulates remotely.
    pub async fn schedule(&self, request: &ScheduleRequest) -> Result<(), SchedulerError> {
        check_schedule_name(&request.schedule_name)?;
        let expression = cron_expression(&request.properties)?.to_string();
        cronvoy_cron::validate(&expression).map_err(|source| SchedulerError::InvalidCron {
            schedule_name: request.schedule_name.clone(),
            source,
        })?;

        let directory = AppDirectory::fetch(self.inventory.as_ref()).await?;
        let application_id = directory.id_of(&request.definition.name).ok_or_else(|| {
            SchedulerError::CreateFailed {
                schedule_name: request.schedule_name.clone(),
                source: format!(
                    "application '{}' is not present in the platform inventory",
                    request.definition.name
                )
                .into(),
            }
        })?;

        let command = self.launcher.stage(&StagedTask::from_request(request));

        let job = self
            .client
            .create_job(application_id, &request.schedule_name, &command)
            .await?
            .ok_or(SchedulerError::ServiceUnavailable)?;
        debug!(job_id = %job.id, schedule = %request.schedule_name, "job created");

        let attached = match self.client.attach_schedule(&job.id, &expression).await {
            Ok(Some(schedule)) => schedule,
            Ok(None) => {
                self.rollback_job(&job).await;
                return Err(SchedulerError::CreateFailed {
                    schedule_name: request.schedule_name.clone(),
                    source: Box::new(SchedulerError::ServiceUnavailable),
                });
            }
            Err(cause) => {
                self.rollback_job(&job).await;
                return Err(SchedulerError::CreateFailed {
                    schedule_name: request.schedule_name.clone(),
                    source: Box::new(cause),
                });
            }
        };

        info!(
            schedule = %request.schedule_name,
            trigger = %attached.id,
            expression = %attached.expression,
            "schedule created"
        );
        Ok(())
    }

    /// Remove the schedule addressed by `schedule_name`. Deleting the job
    /// implicitly removes its trigger on the remote side.
    pub async fn unschedule(&self, schedule_name: &str) -> Result<(), SchedulerError> {
        let job = self
            .find_job_by_name(schedule_name)
            .await?
            .ok_or_else(|| SchedulerError::NotFound {
                schedule_name: schedule_name.to_string(),
            })?;
        self.client.delete_job(&job.id).await?;
        info!(schedule = %schedule_name, "schedule removed");
        Ok(())
    }

    /// All schedules visible on the remote service, in service order.
    pub async fn list(&self) -> Result<Vec<ScheduleInfo>, SchedulerError> {
        self.list_filtered(None).await
    }

    /// Schedules whose owning application matches `application_name`.
    pub async fn list_for_app(
        &self,
        application_name: &str,
    ) -> Result<Vec<ScheduleInfo>, SchedulerError> {
        self.list_filtered(Some(application_name)).await
    }

    /// Run history of a schedule's job, as the remote service reports it.
    pub async fn history(&self, schedule_name: &str) -> Result<Vec<JobHistory>, SchedulerError> {
        let job = self
            .find_job_by_name(schedule_name)
            .await?
            .ok_or_else(|| SchedulerError::NotFound {
                schedule_name: schedule_name.to_string(),
            })?;
        Ok(self.client.list_job_histories(&job.id).await?)
    }

    /// Trigger an immediate ad-hoc run of a schedule's job.
    pub async fn execute(&self, schedule_name: &str) -> Result<(), SchedulerError> {
        let job = self
            .find_job_by_name(schedule_name)
            .await?
            .ok_or_else(|| SchedulerError::NotFound {
                schedule_name: schedule_name.to_string(),
            })?;
        self.client.execute_job(&job.id).await?;
        info!(schedule = %schedule_name, "ad-hoc run requested");
        Ok(())
    }

    async fn list_filtered(
        &self,
        application_name: Option<&str>,
    ) -> Result<Vec<ScheduleInfo>, SchedulerError> {
        let jobs = self.fetch_all_jobs().await?;
        // An unreachable inventory must not fail the whole listing any more
        // than a single missing application does; with no directory every
        // job is omitted the same way.
        let directory = match AppDirectory::fetch(self.inventory.as_ref()).await {
            Ok(directory) => directory,
            Err(cause) => {
                warn!("application inventory unreachable, omitting all jobs: {cause}");
                AppDirectory::empty()
            }
        };

        let mut result = Vec::with_capacity(jobs.len());
        for job in jobs {
            // A job whose application vanished from the inventory must not
            // break visibility of the other schedules; it is skipped.
            let Some(task_definition_name) = directory.name_of(&job.application_id) else {
                debug!(job = %job.name, "owning application not in inventory, skipping");
                continue;
            };
            if let Some(filter) = application_name {
                if task_definition_name != filter {
                    continue;
                }
            }

            let schedules = self.client.list_schedules(&job.id).await?;
            let mut schedule_properties = HashMap::new();
            // At most one trigger per job is assumed; a job without one is
            // still listed, with empty properties.
            if let Some(schedule) = schedules.first() {
                schedule_properties.insert(
                    LEGACY_CRON_EXPRESSION_KEY.to_string(),
                    schedule.expression.clone(),
                );
            }
            result.push(ScheduleInfo {
                schedule_name: job.name,
                task_definition_name: task_definition_name.to_string(),
                schedule_properties,
            });
        }
        Ok(result)
    }

    /// Fetch every page of the remote job listing and concatenate them in
    /// service order. A single page is not guaranteed to hold the full set.
    async fn fetch_all_jobs(&self) -> Result<Vec<Job>, SchedulerError> {
        let first = self
            .client
            .list_jobs(1)
            .await?
            .ok_or(SchedulerError::ServiceUnavailable)?;
        let total_pages = first.total_pages;
        let mut jobs = first.jobs;
        for page in 2..=total_pages {
            let next = self
                .client
                .list_jobs(page)
                .await?
                .ok_or(SchedulerError::ServiceUnavailable)?;
            jobs.extend(next.jobs);
        }
        Ok(jobs)
    }

    /// Lookup seam for the schedule handle. A schedule is currently
    /// addressed by its backing job's name; widening this to a dedicated
    /// schedule id only touches this function.
    async fn find_job_by_name(&self, name: &str) -> Result<Option<Job>, SchedulerError> {
        Ok(self
            .fetch_all_jobs()
            .await?
            .into_iter()
            .find(|job| job.name == name))
    }

    /// Best-effort compensation after a failed trigger attach. Logged, not
    /// raised: the original failure is what the caller needs to see.
    async fn rollback_job(&self, job: &Job) {
        warn!(job_id = %job.id, job = %job.name, "trigger attach failed, deleting orphaned job");
        if let Err(cause) = self.client.delete_job(&job.id).await {
            warn!(job_id = %job.id, "compensating job delete failed: {cause}");
        }
    }
}
