//! Serde payloads for the scheduler and platform HTTP APIs, kept separate
//! from the domain types so wire renames never leak into the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cronvoy_types::{ApplicationSummary, ExpressionType, Job, JobHistory, JobSchedule};

#[derive(Debug, Serialize)]
pub(crate) struct CreateJobBody<'a> {
    pub name: &'a str,
    pub command: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct AttachScheduleBody<'a> {
    pub enabled: bool,
    pub expression: &'a str,
    pub expression_type: ExpressionType,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobResource {
    pub guid: String,
    pub app_guid: String,
    pub name: String,
    #[serde(default)]
    pub command: String,
}

impl From<JobResource> for Job {
    fn from(r: JobResource) -> Self {
        Job {
            id: r.guid,
            application_id: r.app_guid,
            name: r.name,
            command: r.command,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScheduleResource {
    pub guid: String,
    pub job_guid: String,
    pub expression: String,
    pub expression_type: ExpressionType,
    pub enabled: bool,
}

impl From<ScheduleResource> for JobSchedule {
    fn from(r: ScheduleResource) -> Self {
        JobSchedule {
            id: r.guid,
            job_id: r.job_guid,
            expression: r.expression,
            expression_type: r.expression_type,
            enabled: r.enabled,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryResource {
    pub guid: String,
    pub job_guid: String,
    pub state: String,
    #[serde(default)]
    pub scheduled_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub execution_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub execution_end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub message: String,
}

impl From<HistoryResource> for JobHistory {
    fn from(r: HistoryResource) -> Self {
        JobHistory {
            id: r.guid,
            job_id: r.job_guid,
            state: r.state,
            scheduled_at: r.scheduled_time,
            started_at: r.execution_start_time,
            finished_at: r.execution_end_time,
            message: r.message,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryListResponse {
    #[serde(default)]
    pub resources: Vec<HistoryResource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Pagination {
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobListResponse {
    #[serde(default)]
    pub resources: Vec<JobResource>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScheduleListResponse {
    #[serde(default)]
    pub resources: Vec<ScheduleResource>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppResource {
    pub guid: String,
    pub name: String,
    #[serde(default)]
    pub instances: u32,
    #[serde(default)]
    pub memory_in_mb: u64,
    #[serde(default)]
    pub disk_in_mb: u64,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub running_instances: u32,
}

impl From<AppResource> for ApplicationSummary {
    fn from(r: AppResource) -> Self {
        ApplicationSummary {
            id: r.guid,
            name: r.name,
            instances: r.instances,
            memory_limit: r.memory_in_mb,
            disk_quota: r.disk_in_mb,
            requested_state: r.state,
            running_instances: r.running_instances,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppListResponse {
    #[serde(default)]
    pub resources: Vec<AppResource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_resource_into_domain() {
        let json = r#"{"guid":"test-job-1","app_guid":"test-application-id-1","name":"test-job-name-1","command":"test-command"}"#;
        let resource: JobResource = serde_json::from_str(json).unwrap();
        let job: Job = resource.into();
        assert_eq!(job.id, "test-job-1");
        assert_eq!(job.application_id, "test-application-id-1");
        assert_eq!(job.command, "test-command");
    }

    #[test]
    fn test_schedule_resource_into_domain() {
        let json = r#"{"guid":"schedule-1234","job_guid":"test-job-1","expression":"0/5 * ? * *","expression_type":"cron","enabled":true}"#;
        let resource: ScheduleResource = serde_json::from_str(json).unwrap();
        let schedule: JobSchedule = resource.into();
        assert_eq!(schedule.job_id, "test-job-1");
        assert_eq!(schedule.expression_type, ExpressionType::Cron);
        assert!(schedule.enabled);
    }

    #[test]
    fn test_job_list_response_defaults() {
        let json = r#"{"resources":[],"pagination":{"total_pages":3}}"#;
        let page: JobListResponse = serde_json::from_str(json).unwrap();
        assert!(page.resources.is_empty());
        assert_eq!(page.pagination.total_pages, 3);
    }

    #[test]
    fn test_history_resource_into_domain() {
        let json = r#"{"guid":"history-1","job_guid":"test-job-1","state":"SUCCEEDED",
            "scheduled_time":"2026-08-24T06:00:00Z","execution_start_time":"2026-08-24T06:00:01Z",
            "execution_end_time":"2026-08-24T06:00:09Z","message":"exit code 0"}"#;
        let resource: HistoryResource = serde_json::from_str(json).unwrap();
        let history: JobHistory = resource.into();
        assert_eq!(history.state, "SUCCEEDED");
        assert_eq!(history.job_id, "test-job-1");
        assert!(history.finished_at.unwrap() > history.started_at.unwrap());
    }

    #[test]
    fn test_app_resource_missing_optionals() {
        let json = r#"{"guid":"test-application-id-1","name":"test-application-1"}"#;
        let app: AppResource = serde_json::from_str(json).unwrap();
        let summary: ApplicationSummary = app.into();
        assert_eq!(summary.name, "test-application-1");
        assert_eq!(summary.instances, 0);
    }
}
