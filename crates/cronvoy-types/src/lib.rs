use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ──────────────────── Property Keys ────────────────────

/// Current key under which a schedule request carries its cron expression.
pub const CRON_EXPRESSION_KEY: &str = "deployer.cron.expression";

/// Legacy scheduler-prefixed key for the same property. Still accepted on
/// incoming requests; also the key under which `ScheduleInfo` reports the
/// expression back to callers.
pub const LEGACY_CRON_EXPRESSION_KEY: &str = "scheduler.cron.expression";

/// Candidate keys for the cron expression, checked in priority order.
pub const CRON_EXPRESSION_KEYS: [&str; 2] = [CRON_EXPRESSION_KEY, LEGACY_CRON_EXPRESSION_KEY];

// ──────────────────── Request Types ────────────────────

/// Logical identity of the task to be scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDefinition {
    /// Task name; doubles as the owning application's name on the platform.
    pub name: String,
    /// Static task parameters.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub parameters: HashMap<String, String>,
}

impl TaskDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: HashMap::new(),
        }
    }
}

/// A request to create a recurring, cron-triggered invocation of a task.
///
/// Immutable once constructed. The cron expression travels in `properties`
/// under [`CRON_EXPRESSION_KEY`] (or [`LEGACY_CRON_EXPRESSION_KEY`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Logical task identity.
    pub definition: TaskDefinition,
    /// Request properties (cron expression and friends).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, String>,
    /// Command-line arguments appended to the staged launch command.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command_line_args: Vec<String>,
    /// Name of the schedule to create; also used as the remote job name.
    pub schedule_name: String,
    /// Reference to the executable artifact (path or URL).
    pub artifact: String,
}

// ──────────────────── Remote Primitives ────────────────────

/// Remote executable-unit primitive backing a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Platform-assigned opaque id.
    pub id: String,
    /// Owning application's id in the platform inventory.
    pub application_id: String,
    /// Job name, unique within the job namespace.
    pub name: String,
    /// Launch command. May be empty when staging produced none.
    #[serde(default)]
    pub command: String,
}

/// Trigger kind attached to a job. Only cron is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionType {
    Cron,
}

/// The cron binding attached to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSchedule {
    pub id: String,
    pub job_id: String,
    /// Cron expression (5-field).
    pub expression: String,
    pub expression_type: ExpressionType,
    pub enabled: bool,
}

/// One past or pending run of a job, as reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHistory {
    pub id: String,
    pub job_id: String,
    /// Remote execution state (e.g. "SUCCEEDED", "FAILED", "PENDING").
    pub state: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Service-provided detail for this run.
    #[serde(default)]
    pub message: String,
}

/// One page of the remote job listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListPage {
    pub jobs: Vec<Job>,
    /// Total page count reported by the service; page numbers are 1-based.
    pub total_pages: u32,
}

// ──────────────────── Projections ────────────────────

/// Externally visible view of one schedule, reconstructed on every listing.
///
/// `schedule_properties` holds the cron expression under
/// [`LEGACY_CRON_EXPRESSION_KEY`], or is empty when the job has no trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInfo {
    pub schedule_name: String,
    /// Resolved owning application name (not id).
    pub task_definition_name: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub schedule_properties: HashMap<String, String>,
}

// ──────────────────── Inventory Types ────────────────────

/// Application summary from the platform inventory. Read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSummary {
    pub id: String,
    pub name: String,
    pub instances: u32,
    pub memory_limit: u64,
    pub disk_quota: u64,
    pub requested_state: String,
    pub running_instances: u32,
}

/// Staging request handed to the task launcher before job creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagedTask {
    pub definition: TaskDefinition,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub command_line_args: Vec<String>,
    pub artifact: String,
}

impl StagedTask {
    /// Derive the staging request from a schedule request.
    pub fn from_request(request: &ScheduleRequest) -> Self {
        Self {
            definition: request.definition.clone(),
            properties: request.properties.clone(),
            command_line_args: request.command_line_args.clone(),
            artifact: request.artifact.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_request_serde() {
        let mut properties = HashMap::new();
        properties.insert(CRON_EXPRESSION_KEY.to_string(), "0/5 * ? * *".to_string());
        let request = ScheduleRequest {
            definition: TaskDefinition::new("test-application-1"),
            properties,
            command_line_args: vec!["--verbose".into()],
            schedule_name: "test-schedule".into(),
            artifact: "demo-0.0.1-SNAPSHOT.jar".into(),
        };
        let json = serde_json::to_string(&request).unwrap();
        let parsed: ScheduleRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.schedule_name, "test-schedule");
        assert_eq!(parsed.properties[CRON_EXPRESSION_KEY], "0/5 * ? * *");
        assert_eq!(parsed.command_line_args, vec!["--verbose".to_string()]);
    }

    #[test]
    fn test_job_defaults_empty_command() {
        let json = r#"{"id":"j-1","application_id":"app-1","name":"nightly"}"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert!(job.command.is_empty());
    }

    #[test]
    fn test_expression_type_serde() {
        let json = serde_json::to_string(&ExpressionType::Cron).unwrap();
        assert_eq!(json, "\"cron\"");
    }

    #[test]
    fn test_key_priority_order() {
        // Current namespace must win over the legacy one.
        assert_eq!(CRON_EXPRESSION_KEYS[0], CRON_EXPRESSION_KEY);
        assert_eq!(CRON_EXPRESSION_KEYS[1], LEGACY_CRON_EXPRESSION_KEY);
    }

    #[test]
    fn test_staged_task_from_request() {
        let request = ScheduleRequest {
            definition: TaskDefinition::new("bar"),
            properties: HashMap::new(),
            command_line_args: vec!["TestArg".into()],
            schedule_name: "testschedule".into(),
            artifact: "demo.jar".into(),
        };
        let staged = StagedTask::from_request(&request);
        assert_eq!(staged.definition.name, "bar");
        assert_eq!(staged.command_line_args, vec!["TestArg".to_string()]);
    }
}
