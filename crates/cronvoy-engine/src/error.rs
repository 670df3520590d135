//! Error taxonomy for the reconciliation engine.
//!
//! Malformed requests are rejected before any remote call; remote faults are
//! always surfaced, never retried here. The one exception to "surface
//! everything" is the best-effort compensating delete after a failed
//! trigger attach, which is logged instead of raised so it cannot mask the
//! original cause.

use thiserror::Error;

use crate::policy::MAX_SCHEDULE_NAME_LENGTH;
use cronvoy_client::ClientError;
use cronvoy_cron::CronError;
use cronvoy_types::{CRON_EXPRESSION_KEY, LEGACY_CRON_EXPRESSION_KEY};

#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The request carried no cron expression under either key namespace.
    /// A caller error, distinct from any remote scheduling failure.
    #[error(
        "schedule request properties must define a cron expression under '{}' or '{}'",
        CRON_EXPRESSION_KEY,
        LEGACY_CRON_EXPRESSION_KEY
    )]
    MissingCronExpression,

    /// The cron expression failed the trigger grammar.
    #[error("Failed to create schedule '{schedule_name}': {source}")]
    InvalidCron {
        schedule_name: String,
        #[source]
        source: CronError,
    },

    #[error(
        "Schedule can not be created because its name '{name}' has {length} characters. \
         Schedule name length must be {} characters or less",
        MAX_SCHEDULE_NAME_LENGTH
    )]
    NameTooLong { name: String, length: usize },

    /// Job creation or trigger attach failed; for the latter the orphaned
    /// job has already been deleted best-effort.
    #[error("Failed to create schedule '{schedule_name}': {source}")]
    CreateFailed {
        schedule_name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to unschedule schedule {schedule_name} does not exist.")]
    NotFound { schedule_name: String },

    /// The remote client reported an absent response: no scheduler service
    /// is bound. The message is load-bearing; clients match on it.
    #[error("Scheduler Service returned a null response.")]
    ServiceUnavailable,

    #[error(transparent)]
    Client(#[from] ClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_unavailable_message_is_exact() {
        assert_eq!(
            SchedulerError::ServiceUnavailable.to_string(),
            "Scheduler Service returned a null response."
        );
    }

    #[test]
    fn test_not_found_message_names_schedule() {
        let err = SchedulerError::NotFound {
            schedule_name: "test-job-name-3".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to unschedule schedule test-job-name-3 does not exist."
        );
    }

    #[test]
    fn test_missing_cron_message_names_both_keys() {
        let message = SchedulerError::MissingCronExpression.to_string();
        assert!(message.contains(CRON_EXPRESSION_KEY));
        assert!(message.contains(LEGACY_CRON_EXPRESSION_KEY));
    }

    #[test]
    fn test_invalid_cron_carries_diagnostic() {
        let err = SchedulerError::InvalidCron {
            schedule_name: "test-schedule".into(),
            source: CronError::IllegalCharacters {
                token: "FOO".into(),
            },
        };
        assert!(
            err.to_string()
                .contains("Illegal characters for this position: 'FOO'")
        );
    }
}
