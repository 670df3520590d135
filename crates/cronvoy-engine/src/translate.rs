//! Property translation: pulling the cron expression out of a request's
//! property bag, honoring both the current and the legacy key namespace.

use std::collections::HashMap;

use crate::error::SchedulerError;
use cronvoy_types::CRON_EXPRESSION_KEYS;

/// Look up the cron expression, checking candidate keys in priority order
/// (current namespace wins). A missing or blank expression is a malformed
/// request, not a scheduling failure.
pub(crate) fn cron_expression(
    properties: &HashMap<String, String>,
) -> Result<&str, SchedulerError> {
    CRON_EXPRESSION_KEYS
        .iter()
        .filter_map(|key| properties.get(*key))
        .map(String::as_str)
        .find(|value| !value.trim().is_empty())
        .ok_or(SchedulerError::MissingCronExpression)
}
