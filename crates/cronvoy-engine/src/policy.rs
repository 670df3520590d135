//! Schedule naming constraints, checked before any remote call is made.

use crate::error::SchedulerError;

/// Longest schedule name the remote service accepts.
pub const MAX_SCHEDULE_NAME_LENGTH: usize = 255;

/// Reject names the remote side would refuse, so creation stays fully
/// side-effect-free on this failure path.
pub(crate) fn check_schedule_name(name: &str) -> Result<(), SchedulerError> {
    let length = name.chars().count();
    if length > MAX_SCHEDULE_NAME_LENGTH {
        return Err(SchedulerError::NameTooLong {
            name: name.to_string(),
            length,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_name_at_limit() {
        let name = "x".repeat(MAX_SCHEDULE_NAME_LENGTH);
        assert!(check_schedule_name(&name).is_ok());
    }

    #[test]
    fn test_rejects_name_over_limit() {
        let name = "y".repeat(MAX_SCHEDULE_NAME_LENGTH + 1);
        let err = check_schedule_name(&name).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(&name));
        assert!(message.contains("has 256 characters"));
        assert!(message.contains("255 characters or less"));
    }
}
