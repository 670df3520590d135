//! cronvoy-cron: Cron expression validation.
//!
//! Validates candidate expressions against the trigger grammar the remote
//! scheduler service accepts: five fields (minute, hour, day-of-month,
//! month, day-of-week) with `*`, `?` in the day fields, lists, ranges,
//! steps, and three-letter month/day names. Pure functions, no I/O.

use thiserror::Error;

/// Why an expression was rejected, pointing at the first illegal token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CronError {
    #[error("Cron expression must consist of 5 fields (found {found} in \"{expression}\")")]
    WrongFieldCount { expression: String, found: usize },
    #[error("Illegal characters for this position: '{token}'")]
    IllegalCharacters { token: String },
    #[error("Value {value} out of bounds ({min}-{max}) for the {field} field")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("'?' is only allowed in the day-of-month and day-of-week fields")]
    MisplacedQuestionMark,
    #[error("Step value must be a positive number in '{token}'")]
    BadStep { token: String },
    #[error("Unexpected token '{token}' in the {field} field")]
    BadToken { field: &'static str, token: String },
}

struct FieldSpec {
    name: &'static str,
    min: u32,
    max: u32,
    /// Three-letter names accepted in this field, mapped by position.
    names: &'static [&'static str],
    allows_question: bool,
}

const FIELDS: [FieldSpec; 5] = [
    FieldSpec {
        name: "minute",
        min: 0,
        max: 59,
        names: &[],
        allows_question: false,
    },
    FieldSpec {
        name: "hour",
        min: 0,
        max: 23,
        names: &[],
        allows_question: false,
    },
    FieldSpec {
        name: "day-of-month",
        min: 1,
        max: 31,
        names: &[],
        allows_question: true,
    },
    FieldSpec {
        name: "month",
        min: 1,
        max: 12,
        names: &[
            "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
        ],
        allows_question: false,
    },
    FieldSpec {
        name: "day-of-week",
        min: 0,
        max: 7,
        names: &["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"],
        allows_question: true,
    },
];

/// Validate a cron expression against the remote trigger grammar.
///
/// Returns the first problem found, scanning fields left to right so the
/// diagnostic names the earliest illegal token.
pub fn validate(expression: &str) -> Result<(), CronError> {
    let fields: Vec<&str> = expression.split_whitespace().collect();

    for (field, spec) in fields.iter().zip(FIELDS.iter()) {
        validate_field(field, spec)?;
    }

    if fields.len() != FIELDS.len() {
        return Err(CronError::WrongFieldCount {
            expression: expression.to_string(),
            found: fields.len(),
        });
    }
    Ok(())
}

fn validate_field(field: &str, spec: &FieldSpec) -> Result<(), CronError> {
    for item in field.split(',') {
        validate_item(item, spec)?;
    }
    Ok(())
}

/// One comma-separated item: `*`, `?`, a value, a range, or any of those
/// with a `/step` suffix.
fn validate_item(item: &str, spec: &FieldSpec) -> Result<(), CronError> {
    if item == "?" {
        if spec.allows_question {
            return Ok(());
        }
        return Err(CronError::MisplacedQuestionMark);
    }

    let (base, step) = match item.split_once('/') {
        Some((base, step)) => (base, Some(step)),
        None => (item, None),
    };

    if let Some(step) = step {
        match step.parse::<u32>() {
            Ok(n) if n > 0 => {}
            _ => {
                return Err(CronError::BadStep {
                    token: item.to_string(),
                });
            }
        }
    }

    if base == "*" {
        return Ok(());
    }

    match base.split_once('-') {
        Some((lo, hi)) => {
            let lo = parse_value(lo, spec)?;
            let hi = parse_value(hi, spec)?;
            if lo > hi {
                return Err(CronError::BadToken {
                    field: spec.name,
                    token: base.to_string(),
                });
            }
            Ok(())
        }
        None => parse_value(base, spec).map(|_| ()),
    }
}

fn parse_value(token: &str, spec: &FieldSpec) -> Result<u32, CronError> {
    if token.is_empty() {
        return Err(CronError::BadToken {
            field: spec.name,
            token: token.to_string(),
        });
    }

    if token.chars().all(|c| c.is_ascii_digit()) {
        let value: u32 = token.parse().map_err(|_| CronError::BadToken {
            field: spec.name,
            token: token.to_string(),
        })?;
        if value < spec.min || value > spec.max {
            return Err(CronError::OutOfRange {
                field: spec.name,
                value,
                min: spec.min,
                max: spec.max,
            });
        }
        return Ok(value);
    }

    // Alphabetic tokens must match a three-letter name valid for this field.
    let upper = token.to_ascii_uppercase();
    if let Some(pos) = spec.names.iter().position(|n| *n == upper) {
        return Ok(spec.min + pos as u32);
    }

    // Mirror the platform grammar's diagnostic: quote the first three
    // characters of the offending token.
    Err(CronError::IllegalCharacters {
        token: token.chars().take(3).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_standard_expressions() {
        for expr in [
            "0/5 * ? * *",
            "0/6 * ? * *",
            "* * * * *",
            "0 12 * * MON-FRI",
            "15,45 8-18 1,15 JAN-JUN *",
            "30 4 ? * SUN",
            "*/10 0-23/2 * * ?",
        ] {
            assert!(validate(expr).is_ok(), "expected '{expr}' to be valid");
        }
    }

    #[test]
    fn test_rejects_garbage_with_truncated_token() {
        let err = validate("FOOBAD").unwrap_err();
        assert_eq!(
            err,
            CronError::IllegalCharacters {
                token: "FOO".into()
            }
        );
        assert_eq!(
            err.to_string(),
            "Illegal characters for this position: 'FOO'"
        );
    }

    #[test]
    fn test_rejects_wrong_field_count() {
        let err = validate("* * * *").unwrap_err();
        assert!(matches!(err, CronError::WrongFieldCount { found: 4, .. }));
        let err = validate("* * * * * *").unwrap_err();
        assert!(matches!(err, CronError::WrongFieldCount { found: 6, .. }));
        assert!(matches!(
            validate("").unwrap_err(),
            CronError::WrongFieldCount { found: 0, .. }
        ));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let err = validate("61 * * * *").unwrap_err();
        assert!(matches!(
            err,
            CronError::OutOfRange {
                field: "minute",
                value: 61,
                ..
            }
        ));
        assert!(validate("* 24 * * *").is_err());
        assert!(validate("* * 32 * *").is_err());
        assert!(validate("* * * 13 *").is_err());
        assert!(validate("* * * * 8").is_err());
    }

    #[test]
    fn test_question_mark_only_in_day_fields() {
        assert!(validate("* * ? * *").is_ok());
        assert!(validate("* * * * ?").is_ok());
        assert_eq!(
            validate("? * * * *").unwrap_err(),
            CronError::MisplacedQuestionMark
        );
    }

    #[test]
    fn test_rejects_zero_step() {
        let err = validate("0/0 * * * *").unwrap_err();
        assert!(matches!(err, CronError::BadStep { .. }));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = validate("* * * * FRI-MON").unwrap_err();
        assert!(matches!(err, CronError::BadToken { .. }));
        assert!(validate("* 18-6 * * *").is_err());
    }

    #[test]
    fn test_names_are_case_insensitive() {
        assert!(validate("0 0 * jan-dec mon").is_ok());
    }

    #[test]
    fn test_day_name_in_month_field_rejected() {
        let err = validate("* * * MON *").unwrap_err();
        assert_eq!(
            err,
            CronError::IllegalCharacters {
                token: "MON".into()
            }
        );
    }
}
