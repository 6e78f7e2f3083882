use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use super::goal::{GoalStatus, VALID_CURRENCIES};
use super::hobby::ActivityCategory;

fn invalid(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::from(message));
    error
}

/// Goal status must be one of the known labels, e.g. `In progress`.
pub fn validate_goal_status(status: &str) -> Result<(), ValidationError> {
    if status.parse::<GoalStatus>().is_ok() {
        return Ok(());
    }
    let labels: Vec<&str> = GoalStatus::ALL.iter().map(GoalStatus::as_str).collect();
    Err(invalid(
        "one_of",
        format!("Invalid status. Must be one of: {}", labels.join(", ")),
    ))
}

pub fn validate_currency(currency: &str) -> Result<(), ValidationError> {
    if VALID_CURRENCIES.contains(&currency) {
        return Ok(());
    }
    Err(invalid(
        "one_of",
        format!("Invalid currency. Must be one of: {}", VALID_CURRENCIES.join(", ")),
    ))
}

pub fn validate_activity_category(category: &str) -> Result<(), ValidationError> {
    if category.parse::<ActivityCategory>().is_ok() {
        return Ok(());
    }
    let labels: Vec<&str> = ActivityCategory::ALL.iter().map(ActivityCategory::as_str).collect();
    Err(invalid(
        "one_of",
        format!("Must be one of: {}", labels.join(", ")),
    ))
}

/// Flattens validator output into `field: message` lines, sorted for stable output.
///
/// Nested structs are reported as `parent.field`, list items as `parent[index].field`,
/// and struct-level rules without a field use their message alone.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    collect_messages("", errors, &mut messages);
    messages.sort();
    messages
}

fn collect_messages(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let field: &str = field.as_ref();
        let path = if field == "__all__" {
            prefix.trim_end_matches('.').to_string()
        } else {
            format!("{}{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value ({})", error.code));
                    if path.is_empty() {
                        out.push(message);
                    } else {
                        out.push(format!("{}: {}", path, message));
                    }
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                collect_messages(&format!("{}.", path), inner, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(&format!("{}[{}].", path, index), inner, out);
                }
            }
        }
    }
}
