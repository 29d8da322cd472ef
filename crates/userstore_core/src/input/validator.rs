//! Field-map validation for user operations.

use crate::input::{ErrorMap, FieldMap, FIELD_EMAIL, FIELD_ID, FIELD_NAME};
use validator::ValidateEmail;

const MAX_NAME_CHARS: usize = 100;
const MAX_EMAIL_CHARS: usize = 254;
const ERRORS_HEADER: &str = "Check inputs:";

/// Service operation a field map is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
    ReadById,
}

impl Operation {
    /// Keys that must be present for this operation.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::Create => &[FIELD_NAME, FIELD_EMAIL],
            Self::Update => &[FIELD_ID, FIELD_NAME, FIELD_EMAIL],
            Self::Delete | Self::ReadById => &[FIELD_ID],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::ReadById => "read_by_id",
        }
    }
}

/// Checks `fields` for `operation` and returns one message per bad field.
///
/// Missing required keys are reported first; present keys are format-checked
/// whether or not the operation needs them. Unknown keys are ignored.
pub fn validate_user_data(fields: &FieldMap, operation: Operation) -> ErrorMap {
    let mut errors = ErrorMap::new();

    for field in operation.required_fields() {
        if !fields.contains_key(*field) {
            errors.insert((*field).to_string(), format!("{} is required", label(field)));
        }
    }

    if let Some(value) = fields.get(FIELD_ID) {
        if let Some(message) = check_id(value) {
            errors.insert(FIELD_ID.to_string(), message);
        }
    }
    if let Some(value) = fields.get(FIELD_NAME) {
        if let Some(message) = check_name(value) {
            errors.insert(FIELD_NAME.to_string(), message);
        }
    }
    if let Some(value) = fields.get(FIELD_EMAIL) {
        if let Some(message) = check_email(value) {
            errors.insert(FIELD_EMAIL.to_string(), message);
        }
    }

    errors
}

/// Renders a validation report, one `>> field: message` line per entry.
pub fn format_errors(errors: &ErrorMap) -> String {
    let mut report = String::from(ERRORS_HEADER);
    for (field, message) in errors {
        report.push_str(&format!("\n>> {field}: {message}"));
    }
    report
}

fn check_id(value: &str) -> Option<String> {
    match value.trim().parse::<i64>() {
        Ok(id) if id > 0 => None,
        Ok(_) => Some("ID must be a positive number".to_string()),
        Err(_) => Some(format!("ID must be a whole number, got `{}`", value.trim())),
    }
}

fn check_name(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some("Name must not be blank".to_string());
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Some(format!("Name must be at most {MAX_NAME_CHARS} characters"));
    }
    None
}

fn check_email(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some("Email must not be blank".to_string());
    }
    if trimmed.chars().count() > MAX_EMAIL_CHARS {
        return Some(format!("Email must be at most {MAX_EMAIL_CHARS} characters"));
    }
    // Bare hosts like `ann@localhost` pass RFC checks but are not deliverable.
    let has_dotted_domain = trimmed
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'));
    if !trimmed.validate_email() || !has_dotted_domain {
        return Some("Email must look like name@domain.tld".to_string());
    }
    None
}

fn label(field: &str) -> &'static str {
    match field {
        FIELD_ID => "ID",
        FIELD_NAME => "Name",
        FIELD_EMAIL => "Email",
        _ => "Field",
    }
}

#[cfg(test)]
mod tests {
    use super::{format_errors, validate_user_data, Operation};
    use crate::input::{field_map, FieldMap};

    #[test]
    fn create_with_name_and_email_is_valid() {
        let fields = field_map([("first_name", "Ann"), ("email", "ann@x.io")]);
        assert!(validate_user_data(&fields, Operation::Create).is_empty());
    }

    #[test]
    fn update_requires_all_three_fields() {
        let errors = validate_user_data(&FieldMap::new(), Operation::Update);
        let keys: Vec<_> = errors.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["email", "first_name", "id"]);
    }

    #[test]
    fn id_must_be_positive_integer() {
        for bad in ["abc", "1.5", "0", "-3", ""] {
            let errors = validate_user_data(&field_map([("id", bad)]), Operation::Delete);
            assert!(errors.contains_key("id"), "`{bad}` should be rejected");
        }
        let errors = validate_user_data(&field_map([("id", " 42 ")]), Operation::Delete);
        assert!(errors.is_empty());
    }

    #[test]
    fn optional_present_fields_are_still_checked() {
        let fields = field_map([("id", "3"), ("email", "not-an-email")]);
        let errors = validate_user_data(&fields, Operation::ReadById);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("email"));
    }

    #[test]
    fn blank_name_and_malformed_emails_are_rejected() {
        let errors = validate_user_data(
            &field_map([("first_name", "   "), ("email", "ann@x")]),
            Operation::Create,
        );
        assert!(errors.contains_key("first_name"));
        assert!(errors.contains_key("email"));

        for bad in ["@x.io", "ann@.io", "ann x@x.io", "ann@localhost"] {
            let errors = validate_user_data(
                &field_map([("first_name", "Ann"), ("email", bad)]),
                Operation::Create,
            );
            assert!(errors.contains_key("email"), "`{bad}` should be rejected");
        }
    }

    #[test]
    fn email_domain_labels_must_not_start_or_end_with_hyphen() {
        for bad in ["ann@-x-.io", "ann@x-.io", "ann@mail.-x.io"] {
            let errors = validate_user_data(
                &field_map([("first_name", "Ann"), ("email", bad)]),
                Operation::Create,
            );
            assert!(errors.contains_key("email"), "`{bad}` should be rejected");
        }
    }

    #[test]
    fn internationalized_email_domains_are_accepted() {
        for good in ["ann@exämple.de", "ann.lee+tag@mail.x-y.io", " ann@x.io "] {
            let errors = validate_user_data(
                &field_map([("first_name", "Ann"), ("email", good)]),
                Operation::Create,
            );
            assert!(errors.is_empty(), "`{good}` should be accepted: {errors:?}");
        }
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let fields = field_map([("id", "1"), ("nickname", "")]);
        assert!(validate_user_data(&fields, Operation::ReadById).is_empty());
    }

    #[test]
    fn format_errors_lists_fields_in_key_order() {
        let errors = validate_user_data(&FieldMap::new(), Operation::Create);
        assert_eq!(
            format_errors(&errors),
            "Check inputs:\n>> email: Email is required\n>> first_name: Name is required"
        );
    }
}
