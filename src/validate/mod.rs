//! Declarative request-body validation.
//!
//! Handlers pass a rule slice; rules run in order and the first failure
//! becomes the 400 body. Errors are never aggregated — the message of the
//! first failing rule is the contract existing clients depend on.

use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

pub enum Rule<'a> {
    /// Field must be present and non-null.
    Required(&'a str),
    /// When present: a non-empty string of at most `max` characters.
    Text { field: &'a str, max: usize },
    /// When present: a UUID-shaped string.
    Id(&'a str),
    /// When present: a string drawn from a closed set.
    OneOf {
        field: &'a str,
        allowed: &'a [&'a str],
    },
    /// When present: an integer greater than zero.
    Positive(&'a str),
    /// When present: a parseable URL. An explicitly empty string means
    /// "absent" and passes.
    Url(&'a str),
    /// When present: a time-of-day string in HH:MM form.
    Time(&'a str),
    /// When both fields are present, `end` must order strictly after
    /// `start` (lexicographic, which matches HH:MM semantics).
    After { start: &'a str, end: &'a str },
}

pub fn check(body: &Value, rules: &[Rule]) -> Result<(), ApiError> {
    let Some(map) = body.as_object() else {
        return Err(ApiError::bad_request("Request body must be a JSON object"));
    };

    for rule in rules {
        match rule {
            Rule::Required(field) => {
                if map.get(*field).map_or(true, Value::is_null) {
                    return Err(ApiError::bad_request(format!("{field} is required")));
                }
            }
            Rule::Text { field, max } => {
                if let Some(value) = present(map, field) {
                    let Some(s) = value.as_str() else {
                        return Err(ApiError::bad_request(format!(
                            "{field} must be a non-empty string"
                        )));
                    };
                    if s.trim().is_empty() {
                        return Err(ApiError::bad_request(format!(
                            "{field} must be a non-empty string"
                        )));
                    }
                    if s.chars().count() > *max {
                        return Err(ApiError::bad_request(format!(
                            "{field} must be at most {max} characters"
                        )));
                    }
                }
            }
            Rule::Id(field) => {
                if let Some(value) = present(map, field) {
                    let ok = value.as_str().map_or(false, |s| Uuid::parse_str(s).is_ok());
                    if !ok {
                        return Err(ApiError::bad_request(format!("{field} must be a valid id")));
                    }
                }
            }
            Rule::OneOf { field, allowed } => {
                if let Some(value) = present(map, field) {
                    let ok = value.as_str().map_or(false, |s| allowed.contains(&s));
                    if !ok {
                        return Err(ApiError::bad_request(format!(
                            "{field} must be one of: {}",
                            allowed.join(", ")
                        )));
                    }
                }
            }
            Rule::Positive(field) => {
                if let Some(value) = present(map, field) {
                    let ok = value.as_i64().map_or(false, |n| n > 0);
                    if !ok {
                        return Err(ApiError::bad_request(format!(
                            "{field} must be a positive number"
                        )));
                    }
                }
            }
            Rule::Url(field) => {
                if let Some(value) = present(map, field) {
                    let Some(s) = value.as_str() else {
                        return Err(ApiError::bad_request(format!("{field} must be a valid URL")));
                    };
                    if !s.is_empty() && url::Url::parse(s).is_err() {
                        return Err(ApiError::bad_request(format!("{field} must be a valid URL")));
                    }
                }
            }
            Rule::Time(field) => {
                if let Some(value) = present(map, field) {
                    let ok = value.as_str().map_or(false, is_time_of_day);
                    if !ok {
                        return Err(ApiError::bad_request(format!(
                            "{field} must be a time in HH:MM format"
                        )));
                    }
                }
            }
            Rule::After { start, end } => {
                if let (Some(a), Some(b)) = (str_field(body, start), str_field(body, end)) {
                    if b <= a {
                        return Err(ApiError::bad_request(format!(
                            "{end} must be after {start}"
                        )));
                    }
                }
            }
        }
    }

    Ok(())
}

fn present<'a>(
    map: &'a serde_json::Map<String, Value>,
    field: &str,
) -> Option<&'a Value> {
    map.get(field).filter(|v| !v.is_null())
}

fn is_time_of_day(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
    hour < 24 && minute < 60
}

// Typed accessors for handlers, used after `check` has passed.

pub fn str_field<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field).and_then(Value::as_str)
}

pub fn uuid_field(body: &Value, field: &str) -> Option<Uuid> {
    str_field(body, field).and_then(|s| Uuid::parse_str(s).ok())
}

pub fn i64_field(body: &Value, field: &str) -> Option<i64> {
    body.get(field).and_then(Value::as_i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_failure_wins() {
        let body = json!({});
        let err = check(
            &body,
            &[Rule::Required("email"), Rule::Required("password")],
        )
        .unwrap_err();
        assert_eq!(err.message(), "email is required");
    }

    #[test]
    fn null_counts_as_missing() {
        let body = json!({ "email": null });
        let err = check(&body, &[Rule::Required("email")]).unwrap_err();
        assert_eq!(err.message(), "email is required");
    }

    #[test]
    fn text_rejects_blank_and_overlong() {
        let body = json!({ "title": "   " });
        let err = check(&body, &[Rule::Text { field: "title", max: 10 }]).unwrap_err();
        assert_eq!(err.message(), "title must be a non-empty string");

        let body = json!({ "title": "abcdefghijk" });
        let err = check(&body, &[Rule::Text { field: "title", max: 10 }]).unwrap_err();
        assert_eq!(err.message(), "title must be at most 10 characters");
    }

    #[test]
    fn optional_rules_skip_absent_fields() {
        let body = json!({});
        assert!(check(
            &body,
            &[
                Rule::Text { field: "title", max: 10 },
                Rule::Id("teacherId"),
                Rule::Positive("capacity"),
            ],
        )
        .is_ok());
    }

    #[test]
    fn id_must_be_uuid_shaped() {
        let body = json!({ "teacherId": "not-a-uuid" });
        let err = check(&body, &[Rule::Id("teacherId")]).unwrap_err();
        assert_eq!(err.message(), "teacherId must be a valid id");

        let body = json!({ "teacherId": Uuid::new_v4().to_string() });
        assert!(check(&body, &[Rule::Id("teacherId")]).is_ok());
    }

    #[test]
    fn one_of_membership() {
        let body = json!({ "status": "FROZEN" });
        let err = check(
            &body,
            &[Rule::OneOf { field: "status", allowed: &["PENDING", "ACTIVE", "INACTIVE"] }],
        )
        .unwrap_err();
        assert!(err.message().starts_with("status must be one of"));
    }

    #[test]
    fn positive_rejects_zero_and_strings() {
        for bad in [json!({ "capacity": 0 }), json!({ "capacity": "8" })] {
            let err = check(&bad, &[Rule::Positive("capacity")]).unwrap_err();
            assert_eq!(err.message(), "capacity must be a positive number");
        }
        assert!(check(&json!({ "capacity": 8 }), &[Rule::Positive("capacity")]).is_ok());
    }

    #[test]
    fn empty_url_means_absent() {
        assert!(check(&json!({ "website": "" }), &[Rule::Url("website")]).is_ok());
        assert!(check(&json!({ "website": "https://x.example" }), &[Rule::Url("website")]).is_ok());
        assert!(check(&json!({ "website": "::nope" }), &[Rule::Url("website")]).is_err());
    }

    #[test]
    fn time_format() {
        assert!(check(&json!({ "startTime": "09:30" }), &[Rule::Time("startTime")]).is_ok());
        for bad in ["9:30", "25:00", "09:60", "0930", "09-30"] {
            assert!(
                check(&json!({ "startTime": bad }), &[Rule::Time("startTime")]).is_err(),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn end_time_must_follow_start_time() {
        let body = json!({ "startTime": "10:00", "endTime": "09:00" });
        let err = check(
            &body,
            &[Rule::After { start: "startTime", end: "endTime" }],
        )
        .unwrap_err();
        assert_eq!(err.message(), "endTime must be after startTime");

        let equal = json!({ "startTime": "10:00", "endTime": "10:00" });
        assert!(check(&equal, &[Rule::After { start: "startTime", end: "endTime" }]).is_err());

        let ok = json!({ "startTime": "10:00", "endTime": "11:30" });
        assert!(check(&ok, &[Rule::After { start: "startTime", end: "endTime" }]).is_ok());
    }

    #[test]
    fn non_object_body_rejected() {
        let err = check(&json!([1, 2]), &[Rule::Required("email")]).unwrap_err();
        assert_eq!(err.message(), "Request body must be a JSON object");
    }
}
