use serde_json::{Map, Value};
use thiserror::Error;

use crate::data::{Channel, Team};

/// Why a JSON value does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected an object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("expected an array, found {found}")]
    NotAnArray { found: &'static str },

    #[error("missing field `{field}`")]
    MissingField { field: &'static str },

    #[error("field `{field}` should be {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field `{field}` is invalid: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("element {index} is invalid: {source}")]
    InvalidElement {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

/// Name of the JSON type of `value`, for error messages.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, ValidationError> {
    value.as_object().ok_or(ValidationError::NotAnObject {
        found: json_type(value),
    })
}

fn required_str(obj: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    match obj.get(field) {
        None => Err(ValidationError::MissingField { field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ValidationError::WrongType {
            field,
            expected: "a string",
            found: json_type(other),
        }),
    }
}

fn optional_str(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match obj.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ValidationError::WrongType {
            field,
            expected: "a string",
            found: json_type(other),
        }),
    }
}

/// Check that `value` is an array and convert every element with `check`.
///
/// Fails on the first element `check` rejects, reporting its index.
///
/// # Examples
///
/// ```
/// use roster_teams::{ValidationError, assert_is_typed_array, json_type};
/// use serde_json::json;
///
/// let numbers = assert_is_typed_array(&json!([1, 2, 3]), |v| {
///     v.as_u64().ok_or(ValidationError::WrongType {
///         field: "element",
///         expected: "an unsigned integer",
///         found: json_type(v),
///     })
/// })
/// .unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// ```
pub fn assert_is_typed_array<T, F>(value: &Value, check: F) -> Result<Vec<T>, ValidationError>
where
    F: Fn(&Value) -> Result<T, ValidationError>,
{
    let items = value.as_array().ok_or(ValidationError::NotAnArray {
        found: json_type(value),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            check(item).map_err(|source| ValidationError::InvalidElement {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

/// Validate a channel object: string `id`, `teamId` and `name`, optional string `description`.
pub fn validate_channel(value: &Value) -> Result<Channel, ValidationError> {
    let obj = as_object(value)?;

    Ok(Channel {
        id: required_str(obj, "id")?,
        team_id: required_str(obj, "teamId")?,
        name: required_str(obj, "name")?,
        description: optional_str(obj, "description")?,
    })
}

pub fn is_channel(value: &Value) -> bool {
    validate_channel(value).is_ok()
}

/// Validate a team object and convert it to a [`Team`].
///
/// Required: string `id` and `name`. Optional: string `iconUrl`, and a
/// `channels` array whose every element is a valid channel. Unknown fields
/// are ignored.
pub fn validate_team(value: &Value) -> Result<Team, ValidationError> {
    let obj = as_object(value)?;

    let id = required_str(obj, "id")?;
    let name = required_str(obj, "name")?;
    let icon_url = optional_str(obj, "iconUrl")?;
    let channels = match obj.get("channels") {
        None => Vec::new(),
        Some(raw) => assert_is_typed_array(raw, validate_channel).map_err(|source| {
            ValidationError::InvalidField {
                field: "channels",
                source: Box::new(source),
            }
        })?,
    };

    Ok(Team {
        id,
        name,
        icon_url,
        channels,
    })
}

/// `true` iff `value` has the shape [`validate_team`] accepts.
pub fn is_team(value: &Value) -> bool {
    validate_team(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_team() {
        let team = validate_team(&json!({ "id": "42", "name": "Falcons" })).unwrap();
        assert_eq!(team, Team::new("42", "Falcons"));
    }

    #[test]
    fn test_full_team() {
        let value = json!({
            "id": "li",
            "name": "LinkedIn",
            "iconUrl": "/assets/img/li.png",
            "channels": [
                { "id": "general", "teamId": "li", "name": "general", "description": "chit-chat" },
                { "id": "jobs", "teamId": "li", "name": "jobs" }
            ],
            "order": 3
        });

        let team = validate_team(&value).unwrap();
        assert_eq!(team.icon_url.as_deref(), Some("/assets/img/li.png"));
        assert_eq!(team.channels.len(), 2);
        assert_eq!(team.channels[1].description, None);
        assert!(is_team(&value));
    }

    #[test]
    fn test_null_and_non_objects_are_rejected() {
        assert!(!is_team(&Value::Null));
        assert!(!is_team(&json!("team")));
        assert!(!is_team(&json!(42)));
        assert!(!is_team(&json!([{ "id": "1", "name": "a" }])));
        assert_eq!(
            validate_team(&Value::Null).unwrap_err(),
            ValidationError::NotAnObject { found: "null" }
        );
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            validate_team(&json!({ "name": "Falcons" })).unwrap_err(),
            ValidationError::MissingField { field: "id" }
        );
        assert_eq!(
            validate_team(&json!({ "id": "42" })).unwrap_err(),
            ValidationError::MissingField { field: "name" }
        );
    }

    #[test]
    fn test_wrong_field_types() {
        assert_eq!(
            validate_team(&json!({ "id": 42, "name": "Falcons" })).unwrap_err(),
            ValidationError::WrongType {
                field: "id",
                expected: "a string",
                found: "number"
            }
        );
        assert!(!is_team(&json!({ "id": "42", "name": null })));
        assert!(!is_team(&json!({ "id": "42", "name": "Falcons", "iconUrl": false })));
        assert!(!is_team(&json!({ "id": "42", "name": "Falcons", "channels": {} })));
    }

    #[test]
    fn test_bad_nested_channel() {
        let value = json!({
            "id": "42",
            "name": "Falcons",
            "channels": [
                { "id": "general", "teamId": "42", "name": "general" },
                { "id": "random", "name": "random" }
            ]
        });

        let (field, source) = match validate_team(&value).unwrap_err() {
            ValidationError::InvalidField { field, source } => (field, source),
            other => panic!("expected InvalidField, got {other:?}"),
        };
        assert_eq!(field, "channels");
        assert_eq!(
            *source,
            ValidationError::InvalidElement {
                index: 1,
                source: Box::new(ValidationError::MissingField { field: "teamId" })
            }
        );
    }

    #[test]
    fn test_is_channel() {
        assert!(is_channel(&json!({ "id": "general", "teamId": "42", "name": "general" })));
        assert!(is_channel(&json!({
            "id": "jobs",
            "teamId": "li",
            "name": "jobs",
            "description": "openings"
        })));

        assert!(!is_channel(&json!({ "id": "random", "name": "random" })));
        assert!(!is_channel(&json!({ "id": "general", "teamId": 42, "name": "general" })));
        assert!(!is_channel(&json!({
            "id": "general",
            "teamId": "42",
            "name": "general",
            "description": 7
        })));
        assert!(!is_channel(&Value::Null));
        assert!(!is_channel(&json!([])));
    }

    #[test]
    fn test_typed_array_all_pass() {
        let teams = assert_is_typed_array(
            &json!([
                { "id": "1", "name": "a" },
                { "id": "2", "name": "b" },
                { "id": "3", "name": "c" }
            ]),
            validate_team,
        )
        .unwrap();
        let ids: Vec<_> = teams.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn test_typed_array_one_failure() {
        let err = assert_is_typed_array(
            &json!([{ "id": "1", "name": "a" }, { "id": "2" }, { "id": "3", "name": "c" }]),
            validate_team,
        )
        .unwrap_err();

        assert_eq!(
            err,
            ValidationError::InvalidElement {
                index: 1,
                source: Box::new(ValidationError::MissingField { field: "name" })
            }
        );
    }

    #[test]
    fn test_typed_array_non_sequence() {
        assert_eq!(
            assert_is_typed_array(&json!({ "id": "1", "name": "a" }), validate_team).unwrap_err(),
            ValidationError::NotAnArray { found: "object" }
        );
        assert_eq!(
            assert_is_typed_array(&Value::Null, validate_team).unwrap_err(),
            ValidationError::NotAnArray { found: "null" }
        );
    }

    #[test]
    fn test_typed_array_empty() {
        let teams = assert_is_typed_array(&json!([]), validate_team).unwrap();
        assert!(teams.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::InvalidElement {
            index: 2,
            source: Box::new(ValidationError::MissingField { field: "id" }),
        };
        assert_eq!(err.to_string(), "element 2 is invalid: missing field `id`");
    }
}
