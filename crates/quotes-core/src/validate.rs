use quotes_types::models::{MAX_COLOUR, Message};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Field has the wrong type or is out of range: {0}")]
    ForeignType(&'static str),

    #[error("Quote has no messages")]
    EmptyQuote,
}

type Predicate = fn(&Value) -> bool;

/// Checked in order; the first failing field is reported.
const MESSAGE_FIELDS: &[(&str, Predicate)] = &[
    ("timestamp", is_integer),
    ("content", Value::is_string),
    ("author", Value::is_object),
];

const AUTHOR_FIELDS: &[(&str, Predicate)] = &[
    ("avatar_url", Value::is_string),
    ("colour", is_colour),
    ("username", Value::is_string),
    ("id", Value::is_string),
];

fn is_integer(value: &Value) -> bool {
    value.is_i64()
}

fn is_colour(value: &Value) -> bool {
    value.as_u64().is_some_and(|c| c <= u64::from(MAX_COLOUR))
}

/// Checks a quote-creation payload: a non-empty array of message objects,
/// each carrying a well-formed author.
pub fn validate(payload: &Value) -> Result<(), ValidationError> {
    let messages = payload
        .as_array()
        .ok_or(ValidationError::ForeignType("messages"))?;

    if messages.is_empty() {
        return Err(ValidationError::EmptyQuote);
    }

    for message in messages {
        let message = message
            .as_object()
            .ok_or(ValidationError::ForeignType("message"))?;
        check_fields(message, MESSAGE_FIELDS)?;

        if let Some(author) = message.get("author").and_then(Value::as_object) {
            check_fields(author, AUTHOR_FIELDS)?;
        }
    }

    Ok(())
}

/// Validates and converts the payload. Unknown keys are dropped.
pub fn parse_messages(payload: &Value) -> Result<Vec<Message>, ValidationError> {
    validate(payload)?;
    serde_json::from_value(payload.clone()).map_err(|_| ValidationError::ForeignType("messages"))
}

fn check_fields(
    object: &Map<String, Value>,
    fields: &[(&'static str, Predicate)],
) -> Result<(), ValidationError> {
    for &(name, predicate) in fields {
        let value = object.get(name).ok_or(ValidationError::MissingField(name))?;
        if !predicate(value) {
            return Err(ValidationError::ForeignType(name));
        }
    }
    Ok(())
}
