//! Validation helpers shared by the domain model.
//!
//! Drafts derive `validator::Validate`; [`validate`] runs the rules and, on
//! failure, returns an `InnError` of kind `Validation` whose `errors` map
//! lists the messages per field (`{"name": ["is required"]}`).

use inn_core::errors::InnError;
use serde_json::{Map, Value};
use validator::Validate;

#[derive(Debug, Default)]
pub struct SchemaErrors {
    map: Map<String, Value>,
}

impl SchemaErrors {
    pub fn push_field(&mut self, field: &str, msg: impl Into<String>) {
        Self::push_to(&mut self.map, field, msg);
    }

    fn push_to(map: &mut Map<String, Value>, key: &str, msg: impl Into<String>) {
        let msg = Value::String(msg.into());
        match map.get_mut(key) {
            Some(Value::Array(arr)) => arr.push(msg),
            _ => {
                map.insert(key.to_string(), Value::Array(vec![msg]));
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// First message recorded for `field`, if any.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.map
            .get(field)
            .and_then(|v| v.get(0))
            .and_then(|v| v.as_str())
    }

    pub fn into_validation_anyhow(self, message: &str) -> anyhow::Error {
        InnError::validation(message)
            .with_errors(Value::Object(self.map))
            .into_anyhow()
    }

    /// `Ok(())` when nothing was recorded, otherwise a `Validation` error.
    pub fn into_result(self, message: &str) -> anyhow::Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_validation_anyhow(message))
        }
    }
}

fn friendly_message(code: &str) -> Option<&'static str> {
    match code {
        "required" => Some("is required"),
        "email" => Some("must be a valid email"),
        "length" => Some("must not be blank"),
        "range" => Some("is out of range"),
        _ => None,
    }
}

fn push_validation_errors(out: &mut SchemaErrors, errs: &validator::ValidationErrors) {
    for (field, field_errors) in errs.field_errors() {
        for e in field_errors {
            let msg = e
                .message
                .as_ref()
                .map(|m| m.to_string())
                .or_else(|| friendly_message(&e.code).map(|m| m.to_string()))
                .unwrap_or_else(|| e.code.to_string());
            out.push_field(&field, msg);
        }
    }
}

/// Run the derive rules of `draft` and collect the failures without
/// turning them into an error yet, so callers can add checks of their own.
pub fn collect<T: Validate>(draft: &T) -> SchemaErrors {
    let mut out = SchemaErrors::default();
    if let Err(errs) = draft.validate() {
        push_validation_errors(&mut out, &errs);
    }
    out
}

pub fn validate<T: Validate>(draft: &T, error_message: &str) -> anyhow::Result<()> {
    collect(draft).into_result(error_message)
}
