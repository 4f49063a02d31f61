//! Adapters for logging guarded structures through `slog`.
//!
//! This module connects [`Guard`] with `slog` by providing a `slog::Value`
//! that serializes the redacted form of a structure as nested JSON.
//!
//! It is responsible for:
//! - Ensuring the logged representation is the output of the guard, so a log
//!   line never shows more than the caller it was built for would see.
//! - Avoiding fallible logging APIs: values that do not serialize to an
//!   object are logged as an empty object.
//!
//! It does not configure `slog` or decide which caller a log line is for.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{
    capability::Caller,
    redaction::{FieldSource, Guard, Structure},
};

/// A `slog::Value` that emits a redacted structure as structured JSON.
pub struct RedactedJson {
    value: JsonValue,
}

impl RedactedJson {
    fn new(structure: Structure) -> Self {
        Self {
            value: JsonValue::Object(structure),
        }
    }

    /// The JSON that will be emitted.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for RedactedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Produces loggable, redacted views of host values.
///
/// ## Example
/// ```ignore
/// use pii_veil::slog::IntoRedactedJson;
///
/// let guard = Guard::new(&policy, &user, caller);
/// info!(logger, "user loaded"; "user" => guard.redacted_json(&user));
/// ```
pub trait IntoRedactedJson {
    /// Redacts an already-serialized structure for logging.
    fn redacted_structure(&self, original: Structure) -> RedactedJson;

    /// Serializes `value`, redacts it, and wraps it for logging.
    fn redacted_json<T>(&self, value: &T) -> RedactedJson
    where
        T: Serialize + ?Sized;
}

impl<S, C> IntoRedactedJson for Guard<'_, S, C>
where
    S: FieldSource + ?Sized,
    C: Caller + ?Sized,
{
    fn redacted_structure(&self, original: Structure) -> RedactedJson {
        RedactedJson::new(self.attributes(original))
    }

    fn redacted_json<T>(&self, value: &T) -> RedactedJson
    where
        T: Serialize + ?Sized,
    {
        RedactedJson::new(self.serialize(value))
    }
}
