//! Algorithm layer: the recursive walk over an outgoing structure.
//!
//! ## Key handling
//!
//! | Key | Value | Output |
//! |-----|-------|--------|
//! | sensitive | any | `sanitize(source.field(key))`, or dropped if unavailable |
//! | other | object | walked with the same caller and source |
//! | other | array | object elements walked, other elements unchanged |
//! | other | anything else | unchanged |
//!
//! The source is a flat namespace: a sensitive key found at any depth is
//! looked up by its bare name.

use serde_json::Value;

use super::{FieldSource, Structure};
use crate::{
    capability::{can_see_pii, Caller},
    policy::PolicyTable,
};

fn authoritative<S>(name: &str, source: &S) -> Option<Value>
where
    S: FieldSource + ?Sized,
{
    if !source.supplies(name) {
        return None;
    }
    source.field(name)
}

/// Applies a [`PolicyTable`] to structures and field accessors.
///
/// A `Redactor` only borrows its table and holds no other state, so it is
/// `Copy` and can be created per call or shared freely between threads.
#[derive(Clone, Copy, Debug)]
pub struct Redactor<'p> {
    policy: &'p PolicyTable,
}

impl<'p> Redactor<'p> {
    pub fn new(policy: &'p PolicyTable) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &'p PolicyTable {
        self.policy
    }

    /// Returns `structure` with sensitive values hidden from `caller`.
    ///
    /// Privileged callers get the input back as-is, without a walk. For
    /// everyone else a new structure is built in the input's key order; the
    /// result has the same keys at every depth except sensitive keys that
    /// `source` cannot supply, which are omitted.
    #[must_use]
    pub fn process<C, S>(&self, structure: Structure, caller: Option<&C>, source: &S) -> Structure
    where
        C: Caller + ?Sized,
        S: FieldSource + ?Sized,
    {
        if can_see_pii(caller) {
            return structure;
        }
        self.scrub(structure, source)
    }

    fn scrub<S>(&self, structure: Structure, source: &S) -> Structure
    where
        S: FieldSource + ?Sized,
    {
        structure
            .into_iter()
            .filter_map(|(key, value)| {
                if self.policy.is_sensitive(&key) {
                    let original = authoritative(&key, source)?;
                    let hidden = self.policy.sanitize(&original);
                    return Some((key, hidden));
                }
                Some((key, self.scrub_value(value, source)))
            })
            .collect()
    }

    fn scrub_value<S>(&self, value: Value, source: &S) -> Value
    where
        S: FieldSource + ?Sized,
    {
        match value {
            Value::Object(nested) => Value::Object(self.scrub(nested, source)),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.scrub_value(item, source))
                    .collect(),
            ),
            other => other,
        }
    }

    /// Guards a direct accessor for the field `name`.
    ///
    /// Returns the accessor's value when `caller` may see PII or when `name`
    /// is not sensitive, and its sanitized form otherwise. The accessor is
    /// always called exactly once.
    pub fn get_field<C, F>(&self, name: &str, caller: Option<&C>, accessor: F) -> Value
    where
        C: Caller + ?Sized,
        F: FnOnce() -> Value,
    {
        let original = accessor();
        if can_see_pii(caller) || !self.policy.is_sensitive(name) {
            return original;
        }
        self.policy.sanitize(&original)
    }
}
