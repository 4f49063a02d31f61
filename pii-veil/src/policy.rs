//! The static policy table: what is sensitive and how it is hidden.
//!
//! A [`PolicyTable`] is built once at startup, either from [`Default`] or from
//! host configuration, and is only read afterwards. It carries no per-request
//! state, so a single table can be shared across threads by reference or
//! `Arc`.

use std::{borrow::Cow, collections::BTreeSet};

use serde::Deserialize;
use serde_json::{Number, Value};

/// Placeholder substituted for hidden string values.
pub const HIDDEN_PLACEHOLDER: &str = "unknown";

/// Field names treated as PII unless the host configures otherwise.
pub const DEFAULT_SENSITIVE_FIELDS: &[&str] = &[
    "ip_address",
    "registration_ip_address",
    "client_ip",
    "location",
    "email",
    "secondary_emails",
];

/// Reports withheld from non-privileged callers by default.
pub const DEFAULT_HIDDEN_REPORTS: &[&str] = &["suspicious_logins"];

/// Structure kinds the redaction is wired to by default.
pub const DEFAULT_INTERCEPTED_KINDS: &[&str] = &[
    "AdminUserSerializer",
    "AdminUserListSerializer",
    "UserAuthTokenSerializer",
    "UserCardSerializer",
];

fn owned_set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

fn default_sensitive_fields() -> BTreeSet<String> {
    owned_set(DEFAULT_SENSITIVE_FIELDS)
}

fn default_hidden_reports() -> BTreeSet<String> {
    owned_set(DEFAULT_HIDDEN_REPORTS)
}

fn default_intercepted_kinds() -> BTreeSet<String> {
    owned_set(DEFAULT_INTERCEPTED_KINDS)
}

fn default_placeholder() -> Cow<'static, str> {
    Cow::Borrowed(HIDDEN_PLACEHOLDER)
}

/// Which fields are sensitive, which reports are hidden, and which structure
/// kinds are intercepted.
///
/// Every field has a default, so a partial configuration document only needs
/// to name what it overrides:
///
/// ```rust
/// use pii_veil::PolicyTable;
///
/// let policy = PolicyTable::from_json(r#"{"placeholder": "[hidden]"}"#).unwrap();
/// assert!(policy.is_sensitive("email"));
/// assert_eq!(policy.placeholder(), "[hidden]");
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyTable {
    /// Field names whose values are PII.
    #[serde(default = "default_sensitive_fields")]
    sensitive_fields: BTreeSet<String>,
    /// Report identifiers offered only to privileged callers.
    #[serde(default = "default_hidden_reports")]
    hidden_reports: BTreeSet<String>,
    /// Structure kinds whose serialized output is redacted.
    #[serde(default = "default_intercepted_kinds")]
    intercepted_kinds: BTreeSet<String>,
    /// Whether staff below full admin may see raw contact fields.
    moderators_view_emails: bool,
    /// Text substituted for hidden strings.
    #[serde(default = "default_placeholder")]
    placeholder: Cow<'static, str>,
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self {
            sensitive_fields: default_sensitive_fields(),
            hidden_reports: default_hidden_reports(),
            intercepted_kinds: default_intercepted_kinds(),
            moderators_view_emails: false,
            placeholder: default_placeholder(),
        }
    }
}

impl PolicyTable {
    /// Parses a host configuration document.
    ///
    /// Missing keys keep their defaults; unknown keys are rejected.
    pub fn from_json(document: &str) -> serde_json::Result<Self> {
        serde_json::from_str(document)
    }

    /// Replaces the sensitive field set.
    #[must_use]
    pub fn with_sensitive_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensitive_fields = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the hidden report set.
    #[must_use]
    pub fn with_hidden_reports<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hidden_reports = names.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the intercepted structure kinds.
    #[must_use]
    pub fn with_intercepted_kinds<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.intercepted_kinds = kinds.into_iter().map(Into::into).collect();
        self
    }

    /// Uses a specific placeholder for hidden strings.
    ///
    /// The placeholder should be stable and must not reveal anything about
    /// the value it replaces.
    #[must_use]
    pub fn with_placeholder<P>(mut self, placeholder: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets whether staff below full admin may see raw contact fields.
    #[must_use]
    pub fn with_moderators_view_emails(mut self, allowed: bool) -> Self {
        self.moderators_view_emails = allowed;
        self
    }

    pub fn is_sensitive(&self, field: &str) -> bool {
        self.sensitive_fields.contains(field)
    }

    pub fn is_report_hidden(&self, report: &str) -> bool {
        self.hidden_reports.contains(report)
    }

    pub fn intercepts(&self, kind: &str) -> bool {
        self.intercepted_kinds.contains(kind)
    }

    pub fn sensitive_fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.sensitive_fields.iter().map(String::as_str)
    }

    pub fn hidden_reports(&self) -> impl Iterator<Item = &str> + '_ {
        self.hidden_reports.iter().map(String::as_str)
    }

    pub fn intercepted_kinds(&self) -> impl Iterator<Item = &str> + '_ {
        self.intercepted_kinds.iter().map(String::as_str)
    }

    pub fn moderators_view_emails(&self) -> bool {
        self.moderators_view_emails
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Replaces `value` with the placeholder for its type.
    ///
    /// | input | output |
    /// |-------|--------|
    /// | string | the placeholder |
    /// | number | `0` |
    /// | boolean | `false` |
    /// | anything else | `null` |
    ///
    /// This method is total and never echoes any part of the input.
    #[must_use]
    pub fn sanitize(&self, value: &Value) -> Value {
        match value {
            Value::String(_) => Value::String(self.placeholder.clone().into_owned()),
            Value::Number(_) => Value::Number(Number::from(0)),
            Value::Bool(_) => Value::Bool(false),
            Value::Null | Value::Array(_) | Value::Object(_) => Value::Null,
        }
    }
}
