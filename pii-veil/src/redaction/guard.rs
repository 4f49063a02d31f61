//! Binding layer: a decorator over one host object and one caller.
//!
//! The host builds a [`Guard`] wherever a protected object is serialized or a
//! sensitive accessor is called, instead of patching the object's type. The
//! guard only redacts objects whose [`FieldSource::kind`] the policy table
//! intercepts.

use serde::Serialize;
use serde_json::Value;

use super::{FieldSource, Redactor, Structure};
use crate::{
    capability::{can_see_pii, Caller},
    policy::PolicyTable,
};

/// Wraps a host object's serialized output and field accessors.
///
/// ```rust
/// use pii_veil::{FieldSource, Guard, PolicyTable, Role};
/// use serde_json::json;
///
/// #[derive(FieldSource)]
/// #[field_source(kind = "UserCardSerializer")]
/// struct UserCard {
///     #[pii]
///     email: String,
///     username: String,
/// }
///
/// let policy = PolicyTable::default();
/// let card = UserCard { email: "a@b.com".into(), username: "bob".into() };
/// let attributes = json!({"email": "a@b.com", "username": "bob"});
///
/// let guard = Guard::new(&policy, &card, Some(&Role::Member));
/// let exposed = guard.attributes(attributes.as_object().cloned().unwrap());
/// assert_eq!(exposed["email"], "unknown");
/// assert_eq!(exposed["username"], "bob");
/// ```
pub struct Guard<'a, S, C>
where
    S: FieldSource + ?Sized,
    C: Caller + ?Sized,
{
    redactor: Redactor<'a>,
    source: &'a S,
    caller: Option<&'a C>,
}

impl<S, C> Clone for Guard<'_, S, C>
where
    S: FieldSource + ?Sized,
    C: Caller + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, C> Copy for Guard<'_, S, C>
where
    S: FieldSource + ?Sized,
    C: Caller + ?Sized,
{
}

impl<'a, S, C> Guard<'a, S, C>
where
    S: FieldSource + ?Sized,
    C: Caller + ?Sized,
{
    pub fn new(policy: &'a PolicyTable, source: &'a S, caller: Option<&'a C>) -> Self {
        Self {
            redactor: Redactor::new(policy),
            source,
            caller,
        }
    }

    pub fn source(&self) -> &'a S {
        self.source
    }

    /// Returns true if this guard's object is one the policy redacts.
    pub fn is_intercepted(&self) -> bool {
        self.redactor.policy().intercepts(self.source.kind())
    }

    /// Returns true if the caller sees sensitive values verbatim.
    pub fn reveals_pii(&self) -> bool {
        can_see_pii(self.caller)
    }

    /// Redacts the object's original serialized attributes.
    ///
    /// Objects of a kind the policy does not intercept pass through.
    #[must_use]
    pub fn attributes(&self, original: Structure) -> Structure {
        if !self.is_intercepted() {
            return original;
        }
        self.redactor.process(original, self.caller, self.source)
    }

    /// Serializes `value` and redacts the result like [`Guard::attributes`].
    ///
    /// A value that fails to serialize, or does not serialize to an object,
    /// yields an empty structure.
    #[must_use]
    pub fn serialize<T>(&self, value: &T) -> Structure
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_value(value) {
            Ok(Value::Object(original)) => self.attributes(original),
            _ => Structure::new(),
        }
    }

    /// Guarded accessor for a single field of the object.
    ///
    /// Sensitive fields are read from the source and sanitized unless the
    /// caller may see PII; `None` means the source does not supply `name`.
    /// Objects of a kind the policy does not intercept are read verbatim.
    pub fn field(&self, name: &str) -> Option<Value> {
        if !self.source.supplies(name) {
            return None;
        }
        let original = self.source.field(name)?;
        if !self.is_intercepted() {
            return Some(original);
        }
        Some(self.redactor.get_field(name, self.caller, || original))
    }

    /// Guards a host accessor that is not backed by the source.
    pub fn field_with<F>(&self, name: &str, accessor: F) -> Value
    where
        F: FnOnce() -> Value,
    {
        if !self.is_intercepted() {
            return accessor();
        }
        self.redactor.get_field(name, self.caller, accessor)
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::{json, Value};

    use super::Guard;
    use crate::{
        capability::Role,
        policy::{PolicyTable, HIDDEN_PLACEHOLDER},
        redaction::FieldSource,
    };

    #[derive(Serialize)]
    struct Profile {
        username: String,
        email: String,
        trust_level: u8,
    }

    impl FieldSource for Profile {
        fn kind(&self) -> &str {
            "AdminUserSerializer"
        }

        fn supplied_fields(&self) -> &[&'static str] {
            &["email"]
        }

        fn field(&self, name: &str) -> Option<Value> {
            (name == "email").then(|| Value::String(self.email.clone()))
        }
    }

    struct Post;

    impl FieldSource for Post {
        fn kind(&self) -> &str {
            "PostSerializer"
        }

        fn supplied_fields(&self) -> &[&'static str] {
            &["ip_address"]
        }

        fn field(&self, name: &str) -> Option<Value> {
            (name == "ip_address").then(|| json!("10.0.0.1"))
        }
    }

    fn profile() -> Profile {
        Profile {
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            trust_level: 2,
        }
    }

    #[test]
    fn serialize_redacts_intercepted_kinds() {
        let policy = PolicyTable::default();
        let profile = profile();
        let guard = Guard::new(&policy, &profile, Some(&Role::Member));

        let exposed = guard.serialize(&profile);

        assert_eq!(
            Value::Object(exposed),
            json!({"username": "bob", "email": HIDDEN_PLACEHOLDER, "trust_level": 2})
        );
    }

    #[test]
    fn serialize_reveals_to_admins() {
        let policy = PolicyTable::default();
        let profile = profile();
        let guard = Guard::new(&policy, &profile, Some(&Role::Admin));

        assert!(guard.reveals_pii());
        assert_eq!(guard.serialize(&profile)["email"], "bob@example.com");
    }

    #[test]
    fn non_object_serialization_yields_empty_structure() {
        let policy = PolicyTable::default();
        let profile = profile();
        let guard = Guard::new(&policy, &profile, Some(&Role::Member));

        assert!(guard.serialize("just a string").is_empty());
        assert!(guard.serialize(&[1, 2, 3]).is_empty());
    }

    #[test]
    fn other_kinds_pass_through() {
        let policy = PolicyTable::default();
        let guard = Guard::new(&policy, &Post, Some(&Role::Member));
        let original = json!({"ip_address": "10.0.0.1"})
            .as_object()
            .cloned()
            .unwrap();

        assert!(!guard.is_intercepted());
        assert_eq!(guard.attributes(original.clone()), original);
        assert_eq!(guard.field("ip_address"), Some(json!("10.0.0.1")));
        assert_eq!(guard.field_with("email", || json!("x@y.z")), json!("x@y.z"));
    }

    #[test]
    fn field_accessor_is_guarded() {
        let policy = PolicyTable::default();
        let profile = profile();

        let member = Guard::new(&policy, &profile, Some(&Role::Moderator));
        assert_eq!(member.field("email"), Some(json!(HIDDEN_PLACEHOLDER)));
        assert_eq!(member.field("location"), None);

        let admin = Guard::new(&policy, &profile, Some(&Role::Admin));
        assert_eq!(admin.field("email"), Some(json!("bob@example.com")));
    }

    #[test]
    fn field_with_guards_host_accessors() {
        let policy = PolicyTable::default();
        let profile = profile();
        let guard = Guard::<_, Role>::new(&policy, &profile, None);

        assert_eq!(
            guard.field_with("client_ip", || json!("10.1.1.1")),
            json!(HIDDEN_PLACEHOLDER)
        );
        assert_eq!(guard.field_with("username", || json!("bob")), json!("bob"));
    }
}
