//! Host layer: where the authoritative value of a sensitive field comes from.
//!
//! A structure handed to [`super::Redactor`] may already contain processed or
//! partial values, so sensitive fields are always re-read from the object the
//! structure was built from. That object implements [`FieldSource`].
//!
//! ## Declared schema
//!
//! A source declares up front which sensitive fields it can supply
//! ([`FieldSource::supplied_fields`]). The redactor consults that list rather
//! than probing, and drops any sensitive key the source does not declare.
//!
//! The `FieldSource` derive builds the list from `#[pii]` field annotations and
//! converts each field through [`FieldValue`].

use std::{
    borrow::Cow,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    rc::Rc,
    sync::Arc,
};

use serde_json::Value;

// =============================================================================
// FieldSource - objects that can supply sensitive values by name
// =============================================================================

/// An object able to yield the authoritative value of a named field.
///
/// Implement this by hand or with `#[derive(FieldSource)]`.
///
/// ```rust
/// use pii_veil::{FieldSource, Value};
///
/// struct Session {
///     client_ip: String,
/// }
///
/// impl FieldSource for Session {
///     fn kind(&self) -> &str {
///         "UserAuthTokenSerializer"
///     }
///
///     fn supplied_fields(&self) -> &[&'static str] {
///         &["client_ip"]
///     }
///
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "client_ip" => Some(Value::from(self.client_ip.clone())),
///             _ => None,
///         }
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `FieldSource`",
    label = "this type cannot supply sensitive field values",
    note = "use `#[derive(FieldSource)]` and mark the supplied fields with `#[pii]`"
)]
pub trait FieldSource {
    /// The structure kind this source serializes as.
    fn kind(&self) -> &str;

    /// Sensitive field names this source can supply.
    fn supplied_fields(&self) -> &[&'static str];

    /// Returns the authoritative value for `name`.
    ///
    /// `None` means the value is unavailable; the redactor then drops the key.
    fn field(&self, name: &str) -> Option<Value>;

    /// Returns true if `name` is in [`FieldSource::supplied_fields`].
    fn supplies(&self, name: &str) -> bool {
        self.supplied_fields().contains(&name)
    }
}

impl<T> FieldSource for &T
where
    T: FieldSource + ?Sized,
{
    fn kind(&self) -> &str {
        (**self).kind()
    }

    fn supplied_fields(&self) -> &[&'static str] {
        (**self).supplied_fields()
    }

    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }

    fn supplies(&self, name: &str) -> bool {
        (**self).supplies(name)
    }
}

impl<T> FieldSource for Box<T>
where
    T: FieldSource + ?Sized,
{
    fn kind(&self) -> &str {
        (**self).kind()
    }

    fn supplied_fields(&self) -> &[&'static str] {
        (**self).supplied_fields()
    }

    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }

    fn supplies(&self, name: &str) -> bool {
        (**self).supplies(name)
    }
}

// =============================================================================
// FieldValue - host field types that convert into structure values
// =============================================================================

/// Conversion from a host field type into a structure value.
///
/// The derive calls this for every `#[pii]` field. Implement it for local
/// newtypes whose representation is not covered here.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be exposed as a PII field value",
    label = "this type has no `FieldValue` conversion",
    note = "implement `FieldValue` for `{Self}` or wrap it in a type that does"
)]
pub trait FieldValue {
    /// Returns the value as it would appear in a serialized structure.
    fn to_field_value(&self) -> Value;
}

macro_rules! impl_field_value_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn to_field_value(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_field_value_from!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

macro_rules! impl_field_value_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn to_field_value(&self) -> Value {
                    Value::String(self.to_string())
                }
            }
        )*
    };
}

impl_field_value_display!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr);

impl FieldValue for str {
    fn to_field_value(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl FieldValue for String {
    fn to_field_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FieldValue for Cow<'_, str> {
    fn to_field_value(&self) -> Value {
        Value::String(self.clone().into_owned())
    }
}

impl FieldValue for Value {
    fn to_field_value(&self) -> Value {
        self.clone()
    }
}

impl<T> FieldValue for Option<T>
where
    T: FieldValue,
{
    fn to_field_value(&self) -> Value {
        self.as_ref()
            .map_or(Value::Null, FieldValue::to_field_value)
    }
}

impl<T> FieldValue for [T]
where
    T: FieldValue,
{
    fn to_field_value(&self) -> Value {
        Value::Array(self.iter().map(FieldValue::to_field_value).collect())
    }
}

impl<T> FieldValue for Vec<T>
where
    T: FieldValue,
{
    fn to_field_value(&self) -> Value {
        self.as_slice().to_field_value()
    }
}

impl<T> FieldValue for &T
where
    T: FieldValue + ?Sized,
{
    fn to_field_value(&self) -> Value {
        (**self).to_field_value()
    }
}

impl<T> FieldValue for Box<T>
where
    T: FieldValue + ?Sized,
{
    fn to_field_value(&self) -> Value {
        (**self).to_field_value()
    }
}

impl<T> FieldValue for Rc<T>
where
    T: FieldValue + ?Sized,
{
    fn to_field_value(&self) -> Value {
        (**self).to_field_value()
    }
}

impl<T> FieldValue for Arc<T>
where
    T: FieldValue + ?Sized,
{
    fn to_field_value(&self) -> Value {
        (**self).to_field_value()
    }
}
