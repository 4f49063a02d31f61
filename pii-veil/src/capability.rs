//! The single decision point for "who may see PII".
//!
//! Visibility is binary: a caller either sees sensitive values verbatim or
//! receives placeholders. There is no partial tier.

use serde_json::Value;

use crate::redaction::Structure;

/// Key added to the current-user payload by [`annotate_current_user`].
pub const CAN_SEE_PII_KEY: &str = "can_see_pii";

/// The identity of whoever an outgoing structure is being handed to.
///
/// Implement this against the host's session or user model. Intermediate
/// staff roles are not privileged; whether they may see raw contact fields
/// is a host setting pushed by [`apply_startup_settings`].
///
/// [`apply_startup_settings`]: crate::apply_startup_settings
pub trait Caller {
    /// Returns true if the caller holds full administrative privilege.
    fn is_admin(&self) -> bool;
}

impl<T> Caller for &T
where
    T: Caller + ?Sized,
{
    fn is_admin(&self) -> bool {
        (**self).is_admin()
    }
}

impl<T> Caller for Box<T>
where
    T: Caller + ?Sized,
{
    fn is_admin(&self) -> bool {
        (**self).is_admin()
    }
}

/// A plain role model for hosts that do not carry their own user type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    /// Not signed in.
    #[default]
    Anonymous,
    /// A regular signed-in user.
    Member,
    /// Staff without full administrative rights.
    Moderator,
    /// Full administrator.
    Admin,
}

impl Caller for Role {
    fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Returns true iff `caller` may see sensitive values unredacted.
///
/// A missing identity is never privileged.
pub fn can_see_pii<C>(caller: Option<&C>) -> bool
where
    C: Caller + ?Sized,
{
    caller.is_some_and(Caller::is_admin)
}

/// Adds the caller's PII visibility flag to a current-user payload.
///
/// Clients use the flag to decide whether to render placeholders as hidden
/// values. An existing `can_see_pii` key is overwritten.
pub fn annotate_current_user<C>(mut structure: Structure, caller: Option<&C>) -> Structure
where
    C: Caller + ?Sized,
{
    structure.insert(
        CAN_SEE_PII_KEY.to_string(),
        Value::Bool(can_see_pii(caller)),
    );
    structure
}
