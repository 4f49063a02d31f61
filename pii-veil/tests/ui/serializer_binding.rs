//! A host binding with renamed, optional, and generic sources.

use std::net::IpAddr;

use pii_veil::{FieldSource, Guard, PolicyTable, Role, Structure};

#[derive(FieldSource)]
#[field_source(kind = "UserAuthTokenSerializer")]
struct AuthToken {
    #[pii]
    client_ip: Option<IpAddr>,
    #[pii(rename = "location")]
    seen_at: String,
    user_agent: String,
}

#[derive(FieldSource)]
struct Generic<'a, T> {
    #[pii]
    email: &'a T,
}

fn main() {
    let policy = PolicyTable::default();
    let token = AuthToken {
        client_ip: None,
        seen_at: "Oslo".to_string(),
        user_agent: "curl".to_string(),
    };
    let guard = Guard::new(&policy, &token, Some(&Role::Member));
    let exposed = guard.attributes(Structure::new());
    assert!(exposed.is_empty());
    assert_eq!(token.supplied_fields(), ["client_ip", "location"]);
    assert!(!token.user_agent.is_empty());

    let email = String::from("a@b.com");
    let generic = Generic { email: &email };
    assert!(generic.field("email").is_some());
}
