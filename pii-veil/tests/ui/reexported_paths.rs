//! The derive only needs the re-exported items; no direct `serde_json` use.

use pii_veil::FieldSource;

#[derive(FieldSource)]
#[field_source(kind = "UserCardSerializer")]
pub struct UserCard {
    #[pii]
    pub email: String,
    #[pii]
    pub secondary_emails: Vec<String>,
}

fn main() {
    let card = UserCard {
        email: "a@b.com".into(),
        secondary_emails: Vec::new(),
    };
    assert_eq!(card.kind(), "UserCardSerializer");
    assert!(card.supplies("secondary_emails"));
}
