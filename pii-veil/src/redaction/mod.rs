//! Structure traversal, field sources, and the host-facing decorator.
//!
//! This module ties the pieces together:
//!
//! - **`source`**: Host layer - where authoritative values come from (`FieldSource`, `FieldValue`)
//! - **`redactor`**: Algorithm layer - the recursive walk and accessor guard (`Redactor`)
//! - **`guard`**: Binding layer - per-object decorator used at the serialization boundary (`Guard`)
//!
//! The policy table lives in `crate::policy` and the privilege predicate in
//! `crate::capability`.

mod guard;
mod redactor;
mod source;

pub use guard::Guard;
pub use redactor::Redactor;
pub use source::{FieldSource, FieldValue};

/// An ordered field-name to value mapping, as handed to a consumer.
///
/// Key order is preserved through redaction.
pub type Structure = serde_json::Map<String, serde_json::Value>;
