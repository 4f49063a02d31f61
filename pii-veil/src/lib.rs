//! Role-gated redaction of personally identifiable information.
//!
//! This crate separates:
//! - **Capability**: who may see PII unredacted ([`can_see_pii`]).
//! - **Policy**: which field names are sensitive and what a hidden value
//!   looks like ([`PolicyTable`]).
//! - **Redaction**: walking an outgoing structure and replacing sensitive
//!   values with type-appropriate placeholders ([`Redactor`], [`Guard`]).
//!
//! The host binding supplies the caller identity ([`Caller`]) and the object
//! the structure was serialized from ([`FieldSource`]). Sensitive values are
//! always re-read from the source, never from the structure itself, because
//! the structure may already hold a processed value.
//!
//! Key rules:
//! - Admins see everything; [`Redactor::process`] returns its input untouched.
//! - Everyone else gets strings replaced by the placeholder, numbers by `0`,
//!   booleans by `false`, anything else by `null`.
//! - A sensitive key the source cannot supply is dropped from the output.
//! - Non-sensitive objects, and objects inside arrays, are walked recursively;
//!   other values pass through.
//!
//! What this crate does not do:
//! - perform I/O or logging
//! - decide which structures leave the system; the host calls [`Guard`] at
//!   its serialization boundary
//!
//! The `FieldSource` derive macro lives in `pii-veil-derive` and is
//! re-exported here.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use pii_veil_derive::FieldSource;

#[allow(unused_extern_crates)]
extern crate self as pii_veil;

// Module declarations
mod capability;
mod policy;
mod redaction;
mod reports;
#[cfg(feature = "slog")]
pub mod slog;

// Re-exports
pub use capability::{annotate_current_user, can_see_pii, Caller, Role, CAN_SEE_PII_KEY};
pub use policy::{
    PolicyTable, DEFAULT_HIDDEN_REPORTS, DEFAULT_INTERCEPTED_KINDS, DEFAULT_SENSITIVE_FIELDS,
    HIDDEN_PLACEHOLDER,
};
pub use redaction::{FieldSource, FieldValue, Guard, Redactor, Structure};
pub use reports::{apply_startup_settings, visible_reports, SiteSettings, REPORT_SEPARATOR};
pub use serde_json::Value;
