//! Request validation run by `UserProfileService` before any store access.
//!
//! Every check is fail-fast: the first violation in declared field order is
//! the one reported.

pub mod fields;
pub mod patch;

pub use fields::{validate_create_request, validate_email, validate_username, ProfilePayload};
pub use patch::{validate_patch_request, FieldReplacement, PatchRequest};
