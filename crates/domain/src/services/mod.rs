pub mod user_profile_service;

pub use user_profile_service::{CreatedProfile, PatchOutcome, UserProfileService};
