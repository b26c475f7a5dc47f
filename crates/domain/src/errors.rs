use thiserror::Error;

use crate::entities::ProfileField;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    MissingField(ProfileField),

    #[error("Field '{0}' cannot be blank.")]
    BlankField(ProfileField),

    #[error("Field '{0}' must be a text value.")]
    InvalidFieldType(ProfileField),

    #[error("Invalid email format. Only letters, digits, and . _ - are allowed. Email must include '@' and a valid domain.")]
    InvalidEmailFormat,

    #[error("Username should be less than 32 characters and contain only letters and numbers.")]
    InvalidUsername,

    #[error("Unsupported operation: '{0}'. Only 'replace' is allowed.")]
    UnsupportedOperation(String),

    #[error("Field '{path}' cannot be updated. Allowed fields: {}", join_fields(.allowed))]
    FieldNotPatchable {
        path: String,
        allowed: Vec<ProfileField>,
    },

    /// Carries the looked-up username for logging; the message never echoes it.
    #[error("That user does not exist. Please try again.")]
    NotFound(String),

    #[error("That user already exists. Try a different username.")]
    AlreadyExists,

    #[error("{0}")]
    Internal(InternalOperation),
}

impl DomainError {
    /// True for the kinds detected before any store interaction.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::MissingField(_)
                | DomainError::BlankField(_)
                | DomainError::InvalidFieldType(_)
                | DomainError::InvalidEmailFormat
                | DomainError::InvalidUsername
                | DomainError::UnsupportedOperation(_)
                | DomainError::FieldNotPatchable { .. }
        )
    }
}

/// The operation an internal failure happened in. Only the generic
/// message reaches the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalOperation {
    Get,
    List,
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for InternalOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            InternalOperation::Get => "A server error occurred while retrieving the user profile.",
            InternalOperation::List => "A server error occurred while retrieving user profiles.",
            InternalOperation::Create => {
                "An error occurred while creating a user profile. Double-check your request."
            }
            InternalOperation::Update => "Server error occurred while updating user profile.",
            InternalOperation::Delete => "Server error occurred while deleting user profile.",
        };
        f.write_str(message)
    }
}

/// Errors reported by a `UserProfileRepository` implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Repository error: {0}")]
    Failure(String),
}

fn join_fields(fields: &[ProfileField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
