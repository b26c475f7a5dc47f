use crate::entities::{ProfileField, UserProfile};
use crate::errors::{DomainError, InternalOperation, RepositoryError};
use crate::repositories::UserProfileRepository;
use crate::validation::{validate_create_request, validate_patch_request, PatchRequest, ProfilePayload};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Result of a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedProfile {
    pub id: i32,
    pub username: String,
}

impl fmt::Display for CreatedProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "New user ID {} created successfully.", self.id)
    }
}

/// Result of a successful patch; `username` is the key after the patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub field: ProfileField,
    pub username: String,
}

impl fmt::Display for PatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} updated for user: {}", self.field, self.username)
    }
}

/// User profile service - validation, lookup and mutation of stored profiles.
pub struct UserProfileService {
    repository: Arc<dyn UserProfileRepository>,
}

impl UserProfileService {
    pub fn new(repository: Arc<dyn UserProfileRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_profile(&self, username: &str) -> Result<UserProfile, DomainError> {
        self.lookup(username, InternalOperation::Get).await
    }

    /// An empty store is a successful, empty result.
    pub async fn list_profiles(&self) -> Result<Vec<UserProfile>, DomainError> {
        self.repository
            .find_all()
            .await
            .map_err(|e| internal(InternalOperation::List, e))
    }

    pub async fn create_profile(
        &self,
        payload: &ProfilePayload,
    ) -> Result<CreatedProfile, DomainError> {
        let profile = validate_create_request(payload)?;

        let saved = self
            .repository
            .insert(&profile)
            .await
            .map_err(|e| conflict_or_internal(InternalOperation::Create, e))?;

        let id = saved.id.ok_or_else(|| {
            error!("repository returned profile '{}' without an id", saved.username);
            DomainError::Internal(InternalOperation::Create)
        })?;

        info!("created user profile {} ({})", id, saved.username);
        Ok(CreatedProfile {
            id,
            username: saved.username,
        })
    }

    /// Replaces one field of the profile keyed by `username`.
    pub async fn update_profile(
        &self,
        username: &str,
        patch: &PatchRequest,
    ) -> Result<PatchOutcome, DomainError> {
        let existing = self.lookup(username, InternalOperation::Update).await?;

        let replacement = validate_patch_request(patch).map_err(|e| {
            debug!("rejected patch for '{}': {}", username, e);
            e
        })?;

        let mut updated = existing;
        updated.set_field(replacement.field, replacement.value);

        self.repository
            .update(&updated)
            .await
            .map_err(|e| conflict_or_internal(InternalOperation::Update, e))?;

        info!("updated {} for user profile '{}'", replacement.field, username);
        Ok(PatchOutcome {
            field: replacement.field,
            username: updated.username,
        })
    }

    pub async fn delete_profile(&self, username: &str) -> Result<(), DomainError> {
        let existing = self.lookup(username, InternalOperation::Delete).await?;

        self.repository
            .delete(&existing)
            .await
            .map_err(|e| internal(InternalOperation::Delete, e))?;

        info!("deleted user profile '{}'", username);
        Ok(())
    }

    async fn lookup(
        &self,
        username: &str,
        operation: InternalOperation,
    ) -> Result<UserProfile, DomainError> {
        match self.repository.find_by_username(username).await {
            Ok(Some(profile)) => Ok(profile),
            Ok(None) => {
                debug!("no user profile with username '{}'", username);
                Err(DomainError::NotFound(username.to_string()))
            }
            Err(e) => Err(internal(operation, e)),
        }
    }
}

fn internal(operation: InternalOperation, cause: RepositoryError) -> DomainError {
    error!("{:?} failed: {}", operation, cause);
    DomainError::Internal(operation)
}

fn conflict_or_internal(operation: InternalOperation, cause: RepositoryError) -> DomainError {
    match cause {
        RepositoryError::UniqueViolation(detail) => {
            warn!("{:?} rejected, username already taken: {}", operation, detail);
            DomainError::AlreadyExists
        }
        other => internal(operation, other),
    }
}
