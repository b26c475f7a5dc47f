use crate::entities::UserProfile;
use crate::errors::RepositoryError;
use async_trait::async_trait;

/// Repository trait - defines what we need from persistence layer
/// This is a PORT in hexagonal architecture
///
/// Implementations enforce username uniqueness themselves and report a
/// violation as `RepositoryError::UniqueViolation` from `insert` or `update`.
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    async fn find_by_username(&self, username: &str)
        -> Result<Option<UserProfile>, RepositoryError>;

    /// All stored profiles, ordered by id.
    async fn find_all(&self) -> Result<Vec<UserProfile>, RepositoryError>;

    /// Stores a new profile and returns it with the assigned id.
    async fn insert(&self, profile: &UserProfile) -> Result<UserProfile, RepositoryError>;

    async fn update(&self, profile: &UserProfile) -> Result<(), RepositoryError>;

    async fn delete(&self, profile: &UserProfile) -> Result<(), RepositoryError>;
}
