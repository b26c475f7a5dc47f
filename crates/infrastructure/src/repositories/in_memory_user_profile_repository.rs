use async_trait::async_trait;
use domain::{RepositoryError, UserProfile, UserProfileRepository};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Rows {
    by_id: BTreeMap<i32, UserProfile>,
    last_id: i32,
}

impl Rows {
    fn username_taken(&self, username: &str, except: Option<i32>) -> bool {
        self.by_id
            .values()
            .any(|row| row.username == username && row.id != except)
    }
}

/// Process-local store with the same uniqueness rules as the SQLite adapter.
/// The check and the write happen under one write lock.
#[derive(Default)]
pub struct InMemoryUserProfileRepository {
    rows: RwLock<Rows>,
}

impl InMemoryUserProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserProfileRepository for InMemoryUserProfileRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        let rows = self.rows.read().await;
        Ok(rows
            .by_id
            .values()
            .find(|row| row.username == username)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<UserProfile>, RepositoryError> {
        Ok(self.rows.read().await.by_id.values().cloned().collect())
    }

    async fn insert(&self, profile: &UserProfile) -> Result<UserProfile, RepositoryError> {
        let mut rows = self.rows.write().await;
        if rows.username_taken(&profile.username, None) {
            return Err(RepositoryError::UniqueViolation(format!(
                "user_profiles.username = {}",
                profile.username
            )));
        }

        let id = rows.last_id + 1;
        rows.last_id = id;
        let stored = profile.clone().with_id(id);
        rows.by_id.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        let id = profile
            .id
            .ok_or_else(|| RepositoryError::Failure("user profile has no id".to_string()))?;

        let mut rows = self.rows.write().await;
        if rows.username_taken(&profile.username, Some(id)) {
            return Err(RepositoryError::UniqueViolation(format!(
                "user_profiles.username = {}",
                profile.username
            )));
        }

        match rows.by_id.get_mut(&id) {
            Some(row) => {
                *row = profile.clone();
                Ok(())
            }
            None => Err(RepositoryError::Failure(format!(
                "user profile {} vanished before update",
                id
            ))),
        }
    }

    async fn delete(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        if let Some(id) = profile.id {
            self.rows.write().await.by_id.remove(&id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(username: &str) -> UserProfile {
        UserProfile::new(
            username.to_string(),
            format!("{}@example.com", username),
            "1 Main St".to_string(),
            "Springfield".to_string(),
            "IL".to_string(),
            "62701".to_string(),
        )
    }

    #[tokio::test]
    async fn enforces_username_uniqueness() {
        let repo = InMemoryUserProfileRepository::new();
        let mut alice = repo.insert(&profile("alice")).await.unwrap();
        repo.insert(&profile("carol")).await.unwrap();

        assert!(matches!(
            repo.insert(&profile("alice")).await,
            Err(RepositoryError::UniqueViolation(_))
        ));

        alice.username = "carol".to_string();
        assert!(matches!(
            repo.update(&alice).await,
            Err(RepositoryError::UniqueViolation(_))
        ));
        assert_eq!(repo.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_may_keep_own_username() {
        let repo = InMemoryUserProfileRepository::new();
        let mut alice = repo.insert(&profile("alice")).await.unwrap();

        alice.zip_code = "00000".to_string();
        repo.update(&alice).await.unwrap();
        assert_eq!(repo.find_by_username("alice").await.unwrap(), Some(alice));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryUserProfileRepository::new();
        let first = repo.insert(&profile("alpha")).await.unwrap();
        repo.delete(&first).await.unwrap();

        let second = repo.insert(&profile("alpha")).await.unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(repo.find_all().await.unwrap(), vec![second]);
    }
}
