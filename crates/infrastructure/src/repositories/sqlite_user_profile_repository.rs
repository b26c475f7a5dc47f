use crate::database::{user_profiles, SqlitePool};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use domain::{RepositoryError, UserProfile, UserProfileRepository};
use tracing::debug;

// Database model - separate from domain entity
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct UserProfileModel {
    id: i32,
    username: String,
    email_address: String,
    street_address: String,
    city: String,
    state: String,
    zip_code: String,
}

/// Column values written on insert and update; the id is never written.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = user_profiles)]
struct UserProfileChanges {
    username: String,
    email_address: String,
    street_address: String,
    city: String,
    state: String,
    zip_code: String,
}

impl From<UserProfileModel> for UserProfile {
    fn from(model: UserProfileModel) -> Self {
        UserProfile::new(
            model.username,
            model.email_address,
            model.street_address,
            model.city,
            model.state,
            model.zip_code,
        )
        .with_id(model.id)
    }
}

impl From<&UserProfile> for UserProfileChanges {
    fn from(profile: &UserProfile) -> Self {
        UserProfileChanges {
            username: profile.username.clone(),
            email_address: profile.email_address.clone(),
            street_address: profile.street_address.clone(),
            city: profile.city.clone(),
            state: profile.state.clone(),
            zip_code: profile.zip_code.clone(),
        }
    }
}

fn map_diesel_error(error: DieselError) -> RepositoryError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RepositoryError::UniqueViolation(info.message().to_string())
        }
        other => RepositoryError::Failure(other.to_string()),
    }
}

fn require_id(profile: &UserProfile) -> Result<i32, RepositoryError> {
    profile
        .id
        .ok_or_else(|| RepositoryError::Failure("user profile has no id".to_string()))
}

pub struct SqliteUserProfileRepository {
    pool: SqlitePool,
}

impl SqliteUserProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserProfileRepository for SqliteUserProfileRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| RepositoryError::Failure(e.to_string()))?;
        let username = username.to_string();

        let result = tokio::task::spawn_blocking(move || {
            user_profiles::table
                .filter(user_profiles::username.eq(username))
                .select(UserProfileModel::as_select())
                .first::<UserProfileModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(|e| RepositoryError::Failure(e.to_string()))?
        .map_err(map_diesel_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<UserProfile>, RepositoryError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| RepositoryError::Failure(e.to_string()))?;

        let result = tokio::task::spawn_blocking(move || {
            user_profiles::table
                .order(user_profiles::id.asc())
                .select(UserProfileModel::as_select())
                .load::<UserProfileModel>(&mut conn)
        })
        .await
        .map_err(|e| RepositoryError::Failure(e.to_string()))?
        .map_err(map_diesel_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, profile: &UserProfile) -> Result<UserProfile, RepositoryError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| RepositoryError::Failure(e.to_string()))?;
        let new_profile = UserProfileChanges::from(profile);

        // Insert and read back the assigned id atomically
        let result = tokio::task::spawn_blocking(move || {
            let conn: &mut SqliteConnection = &mut conn;
            conn.transaction::<_, DieselError, _>(|conn| {
                diesel::insert_into(user_profiles::table)
                    .values(&new_profile)
                    .execute(conn)?;

                user_profiles::table
                    .filter(user_profiles::username.eq(&new_profile.username))
                    .select(UserProfileModel::as_select())
                    .first::<UserProfileModel>(conn)
            })
        })
        .await
        .map_err(|e| RepositoryError::Failure(e.to_string()))?
        .map_err(map_diesel_error)?;

        debug!("inserted user_profiles row {}", result.id);
        Ok(result.into())
    }

    async fn update(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        let profile_id = require_id(profile)?;
        let mut conn = self
            .pool
            .get()
            .map_err(|e| RepositoryError::Failure(e.to_string()))?;
        let changes = UserProfileChanges::from(profile);

        let affected = tokio::task::spawn_blocking(move || {
            diesel::update(user_profiles::table.find(profile_id))
                .set(&changes)
                .execute(&mut conn)
        })
        .await
        .map_err(|e| RepositoryError::Failure(e.to_string()))?
        .map_err(map_diesel_error)?;

        if affected == 0 {
            return Err(RepositoryError::Failure(format!(
                "user profile {} vanished before update",
                profile_id
            )));
        }
        Ok(())
    }

    async fn delete(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        let profile_id = require_id(profile)?;
        let mut conn = self
            .pool
            .get()
            .map_err(|e| RepositoryError::Failure(e.to_string()))?;

        tokio::task::spawn_blocking(move || {
            diesel::delete(user_profiles::table.find(profile_id)).execute(&mut conn)
        })
        .await
        .map_err(|e| RepositoryError::Failure(e.to_string()))?
        .map_err(map_diesel_error)?;

        Ok(())
    }
}
