pub mod in_memory_user_profile_repository;
pub mod sqlite_user_profile_repository;

pub use in_memory_user_profile_repository::InMemoryUserProfileRepository;
pub use sqlite_user_profile_repository::SqliteUserProfileRepository;
