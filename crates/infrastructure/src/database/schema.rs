// Database schema for the user profile store
diesel::table! {
    user_profiles (id) {
        id -> Integer,
        username -> Text,          // Unique lookup key
        email_address -> Text,
        street_address -> Text,
        city -> Text,
        state -> Text,
        zip_code -> Text,
    }
}

pub(crate) const CREATE_USER_PROFILES: &str = "
    CREATE TABLE IF NOT EXISTS user_profiles (
        id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
        username TEXT NOT NULL UNIQUE,
        email_address TEXT NOT NULL,
        street_address TEXT NOT NULL,
        city TEXT NOT NULL,
        state TEXT NOT NULL,
        zip_code TEXT NOT NULL
    )
";
