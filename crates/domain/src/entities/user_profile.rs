use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six caller-supplied profile fields, in their declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    Username,
    EmailAddress,
    StreetAddress,
    City,
    State,
    ZipCode,
}

impl ProfileField {
    /// Required on create and the only fields a patch may target.
    pub const ALL: [ProfileField; 6] = [
        ProfileField::Username,
        ProfileField::EmailAddress,
        ProfileField::StreetAddress,
        ProfileField::City,
        ProfileField::State,
        ProfileField::ZipCode,
    ];

    /// Wire name as it appears in request payloads and patch paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Username => "username",
            ProfileField::EmailAddress => "emailAddress",
            ProfileField::StreetAddress => "streetAddress",
            ProfileField::City => "city",
            ProfileField::State => "state",
            ProfileField::ZipCode => "zipCode",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or(())
    }
}

/// Core user profile entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Option<i32>, // None until the store assigns one
    pub username: String,
    pub email_address: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl UserProfile {
    pub fn new(
        username: String,
        email_address: String,
        street_address: String,
        city: String,
        state: String,
        zip_code: String,
    ) -> Self {
        Self {
            id: None,
            username,
            email_address,
            street_address,
            city,
            state,
            zip_code,
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Username => &self.username,
            ProfileField::EmailAddress => &self.email_address,
            ProfileField::StreetAddress => &self.street_address,
            ProfileField::City => &self.city,
            ProfileField::State => &self.state,
            ProfileField::ZipCode => &self.zip_code,
        }
    }

    /// Replaces exactly one field, leaving the rest untouched.
    pub fn set_field(&mut self, field: ProfileField, value: String) {
        let slot = match field {
            ProfileField::Username => &mut self.username,
            ProfileField::EmailAddress => &mut self.email_address,
            ProfileField::StreetAddress => &mut self.street_address,
            ProfileField::City => &mut self.city,
            ProfileField::State => &mut self.state,
            ProfileField::ZipCode => &mut self.zip_code,
        };
        *slot = value;
    }
}
