use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::entities::{ProfileField, UserProfile};
use crate::errors::DomainError;

/// Raw create payload: the JSON object as received. Keys other than the
/// profile fields are ignored.
pub type ProfilePayload = Map<String, Value>;

const MAX_USERNAME_LEN: usize = 31;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+(\.[a-zA-Z0-9._-]+)*\.[a-zA-Z]{2,}$")
        .expect("email pattern compiles")
});

/// Checks that every required field is present and non-blank, then the
/// username and email rules, and builds the unsaved profile.
pub fn validate_create_request(payload: &ProfilePayload) -> Result<UserProfile, DomainError> {
    let required = |field: ProfileField| -> Result<String, DomainError> {
        let raw = payload
            .get(field.as_str())
            .ok_or(DomainError::MissingField(field))?;
        let value = field_text(field, raw)?;
        if value.trim().is_empty() {
            return Err(DomainError::BlankField(field));
        }
        Ok(value)
    };

    // Arguments evaluate in declared field order.
    let profile = UserProfile::new(
        required(ProfileField::Username)?,
        required(ProfileField::EmailAddress)?,
        required(ProfileField::StreetAddress)?,
        required(ProfileField::City)?,
        required(ProfileField::State)?,
        required(ProfileField::ZipCode)?,
    );

    validate_username(&profile.username)?;
    validate_email(&profile.email_address)?;
    Ok(profile)
}

/// Scalars are taken as their text; null reads as blank.
fn field_text(field: ProfileField, raw: &Value) -> Result<String, DomainError> {
    match raw {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(DomainError::InvalidFieldType(field)),
    }
}

pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if EMAIL_PATTERN.is_match(email) {
        Ok(())
    } else {
        Err(DomainError::InvalidEmailFormat)
    }
}

/// Lookup keys are 1 to 31 ASCII letters or digits.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    let well_formed = !username.is_empty()
        && username.len() <= MAX_USERNAME_LEN
        && username.chars().all(|c| c.is_ascii_alphanumeric());

    if well_formed {
        Ok(())
    } else {
        Err(DomainError::InvalidUsername)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> ProfilePayload {
        let body = json!({
            "username": "validuser",
            "emailAddress": "valid.user@example.com",
            "streetAddress": "123 Main St",
            "city": "Chicago",
            "state": "IL",
            "zipCode": "60601"
        });
        match body {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn accepts_complete_payload() {
        let profile = validate_create_request(&valid_payload()).unwrap();
        assert_eq!(profile.id, None);
        assert_eq!(profile.username, "validuser");
        assert_eq!(profile.email_address, "valid.user@example.com");
        assert_eq!(profile.zip_code, "60601");
    }

    #[test]
    fn ignores_unknown_keys_of_any_type() {
        let mut payload = valid_payload();
        payload.insert("nickname".into(), json!("al"));
        payload.insert("id".into(), Value::Null);
        payload.insert("age".into(), json!(5));
        payload.insert("tags".into(), json!(["a", "b"]));
        payload.insert("meta".into(), json!({"source": "import"}));
        assert!(validate_create_request(&payload).is_ok());
    }

    #[test]
    fn scalar_values_are_taken_as_text() {
        let mut payload = valid_payload();
        payload.insert("zipCode".into(), json!(19522));
        payload.insert("state".into(), json!(true));
        let profile = validate_create_request(&payload).unwrap();
        assert_eq!(profile.zip_code, "19522");
        assert_eq!(profile.state, "true");
    }

    #[test]
    fn rejects_structured_value_for_profile_field() {
        let mut payload = valid_payload();
        payload.insert("city".into(), json!({"name": "Chicago"}));
        let err = validate_create_request(&payload).unwrap_err();
        assert_eq!(err, DomainError::InvalidFieldType(ProfileField::City));
        assert_eq!(err.to_string(), "Field 'city' must be a text value.");
    }

    #[test]
    fn reports_each_missing_field() {
        for field in ProfileField::ALL {
            let mut payload = valid_payload();
            payload.remove(field.as_str());
            assert_eq!(
                validate_create_request(&payload),
                Err(DomainError::MissingField(field))
            );
        }
    }

    #[test]
    fn reports_first_missing_field_in_declared_order() {
        let mut payload = valid_payload();
        payload.remove("zipCode");
        payload.remove("city");
        payload.remove("emailAddress");
        assert_eq!(
            validate_create_request(&payload),
            Err(DomainError::MissingField(ProfileField::EmailAddress))
        );
    }

    #[test]
    fn reports_each_blank_field() {
        for field in ProfileField::ALL {
            for blank in ["", "   ", "\t\n"] {
                let mut payload = valid_payload();
                payload.insert(field.as_str().into(), json!(blank));
                assert_eq!(
                    validate_create_request(&payload),
                    Err(DomainError::BlankField(field))
                );
            }
        }
    }

    #[test]
    fn null_value_counts_as_blank() {
        let mut payload = valid_payload();
        payload.insert("state".into(), Value::Null);
        assert_eq!(
            validate_create_request(&payload),
            Err(DomainError::BlankField(ProfileField::State))
        );
    }

    #[test]
    fn presence_checks_run_before_format_checks() {
        let mut payload = valid_payload();
        payload.insert("username".into(), json!("john_doe"));
        payload.insert("emailAddress".into(), json!("invalid-email"));
        payload.remove("zipCode");
        assert_eq!(
            validate_create_request(&payload),
            Err(DomainError::MissingField(ProfileField::ZipCode))
        );
    }

    #[test]
    fn rejects_username_that_cannot_be_looked_up() {
        let too_long = "a".repeat(32);
        for username in ["john_doe", "two words", too_long.as_str()] {
            let mut payload = valid_payload();
            payload.insert("username".into(), json!(username));
            assert_eq!(
                validate_create_request(&payload),
                Err(DomainError::InvalidUsername)
            );
        }
    }

    #[test]
    fn username_rule_runs_before_email_format() {
        let mut payload = valid_payload();
        payload.insert("username".into(), json!("john_doe"));
        payload.insert("emailAddress".into(), json!("invalid-email"));
        assert_eq!(
            validate_create_request(&payload),
            Err(DomainError::InvalidUsername)
        );
    }

    #[test]
    fn rejects_bad_email_in_payload() {
        let mut payload = valid_payload();
        payload.insert("emailAddress".into(), json!("invalid-email"));
        let err = validate_create_request(&payload).unwrap_err();
        assert_eq!(err, DomainError::InvalidEmailFormat);
        assert_eq!(
            err.to_string(),
            "Invalid email format. Only letters, digits, and . _ - are allowed. Email must include '@' and a valid domain."
        );
    }

    #[test]
    fn email_pattern() {
        assert!(validate_email("user.name@example.co.uk").is_ok());
        assert!(validate_email("zulu011@example.com").is_ok());
        assert!(validate_email("a_b-c@sub.domain.io").is_ok());

        assert!(validate_email("user@@example..com").is_err());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("user@example").is_err());
        assert!(validate_email("user@example.c").is_err());
        assert!(validate_email("user+tag@example.com").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn username_rules() {
        assert!(validate_username("zulu011").is_ok());
        assert!(validate_username(&"a".repeat(31)).is_ok());

        assert_eq!(validate_username(""), Err(DomainError::InvalidUsername));
        assert_eq!(
            validate_username(&"a".repeat(32)),
            Err(DomainError::InvalidUsername)
        );
        assert_eq!(validate_username("bad name"), Err(DomainError::InvalidUsername));
        assert_eq!(validate_username("user_1"), Err(DomainError::InvalidUsername));
    }
}
