use serde::{Deserialize, Serialize};

use crate::entities::ProfileField;
use crate::errors::DomainError;
use crate::validation::fields::validate_username;

const REPLACE_OP: &str = "replace";

/// A single-field patch operation as received on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchRequest {
    #[serde(default)]
    pub op: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

impl PatchRequest {
    pub fn replace(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            op: Some(REPLACE_OP.to_string()),
            path: Some(path.into()),
            value: Some(value.into()),
        }
    }
}

/// A patch that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReplacement {
    pub field: ProfileField,
    pub value: String,
}

/// Checks `op`, then `path`, then that a value was supplied. A new username
/// must still be a valid lookup key.
pub fn validate_patch_request(patch: &PatchRequest) -> Result<FieldReplacement, DomainError> {
    let op = patch.op.as_deref();
    if !op.is_some_and(|op| op.eq_ignore_ascii_case(REPLACE_OP)) {
        return Err(DomainError::UnsupportedOperation(
            op.unwrap_or("null").to_string(),
        ));
    }

    let path = patch.path.as_deref().unwrap_or("null");
    let field = path
        .parse::<ProfileField>()
        .map_err(|_| DomainError::FieldNotPatchable {
            path: path.to_string(),
            allowed: ProfileField::ALL.to_vec(),
        })?;

    let value = match patch.value.as_deref() {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Err(DomainError::BlankField(field)),
    };

    if field == ProfileField::Username {
        validate_username(value)?;
    }

    Ok(FieldReplacement {
        field,
        value: value.to_string(),
    })
}
