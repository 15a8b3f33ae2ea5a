use crate::domain::model::PATH_SEPARATOR;
use crate::utils::error::{ComposeError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ComposeError::InvalidDefinition {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// A node key becomes a single path segment, so it cannot embed the
/// separator and cannot be empty.
pub fn validate_node_key(field_name: &str, key: &str) -> Result<()> {
    validate_non_empty_string(field_name, key)?;

    if key.contains(PATH_SEPARATOR) {
        return Err(ComposeError::InvalidDefinition {
            field: field_name.to_string(),
            value: key.to_string(),
            reason: format!("Key cannot contain the path separator '{}'", PATH_SEPARATOR),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ComposeError::InvalidDefinition {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ComposeError::InvalidDefinition {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}
