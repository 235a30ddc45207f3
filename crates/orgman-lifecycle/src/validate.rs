//! Input validation for lifecycle operations.

use orgman_core::error::{OrgError, OrgResult};

pub const MIN_NAME_LENGTH: usize = 3;
pub const MAX_NAME_LENGTH: usize = 50;

/// Organization names are 3 to 50 characters.
pub fn organization_name(name: &str) -> OrgResult<()> {
    let len = name.chars().count();
    if len < MIN_NAME_LENGTH || len > MAX_NAME_LENGTH {
        return Err(OrgError::Validation {
            message: format!(
                "Organization name must be between {MIN_NAME_LENGTH} and \
                 {MAX_NAME_LENGTH} characters"
            ),
        });
    }
    Ok(())
}

/// Minimal shape check; real deliverability is out of scope.
pub fn email(email: &str) -> OrgResult<()> {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        return Err(OrgError::Validation {
            message: "Invalid email address".into(),
        });
    }
    Ok(())
}

pub fn password(password: &str, min_length: usize) -> OrgResult<()> {
    if password.chars().count() < min_length {
        return Err(OrgError::Validation {
            message: format!("Password must be at least {min_length} characters"),
        });
    }
    Ok(())
}
