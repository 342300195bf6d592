//! Sign Up Validation
//!
//! Field validation for the sign up request. All fields are checked and
//! every failing field gets exactly one message, the first rule it
//! breaks in order: presence, then length, then pattern.

use std::collections::BTreeMap;

use crate::application::sign_up::SignUpInput;
use crate::presentation::dto::SignUpRequest;

pub const MSG_USERNAME_NULL: &str = "Username cannot be null";
pub const MSG_NULL: &str = "Cannot be null";
pub const MSG_SIZE_4_255: &str = "It must have minimum 4 and maximum 255 characters";
pub const MSG_SIZE_8_255: &str = "It must have minimum 8 and maximum 255 characters";
pub const MSG_PASSWORD_PATTERN: &str =
    "Password must have at least one uppercase, one lowercase letter and one number";

/// Validate a sign up request, collecting one message per failing field.
pub fn validate_sign_up(req: SignUpRequest) -> Result<SignUpInput, BTreeMap<String, String>> {
    let mut errors = BTreeMap::new();

    match &req.username {
        None => {
            errors.insert("username".to_string(), MSG_USERNAME_NULL.to_string());
        }
        Some(username) if !within(username, 4, 255) => {
            errors.insert("username".to_string(), MSG_SIZE_4_255.to_string());
        }
        Some(_) => {}
    }

    match &req.display_name {
        None => {
            errors.insert("displayName".to_string(), MSG_NULL.to_string());
        }
        Some(display_name) if !within(display_name, 4, 255) => {
            errors.insert("displayName".to_string(), MSG_SIZE_4_255.to_string());
        }
        Some(_) => {}
    }

    match &req.password {
        None => {
            errors.insert("password".to_string(), MSG_NULL.to_string());
        }
        Some(password) if !within(password, 8, 255) => {
            errors.insert("password".to_string(), MSG_SIZE_8_255.to_string());
        }
        Some(password) if !password_pattern_ok(password) => {
            errors.insert("password".to_string(), MSG_PASSWORD_PATTERN.to_string());
        }
        Some(_) => {}
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Checked above, every field is Some here.
    Ok(SignUpInput {
        username: req.username.unwrap_or_default(),
        display_name: req.display_name.unwrap_or_default(),
        password: req.password.unwrap_or_default(),
        image: req.image,
    })
}

fn within(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

/// At least one ASCII lowercase letter, one uppercase letter and one
/// digit.
fn password_pattern_ok(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}
