use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;

use super::dto::{LoginRequest, SignupRequest};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn present<'a>(
    value: &'a Option<String>,
    field: &'static str,
    message: &'static str,
) -> Result<&'a str, ValidationError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::new(field, message)),
    }
}

/// Validated signup input. Rules run in declaration order; the first
/// violation decides the error message.
pub struct SignupInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub fn validate_signup(req: &SignupRequest) -> Result<SignupInput, ValidationError> {
    let name = present(&req.name, "name", "Name is required")?;

    let email = present(&req.email, "email", "Email is required")?;
    if !is_valid_email(email) {
        return Err(ValidationError::new("email", "Email must be a valid email"));
    }

    let password = present(&req.password, "password", "Password is required")?;
    if !password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new(
            "password",
            "Password must contain only alphanumeric characters",
        ));
    }
    if password.len() < 5 {
        return Err(ValidationError::new(
            "password",
            "Password must be at least 5 characters long",
        ));
    }
    if password.len() > 15 {
        return Err(ValidationError::new(
            "password",
            "Password must not exceed 15 characters",
        ));
    }

    let confirmation = present(
        &req.confirmation_password,
        "confirmationPassword",
        "Confirmation password is required",
    )?;
    if confirmation != password {
        return Err(ValidationError::new(
            "confirmationPassword",
            "Confirmation password must match the password",
        ));
    }

    Ok(SignupInput {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub fn validate_login(req: &LoginRequest) -> Result<LoginInput, ValidationError> {
    let email = present(&req.email, "email", "Email is required")?;
    if !is_valid_email(email) {
        return Err(ValidationError::new("email", "Email must be a valid email"));
    }
    let password = present(&req.password, "password", "Password is required")?;
    Ok(LoginInput {
        email: email.to_string(),
        password: password.to_string(),
    })
}
