//! Signup and Login Form Validation
//!
//! Client-side checks run before any request leaves the browser. Signup
//! failures are reported per field; login stops at the first problem.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use thiserror::Error;

use super::types::{LoginRequest, SignupRequest, DEFAULT_ROLE};

pub const USERNAME_MIN_LEN: usize = 3;
pub const PASSWORD_MIN_LEN: usize = 8;

/// Characters allowed in a password besides ASCII letters and digits;
/// at least one is required
pub const PASSWORD_SPECIALS: &str = "@$!%*?&";

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("username pattern is valid"));

static PASSWORD_CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9@$!%*?&]+$").expect("password pattern is valid"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Signup form fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignupField {
    Username,
    Password,
    PasswordConfirm,
    Email,
}

impl SignupField {
    /// Form/input name
    pub fn as_str(&self) -> &'static str {
        match self {
            SignupField::Username => "username",
            SignupField::Password => "password",
            SignupField::PasswordConfirm => "passwordConfirm",
            SignupField::Email => "email",
        }
    }
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("Validation failed for {} field(s)", .errors.len())]
pub struct FieldErrors {
    errors: BTreeMap<SignupField, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the message for a field
    pub fn set(&mut self, field: SignupField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Drop a field's message, as when the user edits that input
    pub fn clear(&mut self, field: SignupField) {
        self.errors.remove(&field);
    }

    pub fn get(&self, field: SignupField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: SignupField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SignupField, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Validate a username: required, minimum length, `[A-Za-z0-9_]` only
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.trim().is_empty() {
        Err("Please enter a username.")
    } else if username.chars().count() < USERNAME_MIN_LEN {
        Err("Username must be at least 3 characters.")
    } else if !USERNAME_RE.is_match(username) {
        Err("Username may only contain letters, numbers and underscores.")
    } else {
        Ok(())
    }
}

/// Validate a password against the signup policy
///
/// At least eight characters, drawn from ASCII letters, digits and
/// `@$!%*?&`, with at least one lowercase letter, one uppercase letter,
/// one digit and one special character.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err("Please enter a password.");
    }
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err("Password must be at least 8 characters.");
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if has_lower && has_upper && has_digit && has_special && PASSWORD_CHARSET_RE.is_match(password)
    {
        Ok(())
    } else {
        Err("Password must include upper and lower case letters, a number and a special character (@$!%*?&).")
    }
}

/// Validate the confirmation field; independent of the password's own validity
pub fn validate_password_confirm(password: &str, confirm: &str) -> Result<(), &'static str> {
    if confirm.is_empty() {
        Err("Please confirm your password.")
    } else if password != confirm {
        Err("Passwords do not match.")
    } else {
        Ok(())
    }
}

/// Validate an email address: required, `local@domain.tld` shape
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.trim().is_empty() {
        Err("Please enter an email address.")
    } else if !EMAIL_RE.is_match(email) {
        Err("Email address is not valid.")
    } else {
        Ok(())
    }
}

/// Message for a duplicate-check result; `None` when the value is free
pub fn availability_error(field: SignupField, available: bool) -> Option<&'static str> {
    if available {
        return None;
    }
    match field {
        SignupField::Email => Some("This email is already in use."),
        _ => Some("This username is already in use."),
    }
}

/// Signup form contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub email: String,
}

impl SignupForm {
    /// Check every field, collecting one message per invalid field
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if let Err(msg) = validate_username(&self.username) {
            errors.set(SignupField::Username, msg);
        }
        if let Err(msg) = validate_password(&self.password) {
            errors.set(SignupField::Password, msg);
        }
        if let Err(msg) = validate_password_confirm(&self.password, &self.password_confirm) {
            errors.set(SignupField::PasswordConfirm, msg);
        }
        if let Err(msg) = validate_email(&self.email) {
            errors.set(SignupField::Email, msg);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and build the request body
    pub fn to_request(&self) -> Result<SignupRequest, FieldErrors> {
        self.validate()?;
        Ok(SignupRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            email: self.email.clone(),
            role: DEFAULT_ROLE.to_string(),
        })
    }

    /// Value of one field, for duplicate checks
    pub fn value(&self, field: SignupField) -> &str {
        match field {
            SignupField::Username => &self.username,
            SignupField::Password => &self.password,
            SignupField::PasswordConfirm => &self.password_confirm,
            SignupField::Email => &self.email,
        }
    }
}

/// First problem found on the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoginValidationError {
    #[error("Please enter your username.")]
    MissingUsername,

    #[error("Please enter your password.")]
    MissingPassword,
}

/// Login form contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), LoginValidationError> {
        if self.username.trim().is_empty() {
            return Err(LoginValidationError::MissingUsername);
        }
        if self.password.trim().is_empty() {
            return Err(LoginValidationError::MissingPassword);
        }
        Ok(())
    }

    /// Validate and build the request body
    pub fn to_request(&self) -> Result<LoginRequest, LoginValidationError> {
        self.validate()?;
        Ok(LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }
}
