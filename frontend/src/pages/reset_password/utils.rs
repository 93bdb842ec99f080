use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// First rule a new password breaks. Rules are checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordIssue {
    #[error("Passwords do not match")]
    Mismatch,
    #[error("Password must be at least 8 characters long")]
    TooShort,
    #[error("Password must contain at least one lowercase letter")]
    MissingLower,
    #[error("Password must contain at least one uppercase letter")]
    MissingUpper,
    #[error("Password must contain at least one number")]
    MissingDigit,
}

/// Two freeform fields held only while the reset form is on screen.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PasswordCandidate {
    pub password: String,
    pub confirm_password: String,
}

impl PasswordCandidate {
    pub fn new(password: impl Into<String>, confirm_password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    pub fn check(&self) -> Result<(), PasswordIssue> {
        check_password(&self.password, &self.confirm_password)
    }
}

impl std::fmt::Debug for PasswordCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordCandidate(..)")
    }
}

pub fn check_password(password: &str, confirm_password: &str) -> Result<(), PasswordIssue> {
    if password != confirm_password {
        return Err(PasswordIssue::Mismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordIssue::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordIssue::MissingLower);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordIssue::MissingUpper);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordIssue::MissingDigit);
    }
    Ok(())
}
