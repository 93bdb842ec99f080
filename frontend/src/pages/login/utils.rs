pub const EMAIL_REQUIRED: &str = "Email is required";
pub const PASSWORD_REQUIRED: &str = "Password is required";

#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Checks the sign-in form locally. The email is trimmed; the password is
/// sent exactly as typed.
pub fn validate_credentials(email: &str, password: &str) -> Result<LoginCredentials, String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(EMAIL_REQUIRED.into());
    }
    if password.is_empty() {
        return Err(PASSWORD_REQUIRED.into());
    }
    Ok(LoginCredentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}
