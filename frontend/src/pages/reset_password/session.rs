use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde_json::Value;
use thiserror::Error;

pub const RECOVERY_TYPE: &str = "recovery";

/// Bearer token from a password-recovery link. Never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct RecoveryToken {
    access_token: String,
    expires_at: Option<i64>,
}

impl RecoveryToken {
    pub fn new(access_token: impl Into<String>) -> Option<Self> {
        let access_token = access_token.into().trim().to_string();
        if access_token.is_empty() {
            return None;
        }
        Some(Self {
            access_token,
            expires_at: None,
        })
    }

    pub fn with_expires_at(mut self, expires_at: Option<i64>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

impl std::fmt::Debug for RecoveryToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecoveryToken")
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionRejection {
    #[error("reset link rejected by provider: {0}")]
    Provider(String),
    #[error("link is a `{0}` link, not a recovery link")]
    WrongType(String),
    #[error("reset link has expired")]
    Expired,
    #[error("reset token could not be confirmed: {0}")]
    Unconfirmed(String),
    /// The provider did not answer in time; says nothing about the link.
    #[error("reset link check timed out")]
    TimedOut,
}

/// Outcome of looking for a reset credential in the request context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCheck {
    Present(RecoveryToken),
    Missing,
    Rejected(SessionRejection),
}

/// Reads a recovery credential from a URL fragment such as
/// `#access_token=…&expires_at=…&refresh_token=…&token_type=bearer&type=recovery`
/// or an error fragment such as `#error=access_denied&error_description=…`.
///
/// `now` is unix seconds; tokens whose expiry is at or before it are rejected.
pub fn parse_recovery_fragment(fragment: &str, now: i64) -> SessionCheck {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment).trim();
    if fragment.is_empty() {
        return SessionCheck::Missing;
    }

    let mut access_token = None;
    let mut expires_at = None;
    let mut link_type = None;
    let mut error = None;
    let mut error_code = None;
    let mut error_description = None;

    for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
        let value = value.into_owned();
        match key.as_ref() {
            "access_token" => access_token = Some(value),
            "expires_at" => expires_at = value.trim().parse::<i64>().ok(),
            "type" => link_type = Some(value),
            "error" => error = Some(value),
            "error_code" => error_code = Some(value),
            "error_description" => error_description = Some(value),
            _ => {}
        }
    }

    if error.is_some() || error_code.is_some() || error_description.is_some() {
        let reason = [error_description, error, error_code]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "unknown error".to_string());
        return SessionCheck::Rejected(SessionRejection::Provider(reason));
    }

    let Some(token) = access_token.and_then(RecoveryToken::new) else {
        return SessionCheck::Missing;
    };

    if let Some(kind) = link_type {
        if kind != RECOVERY_TYPE {
            return SessionCheck::Rejected(SessionRejection::WrongType(kind));
        }
    }

    let expires_at = expires_at.or_else(|| jwt_expiry(token.access_token()));
    let token = token.with_expires_at(expires_at);
    if token.is_expired(now) {
        return SessionCheck::Rejected(SessionRejection::Expired);
    }
    SessionCheck::Present(token)
}

/// `exp` claim of a JWT, read without verifying the signature. Only used to
/// reject links that are already stale; the provider remains the authority.
fn jwt_expiry(token: &str) -> Option<i64> {
    let mut parts = token.split('.');
    parts.next()?;
    let payload = parts.next()?;
    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let value: Value = serde_json::from_slice(&decoded).ok()?;
    value.get("exp").and_then(Value::as_i64)
}
