use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordGrantRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoverRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AuthUser {
    pub fn display_name(&self) -> String {
        self.email.clone().unwrap_or_else(|| self.id.clone())
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub refresh_token: String,
    pub user: AuthUser,
}

impl std::fmt::Debug for SessionResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionResponse")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// Error body returned by the auth provider. Different provider versions use
/// different field names, so everything is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ProviderErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

impl ProviderErrorBody {
    pub fn message(&self) -> Option<String> {
        [
            &self.msg,
            &self.message,
            &self.error_description,
            &self.error,
        ]
        .into_iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
    }
}

pub const CODE_VALIDATION: &str = "VALIDATION_ERROR";
pub const CODE_PROVIDER: &str = "PROVIDER_ERROR";
pub const CODE_REQUEST_FAILED: &str = "REQUEST_FAILED";
pub const CODE_TIMEOUT: &str = "TIMEOUT";
pub const CODE_UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: CODE_VALIDATION.to_string(),
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: CODE_UNKNOWN.to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: CODE_REQUEST_FAILED.to_string(),
            details: None,
        }
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: CODE_TIMEOUT.to_string(),
            details: None,
        }
    }

    /// Builds an error from a non-success provider response. The message is
    /// empty when the provider sent none; callers pick their own fallback.
    pub(crate) fn from_provider(status: u16, body: ProviderErrorBody) -> Self {
        Self {
            error: body.message().unwrap_or_default(),
            code: body
                .error_code
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| CODE_PROVIDER.to_string()),
            details: Some(serde_json::json!({ "status": status })),
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.code == CODE_TIMEOUT
    }

    /// True when the error came back from the provider as an HTTP response
    /// rather than from the transport or from local validation.
    pub fn is_provider_error(&self) -> bool {
        self.status().is_some()
    }

    pub fn status(&self) -> Option<u16> {
        self.details
            .as_ref()
            .and_then(|d| d.get("status"))
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok())
    }

    pub fn message_or(&self, fallback: &str) -> String {
        if self.error.trim().is_empty() {
            fallback.to_string()
        } else {
            self.error.clone()
        }
    }
}
