use super::repository::ForgotPasswordRepository;
use crate::api::{ApiClient, ApiError};
use leptos::*;
use std::rc::Rc;

pub const RESET_SENT_MESSAGE: &str = "Check your email for the reset link.";

#[derive(Clone)]
pub struct ForgotPasswordViewModel {
    pub email: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    pub success: RwSignal<Option<String>>,
    pub submit_action: Action<String, Result<(), ApiError>>,
}

pub fn use_forgot_password_view_model() -> ForgotPasswordViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = ForgotPasswordRepository::new_with_client(Rc::new(api));

    let email = create_rw_signal(String::new());
    let error = create_rw_signal(None);
    let success = create_rw_signal(None);

    let submit_action = create_action(move |value: &String| {
        let repo = repository.clone();
        let email = validate_email(value);
        async move {
            match email {
                Ok(email) => repo.request_reset(email).await,
                Err(err) => Err(err),
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = submit_action.value().get() {
            match result {
                Ok(()) => {
                    log::info!("Password reset email requested");
                    success.set(Some(RESET_SENT_MESSAGE.to_string()));
                    error.set(None);
                }
                Err(err) => {
                    log::warn!("Password reset request failed: {} ({})", err, err.code);
                    error.set(Some(err.message_or("Failed to send reset email")));
                    success.set(None);
                }
            }
        }
    });

    ForgotPasswordViewModel {
        email,
        error,
        success,
        submit_action,
    }
}

pub(crate) fn validate_email(raw: &str) -> Result<String, ApiError> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email.to_string()),
        _ => Err(ApiError::validation("Enter a valid email address")),
    }
}
