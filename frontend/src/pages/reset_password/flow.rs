//! State machine behind the reset-password page.
//!
//! The page starts in [`ResetPhase::Validating`]. The result of the
//! credential check moves it to `Ready` (form shown) or `Invalid` (notice and
//! redirect to the forgot-password route). From `Ready`, a successful
//! credential update moves it to `Succeeded` and schedules the login redirect.
//!
//! Transitions return [`FlowEffect`]s instead of performing them so the view
//! model decides how to notify and navigate.

use std::time::Duration;
use thiserror::Error;

use super::{
    session::{RecoveryToken, SessionCheck, SessionRejection},
    utils::{PasswordCandidate, PasswordIssue},
};
use crate::{api::ApiError, config::RuntimeConfig, state::toast::ToastKind};

pub const MISSING_LINK_MESSAGE: &str = "You need to use a password reset link to access this page.";
pub const INVALID_LINK_MESSAGE: &str =
    "Invalid or expired reset link. Please request a new password reset.";
pub const SUCCESS_MESSAGE: &str = "Password updated successfully!";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update password";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResetPasswordError {
    #[error("{}", session_message(.0))]
    SessionInvalid(Option<SessionRejection>),
    #[error("{0}")]
    ValidationFailed(PasswordIssue),
    #[error("{0}")]
    SubmissionFailed(String),
    #[error("The request timed out. Please try again.")]
    TimedOut,
    #[error("Something went wrong. Please try again.")]
    Unexpected,
}

fn session_message(rejection: &Option<SessionRejection>) -> &'static str {
    match rejection {
        None => MISSING_LINK_MESSAGE,
        Some(_) => INVALID_LINK_MESSAGE,
    }
}

impl ResetPasswordError {
    /// Classifies a failed credential update. Provider responses keep their
    /// message; anything that never reached the provider is generic.
    pub fn from_submission(err: &ApiError) -> Self {
        if err.is_timeout() {
            Self::TimedOut
        } else if err.is_provider_error() {
            Self::SubmissionFailed(err.message_or(UPDATE_FAILED_MESSAGE))
        } else {
            Self::Unexpected
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSettings {
    pub login_path: String,
    pub forgot_password_path: String,
    pub success_redirect_delay: Duration,
}

impl From<&RuntimeConfig> for FlowSettings {
    fn from(cfg: &RuntimeConfig) -> Self {
        Self {
            login_path: cfg.login_path.clone(),
            forgot_password_path: cfg.forgot_password_path.clone(),
            success_redirect_delay: cfg.success_redirect_delay(),
        }
    }
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self::from(&RuntimeConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetPhase {
    Validating,
    Ready {
        token: RecoveryToken,
        submitting: bool,
        last_error: Option<ResetPasswordError>,
    },
    Invalid(ResetPasswordError),
    Succeeded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEffect {
    Notify { kind: ToastKind, message: String },
    Navigate { to: String, delay: Option<Duration> },
}

/// Everything needed to perform one credential update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub token: RecoveryToken,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    Dispatch(SubmitRequest),
    /// A submission is already in flight, or the form is not showing.
    Busy,
    Rejected(PasswordIssue),
}

#[derive(Debug, Clone)]
pub struct ResetPasswordFlow {
    phase: ResetPhase,
    settings: FlowSettings,
    disposed: bool,
}

impl ResetPasswordFlow {
    pub fn new(settings: FlowSettings) -> Self {
        Self {
            phase: ResetPhase::Validating,
            settings,
            disposed: false,
        }
    }

    pub fn phase(&self) -> &ResetPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(
            self.phase,
            ResetPhase::Ready {
                submitting: true,
                ..
            }
        )
    }

    pub fn last_error(&self) -> Option<&ResetPasswordError> {
        match &self.phase {
            ResetPhase::Ready { last_error, .. } => last_error.as_ref(),
            ResetPhase::Invalid(err) => Some(err),
            _ => None,
        }
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    pub fn on_session_checked(&mut self, check: SessionCheck) -> Vec<FlowEffect> {
        if self.disposed || self.phase != ResetPhase::Validating {
            return Vec::new();
        }
        let rejection = match check {
            SessionCheck::Present(token) => {
                log::info!("Reset link accepted");
                self.phase = ResetPhase::Ready {
                    token,
                    submitting: false,
                    last_error: None,
                };
                return Vec::new();
            }
            SessionCheck::Rejected(SessionRejection::TimedOut) => {
                log::warn!("Reset link check timed out");
                let err = ResetPasswordError::TimedOut;
                let effects = vec![FlowEffect::Notify {
                    kind: ToastKind::Error,
                    message: err.to_string(),
                }];
                self.phase = ResetPhase::Invalid(err);
                return effects;
            }
            SessionCheck::Missing => None,
            SessionCheck::Rejected(rejection) => Some(rejection),
        };

        match &rejection {
            None => log::info!("No reset credential present"),
            Some(reason) => log::warn!("Reset link rejected: {}", reason),
        }
        let err = ResetPasswordError::SessionInvalid(rejection);
        let effects = vec![
            FlowEffect::Notify {
                kind: ToastKind::Error,
                message: err.to_string(),
            },
            FlowEffect::Navigate {
                to: self.settings.forgot_password_path.clone(),
                delay: None,
            },
        ];
        self.phase = ResetPhase::Invalid(err);
        effects
    }

    pub fn begin_submit(&mut self, candidate: &PasswordCandidate) -> SubmitDecision {
        if self.disposed {
            return SubmitDecision::Busy;
        }
        let ResetPhase::Ready {
            token,
            submitting,
            last_error,
        } = &mut self.phase
        else {
            return SubmitDecision::Busy;
        };
        if *submitting {
            return SubmitDecision::Busy;
        }
        if let Err(issue) = candidate.check() {
            *last_error = Some(ResetPasswordError::ValidationFailed(issue));
            return SubmitDecision::Rejected(issue);
        }
        *submitting = true;
        *last_error = None;
        SubmitDecision::Dispatch(SubmitRequest {
            token: token.clone(),
            new_password: candidate.password.clone(),
        })
    }

    pub fn on_submit_finished(&mut self, result: Result<(), ApiError>) -> Vec<FlowEffect> {
        if self.disposed || !self.is_submitting() {
            return Vec::new();
        }
        match result {
            Ok(()) => {
                log::info!("Password updated");
                self.phase = ResetPhase::Succeeded;
                vec![
                    FlowEffect::Notify {
                        kind: ToastKind::Success,
                        message: SUCCESS_MESSAGE.to_string(),
                    },
                    FlowEffect::Navigate {
                        to: self.settings.login_path.clone(),
                        delay: Some(self.settings.success_redirect_delay),
                    },
                ]
            }
            Err(api_err) => {
                let err = ResetPasswordError::from_submission(&api_err);
                match &err {
                    ResetPasswordError::Unexpected => {
                        log::error!("Password update failed unexpectedly: {}", api_err)
                    }
                    _ => log::warn!("Password update failed: {} ({})", err, api_err.code),
                }
                let message = err.to_string();
                if let ResetPhase::Ready {
                    submitting,
                    last_error,
                    ..
                } = &mut self.phase
                {
                    *submitting = false;
                    *last_error = Some(err);
                }
                vec![FlowEffect::Notify {
                    kind: ToastKind::Error,
                    message,
                }]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ProviderErrorBody;

    fn settings() -> FlowSettings {
        FlowSettings {
            login_path: "/admin".into(),
            forgot_password_path: "/admin/forgot-password".into(),
            success_redirect_delay: Duration::from_secs(3),
        }
    }

    fn token() -> RecoveryToken {
        RecoveryToken::new("recovery-token").unwrap()
    }

    fn ready_flow() -> ResetPasswordFlow {
        let mut flow = ResetPasswordFlow::new(settings());
        assert!(flow.on_session_checked(SessionCheck::Present(token())).is_empty());
        flow
    }

    fn strong() -> PasswordCandidate {
        PasswordCandidate::new("NewPass123", "NewPass123")
    }

    fn navigations(effects: &[FlowEffect]) -> Vec<(String, Option<Duration>)> {
        effects
            .iter()
            .filter_map(|e| match e {
                FlowEffect::Navigate { to, delay } => Some((to.clone(), *delay)),
                _ => None,
            })
            .collect()
    }

    fn provider_error(status: u16, msg: Option<&str>) -> ApiError {
        ApiError::from_provider(
            status,
            ProviderErrorBody {
                msg: msg.map(str::to_string),
                ..Default::default()
            },
        )
    }

    #[test]
    fn starts_validating_with_no_form() {
        let flow = ResetPasswordFlow::new(settings());
        assert_eq!(flow.phase(), &ResetPhase::Validating);
        assert!(!flow.is_submitting());
    }

    #[test]
    fn begin_submit_while_validating_is_ignored() {
        let mut flow = ResetPasswordFlow::new(settings());
        assert_eq!(flow.begin_submit(&strong()), SubmitDecision::Busy);
    }

    #[test]
    fn present_credential_shows_form() {
        let flow = ready_flow();
        assert!(matches!(flow.phase(), ResetPhase::Ready { submitting: false, .. }));
    }

    #[test]
    fn missing_credential_redirects_exactly_once() {
        let mut flow = ResetPasswordFlow::new(settings());
        let effects = flow.on_session_checked(SessionCheck::Missing);
        assert_eq!(
            navigations(&effects),
            vec![("/admin/forgot-password".to_string(), None)]
        );
        assert!(effects.contains(&FlowEffect::Notify {
            kind: ToastKind::Error,
            message: MISSING_LINK_MESSAGE.into(),
        }));
        assert!(matches!(flow.phase(), ResetPhase::Invalid(_)));

        assert!(flow.on_session_checked(SessionCheck::Missing).is_empty());
        assert!(flow
            .on_session_checked(SessionCheck::Rejected(SessionRejection::Expired))
            .is_empty());
        assert!(flow.on_session_checked(SessionCheck::Present(token())).is_empty());
        assert!(matches!(flow.phase(), ResetPhase::Invalid(_)));
    }

    #[test]
    fn rejected_credential_uses_invalid_link_notice() {
        let mut flow = ResetPasswordFlow::new(settings());
        let effects = flow.on_session_checked(SessionCheck::Rejected(SessionRejection::Provider(
            "Email link is invalid or has expired".into(),
        )));
        assert!(effects.contains(&FlowEffect::Notify {
            kind: ToastKind::Error,
            message: INVALID_LINK_MESSAGE.into(),
        }));
        assert_eq!(navigations(&effects).len(), 1);
    }

    #[test]
    fn timed_out_check_shows_timeout_notice_without_redirect() {
        let mut flow = ResetPasswordFlow::new(settings());
        let effects =
            flow.on_session_checked(SessionCheck::Rejected(SessionRejection::TimedOut));
        assert_eq!(
            effects,
            vec![FlowEffect::Notify {
                kind: ToastKind::Error,
                message: "The request timed out. Please try again.".into(),
            }]
        );
        assert_eq!(flow.phase(), &ResetPhase::Invalid(ResetPasswordError::TimedOut));
        assert!(flow.on_session_checked(SessionCheck::Missing).is_empty());
    }

    #[test]
    fn validation_failure_makes_no_request() {
        let mut flow = ready_flow();
        let decision = flow.begin_submit(&PasswordCandidate::new("Abc1", "Abc1"));
        assert_eq!(decision, SubmitDecision::Rejected(PasswordIssue::TooShort));
        assert!(!flow.is_submitting());
        assert_eq!(
            flow.last_error(),
            Some(&ResetPasswordError::ValidationFailed(PasswordIssue::TooShort))
        );
    }

    #[test]
    fn success_schedules_single_delayed_login_redirect() {
        let mut flow = ready_flow();
        let SubmitDecision::Dispatch(request) = flow.begin_submit(&strong()) else {
            panic!("expected dispatch");
        };
        assert_eq!(request.new_password, "NewPass123");
        assert_eq!(request.token.access_token(), "recovery-token");

        let effects = flow.on_submit_finished(Ok(()));
        assert_eq!(flow.phase(), &ResetPhase::Succeeded);
        assert_eq!(
            navigations(&effects),
            vec![("/admin".to_string(), Some(Duration::from_secs(3)))]
        );
        assert!(flow.on_submit_finished(Ok(())).is_empty());
    }

    #[test]
    fn redirect_delay_comes_from_settings() {
        let mut flow = ResetPasswordFlow::new(FlowSettings {
            success_redirect_delay: Duration::from_millis(750),
            ..settings()
        });
        flow.on_session_checked(SessionCheck::Present(token()));
        flow.begin_submit(&strong());
        let effects = flow.on_submit_finished(Ok(()));
        assert_eq!(
            navigations(&effects),
            vec![("/admin".to_string(), Some(Duration::from_millis(750)))]
        );
    }

    #[test]
    fn provider_failure_keeps_form_with_verbatim_message() {
        let mut flow = ready_flow();
        flow.begin_submit(&strong());
        let effects = flow.on_submit_finished(Err(provider_error(422, Some("weak password"))));

        assert!(navigations(&effects).is_empty());
        assert!(effects.contains(&FlowEffect::Notify {
            kind: ToastKind::Error,
            message: "weak password".into(),
        }));
        assert!(matches!(flow.phase(), ResetPhase::Ready { submitting: false, .. }));
        assert_eq!(
            flow.last_error().map(ToString::to_string).as_deref(),
            Some("weak password")
        );
    }

    #[test]
    fn provider_failure_without_message_uses_fallback() {
        let mut flow = ready_flow();
        flow.begin_submit(&strong());
        flow.on_submit_finished(Err(provider_error(500, None)));
        assert_eq!(
            flow.last_error(),
            Some(&ResetPasswordError::SubmissionFailed(UPDATE_FAILED_MESSAGE.into()))
        );
    }

    #[test]
    fn timeout_and_transport_failures_are_distinct() {
        let mut flow = ready_flow();
        flow.begin_submit(&strong());
        flow.on_submit_finished(Err(ApiError::timeout("The request timed out")));
        assert_eq!(flow.last_error(), Some(&ResetPasswordError::TimedOut));

        flow.begin_submit(&strong());
        flow.on_submit_finished(Err(ApiError::request_failed("Request failed: dns")));
        assert_eq!(flow.last_error(), Some(&ResetPasswordError::Unexpected));
    }

    #[test]
    fn retry_after_failure_reuses_session() {
        let mut flow = ready_flow();
        flow.begin_submit(&strong());
        flow.on_submit_finished(Err(provider_error(422, Some("weak password"))));
        assert!(matches!(
            flow.begin_submit(&strong()),
            SubmitDecision::Dispatch(_)
        ));
    }

    #[test]
    fn second_submit_while_in_flight_is_a_no_op() {
        let mut flow = ready_flow();
        let mut dispatched = 0;
        for _ in 0..3 {
            if let SubmitDecision::Dispatch(_) = flow.begin_submit(&strong()) {
                dispatched += 1;
            }
        }
        assert_eq!(dispatched, 1);
        assert!(flow.is_submitting());
    }

    #[test]
    fn disposed_flow_ignores_late_results() {
        let mut flow = ResetPasswordFlow::new(settings());
        flow.dispose();
        assert!(flow.on_session_checked(SessionCheck::Missing).is_empty());
        assert_eq!(flow.phase(), &ResetPhase::Validating);

        let mut flow = ready_flow();
        flow.begin_submit(&strong());
        flow.dispose();
        assert!(flow.on_submit_finished(Ok(())).is_empty());
        assert!(flow.is_submitting());
        assert_eq!(flow.begin_submit(&strong()), SubmitDecision::Busy);
    }

    #[test]
    fn settings_follow_runtime_config() {
        let cfg = RuntimeConfig {
            login_path: "/login".into(),
            success_redirect_delay_ms: 1_500,
            ..RuntimeConfig::default()
        };
        let settings = FlowSettings::from(&cfg);
        assert_eq!(settings.login_path, "/login");
        assert_eq!(settings.forgot_password_path, "/admin/forgot-password");
        assert_eq!(settings.success_redirect_delay, Duration::from_millis(1_500));
    }
}
