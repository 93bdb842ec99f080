use super::utils::{validate_credentials, LoginCredentials};
use crate::{
    api::ApiError,
    state::{auth, toast::use_toasts},
};
use leptos::*;

#[derive(Clone)]
pub struct LoginViewModel {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    pub login_action: Action<LoginCredentials, Result<(), ApiError>>,
    pub logout_action: Action<(), Result<(), ApiError>>,
    pub on_submit: Callback<()>,
}

pub fn use_login_view_model() -> LoginViewModel {
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let login_action = auth::use_login_action();
    let logout_action = auth::use_logout_action();
    let toasts = use_toasts();

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(()) => {
                    error.set(None);
                    password.set(String::new());
                }
                Err(err) => error.set(Some(err.message_or("Sign in failed"))),
            }
        }
    });

    create_effect(move |_| {
        if let Some(Err(err)) = logout_action.value().get() {
            log::warn!("Provider sign-out failed: {}", err);
            toasts.error("Signed out locally, but the server could not be reached.");
        }
    });

    let on_submit = Callback::new(move |_: ()| {
        if login_action.pending().get_untracked() {
            return;
        }
        match validate_credentials(&email.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => {
                error.set(None);
                login_action.dispatch(credentials);
            }
            Err(msg) => error.set(Some(msg)),
        }
    });

    LoginViewModel {
        email,
        password,
        error,
        login_action,
        logout_action,
        on_submit,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn login_view_model_defaults_empty() {
        with_runtime(|| {
            let vm = use_login_view_model();
            assert!(vm.error.get().is_none());
            assert!(vm.email.get().is_empty());
        });
    }

    #[test]
    fn submit_with_empty_email_sets_error_without_dispatch() {
        with_runtime(|| {
            let vm = use_login_view_model();
            vm.on_submit.call(());
            assert_eq!(vm.error.get().as_deref(), Some("Email is required"));
            assert_eq!(vm.login_action.version().get(), 0);
        });
    }
}
