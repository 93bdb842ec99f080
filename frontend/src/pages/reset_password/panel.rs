use super::{
    flow::{ResetPasswordError, ResetPasswordFlow, ResetPhase},
    view_model::use_reset_password_view_model,
};
use crate::{
    components::{
        layout::{AuthLayout, ErrorMessage, LoadingSpinner, SuccessMessage},
        password_field::PasswordField,
    },
    config,
};
use leptos::*;

#[component]
pub fn ResetPasswordPanel() -> impl IntoView {
    let vm = use_reset_password_view_model();
    view! {
        <ResetPasswordContent
            flow=vm.flow.into()
            password=vm.password
            confirm_password=vm.confirm_password
            on_submit=vm.on_submit
        />
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Validating,
    CheckTimedOut,
    Form,
    Redirecting,
    Done,
}

fn screen_for(phase: &ResetPhase) -> Screen {
    match phase {
        ResetPhase::Validating => Screen::Validating,
        ResetPhase::Ready { .. } => Screen::Form,
        ResetPhase::Invalid(ResetPasswordError::TimedOut) => Screen::CheckTimedOut,
        ResetPhase::Invalid(_) => Screen::Redirecting,
        ResetPhase::Succeeded => Screen::Done,
    }
}

#[component]
pub fn ResetPasswordContent(
    flow: Signal<ResetPasswordFlow>,
    password: RwSignal<String>,
    confirm_password: RwSignal<String>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let screen = create_memo(move |_| flow.with(|f| screen_for(f.phase())));
    let submitting = create_memo(move |_| flow.with(|f| f.is_submitting()));
    let inline_error = create_memo(move |_| flow.with(|f| f.last_error().map(ToString::to_string)));
    let login_path = config::current().login_path;

    view! {
        <AuthLayout title="Set new password">
            {move || match screen.get() {
                Screen::Validating => {
                    view! { <LoadingSpinner label="Validating reset link..." /> }.into_view()
                }
                Screen::CheckTimedOut => {
                    view! {
                        <div class="space-y-4">
                            <ErrorMessage message=ResetPasswordError::TimedOut.to_string() />
                            <button
                                type="button"
                                class="w-full flex justify-center py-2 px-4 border border-transparent text-sm font-medium rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg_hover"
                                on:click=move |_| crate::utils::location::reload()
                            >
                                "Try again"
                            </button>
                        </div>
                    }
                        .into_view()
                }
                Screen::Redirecting => {
                    view! { <LoadingSpinner label="Redirecting..." /> }.into_view()
                }
                Screen::Done => {
                    view! {
                        <SuccessMessage
                            title="Success!"
                            message="Your password has been updated. Redirecting to login..."
                            link=(login_path.clone(), "Go to login".to_string())
                        />
                    }
                        .into_view()
                }
                Screen::Form => {
                    view! {
                        <form
                            class="mt-8 space-y-6"
                            on:submit=move |ev| {
                                ev.prevent_default();
                                on_submit.call(());
                            }
                        >
                            <div class="rounded-md shadow-sm space-y-3">
                                <PasswordField
                                    id="password"
                                    label="New password"
                                    value=password
                                    disabled=submitting
                                />
                                <PasswordField
                                    id="confirm-password"
                                    label="Confirm new password"
                                    value=confirm_password
                                    disabled=submitting
                                />
                            </div>
                            <p class="text-xs text-fg-muted">
                                "At least 8 characters, with upper and lower case letters and a number."
                            </p>

                            {move || inline_error.get().map(|err| view! { <ErrorMessage message=err /> })}

                            <div>
                                <button
                                    type="submit"
                                    disabled=move || submitting.get()
                                    class="group relative w-full flex justify-center py-2 px-4 border border-transparent text-sm font-medium rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg_hover focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-action-primary-focus disabled:opacity-50"
                                >
                                    {move || {
                                        if submitting.get() { "Updating..." } else { "Update Password" }
                                    }}
                                </button>
                            </div>
                        </form>
                    }
                        .into_view()
                }
            }}
        </AuthLayout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::{
        api::ApiError,
        pages::reset_password::{
            flow::FlowSettings,
            session::{RecoveryToken, SessionCheck, SessionRejection},
            utils::PasswordCandidate,
        },
        test_support::ssr::render_to_string,
    };

    fn render(flow: ResetPasswordFlow) -> String {
        render_to_string(move || {
            let flow = create_rw_signal(flow);
            view! {
                <ResetPasswordContent
                    flow=flow.into()
                    password=create_rw_signal(String::new())
                    confirm_password=create_rw_signal(String::new())
                    on_submit=Callback::new(|_| {})
                />
            }
        })
    }

    fn ready() -> ResetPasswordFlow {
        let mut flow = ResetPasswordFlow::new(FlowSettings::default());
        flow.on_session_checked(SessionCheck::Present(RecoveryToken::new("t").unwrap()));
        flow
    }

    #[test]
    fn validating_shows_only_spinner() {
        let html = render(ResetPasswordFlow::new(FlowSettings::default()));
        assert!(html.contains("Validating reset link..."));
        assert!(!html.contains("<form"));
        assert!(!html.contains("<input"));
    }

    #[test]
    fn invalid_never_shows_form() {
        let mut flow = ResetPasswordFlow::new(FlowSettings::default());
        flow.on_session_checked(SessionCheck::Missing);
        let html = render(flow);
        assert!(!html.contains("<form"));
    }

    #[test]
    fn ready_shows_both_fields() {
        let html = render(ready());
        assert!(html.contains("<form"));
        assert!(html.contains("id=\"password\""));
        assert!(html.contains("id=\"confirm-password\""));
        assert!(html.contains("Update Password"));
    }

    #[test]
    fn in_flight_submit_disables_button() {
        let mut flow = ready();
        flow.begin_submit(&PasswordCandidate::new("NewPass123", "NewPass123"));
        let html = render(flow);
        assert!(html.contains("Updating..."));
        assert!(html.contains("disabled"));
    }

    #[test]
    fn failure_message_is_shown_inline() {
        let mut flow = ready();
        flow.begin_submit(&PasswordCandidate::new("NewPass123", "NewPass123"));
        flow.on_submit_finished(Err(ApiError::from_provider(
            422,
            serde_json::from_value(serde_json::json!({ "msg": "weak password" })).unwrap(),
        )));
        let html = render(flow);
        assert!(html.contains("<form"));
        assert!(html.contains("weak password"));
    }

    #[test]
    fn timed_out_check_offers_retry_instead_of_form() {
        let mut flow = ResetPasswordFlow::new(FlowSettings::default());
        flow.on_session_checked(SessionCheck::Rejected(SessionRejection::TimedOut));
        let html = render(flow);
        assert!(html.contains("The request timed out. Please try again."));
        assert!(html.contains("Try again"));
        assert!(!html.contains("<form"));
    }

    #[test]
    fn success_links_to_login() {
        let mut flow = ready();
        flow.begin_submit(&PasswordCandidate::new("NewPass123", "NewPass123"));
        flow.on_submit_finished(Ok(()));
        let html = render(flow);
        assert!(html.contains("Success!"));
        assert!(html.contains("href=\"/admin\""));
        assert!(!html.contains("<form"));
    }
}
