use super::view_model::use_forgot_password_view_model;
use crate::{
    components::layout::{AuthLayout, ErrorMessage, SuccessMessage},
    config,
};
use leptos::*;

#[component]
pub fn ForgotPasswordPanel() -> impl IntoView {
    let vm = use_forgot_password_view_model();
    let submit_action = vm.submit_action;
    let pending = submit_action.pending();

    view! {
        <ForgotPasswordForm
            email=vm.email
            error=vm.error.into()
            success=vm.success.into()
            pending=pending.into()
            on_submit=Callback::new(move |email: String| submit_action.dispatch(email))
        />
    }
}

#[component]
pub fn ForgotPasswordForm(
    email: RwSignal<String>,
    error: Signal<Option<String>>,
    success: Signal<Option<String>>,
    pending: Signal<bool>,
    on_submit: Callback<String>,
) -> impl IntoView {
    let login_path = config::current().login_path;

    view! {
        <AuthLayout
            title="Reset your password"
            subtitle="Enter your email address and we'll send you a link to reset your password."
        >
            {move || {
                if let Some(msg) = success.get() {
                    view! {
                        <SuccessMessage
                            title="Email sent"
                            message=msg
                            link=(login_path.clone(), "Back to login".to_string())
                        />
                    }
                        .into_view()
                } else {
                    let login_path = login_path.clone();
                    view! {
                        <form
                            class="mt-8 space-y-6"
                            on:submit=move |ev| {
                                ev.prevent_default();
                                if pending.get_untracked() {
                                    return;
                                }
                                on_submit.call(email.get_untracked());
                            }
                        >
                            <div class="rounded-md shadow-sm -space-y-px">
                                <div>
                                    <label for="email-address" class="sr-only">
                                        "Email address"
                                    </label>
                                    <input
                                        id="email-address"
                                        name="email"
                                        type="email"
                                        autocomplete="email"
                                        required
                                        class="appearance-none rounded-md relative block w-full px-3 py-2 border border-form-control-border bg-form-control-bg placeholder-form-control-placeholder text-form-control-text focus:outline-none focus:ring-2 focus:ring-action-primary-focus focus:border-action-primary-border focus:z-10 sm:text-sm"
                                        placeholder="Email address"
                                        prop:value=email
                                        on:input=move |ev| {
                                            email.set(event_target_value(&ev));
                                        }
                                    />
                                </div>
                            </div>

                            {move || error.get().map(|err| view! { <ErrorMessage message=err /> })}

                            <div>
                                <button
                                    type="submit"
                                    disabled=move || pending.get()
                                    class="group relative w-full flex justify-center py-2 px-4 border border-transparent text-sm font-medium rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg_hover focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-action-primary-focus disabled:opacity-50"
                                >
                                    {move || {
                                        if pending.get() { "Sending..." } else { "Send Reset Link" }
                                    }}
                                </button>
                            </div>

                            <div class="text-sm text-center">
                                <a href=login_path class="font-medium text-link hover:text-link-hover">
                                    "Back to login"
                                </a>
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
    use crate::test_support::ssr::render_to_string;

    fn render(error: Option<&str>, success: Option<&str>, pending: bool) -> String {
        let error = error.map(str::to_string);
        let success = success.map(str::to_string);
        render_to_string(move || {
            view! {
                <ForgotPasswordForm
                    email=create_rw_signal(String::new())
                    error=Signal::derive(move || error.clone())
                    success=Signal::derive(move || success.clone())
                    pending=Signal::derive(move || pending)
                    on_submit=Callback::new(|_| {})
                />
            }
        })
    }

    #[test]
    fn renders_form_by_default() {
        let html = render(None, None, false);
        assert!(html.contains("Send Reset Link"));
        assert!(html.contains("id=\"email-address\""));
        assert!(html.contains("href=\"/admin\""));
    }

    #[test]
    fn pending_shows_sending() {
        let html = render(None, None, true);
        assert!(html.contains("Sending..."));
    }

    #[test]
    fn renders_error_and_success_states() {
        let html = render(Some("Email is required"), None, false);
        assert!(html.contains("Email is required"));

        let html = render(None, Some("Check your email for the reset link."), false);
        assert!(html.contains("Check your email for the reset link."));
        assert!(!html.contains("<form"));
    }
}
