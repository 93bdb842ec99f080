use crate::components::{
    layout::{AuthLayout, ErrorMessage},
    password_field::PasswordField,
};
use leptos::*;

#[component]
pub fn LoginForm(
    email: RwSignal<String>,
    password: RwSignal<String>,
    error: Signal<Option<String>>,
    pending: Signal<bool>,
    #[prop(into)] forgot_password_path: String,
    on_submit: Callback<()>,
) -> impl IntoView {
    view! {
        <AuthLayout title="Admin sign in" subtitle="Sign in to manage the console.">
            <form
                class="mt-8 space-y-6"
                on:submit=move |ev| {
                    ev.prevent_default();
                    on_submit.call(());
                }
            >
                <div class="rounded-md shadow-sm space-y-3">
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
                            disabled=move || pending.get()
                            class="appearance-none rounded-md relative block w-full px-3 py-2 border border-form-control-border bg-form-control-bg placeholder-form-control-placeholder text-form-control-text focus:outline-none focus:ring-2 focus:ring-action-primary-focus focus:border-action-primary-border focus:z-10 sm:text-sm"
                            placeholder="Email address"
                            prop:value=email
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </div>
                    <PasswordField
                        id="password"
                        label="Password"
                        value=password
                        disabled=pending
                        autocomplete="current-password"
                    />
                </div>

                <div class="text-sm text-right">
                    <a href=forgot_password_path class="font-medium text-link hover:text-link-hover">
                        "Forgot your password?"
                    </a>
                </div>

                {move || error.get().map(|err| view! { <ErrorMessage message=err /> })}

                <div>
                    <button
                        type="submit"
                        disabled=move || pending.get()
                        class="group relative w-full flex justify-center py-2 px-4 border border-transparent text-sm font-medium rounded-md text-action-primary-text bg-action-primary-bg hover:bg-action-primary-bg_hover focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-action-primary-focus disabled:opacity-50"
                    >
                        {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </div>
            </form>
        </AuthLayout>
    }
}

#[component]
pub fn SignedInCard(
    #[prop(into)] email: String,
    pending: Signal<bool>,
    on_sign_out: Callback<()>,
) -> impl IntoView {
    view! {
        <AuthLayout title="Admin console">
            <div class="rounded-md border border-border bg-surface-elevated p-4 space-y-4">
                <p class="text-sm text-fg">
                    "Signed in as " <span class="font-medium">{email}</span>
                </p>
                <button
                    type="button"
                    disabled=move || pending.get()
                    class="w-full flex justify-center py-2 px-4 border border-action-secondary-border text-sm font-medium rounded-md text-action-secondary-text bg-action-secondary-bg hover:bg-action-secondary-bg_hover disabled:opacity-50"
                    on:click=move |_| on_sign_out.call(())
                >
                    {move || if pending.get() { "Signing out..." } else { "Sign out" }}
                </button>
            </div>
        </AuthLayout>
    }
}
