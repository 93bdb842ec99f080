use leptos::*;

/// Centered single-card shell shared by the admin auth pages.
#[component]
pub fn AuthLayout(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-8">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">{title}</h2>
                    {subtitle
                        .map(|text| {
                            view! { <p class="mt-2 text-center text-sm text-fg-muted">{text}</p> }
                        })}
                </div>
                {children()}
            </div>
        </div>
    }
}

#[component]
pub fn LoadingSpinner(#[prop(optional, into)] label: Option<String>) -> impl IntoView {
    view! {
        <div class="flex flex-col justify-center items-center p-8" role="status">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
            {label.map(|text| view! { <p class="mt-4 text-sm text-fg-muted">{text}</p> })}
        </div>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div
            class="rounded-md bg-status-error-bg border border-status-error-border p-4 text-status-error-text"
            role="alert"
        >
            <h3 class="text-sm font-medium">"Error"</h3>
            <div class="mt-2 text-sm">
                <p>{message}</p>
            </div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(optional, into)] link: Option<(String, String)>,
) -> impl IntoView {
    view! {
        <div class="rounded-md bg-status-success-bg border border-status-success-border p-4 text-status-success-text">
            <h3 class="text-sm font-medium">{title}</h3>
            <div class="mt-2 text-sm">
                <p>{message}</p>
            </div>
            {link
                .map(|(href, label)| {
                    view! {
                        <div class="mt-4">
                            <a
                                href=href
                                class="px-2 py-1.5 rounded-md text-sm font-medium text-status-success-text hover:bg-status-success-bg focus:outline-none focus:ring-2 focus:ring-status-success-border"
                            >
                                {label}
                            </a>
                        </div>
                    }
                })}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn auth_layout_renders_title_and_children() {
        let html = render_to_string(move || {
            view! {
                <AuthLayout title="Set new password" subtitle="Choose a strong password">
                    <div>"child"</div>
                </AuthLayout>
            }
        });
        assert!(html.contains("Set new password"));
        assert!(html.contains("Choose a strong password"));
        assert!(html.contains("child"));
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner label="Validating reset link..." />
                    <ErrorMessage message="weak password" />
                    <SuccessMessage
                        title="Success!"
                        message="ok"
                        link=("/admin".to_string(), "Go to login".to_string())
                    />
                </div>
            }
        });
        assert!(html.contains("Validating reset link..."));
        assert!(html.contains("weak password"));
        assert!(html.contains("Go to login"));
        assert!(html.contains("href=\"/admin\""));
    }
}
