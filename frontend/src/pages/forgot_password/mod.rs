use leptos::*;
use leptos_meta::Title;

mod panel;
mod repository;
mod view_model;

pub use panel::ForgotPasswordPanel;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    view! {
        <Title text="Forgot password" />
        <ForgotPasswordPanel />
    }
}
