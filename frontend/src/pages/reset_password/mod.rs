use leptos::*;
use leptos_meta::Title;

pub mod flow;
mod panel;
pub mod repository;
pub mod session;
pub mod utils;
mod view_model;

pub use panel::{ResetPasswordContent, ResetPasswordPanel};

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    view! {
        <Title text="Reset password" />
        <ResetPasswordPanel />
    }
}
