use crate::state::toast::{use_toasts, Toast, ToastKind};
use leptos::*;

fn toast_classes(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Error => {
            "bg-status-error-bg border-status-error-border text-status-error-text"
        }
        ToastKind::Success => {
            "bg-status-success-bg border-status-success-border text-status-success-text"
        }
    }
}

#[component]
pub fn ToastContainer() -> impl IntoView {
    let toasts = use_toasts();
    let items = toasts.toasts();

    view! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 w-80" aria-live="polite">
            <For each=move || items.get() key=|toast| toast.id let:toast>
                <ToastItem toast=toast on_dismiss=Callback::new(move |id| toasts.dismiss(id)) />
            </For>
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast, on_dismiss: Callback<uuid::Uuid>) -> impl IntoView {
    let id = toast.id;
    let role = if toast.kind == ToastKind::Error { "alert" } else { "status" };
    view! {
        <div
            class=format!("flex items-start gap-3 rounded-md border px-4 py-3 shadow-lg {}", toast_classes(toast.kind))
            role=role
        >
            <p class="flex-1 text-sm">{toast.message}</p>
            <button
                type="button"
                class="text-sm opacity-70 hover:opacity-100"
                aria-label="Dismiss notification"
                on:click=move |_| on_dismiss.call(id)
            >
                "×"
            </button>
        </div>
    }
}
