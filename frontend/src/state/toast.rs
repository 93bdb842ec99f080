use leptos::*;
use uuid::Uuid;

pub const DEFAULT_TOAST_DURATION_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: ToastKind,
    /// Milliseconds before auto-dismiss.
    pub duration_ms: u32,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
            duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

impl ToastState {
    pub fn push(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    pub fn dismiss(&mut self, id: Uuid) {
        self.toasts.retain(|t| t.id != id);
    }
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    state: RwSignal<ToastState>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            state: create_rw_signal(ToastState::default()),
        }
    }

    pub fn toasts(&self) -> Signal<Vec<Toast>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.toasts.clone()))
    }

    pub fn show(&self, toast: Toast) {
        let id = toast.id;
        let duration = toast.duration_ms;
        match toast.kind {
            ToastKind::Error => log::warn!("toast: {}", toast.message),
            ToastKind::Success => log::info!("toast: {}", toast.message),
        }
        self.state.update(|s| s.push(toast));
        let state = self.state;
        schedule_dismiss(duration, move || {
            let _ = state.try_update(|s| s.dismiss(id));
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(Toast::error(message));
    }

    pub fn dismiss(&self, id: Uuid) {
        self.state.update(|s| s.dismiss(id));
    }
}

impl Default for ToastContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn schedule_dismiss(ms: u32, f: impl FnOnce() + 'static) {
    gloo_timers::callback::Timeout::new(ms, f).forget();
}

#[cfg(not(target_arch = "wasm32"))]
fn schedule_dismiss(_ms: u32, _f: impl FnOnce() + 'static) {}

#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    provide_context(ToastContext::new());
    view! { <>{children()}</> }
}

pub fn use_toasts() -> ToastContext {
    match use_context::<ToastContext>() {
        Some(ctx) => ctx,
        None => {
            let ctx = ToastContext::new();
            provide_context(ctx);
            ctx
        }
    }
}
