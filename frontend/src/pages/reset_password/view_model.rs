use super::{
    flow::{FlowEffect, FlowSettings, ResetPasswordFlow, ResetPhase, SubmitDecision, SubmitRequest},
    repository::ResetPasswordRepository,
    utils::PasswordCandidate,
};
use crate::{
    api::ApiClient,
    config,
    state::toast::{use_toasts, Toast, ToastContext},
    utils::lifecycle::PageLifetime,
};
use leptos::*;
use leptos_router::{use_navigate, NavigateOptions};
use std::rc::Rc;

#[derive(Clone)]
pub struct ResetPasswordViewModel {
    pub password: RwSignal<String>,
    pub confirm_password: RwSignal<String>,
    pub flow: RwSignal<ResetPasswordFlow>,
    pub submit_action: Action<SubmitRequest, ()>,
    pub on_submit: Callback<()>,
}

type Navigate = Rc<dyn Fn(&str)>;

#[cfg(target_arch = "wasm32")]
type PendingRedirect = gloo_timers::callback::Timeout;

#[cfg(target_arch = "wasm32")]
fn schedule_redirect(millis: u32, go: impl FnOnce() + 'static) -> PendingRedirect {
    gloo_timers::callback::Timeout::new(millis, go)
}

#[cfg(target_arch = "wasm32")]
fn cancel_redirect(pending: PendingRedirect) {
    pending.cancel();
}

/// Host builds have no timers; the redirect is held until fired explicitly.
#[cfg(not(target_arch = "wasm32"))]
struct PendingRedirect(Box<dyn FnOnce()>);

#[cfg(not(target_arch = "wasm32"))]
fn schedule_redirect(_millis: u32, go: impl FnOnce() + 'static) -> PendingRedirect {
    PendingRedirect(Box::new(go))
}

#[cfg(not(target_arch = "wasm32"))]
fn cancel_redirect(pending: PendingRedirect) {
    drop(pending);
}

/// Carries out the effects the flow asks for. Delayed navigation is held in
/// `pending_redirect` so it is cancelled if the page goes away first.
#[derive(Clone)]
struct EffectRunner {
    toasts: ToastContext,
    navigate: Navigate,
    pending_redirect: StoredValue<Option<PendingRedirect>>,
}

impl EffectRunner {
    fn new(toasts: ToastContext, navigate: Navigate) -> Self {
        Self {
            toasts,
            navigate,
            pending_redirect: store_value(None),
        }
    }

    fn run(&self, effects: Vec<FlowEffect>) {
        for effect in effects {
            match effect {
                FlowEffect::Notify { kind, message } => self.toasts.show(Toast::new(message, kind)),
                FlowEffect::Navigate { to, delay: None } => (self.navigate)(&to),
                FlowEffect::Navigate {
                    to,
                    delay: Some(delay),
                } => {
                    let navigate = self.navigate.clone();
                    let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
                    let pending = schedule_redirect(millis, move || navigate(&to));
                    self.pending_redirect.update_value(|slot| {
                        if let Some(previous) = slot.replace(pending) {
                            cancel_redirect(previous);
                        }
                    });
                }
            }
        }
    }

    fn cancel_pending(&self) {
        if let Some(Some(pending)) = self.pending_redirect.try_update_value(Option::take) {
            cancel_redirect(pending);
        }
    }
}

/// Runs when the page unmounts: late async results are dropped and a
/// scheduled redirect never fires.
fn end_page(lifetime: &PageLifetime, flow: RwSignal<ResetPasswordFlow>, runner: &EffectRunner) {
    lifetime.end();
    let _ = flow.try_update(|f| f.dispose());
    runner.cancel_pending();
}

pub fn use_reset_password_view_model() -> ResetPasswordViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = ResetPasswordRepository::new_with_client(Rc::new(api));
    let settings = FlowSettings::from(&config::current());
    let navigate = use_navigate();
    let runner = EffectRunner::new(
        use_toasts(),
        Rc::new(move |to: &str| navigate(to, NavigateOptions::default())),
    );
    let lifetime = PageLifetime::new();

    let password = create_rw_signal(String::new());
    let confirm_password = create_rw_signal(String::new());
    let flow = create_rw_signal(ResetPasswordFlow::new(settings));

    {
        let lifetime = lifetime.clone();
        let runner = runner.clone();
        on_cleanup(move || end_page(&lifetime, flow, &runner));
    }

    {
        let repo = repository.clone();
        let lifetime = lifetime.clone();
        let runner = runner.clone();
        spawn_local(async move {
            let check = repo.check_reset_credential().await;
            if !lifetime.is_alive() {
                log::debug!("Reset page closed before the link was checked");
                return;
            }
            let effects = flow
                .try_update(|f| f.on_session_checked(check))
                .unwrap_or_default();
            runner.run(effects);
        });
    }

    let submit_action = {
        let runner = runner.clone();
        create_action(move |request: &SubmitRequest| {
            let repo = repository.clone();
            let lifetime = lifetime.clone();
            let runner = runner.clone();
            let request = request.clone();
            async move {
                let result = repo
                    .update_credential(&request.token, &request.new_password)
                    .await;
                if !lifetime.is_alive() {
                    log::debug!("Reset page closed before the update finished");
                    return;
                }
                let effects = flow
                    .try_update(|f| f.on_submit_finished(result))
                    .unwrap_or_default();
                if flow.with_untracked(|f| *f.phase() == ResetPhase::Succeeded) {
                    password.set(String::new());
                    confirm_password.set(String::new());
                }
                runner.run(effects);
            }
        })
    };

    let on_submit = Callback::new(move |_: ()| {
        let candidate = PasswordCandidate::new(
            password.get_untracked(),
            confirm_password.get_untracked(),
        );
        let Some(decision) = flow.try_update(|f| f.begin_submit(&candidate)) else {
            return;
        };
        match decision {
            SubmitDecision::Dispatch(request) => submit_action.dispatch(request),
            SubmitDecision::Rejected(issue) => runner.toasts.error(issue.to_string()),
            SubmitDecision::Busy => log::debug!("Ignoring submit while busy"),
        }
    });

    ResetPasswordViewModel {
        password,
        confirm_password,
        flow,
        submit_action,
        on_submit,
    }
}
