use super::{
    components::form::{LoginForm, SignedInCard},
    view_model::use_login_view_model,
};
use crate::{components::layout::LoadingSpinner, config, state::auth};
use leptos::*;

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    let (auth_state, _) = auth::use_auth();
    let login_pending = vm.login_action.pending();
    let logout_pending = vm.logout_action.pending();
    let logout_action = vm.logout_action;
    let forgot_password_path = config::current().forgot_password_path;

    view! {
        {move || {
            let state = auth_state.get();
            if state.loading && !login_pending.get() {
                view! { <LoadingSpinner label="Checking session..." /> }.into_view()
            } else if let Some(user) = state.user.filter(|_| state.is_authenticated) {
                view! {
                    <SignedInCard
                        email=user.display_name()
                        pending=logout_pending.into()
                        on_sign_out=Callback::new(move |_| logout_action.dispatch(()))
                    />
                }
                    .into_view()
            } else {
                view! {
                    <LoginForm
                        email=vm.email
                        password=vm.password
                        error=vm.error.into()
                        pending=login_pending.into()
                        forgot_password_path=forgot_password_path.clone()
                        on_submit=vm.on_submit
                    />
                }
                    .into_view()
            }
        }}
    }
}
