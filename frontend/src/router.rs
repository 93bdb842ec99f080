use leptos::*;
use leptos_meta::provide_meta_context;
use leptos_router::*;

use crate::{
    api::ApiClient,
    components::toast::ToastContainer,
    config::{self, RuntimeConfig},
    pages::{
        forgot_password::ForgotPasswordPage, login::LoginPage, reset_password::ResetPasswordPage,
    },
    state::{auth::AuthProvider, toast::ToastProvider},
};

/// Every path the router mounts, in mount order: root (redirects to
/// login), login, forgot password, reset password. `app_root` mounts
/// exactly these.
pub fn route_paths(cfg: &RuntimeConfig) -> [String; 4] {
    [
        "/".to_string(),
        cfg.login_path.clone(),
        cfg.forgot_password_path.clone(),
        cfg.reset_password_path.clone(),
    ]
}

pub fn mount_app() {
    log::debug!("Mounting routes {:?}", route_paths(&config::current()));
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_context(ApiClient::new());
    let [root_path, login_path, forgot_password_path, reset_password_path] =
        route_paths(&config::current());
    let redirect_to = login_path.clone();

    view! {
        <ToastProvider>
            <AuthProvider>
                <Router>
                    <Routes>
                        <Route
                            path=root_path
                            view=move || view! { <Redirect path=redirect_to.clone() /> }
                        />
                        <Route path=login_path view=LoginPage />
                        <Route path=forgot_password_path view=ForgotPasswordPage />
                        <Route path=reset_password_path view=ResetPasswordPage />
                    </Routes>
                </Router>
                <ToastContainer />
            </AuthProvider>
        </ToastProvider>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_routes_cover_admin_auth_pages() {
        let paths = route_paths(&RuntimeConfig::default());
        assert!(paths.iter().any(|p| p == "/admin"));
        assert!(paths.iter().any(|p| p == "/admin/forgot-password"));
        assert!(paths.iter().any(|p| p == "/admin/reset-password"));
    }

    #[test]
    fn configured_paths_are_used() {
        let cfg = RuntimeConfig {
            login_path: "console/login".into(),
            ..RuntimeConfig::default()
        }
        .normalized();
        assert!(route_paths(&cfg).contains(&"/console/login".to_string()));
    }

    #[test]
    fn no_duplicate_routes() {
        let paths = route_paths(&RuntimeConfig::default());
        let unique: HashSet<&String> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len());
    }

    #[test]
    fn root_never_shadows_a_page_even_when_configured() {
        let cfg = RuntimeConfig {
            login_path: "/".into(),
            reset_password_path: "/admin/forgot-password".into(),
            ..RuntimeConfig::default()
        }
        .normalized();
        let paths = route_paths(&cfg);
        let unique: HashSet<&String> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len());
        assert_eq!(paths[1], "/admin");
    }
}
