use crate::{
    api::{ApiClient, ApiError, AuthUser, SessionResponse},
    pages::login::{repository::LoginRepository, utils::LoginCredentials},
    utils::storage,
};
use leptos::*;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

pub const ADMIN_SESSION_KEY: &str = "admin_console.session";

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

/// Signed-in admin as persisted in `localStorage`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

impl From<SessionResponse> for AdminSession {
    fn from(response: SessionResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at: response.expires_at,
            user: response.user,
        }
    }
}

impl std::fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSession")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub is_authenticated: bool,
    pub loading: bool,
    session: Option<AdminSession>,
}

impl AuthState {
    fn signed_in(session: AdminSession) -> Self {
        Self {
            user: Some(session.user.clone()),
            is_authenticated: true,
            loading: false,
            session: Some(session),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.access_token.clone())
    }
}

pub fn load_stored_session() -> Option<AdminSession> {
    let raw = storage::local_storage()
        .ok()?
        .get_item(ADMIN_SESSION_KEY)
        .ok()
        .flatten()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(err) => {
            log::warn!("Discarding unreadable stored session: {}", err);
            clear_stored_session();
            None
        }
    }
}

pub fn store_session(session: &AdminSession) {
    let result = storage::local_storage().and_then(|store| {
        let raw = serde_json::to_string(session).map_err(|e| e.to_string())?;
        store
            .set_item(ADMIN_SESSION_KEY, &raw)
            .map_err(|_| "Failed to write localStorage".to_string())
    });
    if let Err(err) = result {
        log::debug!("Session not persisted: {}", err);
    }
}

pub fn clear_stored_session() {
    if let Ok(store) = storage::local_storage() {
        let _ = store.remove_item(ADMIN_SESSION_KEY);
    }
}

fn create_auth_context() -> AuthContext {
    let (auth_state, set_auth_state) = create_signal(AuthState::default());

    let Some(stored) = load_stored_session() else {
        return (auth_state, set_auth_state);
    };
    set_auth_state.update(|state| state.loading = true);

    let api_client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repo = LoginRepository::new_with_client(Rc::new(api_client));
    spawn_local(async move {
        let result = check_auth_status(&repo, stored).await;
        set_auth_state.set(result);
    });

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

/// Confirms a stored session is still accepted by the provider. A refused
/// token clears the stored copy.
async fn check_auth_status(repo: &LoginRepository, stored: AdminSession) -> AuthState {
    match repo.current_user(&stored.access_token).await {
        Ok(user) => {
            let session = AdminSession { user, ..stored };
            store_session(&session);
            AuthState::signed_in(session)
        }
        Err(err) => {
            log::info!("Stored admin session rejected: {}", err);
            clear_stored_session();
            AuthState::default()
        }
    }
}

pub async fn login_request(
    credentials: LoginCredentials,
    repo: &LoginRepository,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    set_auth_state.update(|state| state.loading = true);

    match repo.sign_in(&credentials).await {
        Ok(response) => {
            let session = AdminSession::from(response);
            store_session(&session);
            set_auth_state.set(AuthState::signed_in(session));
            Ok(())
        }
        Err(error) => {
            set_auth_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

/// Signs out with the provider and always drops the local session, even
/// when the provider call fails.
pub async fn logout(
    access_token: Option<String>,
    repo: &LoginRepository,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    let result = match access_token {
        Some(token) => repo.sign_out(&token).await,
        None => Ok(()),
    };

    clear_stored_session();
    set_auth_state.set(AuthState::default());

    result
}

pub fn use_login_action() -> Action<LoginCredentials, Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repo = LoginRepository::new_with_client(Rc::new(api));

    create_action(move |credentials: &LoginCredentials| {
        let payload = credentials.clone();
        let repo = repo.clone();
        async move { login_request(payload, &repo, set_auth).await }
    })
}

pub fn use_logout_action() -> Action<(), Result<(), ApiError>> {
    let (auth, set_auth) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repo = LoginRepository::new_with_client(Rc::new(api));

    create_action(move |_: &()| {
        let token = auth.with_untracked(|state| state.access_token());
        let repo = repo.clone();
        async move { logout(token, &repo, set_auth).await }
    })
}
