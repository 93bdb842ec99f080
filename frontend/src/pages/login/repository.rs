use super::utils::LoginCredentials;
use crate::api::{ApiClient, ApiError, AuthUser, SessionResponse};
use std::rc::Rc;

#[derive(Clone)]
pub struct LoginRepository {
    client: Rc<ApiClient>,
}

impl LoginRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn sign_in(&self, credentials: &LoginCredentials) -> Result<SessionResponse, ApiError> {
        self.client
            .sign_in_with_password(&credentials.email, &credentials.password)
            .await
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), ApiError> {
        self.client.sign_out(access_token).await
    }

    pub async fn current_user(&self, access_token: &str) -> Result<AuthUser, ApiError> {
        self.client.get_user(access_token).await
    }
}
