use super::{
    client::ApiClient,
    types::{
        ApiError, AuthUser, PasswordGrantRequest, RecoverRequest, SessionResponse,
        UpdatePasswordRequest,
    },
};

impl ApiClient {
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionResponse, ApiError> {
        let (base_url, headers, timeout) = self.resolved_settings().await;
        let request = self
            .http_client()
            .post(format!("{}/token", base_url))
            .query(&[("grant_type", "password")])
            .headers(headers)
            .json(&PasswordGrantRequest {
                email: email.to_string(),
                password: password.to_string(),
            });
        let response = self.send(request, timeout).await?;
        Self::decode(response).await
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), ApiError> {
        let (base_url, headers, timeout) = self.resolved_settings().await;
        let headers = Self::bearer_headers(headers, access_token)?;
        let request = self
            .http_client()
            .post(format!("{}/logout", base_url))
            .headers(headers);
        let response = self.send(request, timeout).await?;
        Self::expect_success(response).await
    }

    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, ApiError> {
        let (base_url, headers, timeout) = self.resolved_settings().await;
        let headers = Self::bearer_headers(headers, access_token)?;
        let request = self
            .http_client()
            .get(format!("{}/user", base_url))
            .headers(headers);
        let response = self.send(request, timeout).await?;
        Self::decode(response).await
    }

    /// Asks the provider to email a recovery link. `redirect_to` is where the
    /// link lands; the provider appends the recovery token as a URL fragment.
    pub async fn request_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), ApiError> {
        let (base_url, headers, timeout) = self.resolved_settings().await;
        let mut request = self
            .http_client()
            .post(format!("{}/recover", base_url))
            .headers(headers)
            .json(&RecoverRequest {
                email: email.to_string(),
            });
        if let Some(redirect_to) = redirect_to {
            request = request.query(&[("redirect_to", redirect_to)]);
        }
        let response = self.send(request, timeout).await?;
        Self::expect_success(response).await
    }

    /// Sets a new password for the account the bearer token belongs to. Any
    /// 2xx counts; the provider may answer with an empty or partial body.
    pub async fn update_password(
        &self,
        access_token: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let (base_url, headers, timeout) = self.resolved_settings().await;
        let headers = Self::bearer_headers(headers, access_token)?;
        let request = self
            .http_client()
            .put(format!("{}/user", base_url))
            .headers(headers)
            .json(&UpdatePasswordRequest {
                password: new_password.to_string(),
            });
        let response = self.send(request, timeout).await?;
        Self::expect_success(response).await
    }
}
