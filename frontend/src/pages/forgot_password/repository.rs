use crate::{
    api::{ApiClient, ApiError},
    config,
};
use std::rc::Rc;

#[derive(Clone)]
pub struct ForgotPasswordRepository {
    client: Rc<ApiClient>,
}

impl ForgotPasswordRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Sends the recovery email. The link in it points back at the reset
    /// page on `site_url`, or on the origin this page was served from.
    pub async fn request_reset(&self, email: String) -> Result<(), ApiError> {
        let origin = crate::utils::location::current_origin();
        let redirect_to = config::current().reset_redirect_url(origin.as_deref());
        self.send_reset(&email, redirect_to.as_deref()).await
    }

    pub async fn send_reset(&self, email: &str, redirect_to: Option<&str>) -> Result<(), ApiError> {
        self.client.request_password_reset(email, redirect_to).await
    }
}
