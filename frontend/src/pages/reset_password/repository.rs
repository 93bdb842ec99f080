use super::session::{parse_recovery_fragment, RecoveryToken, SessionCheck, SessionRejection};
use crate::api::{ApiClient, ApiError};
use std::rc::Rc;

#[derive(Clone)]
pub struct ResetPasswordRepository {
    client: Rc<ApiClient>,
}

impl ResetPasswordRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Looks for a recovery credential in the current URL fragment and
    /// confirms it with the provider. The fragment is removed from the address
    /// bar once the check has a verdict; after a timeout it stays so a reload
    /// can retry with the same link.
    pub async fn check_reset_credential(&self) -> SessionCheck {
        let fragment = crate::utils::location::current_fragment();
        let check = parse_recovery_fragment(&fragment, chrono::Utc::now().timestamp());
        let check = self.confirm(check).await;
        if !fragment.is_empty() && check != SessionCheck::Rejected(SessionRejection::TimedOut) {
            crate::utils::location::scrub_fragment();
        }
        check
    }

    /// Asks the provider whether a parsed token is still live. Anything short
    /// of a positive answer rejects the credential.
    pub async fn confirm(&self, check: SessionCheck) -> SessionCheck {
        let SessionCheck::Present(token) = check else {
            return check;
        };
        match self.client.get_user(token.access_token()).await {
            Ok(_) => SessionCheck::Present(token),
            Err(err) if err.is_timeout() => {
                SessionCheck::Rejected(SessionRejection::TimedOut)
            }
            Err(err) => {
                let reason = err.message_or(&err.code);
                SessionCheck::Rejected(SessionRejection::Unconfirmed(reason))
            }
        }
    }

    pub async fn update_credential(
        &self,
        token: &RecoveryToken,
        new_password: &str,
    ) -> Result<(), ApiError> {
        self.client
            .update_password(token.access_token(), new_password)
            .await
    }
}
