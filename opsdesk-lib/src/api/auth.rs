//! Session login

use crate::OpsClient;
use crate::error::Error;
use crate::model::Credentials;
use crate::model::Me;

impl OpsClient {
    /// Logs in; the session cookie is kept by the client for later calls.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), Error> {
        self.post("/auth/login", credentials).await?;
        log::info!("logged in as {}", credentials.login);
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), Error> {
        self.post("/auth/logout", &serde_json::json!({})).await?;
        Ok(())
    }

    /// Returns the user behind the current session.
    pub async fn me(&self) -> Result<Me, Error> {
        self.get_json("/auth/me").await
    }
}
