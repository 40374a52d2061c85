use std::time::Duration;

use anyhow::Context as _;

use crate::domain::repository::Mailer;
use crate::domain::types::WelcomeEmail;
use crate::error::AccountsServiceError;

/// Mail delivery over HTTP: posts the templated message to the delivery
/// service's endpoint. Every call is bounded by the client timeout; a
/// timeout is a delivery failure, never a silent success.
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMailer {
    pub fn new(endpoint: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build mail client")?;
        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
        })
    }
}

impl Mailer for HttpMailer {
    async fn send_welcome(
        &self,
        email: &WelcomeEmail,
        to: &str,
    ) -> Result<(), AccountsServiceError> {
        let payload = serde_json::json!({
            "to": to,
            "subject": email.subject,
            "body": email.body,
        });
        self.client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .context("send welcome mail")?
            .error_for_status()
            .context("mail delivery rejected")?;
        Ok(())
    }
}
