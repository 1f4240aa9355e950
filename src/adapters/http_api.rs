use crate::domain::model::OutgoingMail;
use crate::domain::ports::Mailer;
use crate::utils::error::{FolioError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Sends the envelope as JSON to a transactional mail API.
pub struct HttpApiMailer {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpApiMailer {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Mailer for HttpApiMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        tracing::debug!("Posting message to mail API: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(mail)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Mail API response status: {}", status);

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(FolioError::DeliveryError {
            message: format!("{} {}", status, body.trim()),
        })
    }

    fn name(&self) -> &'static str {
        "http-api"
    }
}
