use crate::domain::model::{ContactSubmission, OutgoingMail, Sender};
use crate::domain::ports::Mailer;
use crate::utils::error::FolioError;
use crate::utils::html::html_escape;
use std::sync::Arc;
use thiserror::Error;

const DEFAULT_SENDER_NAME: &str = "Website Visitor";
const DEFAULT_SUBJECT_NAME: &str = "Visitor";
const NOT_PROVIDED: &str = "N/A";

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Message is required")]
    MissingMessage,

    #[error("Server email not configured")]
    NotConfigured,

    #[error("Failed to send email")]
    Delivery(#[source] FolioError),
}

impl RelayError {
    /// HTTP status code for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::MissingMessage => 400,
            RelayError::NotConfigured | RelayError::Delivery(_) => 500,
        }
    }

    /// Message safe to return to the caller. Delivery details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::MissingMessage => "Message is required",
            RelayError::NotConfigured => "Server email not configured",
            RelayError::Delivery(_) => "Failed to send email",
        }
    }
}

/// Where relayed messages go. Present only when account credentials are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayTarget {
    pub account: String,
    pub recipient: String,
}

pub struct ContactRelay {
    mailer: Option<Arc<dyn Mailer>>,
    target: Option<RelayTarget>,
}

impl ContactRelay {
    pub fn new(mailer: Arc<dyn Mailer>, target: RelayTarget) -> Self {
        Self {
            mailer: Some(mailer),
            target: Some(target),
        }
    }

    /// A relay without credentials. Every valid submission fails with
    /// [`RelayError::NotConfigured`].
    pub fn unconfigured() -> Self {
        Self {
            mailer: None,
            target: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.mailer.is_some() && self.target.is_some()
    }

    pub async fn relay(&self, submission: &ContactSubmission) -> Result<(), RelayError> {
        let message = submission.message().ok_or(RelayError::MissingMessage)?;

        let (mailer, target) = match (&self.mailer, &self.target) {
            (Some(mailer), Some(target)) => (mailer, target),
            _ => return Err(RelayError::NotConfigured),
        };

        let mail = build_envelope(submission, message, target);
        tracing::debug!("Relaying contact message via {} to {}", mailer.name(), mail.to);

        match mailer.send(&mail).await {
            Ok(()) => {
                tracing::info!("✅ Contact message relayed (subject: {})", mail.subject);
                Ok(())
            }
            Err(e) => {
                tracing::error!("❌ Mail send error via {}: {}", mailer.name(), e);
                Err(RelayError::Delivery(e))
            }
        }
    }
}

pub fn build_envelope(
    submission: &ContactSubmission,
    message: &str,
    target: &RelayTarget,
) -> OutgoingMail {
    let name = submission.name();
    let email = submission.email();

    let shown_name = name.unwrap_or(NOT_PROVIDED);
    let shown_email = email.unwrap_or(NOT_PROVIDED);

    OutgoingMail {
        from: Sender {
            name: name.unwrap_or(DEFAULT_SENDER_NAME).to_string(),
            address: email.unwrap_or(&target.account).to_string(),
        },
        reply_to: email.map(str::to_string),
        to: target.recipient.clone(),
        subject: format!(
            "Website message from {}",
            name.unwrap_or(DEFAULT_SUBJECT_NAME)
        ),
        text: format!("Name: {}\nEmail: {}\n\n{}", shown_name, shown_email, message),
        html: format!(
            "<p><strong>Name:</strong> {}</p><p><strong>Email:</strong> {}</p><p>{}</p>",
            html_escape(shown_name),
            html_escape(shown_email),
            html_escape(message)
        ),
    }
}
