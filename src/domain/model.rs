use serde::{Deserialize, Serialize};

/// A visitor's contact form body. Every field is optional at parse time so
/// that a missing message can be reported as a client error instead of a
/// deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ContactSubmission {
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn email(&self) -> Option<&str> {
        non_empty(&self.email)
    }

    pub fn message(&self) -> Option<&str> {
        non_empty(&self.message)
    }
}

// 空字串視同未提供
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Mail account the relay sends through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailIdentity {
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub name: String,
    pub address: String,
}

/// Envelope handed to a [`crate::domain::ports::Mailer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMail {
    pub from: Sender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}
