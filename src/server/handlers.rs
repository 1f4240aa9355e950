//! Relay endpoint handler.

use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::IntoResponse,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use super::AppState;
use crate::domain::model::ContactSubmission;

/// Contact form body, parsed from JSON or `application/x-www-form-urlencoded`.
/// A body that does not parse becomes an empty submission.
#[derive(Debug, Clone, Default)]
pub struct ContactForm(pub ContactSubmission);

#[async_trait]
impl<S> FromRequest<S> for ContactForm
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        let parsed = if is_form {
            Form::<ContactSubmission>::from_request(req, state)
                .await
                .map(|Form(submission)| submission)
                .map_err(|e| e.body_text())
        } else {
            Json::<ContactSubmission>::from_request(req, state)
                .await
                .map(|Json(submission)| submission)
                .map_err(|e| e.body_text())
        };

        let submission = parsed.unwrap_or_else(|reason| {
            tracing::debug!("Unparseable contact body: {}", reason);
            ContactSubmission::default()
        });
        Ok(ContactForm(submission))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelayResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// `POST /send-email`
pub async fn send_email(
    State(state): State<AppState>,
    ContactForm(submission): ContactForm,
) -> impl IntoResponse {
    match state.relay.relay(&submission).await {
        Ok(()) => (StatusCode::OK, Json(RelayResponse::ok())),
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            tracing::warn!("Contact submission rejected ({}): {}", status, e);
            (status, Json(RelayResponse::failure(e.public_message())))
        }
    }
}
