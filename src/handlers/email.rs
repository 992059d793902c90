use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::error::AppError;
use crate::models::EmailType;
use crate::services::{record_email_sent, record_render, OutboundEmail};
use crate::startup::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SendEmailRequest {
    #[serde(rename = "type")]
    pub email_type: String,
    #[validate(email(message = "Invalid email address"))]
    pub to: String,
    #[serde(default)]
    pub context: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TestEmailRequest {
    #[validate(email(message = "Invalid email address"))]
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct SendEmailResponse {
    pub success: bool,
}

/// POST /send_email
#[tracing::instrument(skip(state, request))]
pub async fn send_email(
    State(state): State<AppState>,
    Json(request): Json<SendEmailRequest>,
) -> Result<Json<SendEmailResponse>, AppError> {
    request.validate()?;

    let email_type: EmailType = request
        .email_type
        .parse()
        .map_err(|_| AppError::InvalidEmailType)?;

    render_and_dispatch(&state, email_type, request.to, &request.context).await
}

/// POST /test_email/:email_type
///
/// Same pipeline as /send_email, but the context is the built-in sample for
/// the requested type, so a relay setup can be verified without crafting
/// payloads.
#[tracing::instrument(skip(state, request))]
pub async fn test_email(
    State(state): State<AppState>,
    Path(email_type): Path<String>,
    Json(request): Json<TestEmailRequest>,
) -> Result<Json<SendEmailResponse>, AppError> {
    request.validate()?;

    let email_type: EmailType = email_type.parse().map_err(|_| AppError::InvalidEmailType)?;
    let context = email_type.sample_context();

    render_and_dispatch(&state, email_type, request.to, &context).await
}

/// Render the template pair and hand the result to the provider. One send
/// attempt per request; a relay failure is returned to the caller, never
/// retried.
async fn render_and_dispatch(
    state: &AppState,
    email_type: EmailType,
    to: String,
    context: &HashMap<String, String>,
) -> Result<Json<SendEmailResponse>, AppError> {
    let rendered = state.renderer.render(email_type, context)?;
    record_render(email_type.as_str());

    let email = OutboundEmail {
        to,
        subject: rendered.subject,
        body_text: rendered.text,
        body_html: rendered.html,
    };

    match state.email_provider.send(&email).await {
        Ok(()) => {
            record_email_sent(email_type.as_str(), "sent");
            tracing::info!(
                email_type = %email_type,
                to = %email.to,
                subject = %email.subject,
                "Email sent successfully"
            );
            Ok(Json(SendEmailResponse { success: true }))
        }
        Err(e) => {
            record_email_sent(email_type.as_str(), "failed");
            tracing::error!(
                email_type = %email_type,
                to = %email.to,
                error = %e,
                "Failed to send email"
            );
            Err(AppError::SendFailed(e.to_string()))
        }
    }
}
