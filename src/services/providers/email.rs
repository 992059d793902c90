use super::{EmailProvider, OutboundEmail, ProviderError};
use crate::config::SmtpConfig;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Mutex;
use std::time::Duration;

/// Sends email through an SMTP relay using lettre. The transport is built
/// once; connections are established lazily on the first send.
pub struct SmtpProvider {
    config: SmtpConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpProvider {
    pub fn new(config: SmtpConfig) -> Result<Self, ProviderError> {
        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host).map_err(|e| {
                ProviderError::Configuration(format!("Failed to create SMTP transport: {}", e))
            })?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        let mut builder = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    async fn send(&self, email: &OutboundEmail) -> Result<(), ProviderError> {
        let from: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| {
                ProviderError::Configuration(format!("Invalid sender address: {}", e))
            })?;

        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| ProviderError::InvalidRecipient(format!("{}: {}", email.to, e)))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.clone())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.body_text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.body_html.clone()),
                    ),
            )
            .map_err(|e| ProviderError::SendFailed(format!("Failed to build message: {}", e)))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| ProviderError::SendFailed(e.to_string()))?;

        tracing::debug!(code = %response.code(), "SMTP relay accepted message");
        Ok(())
    }
}

/// Mock provider used in tests and when the relay is disabled. Records every
/// message handed to it, including ones it was told to reject.
#[derive(Default)]
pub struct MockEmailProvider {
    sent: Mutex<Vec<OutboundEmail>>,
    fail_with: Option<String>,
}

impl MockEmailProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that rejects every send with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(reason.into()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailProvider for MockEmailProvider {
    async fn send(&self, email: &OutboundEmail) -> Result<(), ProviderError> {
        self.sent.lock().unwrap().push(email.clone());

        if let Some(reason) = &self.fail_with {
            return Err(ProviderError::SendFailed(reason.clone()));
        }

        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "[MOCK] Email would be sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smtp_config(use_tls: bool) -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            use_tls,
            username: "user".to_string(),
            password: "password".to_string(),
            from_email: "noreply@pulsepay.com".to_string(),
            from_name: "PulsePay".to_string(),
            enabled: true,
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_smtp_provider_creation() {
        assert!(SmtpProvider::new(smtp_config(true)).is_ok());
        assert!(SmtpProvider::new(smtp_config(false)).is_ok());
    }

    #[tokio::test]
    async fn test_mock_provider_records_messages() {
        let provider = MockEmailProvider::new();
        let email = OutboundEmail {
            to: "user@example.com".to_string(),
            subject: "Subject".to_string(),
            body_text: "text".to_string(),
            body_html: "<p>html</p>".to_string(),
        };

        provider.send(&email).await.unwrap();

        assert_eq!(provider.sent_count(), 1);
        assert_eq!(provider.sent()[0].to, "user@example.com");
    }

    #[tokio::test]
    async fn test_failing_mock_rejects_but_records_the_attempt() {
        let provider = MockEmailProvider::failing("relay unavailable");
        let email = OutboundEmail {
            to: "user@example.com".to_string(),
            subject: "Subject".to_string(),
            body_text: "text".to_string(),
            body_html: "<p>html</p>".to_string(),
        };

        let err = provider.send(&email).await.unwrap_err();

        assert!(err.to_string().contains("relay unavailable"));
        assert_eq!(provider.sent_count(), 1);
    }
}
