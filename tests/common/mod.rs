use email_service::config::{CommonConfig, EmailServiceConfig, SmtpConfig};
use email_service::services::MockEmailProvider;
use email_service::startup::Application;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub mock_provider: Arc<MockEmailProvider>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_provider(Arc::new(MockEmailProvider::new())).await
    }

    /// Spawn an app whose provider rejects every send with `reason`.
    pub async fn spawn_failing(reason: &str) -> Self {
        Self::spawn_with_provider(Arc::new(MockEmailProvider::failing(reason))).await
    }

    async fn spawn_with_provider(mock_provider: Arc<MockEmailProvider>) -> Self {
        // Use random port for testing (port 0)
        let config = EmailServiceConfig {
            common: CommonConfig { port: 0 },
            smtp: SmtpConfig {
                host: "smtp.test.local".to_string(),
                port: 587,
                use_tls: true,
                username: "test".to_string(),
                password: "test".to_string(),
                from_email: "noreply@pulsepay.com".to_string(),
                from_name: "PulsePay".to_string(),
                enabled: false, // Use mock
                timeout_secs: 5,
            },
        };

        let app = Application::build_with_provider(config, mock_provider.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            mock_provider,
        }
    }
}
