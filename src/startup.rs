//! Application startup and lifecycle management.

use crate::config::EmailServiceConfig;
use crate::error::AppError;
use crate::handlers::{
    health_check, metrics_endpoint, readiness_check, send_email, test_email,
};
use crate::services::{EmailProvider, MockEmailProvider, Renderer, SmtpProvider};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<Renderer>,
    pub email_provider: Arc<dyn EmailProvider>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration, selecting the
    /// provider from it. With `SMTP_ENABLED=false` sends are logged by the
    /// mock provider instead of hitting a relay.
    pub async fn build(config: EmailServiceConfig) -> Result<Self, AppError> {
        let email_provider: Arc<dyn EmailProvider> = if config.smtp.enabled {
            let provider = SmtpProvider::new(config.smtp.clone()).map_err(|e| {
                tracing::error!("Failed to initialize SMTP provider: {}", e);
                AppError::ConfigError(anyhow::Error::new(e))
            })?;
            tracing::info!(
                host = %config.smtp.host,
                port = config.smtp.port,
                use_tls = config.smtp.use_tls,
                "SMTP email provider initialized"
            );
            Arc::new(provider)
        } else {
            tracing::info!("SMTP provider disabled, using mock email provider");
            Arc::new(MockEmailProvider::new())
        };

        Self::build_with_provider(config, email_provider).await
    }

    /// Build the application around an already constructed provider. Used by
    /// the tests to inject a recording mock.
    pub async fn build_with_provider(
        config: EmailServiceConfig,
        email_provider: Arc<dyn EmailProvider>,
    ) -> Result<Self, AppError> {
        let renderer = Arc::new(Renderer::new()?);

        let state = AppState {
            renderer,
            email_provider,
        };

        // Bind HTTP listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Email service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = Router::new()
            .route("/send_email", post(send_email))
            .route("/test_email/:email_type", post(test_email))
            .route("/health", get(health_check))
            .route("/ready", get(readiness_check))
            .route("/metrics", get(metrics_endpoint))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state);

        axum::serve(self.listener, router).await
    }
}
