pub mod metrics;
pub mod providers;
pub mod render;

pub use metrics::{get_metrics, init_metrics, record_email_sent, record_render};
pub use providers::{EmailProvider, MockEmailProvider, OutboundEmail, ProviderError, SmtpProvider};
pub use render::{RenderedEmail, Renderer, LOGO_URL};
