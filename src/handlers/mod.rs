pub mod email;
pub mod health;

pub use email::{send_email, test_email};
pub use health::{health_check, metrics_endpoint, readiness_check};
