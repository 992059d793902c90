//! email-service: transactional email microservice for PulsePay.
//!
//! Renders templated emails (welcome, payment confirmation, security alert)
//! and hands them to an SMTP relay. Stateless; nothing is queued or stored.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod services;
pub mod startup;
