use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The set of transactional emails this service can send. Adding a variant
/// forces the match arms below to be extended, so a new type cannot ship
/// without a subject, a template pair, and a sample context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailType {
    Welcome,
    PaymentConfirmation,
    Alert,
}

#[derive(Debug, Error)]
#[error("unknown email type: {0}")]
pub struct UnknownEmailType(pub String);

impl EmailType {
    pub const ALL: [EmailType; 3] = [
        EmailType::Welcome,
        EmailType::PaymentConfirmation,
        EmailType::Alert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmailType::Welcome => "welcome",
            EmailType::PaymentConfirmation => "payment_confirmation",
            EmailType::Alert => "alert",
        }
    }

    /// Fixed subject line. Subjects carry no placeholders.
    pub fn subject(&self) -> &'static str {
        match self {
            EmailType::Welcome => "Welcome to PulsePay - Your Emergency Payment Platform",
            EmailType::PaymentConfirmation => "Payment Confirmation - PulsePay",
            EmailType::Alert => "Security Alert - PulsePay",
        }
    }

    pub fn html_template(&self) -> &'static str {
        match self {
            EmailType::Welcome => include_str!("../../templates/welcome.html"),
            EmailType::PaymentConfirmation => {
                include_str!("../../templates/payment_confirmation.html")
            }
            EmailType::Alert => include_str!("../../templates/alert.html"),
        }
    }

    pub fn text_template(&self) -> &'static str {
        match self {
            EmailType::Welcome => include_str!("../../templates/welcome.txt"),
            EmailType::PaymentConfirmation => {
                include_str!("../../templates/payment_confirmation.txt")
            }
            EmailType::Alert => include_str!("../../templates/alert.txt"),
        }
    }

    /// Context keys the template pair references, not counting `logo_url`
    /// which the renderer injects on its own.
    pub fn context_keys(&self) -> &'static [&'static str] {
        match self {
            EmailType::Welcome => &["user_name", "login_url"],
            EmailType::PaymentConfirmation => &[
                "user_name",
                "amount",
                "currency",
                "tx_hash",
                "payment_date",
                "hospital_name",
            ],
            EmailType::Alert => &["user_name", "alert_message", "action_required"],
        }
    }

    /// Built-in sample context used by the test endpoint.
    pub fn sample_context(&self) -> HashMap<String, String> {
        let pairs: &[(&str, &str)] = match self {
            EmailType::Welcome => &[
                ("user_name", "Test User"),
                ("login_url", "https://pulsepay.com/login"),
            ],
            EmailType::PaymentConfirmation => &[
                ("user_name", "Test User"),
                ("amount", "100.00"),
                ("currency", "USD"),
                ("tx_hash", "0x123...abc"),
                ("payment_date", "2024-07-15"),
                ("hospital_name", "Metropolitan General Hospital"),
            ],
            EmailType::Alert => &[
                ("user_name", "Test User"),
                ("alert_message", "Suspicious login detected."),
                ("action_required", "Please reset your password."),
            ],
        };

        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }
}

impl fmt::Display for EmailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmailType {
    type Err = UnknownEmailType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "welcome" => Ok(EmailType::Welcome),
            "payment_confirmation" => Ok(EmailType::PaymentConfirmation),
            "alert" => Ok(EmailType::Alert),
            other => Err(UnknownEmailType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_type_round_trip() {
        for email_type in EmailType::ALL {
            let parsed: EmailType = email_type.as_str().parse().unwrap();
            assert_eq!(parsed, email_type);
        }
    }

    #[test]
    fn test_unknown_email_type_rejected() {
        let result: Result<EmailType, _> = "newsletter".parse();
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "unknown email type: newsletter");
    }

    #[test]
    fn test_email_type_is_case_sensitive() {
        assert!("Welcome".parse::<EmailType>().is_err());
        assert!("WELCOME".parse::<EmailType>().is_err());
    }

    #[test]
    fn test_subjects() {
        assert_eq!(
            EmailType::Welcome.subject(),
            "Welcome to PulsePay - Your Emergency Payment Platform"
        );
        assert_eq!(
            EmailType::PaymentConfirmation.subject(),
            "Payment Confirmation - PulsePay"
        );
        assert_eq!(EmailType::Alert.subject(), "Security Alert - PulsePay");
    }

    #[test]
    fn test_sample_context_covers_declared_keys() {
        for email_type in EmailType::ALL {
            let sample = email_type.sample_context();
            for key in email_type.context_keys() {
                assert!(
                    sample.contains_key(*key),
                    "{} sample context is missing {}",
                    email_type,
                    key
                );
            }
        }
    }

    #[test]
    fn test_templates_reference_declared_keys() {
        for email_type in EmailType::ALL {
            for key in email_type.context_keys() {
                let placeholder = format!("{{{{ {} }}}}", key);
                let in_html = email_type.html_template().contains(&placeholder);
                let in_text = email_type.text_template().contains(&placeholder);
                assert!(
                    in_html || in_text,
                    "{} declares {} but neither template references it",
                    email_type,
                    key
                );
            }
        }
    }
}
