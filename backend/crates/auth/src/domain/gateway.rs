//! Notification Gateway Trait
//!
//! The core only depends on "send mail, report delivery". Transport
//! details (SMTP, templates) live in the infrastructure layer.

use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// An outbound mail message (text + HTML alternatives)
#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: Email,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Delivery outcome reported by the gateway
///
/// A send without a delivery id is treated as a failed delivery by the
/// callers that require confirmation.
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    pub message_id: Option<String>,
}

impl DeliveryReceipt {
    /// Whether the gateway confirmed delivery with an id
    pub fn is_confirmed(&self) -> bool {
        self.message_id
            .as_deref()
            .is_some_and(|id| !id.is_empty())
    }
}

/// Mail gateway trait
#[trait_variant::make(MailGateway: Send)]
pub trait LocalMailGateway {
    /// Send a message and report the delivery outcome
    async fn send(&self, mail: MailMessage) -> AuthResult<DeliveryReceipt>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_confirmation() {
        let confirmed = DeliveryReceipt {
            message_id: Some("abc-123".to_string()),
        };
        assert!(confirmed.is_confirmed());

        let empty = DeliveryReceipt {
            message_id: Some(String::new()),
        };
        assert!(!empty.is_confirmed());

        let missing = DeliveryReceipt { message_id: None };
        assert!(!missing.is_confirmed());
    }
}
