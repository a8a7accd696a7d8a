//! SMTP Mail Gateway
//!
//! Implements the notification gateway over lettre's async SMTP
//! transport with multipart (text + HTML) messages.

use lettre::message::header::ContentType;
use lettre::message::{MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::domain::gateway::{DeliveryReceipt, MailGateway, MailMessage};
use crate::error::{AuthError, AuthResult};

/// SMTP transport configuration
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// From header, e.g. `Accounts <no-reply@example.com>`
    pub from_address: String,
}

/// Mail gateway backed by an async SMTP relay
#[derive(Clone)]
pub struct SmtpMailGateway {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailGateway {
    /// Create a new gateway from configuration
    pub fn new(config: &SmtpConfig) -> AuthResult<Self> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AuthError::Internal(format!("SMTP transport setup failed: {}", e)))?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }
}

impl MailGateway for SmtpMailGateway {
    async fn send(&self, mail: MailMessage) -> AuthResult<DeliveryReceipt> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| AuthError::MailDelivery("invalid from address".to_string()))?,
            )
            .to(mail
                .to
                .as_str()
                .parse()
                .map_err(|_| AuthError::MailDelivery("invalid recipient address".to_string()))?)
            .subject(&mail.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(mail.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(mail.html_body.clone()),
                    ),
            )
            .map_err(|e| AuthError::MailDelivery(e.to_string()))?;

        let response = self
            .mailer
            .send(message)
            .await
            .map_err(|e| AuthError::MailDelivery(e.to_string()))?;

        let message_id = if response.is_positive() {
            response.message().next().map(str::to_owned)
        } else {
            None
        };

        tracing::info!(to = %mail.to, subject = %mail.subject, "Mail handed to SMTP relay");

        Ok(DeliveryReceipt { message_id })
    }
}
