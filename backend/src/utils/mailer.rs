use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::SmtpConfig;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(String),
    #[error("failed to build email: {0}")]
    Build(String),
    #[error("smtp transport error: {0}")]
    Transport(String),
}

/// A validated contact form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactEnquiry {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_enquiry(&self, enquiry: ContactEnquiry) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    contact_to: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)
            .map_err(|e| MailError::Transport(format!("Failed to create SMTP relay: {}", e)))?
            .port(config.port)
            .credentials(creds)
            .build();
        Ok(Self {
            transport,
            from: config.from.clone(),
            contact_to: config.contact_to.clone(),
        })
    }

    fn build_message(&self, enquiry: &ContactEnquiry) -> Result<Message, MailError> {
        build_enquiry_message(&self.from, &self.contact_to, enquiry)
    }
}

pub(crate) fn build_enquiry_message(
    from: &Mailbox,
    to: &Mailbox,
    enquiry: &ContactEnquiry,
) -> Result<Message, MailError> {
    let reply_to = Mailbox::new(
        Some(enquiry.name.clone()),
        enquiry
            .email
            .parse()
            .map_err(|e: lettre::address::AddressError| MailError::Address(e.to_string()))?,
    );
    let body = format!(
        "Name: {}\nEmail: {}\nReceived: {}\n\n{}",
        enquiry.name,
        enquiry.email,
        chrono::Utc::now().format("%Y-%m-%d %H:%M UTC"),
        enquiry.message
    );
    Message::builder()
        .from(from.clone())
        .reply_to(reply_to)
        .to(to.clone())
        .subject(format!("New enquiry from {}", enquiry.name))
        .header(ContentType::TEXT_PLAIN)
        .body(body)
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_enquiry(&self, enquiry: ContactEnquiry) -> Result<(), MailError> {
        let message = self.build_message(&enquiry)?;
        tracing::info!("Attempting to send enquiry email via SMTP...");
        match self.transport.send(message).await {
            Ok(_) => {
                tracing::info!("Enquiry email sent successfully via SMTP");
                Ok(())
            }
            Err(e) => {
                tracing::error!("SMTP send error: {:?}", e);
                Err(MailError::Transport(e.to_string()))
            }
        }
    }
}

/// Used when SMTP isn't configured: the enquiry only ends up in the logs.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_enquiry(&self, enquiry: ContactEnquiry) -> Result<(), MailError> {
        tracing::warn!(
            name = %enquiry.name,
            email = %enquiry.email,
            "SMTP not configured, enquiry logged only: {}",
            enquiry.message
        );
        Ok(())
    }
}
