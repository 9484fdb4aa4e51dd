//! Verification email delivery for whisperbox.
//!
//! Delivery goes through the [`VerificationMailer`] trait so tests and
//! email-disabled deployments run without a live SMTP relay.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use crate::config::EmailConfig;
use crate::error::{Result, WhisperError};

/// Sends verification codes to new accounts.
#[async_trait]
pub trait VerificationMailer: Send + Sync {
    /// Send a verification code to `to`.
    async fn send_verification_code(&self, to: &str, username: &str, code: &str) -> Result<()>;
}

/// SMTP-backed mailer using STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build an SMTP mailer from the email configuration.
    pub fn from_config(config: &EmailConfig) -> Result<Self> {
        let creds = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| WhisperError::Email(e.to_string()))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        let from = config
            .from_address
            .parse()
            .map_err(|e| WhisperError::Email(format!("invalid from address: {e}")))?;

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl VerificationMailer for SmtpMailer {
    async fn send_verification_code(&self, to: &str, username: &str, code: &str) -> Result<()> {
        let to_mailbox: Mailbox = to
            .parse()
            .map_err(|e| WhisperError::Email(format!("invalid recipient address: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject("Verification code")
            .body(format!(
                "Hi {username},\n\nYour verification code is: {code}\n\n\
                 Enter it to finish setting up your account."
            ))
            .map_err(|e| WhisperError::Email(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| WhisperError::Email(e.to_string()))?;

        info!(to = %to, "Verification email sent");
        Ok(())
    }
}

/// Log-only mailer used when email delivery is disabled.
///
/// Logs the code instead of sending it so local development can complete
/// the verification flow.
pub struct LogMailer;

#[async_trait]
impl VerificationMailer for LogMailer {
    async fn send_verification_code(&self, to: &str, username: &str, code: &str) -> Result<()> {
        info!(
            to = %to,
            username = %username,
            code = %code,
            "Email delivery disabled; verification code logged"
        );
        Ok(())
    }
}

/// Build the mailer selected by the configuration.
pub fn mailer_from_config(config: &EmailConfig) -> Result<Arc<dyn VerificationMailer>> {
    if config.enabled {
        Ok(Arc::new(SmtpMailer::from_config(config)?))
    } else {
        Ok(Arc::new(LogMailer))
    }
}
