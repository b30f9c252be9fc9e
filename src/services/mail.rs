// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outbound email.
//!
//! `Mailer` is the seam the notifier talks to; `SmtpMailer` is the
//! production implementation over lettre's async SMTP transport.

use crate::config::MailConfig;
use crate::error::AppError;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// A plain-text message to one recipient. The sender is fixed by the mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Something that can deliver mail. Must be shareable across tasks.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), AppError>;
}

/// SMTP mailer, authenticated as the configured sender.
pub struct SmtpMailer {
    sender: String,
    /// None when mail is disabled
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, AppError> {
        if !config.enabled {
            tracing::warn!("Mail is disabled, notifications will be logged only");
            return Ok(Self {
                sender: config.sender_email.clone(),
                transport: None,
            });
        }

        let creds = Credentials::new(config.sender_email.clone(), config.app_password.clone());

        // relay() uses implicit TLS, which is what port 465 expects.
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| AppError::Mail(format!("Failed to create SMTP transport: {}", e)))?
            .credentials(creds)
            .port(config.smtp_port)
            .build();

        tracing::info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            "SMTP transport configured"
        );

        Ok(Self {
            sender: config.sender_email.clone(),
            transport: Some(transport),
        })
    }

    fn build_message(&self, mail: &OutgoingMail) -> Result<Message, AppError> {
        Message::builder()
            .from(
                self.sender
                    .parse()
                    .map_err(|e| AppError::Mail(format!("Invalid from address: {}", e)))?,
            )
            .to(mail
                .to
                .parse()
                .map_err(|e| AppError::Mail(format!("Invalid to address: {}", e)))?)
            .subject(mail.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone())
            .map_err(|e| AppError::Mail(format!("Failed to build email: {}", e)))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), AppError> {
        let Some(transport) = &self.transport else {
            tracing::info!(to = %mail.to, subject = %mail.subject, "Mail disabled, skipping send");
            return Ok(());
        };

        let message = self.build_message(mail)?;
        let response = transport
            .send(message)
            .await
            .map_err(|e| AppError::Mail(format!("Failed to send email: {}", e)))?;

        tracing::info!(to = %mail.to, code = %response.code(), "Email sent");
        Ok(())
    }
}
