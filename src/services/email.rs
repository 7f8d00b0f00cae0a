//! Email service for account, booking and supplier notifications

use std::{str::FromStr, sync::Arc};

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
};

/// File attached to an outgoing email
#[derive(Debug, Clone, PartialEq)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: Option<EmailAttachment>,
}

impl OutgoingEmail {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Option<EmailAttachment>) -> Self {
        self.attachment = attachment;
        self
    }
}

/// Delivery backend for outgoing emails
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: OutgoingEmail) -> AppResult<()>;
}

/// SMTP delivery through lettre
pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, message: &OutgoingEmail) -> AppResult<Message> {
        let from_name = self
            .config
            .smtp_from_name
            .as_deref()
            .unwrap_or("Fuel Pro Management System");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = Mailbox::from_str(&message.to)
            .map_err(|e| AppError::Internal(format!("Invalid to address: {}", e)))?;

        let text = MultiPart::alternative()
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_PLAIN)
                    .body(message.body.clone()),
            )
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(format!(
                        r#"<html><body><pre>{}</pre></body></html>"#,
                        crate::frontend::views::escape(&message.body)
                    )),
            );

        let body = match &message.attachment {
            Some(file) => {
                let content_type = ContentType::parse(&file.content_type)
                    .map_err(|e| AppError::Internal(format!("Invalid content type: {}", e)))?;
                MultiPart::mixed()
                    .multipart(text)
                    .singlepart(Attachment::new(file.filename.clone()).body(file.data.clone(), content_type))
            }
            None => text,
        };

        Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(message.subject.clone())
            .multipart(body)
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))
    }

    fn transport(&self) -> AppResult<SmtpTransport> {
        let mailer_builder = if self.config.smtp_use_tls {
            // Use STARTTLS for secure connection
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Internal(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let mailer_builder = if let (Some(username), Some(password)) =
            (&self.config.smtp_username, &self.config.smtp_password)
        {
            mailer_builder.credentials(Credentials::new(username.clone(), password.clone()))
        } else {
            mailer_builder
        };

        Ok(mailer_builder.build())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: OutgoingEmail) -> AppResult<()> {
        let email = self.build_message(&message)?;
        let transport = self.transport()?;

        tokio::task::spawn_blocking(move || transport.send(&email))
            .await
            .map_err(|e| AppError::Internal(format!("Email task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}

/// Writes emails to the log instead of sending them
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: OutgoingEmail) -> AppResult<()> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            attachment = message.attachment.as_ref().map(|a| a.filename.as_str()),
            "Email delivery disabled, not sending"
        );
        tracing::debug!(body = %message.body);
        Ok(())
    }
}

#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<dyn Mailer>,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        let mailer: Arc<dyn Mailer> = if config.enabled {
            Arc::new(SmtpMailer::new(config))
        } else {
            Arc::new(LogMailer)
        };
        Self { mailer }
    }

    pub fn with_mailer(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Send a notification. Delivery failures are logged, never returned.
    pub async fn notify(&self, message: OutgoingEmail) {
        let to = message.to.clone();
        let subject = message.subject.clone();
        match self.mailer.send(message).await {
            Ok(()) => tracing::info!(%to, %subject, "Email sent"),
            Err(e) => tracing::warn!(%to, %subject, "Failed to send email: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_notify_swallows_delivery_failure() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(AppError::Internal("smtp down".to_string())));

        let service = EmailService::with_mailer(Arc::new(mailer));
        service
            .notify(OutgoingEmail::new("a@example.com", "Hello", "Body"))
            .await;
    }

    #[tokio::test]
    async fn test_notify_passes_attachment_through() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|m| {
                m.to == "a@example.com"
                    && m.attachment.as_ref().map(|a| a.filename.as_str()) == Some("invoice.pdf")
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = EmailService::with_mailer(Arc::new(mailer));
        let attachment = EmailAttachment {
            filename: "invoice.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: b"%PDF-1.4".to_vec(),
        };
        service
            .notify(OutgoingEmail::new("a@example.com", "Invoice", "See attached").with_attachment(Some(attachment)))
            .await;
    }

    #[test]
    fn test_smtp_message_with_attachment_builds() {
        let mailer = SmtpMailer::new(EmailConfig::default());
        let message = OutgoingEmail::new("Customer <c@example.com>", "Invoice", "Line 1\nLine 2")
            .with_attachment(Some(EmailAttachment {
                filename: "invoice.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                data: vec![1, 2, 3],
            }));
        let built = mailer.build_message(&message).unwrap();
        let raw = String::from_utf8_lossy(&built.formatted()).to_string();
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("invoice.pdf"));
    }

    #[test]
    fn test_html_part_escapes_user_text() {
        let mailer = SmtpMailer::new(EmailConfig::default());
        let message = OutgoingEmail::new("c@example.com", "Welcome", "Name: <b>Rao & Sons</b>");
        let built = mailer.build_message(&message).unwrap();
        let raw = String::from_utf8_lossy(&built.formatted()).to_string();
        assert!(raw.contains("<pre>Name: &lt;b&gt;Rao &amp; Sons&lt;/b&gt;</pre>"));
        assert!(!raw.contains("<pre>Name: <b>"));
    }

    #[test]
    fn test_log_mailer_always_succeeds() {
        let result = tokio_test::block_on(LogMailer.send(OutgoingEmail::new("x@example.com", "s", "b")));
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_recipient_is_rejected() {
        let mailer = SmtpMailer::new(EmailConfig::default());
        let result = mailer.build_message(&OutgoingEmail::new("not an address", "s", "b"));
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
