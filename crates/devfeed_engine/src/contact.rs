use std::sync::Arc;

use devfeed_core::{ContactForm, ContactMessage, FeedError};
use feed_logging::{feed_error, feed_info};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Validation(FeedError),
    #[error("mail transport failed: {0}")]
    Transport(String),
    #[error("mail settings invalid: {0}")]
    Config(String),
}

impl From<RelayError> for FeedError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::Validation(inner) => inner,
            other => FeedError::transport(other.to_string()),
        }
    }
}

/// A composed message ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub subject: String,
    pub html: String,
    /// Submitter address, used as reply-to.
    pub reply_to: String,
}

#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), RelayError>;
}

/// Builds the notification for a validated submission.
pub fn compose(message: &ContactMessage) -> OutgoingMail {
    let html = format!(
        "<h3>New Contact Form Submission</h3>\n\
         <p><strong>Name:</strong> {}</p>\n\
         <p><strong>Email:</strong> {}</p>\n\
         <p><strong>Subject:</strong> {}</p>\n\
         <p><strong>Message:</strong></p>\n\
         <p>{}</p>\n",
        escape_html(&message.name),
        escape_html(&message.email),
        escape_html(&message.subject),
        escape_html(&message.message).replace('\n', "<br>"),
    );
    OutgoingMail {
        subject: format!("Contact Form: {}", message.subject),
        html,
        reply_to: message.email.clone(),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub user: String,
    pub password: String,
}

/// Sends through an authenticated SMTP relay, from and to the configured
/// mailbox.
pub struct SmtpMailer {
    mailbox: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> Result<Self, RelayError> {
        let mailbox: Mailbox = settings
            .user
            .parse()
            .map_err(|err| RelayError::Config(format!("mailbox {:?}: {err}", settings.user)))?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
            .map_err(|err| RelayError::Config(err.to_string()))?
            .credentials(Credentials::new(settings.user, settings.password))
            .build();
        Ok(Self { mailbox, transport })
    }
}

#[async_trait::async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), RelayError> {
        let mut builder = Message::builder()
            .from(self.mailbox.clone())
            .to(self.mailbox.clone())
            .subject(mail.subject)
            .header(ContentType::TEXT_HTML);
        if let Ok(reply_to) = mail.reply_to.parse::<Mailbox>() {
            builder = builder.reply_to(reply_to);
        }
        let email = builder
            .body(mail.html)
            .map_err(|err| RelayError::Transport(err.to_string()))?;
        self.transport
            .send(email)
            .await
            .map_err(|err| RelayError::Transport(err.to_string()))?;
        Ok(())
    }
}

/// Validates a submission and relays it once. Nothing is queued or retried.
#[derive(Clone)]
pub struct ContactRelay {
    transport: Arc<dyn MailTransport>,
}

impl ContactRelay {
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    pub async fn submit(&self, form: &ContactForm) -> Result<(), RelayError> {
        let message = form.validate().map_err(RelayError::Validation)?;
        let mail = compose(&message);
        match self.transport.send(mail).await {
            Ok(()) => {
                feed_info!("contact message relayed subject={:?}", message.subject);
                Ok(())
            }
            Err(err) => {
                feed_error!("contact relay failed: {}", err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_escapes_user_text_and_keeps_line_breaks() {
        let mail = compose(&ContactMessage {
            name: "<b>Eve</b>".into(),
            email: "eve@example.com".into(),
            subject: "Hi & bye".into(),
            message: "line one\nline \"two\"".into(),
        });

        assert_eq!(mail.subject, "Contact Form: Hi & bye");
        assert!(mail.html.contains("<strong>Name:</strong> &lt;b&gt;Eve&lt;/b&gt;"));
        assert!(mail.html.contains("Hi &amp; bye"));
        assert!(mail.html.contains("line one<br>line &quot;two&quot;"));
        assert_eq!(mail.reply_to, "eve@example.com");
    }
}
