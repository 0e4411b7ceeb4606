use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::FeedError;

pub const NAME_MAX: usize = 100;
pub const SUBJECT_MAX: usize = 200;
pub const MESSAGE_MAX: usize = 1000;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        })
    }
}

/// Raw contact submission as received from a client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// A submission that passed validation; text fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Checks fields in order and reports only the first violation.
    pub fn validate(&self) -> Result<ContactMessage, FeedError> {
        let name = required_text(
            &self.name,
            ContactField::Name,
            NAME_MAX,
            "Name is required",
            "Name too long",
        )?;
        if !is_valid_email(&self.email) {
            return Err(violation(ContactField::Email, "Invalid email address"));
        }
        let subject = required_text(
            &self.subject,
            ContactField::Subject,
            SUBJECT_MAX,
            "Subject is required",
            "Subject too long",
        )?;
        let message = required_text(
            &self.message,
            ContactField::Message,
            MESSAGE_MAX,
            "Message is required",
            "Message too long",
        )?;

        Ok(ContactMessage {
            name,
            email: self.email.clone(),
            subject,
            message,
        })
    }
}

fn required_text(
    raw: &str,
    field: ContactField,
    max: usize,
    missing: &'static str,
    too_long: &'static str,
) -> Result<String, FeedError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(violation(field, missing));
    }
    // Limits count UTF-16 code units, as the web form does.
    if trimmed.encode_utf16().count() > max {
        return Err(violation(field, too_long));
    }
    Ok(trimmed.to_string())
}

fn violation(field: ContactField, message: &'static str) -> FeedError {
    FeedError::ValidationFailure { field, message }
}

pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}
