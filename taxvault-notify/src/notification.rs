use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[1-9][0-9]{9,14}$").unwrap_or_else(|e| unreachable!("phone pattern: {e}"))
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap_or_else(|e| unreachable!("email pattern: {e}"))
});

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("'{0}' is not a valid phone number")]
    InvalidPhone(String),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("{0} is required")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Sms,
    Email,
}

impl fmt::Display for Channel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            Self::Sms => "sms",
            Self::Email => "email",
        })
    }
}

/// A rendered message ready to hand to a gateway.
///
/// Construct through [`Notification::sms`] or [`Notification::email`] (or
/// the builders in [`crate::templates`]) so the recipient is always valid
/// for its channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub channel: Channel,
    pub recipient: String,
    /// Email only.
    pub subject: Option<String>,
    pub body: String,
}

impl Notification {
    /// An SMS to `phone`. Spaces and dashes in the number are ignored.
    pub fn sms(
        phone: &str,
        body: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        Ok(Self {
            channel: Channel::Sms,
            recipient: normalize_phone(phone)?,
            subject: None,
            body: body.into(),
        })
    }

    pub fn email(
        address: &str,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(TemplateError::MissingField("email address"));
        }
        if !EMAIL.is_match(address) {
            return Err(TemplateError::InvalidEmail(address.to_string()));
        }
        Ok(Self {
            channel: Channel::Email,
            recipient: address.to_string(),
            subject: Some(subject.into()),
            body: body.into(),
        })
    }
}

fn normalize_phone(phone: &str) -> Result<String, TemplateError> {
    let compact: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if compact.is_empty() {
        return Err(TemplateError::MissingField("phone number"));
    }
    if !PHONE.is_match(&compact) {
        return Err(TemplateError::InvalidPhone(phone.to_string()));
    }
    Ok(compact)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sms_strips_separators() {
        let sms = Notification::sms("+91 98765-43210", "hi").unwrap();

        assert_eq!(sms.recipient, "+919876543210");
        assert_eq!(sms.channel, Channel::Sms);
        assert_eq!(sms.subject, None);
    }

    #[test]
    fn sms_accepts_bare_ten_digit_number() {
        assert!(Notification::sms("9876543210", "hi").is_ok());
    }

    #[test]
    fn sms_rejects_bad_numbers() {
        for bad in ["12345", "+0123456789", "98765abcde", "+91 98765 43210 12345 6"] {
            assert_eq!(
                Notification::sms(bad, "hi"),
                Err(TemplateError::InvalidPhone(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn missing_recipients() {
        assert_eq!(
            Notification::sms("  ", "hi"),
            Err(TemplateError::MissingField("phone number"))
        );
        assert_eq!(
            Notification::email("", "s", "b"),
            Err(TemplateError::MissingField("email address"))
        );
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(Notification::email("asha@example.in", "s", "b").is_ok());
        assert_eq!(
            Notification::email("asha.example.in", "s", "b"),
            Err(TemplateError::InvalidEmail("asha.example.in".to_string()))
        );
    }
}
