//! Address checks for the registration form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why a typed address was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email is required.")]
    Empty,
    #[error("Email must be at most {limit} characters.")]
    Overlong { limit: usize },
    #[error("Email cannot contain spaces.")]
    InnerSpace,
    /// Zero or several `@` separators.
    #[error("Email must contain a single @ symbol.")]
    AtSymbol,
    /// Nothing before or after the `@`.
    #[error("Email must have a name and a domain.")]
    MissingPart,
}

/// A registration address that passed the shape check.
///
/// The backend does the real validation; this only stops obviously broken
/// input before a request is made. Leading and trailing whitespace is dropped.
///
/// ```
/// use black_excellence_core::Email;
///
/// let email = Email::parse(" ida@example.org ").unwrap();
/// assert_eq!(email.as_str(), "ida@example.org");
/// assert!(Email::parse("a@b@c").is_err());
/// assert!(Email::parse("@example.org").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Longest address SMTP will carry.
    pub const LIMIT: usize = 254;

    /// Checks `raw` and keeps its trimmed form.
    ///
    /// # Errors
    ///
    /// The first [`EmailError`] that applies, checked in declaration order.
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        let address = raw.trim();
        match address.len() {
            0 => return Err(EmailError::Empty),
            n if n > Self::LIMIT => return Err(EmailError::Overlong { limit: Self::LIMIT }),
            _ => {}
        }
        if address.contains(char::is_whitespace) {
            return Err(EmailError::InnerSpace);
        }
        let mut parts = address.split('@');
        let (Some(name), Some(host), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(EmailError::AtSymbol);
        };
        if name.is_empty() || host.is_empty() {
            return Err(EmailError::MissingPart);
        }
        Ok(Self(address.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, host)| host)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        out.write_str(self.as_str())
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
