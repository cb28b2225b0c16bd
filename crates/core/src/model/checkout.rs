use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CheckoutLinkError {
    #[error("invalid checkout url: {0}")]
    Invalid(String),

    #[error("checkout url must use https")]
    InsecureScheme,
}

/// External payment destination opened from the final step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CheckoutLink(Url);

impl CheckoutLink {
    /// Parses and validates a checkout URL.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutLinkError::Invalid` if the URL does not parse, or
    /// `CheckoutLinkError::InsecureScheme` for anything other than `https`.
    pub fn parse(raw: &str) -> Result<Self, CheckoutLinkError> {
        let url = Url::parse(raw.trim())
            .map_err(|err| CheckoutLinkError::Invalid(err.to_string()))?;
        if url.scheme() != "https" {
            return Err(CheckoutLinkError::InsecureScheme);
        }
        Ok(Self(url))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl fmt::Display for CheckoutLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for CheckoutLink {
    type Error = CheckoutLinkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CheckoutLink> for String {
    fn from(link: CheckoutLink) -> Self {
        link.0.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_https() {
        let link = CheckoutLink::parse("https://pay.hotmart.com/example").unwrap();
        assert_eq!(link.host(), Some("pay.hotmart.com"));
        assert_eq!(link.to_string(), "https://pay.hotmart.com/example");
    }

    #[test]
    fn rejects_plain_http() {
        assert_eq!(
            CheckoutLink::parse("http://pay.example.com"),
            Err(CheckoutLinkError::InsecureScheme)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            CheckoutLink::parse("not a url"),
            Err(CheckoutLinkError::Invalid(_))
        ));
    }
}
