//! Verification email composition.

use crate::error::CollectorError;
use askama::Template;
use urlencoding::encode;

/// HTML body of the verification email.
#[derive(Template)]
#[template(path = "email/verification.html")]
struct VerificationHtml<'a> {
    name: &'a str,
    link: &'a str,
}

/// Plain text body for non-HTML mail clients.
#[derive(Template)]
#[template(path = "email/verification.txt")]
struct VerificationText<'a> {
    name: &'a str,
    link: &'a str,
}

/// A fully assembled verification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEmail {
    pub recipient: String,
    pub link: String,
    pub html_body: String,
    pub text_body: String,
}

/// Build `{base_url}?name=..&email=..&p=..` with percent-encoded values.
pub fn verification_link(base_url: &str, name: &str, email: &str, token: &str) -> String {
    format!(
        "{}?name={}&email={}&p={}",
        base_url,
        encode(name),
        encode(email),
        encode(token)
    )
}

impl VerificationEmail {
    /// Render both bodies for `name` around an already-built link.
    pub fn compose(name: &str, email: &str, link: String) -> Result<Self, CollectorError> {
        let html_body = VerificationHtml { name, link: &link }.render()?;
        let text_body = VerificationText { name, link: &link }.render()?;

        Ok(Self {
            recipient: email.to_string(),
            link,
            html_body,
            text_body,
        })
    }
}
