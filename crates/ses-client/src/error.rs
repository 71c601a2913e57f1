//! SES client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The message contains invalid content or a recipient was suppressed.
    #[error("MessageRejected: {0}")]
    MessageRejected(String),

    /// The sender's MAIL FROM domain has not been verified.
    #[error("MailFromDomainNotVerifiedException: {0}")]
    MailFromDomainNotVerified(String),

    /// The requested configuration set does not exist.
    #[error("ConfigurationSetDoesNotExistException: {0}")]
    ConfigurationSetDoesNotExist(String),

    /// The configured endpoint is not a usable base URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("API error: {status} {code} - {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

impl SesError {
    /// Stable label used as the `cause` field in structured logs.
    pub fn cause(&self) -> &'static str {
        match self {
            SesError::Http(_) => "transport",
            SesError::Json(_) => "malformed_response",
            SesError::MessageRejected(_) => "message_rejected",
            SesError::MailFromDomainNotVerified(_) => "mail_from_domain_not_verified",
            SesError::ConfigurationSetDoesNotExist(_) => "configuration_set_does_not_exist",
            SesError::InvalidEndpoint(_) => "invalid_endpoint",
            SesError::Api { .. } => "provider_error",
        }
    }

    /// Map a provider error code and message onto the error taxonomy.
    pub(crate) fn from_code(status: u16, code: &str, message: String) -> Self {
        match code {
            "MessageRejected" => SesError::MessageRejected(message),
            "MailFromDomainNotVerifiedException" | "MailFromDomainNotVerified" => {
                SesError::MailFromDomainNotVerified(message)
            }
            "ConfigurationSetDoesNotExistException"
            | "ConfigurationSetDoesNotExist"
            | "NotFoundException" => SesError::ConfigurationSetDoesNotExist(message),
            _ => SesError::Api {
                status,
                code: code.to_string(),
                message,
            },
        }
    }
}
