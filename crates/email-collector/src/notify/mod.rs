//! Verification email dispatch.
//!
//! Notification is stateless: the token is re-derived from the submitted
//! name and email and the store is never consulted.

mod message;

pub use message::{verification_link, VerificationEmail};

use crate::config::MailConfig;
use crate::error::CollectorError;
use crate::token::TokenCodec;
use ses_client::{SendEmailRequest, SesClient, SesError};
use tracing::{error, info, instrument};

/// Terminal state of a dispatch attempt.
#[derive(Debug)]
pub enum DeliveryStatus {
    /// The provider accepted the message.
    Sent { message_id: String },
    /// The provider or transport failed; the cause is logged, never retried.
    Failed(SesError),
}

/// Builds and sends verification emails.
pub struct Notifier {
    codec: TokenCodec,
    ses: SesClient,
    mail: MailConfig,
}

impl Notifier {
    pub fn new(codec: TokenCodec, ses: SesClient, mail: MailConfig) -> Self {
        Self { codec, ses, mail }
    }

    /// Build the verification email for `(name, email)` without sending it.
    pub fn build(&self, name: &str, email: &str) -> Result<VerificationEmail, CollectorError> {
        let token = self.codec.sign(name, email);
        let link = verification_link(&self.mail.base_url, name, email, &token);
        VerificationEmail::compose(name, email, link)
    }

    /// Send a verification email to `email`.
    ///
    /// Only composition failures are returned as errors; provider failures
    /// are reported through [`DeliveryStatus::Failed`].
    #[instrument(skip(self, name))]
    pub async fn notify(&self, name: &str, email: &str) -> Result<DeliveryStatus, CollectorError> {
        let message = self.build(name, email)?;

        let request = SendEmailRequest::simple(
            &self.mail.sender,
            &message.recipient,
            &self.mail.subject,
            message.html_body,
            message.text_body,
        )
        .with_configuration_set(self.mail.configuration_set.clone());

        match self.ses.send_email(&request).await {
            Ok(response) => {
                info!(
                    recipient = %message.recipient,
                    message_id = %response.message_id,
                    "Email sent"
                );
                Ok(DeliveryStatus::Sent {
                    message_id: response.message_id,
                })
            }
            Err(e) => {
                error!(
                    recipient = %message.recipient,
                    cause = e.cause(),
                    error = %e,
                    "Failed to send verification email"
                );
                Ok(DeliveryStatus::Failed(e))
            }
        }
    }
}
