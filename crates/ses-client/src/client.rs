//! Amazon SES v2 HTTP client.

use crate::error::SesError;
use crate::signing::{sign_post, Credentials};
use crate::types::{ErrorBody, SendEmailRequest, SendEmailResponse};
use chrono::Utc;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Signing name of the SES service.
const SERVICE: &str = "ses";

/// Path of the v2 `SendEmail` operation.
const SEND_EMAIL_PATH: &str = "/v2/email/outbound-emails";

/// Header carrying the error code on SES v2 REST errors.
const ERROR_TYPE_HEADER: &str = "x-amzn-ErrorType";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct SesClientConfig {
    /// AWS region, e.g. `us-west-2`
    pub region: String,
    /// Endpoint override; defaults to the regional SES endpoint
    pub endpoint: Option<String>,
    pub credentials: Credentials,
    pub timeout: Duration,
}

/// SES client.
///
/// Credentials are held as `SecretString` and never appear in debug output.
#[derive(Clone)]
pub struct SesClient {
    client: Client,
    endpoint: Url,
    host: String,
    region: String,
    credentials: Credentials,
}

impl SesClient {
    /// Create a new SES client.
    pub fn new(config: SesClientConfig) -> Result<Self, SesError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        let endpoint = config
            .endpoint
            .unwrap_or_else(|| format!("https://email.{}.amazonaws.com", config.region));
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| SesError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

        let host = match (endpoint.host_str(), endpoint.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(SesError::InvalidEndpoint(format!(
                    "{} has no host",
                    endpoint
                )))
            }
        };

        Ok(Self {
            client,
            endpoint,
            host,
            region: config.region,
            credentials: config.credentials,
        })
    }

    /// Get the configured region.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Send a single email.
    ///
    /// Failures are classified into [`SesError`] variants; nothing is retried.
    #[instrument(skip(self, request), fields(recipients = request.destination.to_addresses.len()))]
    pub async fn send_email(
        &self,
        request: &SendEmailRequest,
    ) -> Result<SendEmailResponse, SesError> {
        let payload = serde_json::to_vec(request)?;
        let url = self
            .endpoint
            .join(SEND_EMAIL_PATH)
            .map_err(|e| SesError::InvalidEndpoint(format!("{}: {}", self.endpoint, e)))?;

        let signed = sign_post(
            &self.credentials,
            &self.region,
            SERVICE,
            &self.host,
            SEND_EMAIL_PATH,
            &payload,
            Utc::now(),
        );

        let mut builder = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header("X-Amz-Date", &signed.amz_date)
            .header("Authorization", &signed.authorization);
        if let Some(token) = &signed.security_token {
            builder = builder.header("X-Amz-Security-Token", token);
        }

        debug!(url = %self.endpoint, "Sending SendEmail request");
        let response = builder.body(payload).send().await?;

        if response.status().is_success() {
            let body = response.text().await?;
            return serde_json::from_str(&body).map_err(SesError::from);
        }

        Err(self.extract_error(response).await)
    }

    /// Classify a failed response by its provider error code.
    async fn extract_error(&self, response: reqwest::Response) -> SesError {
        let status = response.status().as_u16();
        let header_code = response
            .headers()
            .get(ERROR_TYPE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(error_code_from_header);

        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();

        let code = header_code
            .or_else(|| body.error_type.as_deref().map(error_code_from_type))
            .or(body.code.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let message = body.message.unwrap_or(text);

        warn!(status, code = %code, "SES rejected SendEmail request");
        SesError::from_code(status, &code, message)
    }
}

/// `MessageRejected:http://internal.amazon.com/...` → `MessageRejected`
fn error_code_from_header(value: &str) -> String {
    value.split(':').next().unwrap_or(value).trim().to_string()
}

/// `com.amazonaws.ses#MessageRejected` → `MessageRejected`
fn error_code_from_type(value: &str) -> String {
    value.rsplit('#').next().unwrap_or(value).trim().to_string()
}
