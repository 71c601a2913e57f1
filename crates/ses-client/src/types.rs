//! SES v2 API request and response types.

use serde::{Deserialize, Serialize};

/// Character set used for every content block we send.
pub const UTF_8: &str = "UTF-8";

/// `SendEmail` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailRequest {
    pub from_email_address: String,
    pub destination: Destination,
    pub content: EmailContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_set_name: Option<String>,
}

impl SendEmailRequest {
    /// Build a simple multipart (HTML + text) message to a single recipient.
    pub fn simple(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
        text_body: impl Into<String>,
    ) -> Self {
        Self {
            from_email_address: from.into(),
            destination: Destination {
                to_addresses: vec![to.into()],
                cc_addresses: Vec::new(),
            },
            content: EmailContent {
                simple: SimpleMessage {
                    subject: Content::utf8(subject),
                    body: Body {
                        html: Some(Content::utf8(html_body)),
                        text: Some(Content::utf8(text_body)),
                    },
                },
            },
            configuration_set_name: None,
        }
    }

    /// Attach a configuration set to the message.
    pub fn with_configuration_set(mut self, name: Option<String>) -> Self {
        self.configuration_set_name = name;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Destination {
    pub to_addresses: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc_addresses: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmailContent {
    pub simple: SimpleMessage,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SimpleMessage {
    pub subject: Content,
    pub body: Body,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Body {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Content>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Content {
    pub data: String,
    pub charset: String,
}

impl Content {
    pub fn utf8(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            charset: UTF_8.to_string(),
        }
    }
}

/// `SendEmail` success response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailResponse {
    pub message_id: String,
}

/// Error body returned by the SES v2 REST API.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(rename = "__type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(alias = "Message", default)]
    pub message: Option<String>,
}
