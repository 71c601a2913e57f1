//! API request and response types.

use crate::error::CollectorError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request to register a customer.
///
/// Missing fields decode as empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,

    /// Token proving knowledge of the shared secret
    pub p: String,
}

/// Request to send a verification email.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NotifyRequest {
    pub name: String,
    pub email: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub customer_count: i64,
}

/// JSON body extractor that ignores `Content-Type`.
///
/// Decodes the first JSON value in the body. A `null` value yields
/// `T::default()`; object keys are matched case-insensitively against the
/// (lowercase) field names, and an exact key beats its case variants.
/// Anything else, including an empty body, becomes
/// [`CollectorError::InvalidPayload`].
#[derive(Debug)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = CollectorError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| CollectorError::InvalidPayload(e.to_string()))?;

        decode(&bytes).map(Payload)
    }
}

fn decode<T: DeserializeOwned + Default>(bytes: &[u8]) -> Result<T, CollectorError> {
    let value = serde_json::Deserializer::from_slice(bytes)
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| CollectorError::InvalidPayload("empty body".into()))?
        .map_err(|e| CollectorError::InvalidPayload(e.to_string()))?;

    match value {
        Value::Null => Ok(T::default()),
        Value::Object(fields) => {
            let mut folded = Map::new();
            let mut exact = Vec::new();
            for (key, value) in fields {
                // A null field leaves the default in place.
                if value.is_null() {
                    continue;
                }
                let lower = key.to_lowercase();
                if lower == key {
                    exact.push((key, value));
                } else {
                    folded.insert(lower, value);
                }
            }
            folded.extend(exact);

            serde_json::from_value(Value::Object(folded))
                .map_err(|e| CollectorError::InvalidPayload(e.to_string()))
        }
        other => Err(CollectorError::InvalidPayload(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_missing_fields_default_to_empty() {
        let request: RegisterRequest = serde_json::from_str(r#"{"name":"test user"}"#).unwrap();
        assert_eq!(request.name, "test user");
        assert_eq!(request.email, "");
        assert_eq!(request.p, "");
    }

    #[test]
    fn test_notify_request_ignores_token() {
        let request: NotifyRequest =
            serde_json::from_str(r#"{"name":"a","email":"b","p":"c"}"#).unwrap();
        assert_eq!(request.name, "a");
        assert_eq!(request.email, "b");
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let result = decode::<RegisterRequest>(br#"{"name":42}"#);
        assert!(matches!(result, Err(CollectorError::InvalidPayload(_))));
    }

    #[test]
    fn test_null_body_decodes_to_empty_request() {
        let request = decode::<RegisterRequest>(b"null").unwrap();
        assert_eq!(request.name, "");
        assert_eq!(request.email, "");
        assert_eq!(request.p, "");
    }

    #[test]
    fn test_keys_match_case_insensitively() {
        let request =
            decode::<RegisterRequest>(br#"{"Name":"a","EMAIL":"b","P":"c"}"#).unwrap();
        assert_eq!(request.name, "a");
        assert_eq!(request.email, "b");
        assert_eq!(request.p, "c");
    }

    #[test]
    fn test_exact_key_beats_case_variant() {
        for body in [&br#"{"name":"a","Name":"b"}"#[..], br#"{"Name":"b","name":"a"}"#] {
            let request = decode::<NotifyRequest>(body).unwrap();
            assert_eq!(request.name, "a");
        }
    }

    #[test]
    fn test_null_field_keeps_default() {
        let request = decode::<RegisterRequest>(br#"{"name":null,"email":"b"}"#).unwrap();
        assert_eq!(request.name, "");
        assert_eq!(request.email, "b");
    }

    #[test]
    fn test_only_first_value_is_read() {
        let request = decode::<NotifyRequest>(br#"{"name":"a"} trailing"#).unwrap();
        assert_eq!(request.name, "a");
    }

    #[test]
    fn test_non_object_values_are_rejected() {
        for body in [&b""[..], b"   ", b"[]", br#"["a","b"]"#, b"42", br#""x""#, b"not json"] {
            assert!(
                decode::<RegisterRequest>(body).is_err(),
                "{}",
                String::from_utf8_lossy(body)
            );
        }
    }
}
