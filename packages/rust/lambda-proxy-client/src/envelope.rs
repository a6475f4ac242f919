//! Wire models for the API Gateway proxy-integration shape.
//!
//! [`ProxyRequest`] is what the target function receives, laid out like an
//! API Gateway REST (v1) proxy event so that functions written against API
//! Gateway can be invoked directly. [`ProxyResponse`] is the envelope such a
//! function returns: a status code plus a body string that holds nested JSON.

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::LambdaProxyError;

const REDACTED: &str = "<redacted>";

/// Outbound request envelope.
///
/// `resource`, `path` and the matching `request_context` fields always carry
/// the same value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    pub resource: String,
    pub path: String,
    pub http_method: String,
    pub headers: HashMap<String, String>,
    pub multi_value_headers: HashMap<String, Vec<String>>,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub multi_value_query_string_parameters: Option<HashMap<String, Vec<String>>>,
    pub path_parameters: Option<HashMap<String, String>>,
    pub request_context: RequestContext,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub resource_path: String,
    pub path: String,
    pub http_method: String,
}

impl ProxyRequest {
    pub fn new(
        path: impl Into<String>,
        method: &http::Method,
        headers: HashMap<String, String>,
        body: String,
    ) -> Self {
        let path = path.into();
        let http_method = method.as_str().to_string();
        Self {
            resource: path.clone(),
            path: path.clone(),
            http_method: http_method.clone(),
            headers,
            multi_value_headers: HashMap::new(),
            query_string_parameters: None,
            multi_value_query_string_parameters: None,
            path_parameters: None,
            request_context: RequestContext {
                resource_path: path.clone(),
                path,
                http_method,
            },
            body,
        }
    }

    /// Copy of the envelope with every header value masked, for logging.
    pub(crate) fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for value in copy.headers.values_mut() {
            *value = REDACTED.to_string();
        }
        copy
    }
}

/// Inbound response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    /// Missing status codes decode as 0 and are treated as a non-success answer.
    #[serde(default)]
    pub status_code: u16,
    /// Header values are not always strings (`true`, numbers), so they are kept as raw JSON.
    #[serde(default)]
    pub headers: Option<Value>,
    #[serde(default)]
    pub multi_value_headers: Option<MultiValueHeaders>,
    #[serde(default)]
    pub is_base64_encoded: Option<bool>,
    #[serde(default)]
    pub body: Option<String>,
}

/// The only multi-value header read back from a response.
///
/// Any other entry is ignored, whatever its shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiValueHeaders {
    #[serde(rename = "Content-Type", default)]
    pub content_type: Option<Vec<String>>,
}

impl ProxyResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Values of the multi-value `Content-Type` header, if present.
    pub fn content_type(&self) -> Option<&[String]> {
        self.multi_value_headers
            .as_ref()
            .and_then(|h| h.content_type.as_deref())
    }

    /// Body string, or an empty string when the function sent none.
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Raw bytes of the body, base64-decoded when `isBase64Encoded` is set.
    pub fn body_bytes(&self) -> Result<Vec<u8>, LambdaProxyError> {
        if self.is_base64_encoded.unwrap_or(false) {
            Ok(base64::engine::general_purpose::STANDARD.decode(self.body())?)
        } else {
            Ok(self.body().as_bytes().to_vec())
        }
    }
}
