//! Caller credentials forwarded to the remote function as HTTP headers.
//!
//! Credentials are passed explicitly with each call. Both values are optional:
//! a missing credential is logged and its header is left out, the call itself
//! still goes through.

use http::HeaderValue;
use std::collections::HashMap;

use crate::constants::{headers, keys};
use crate::LambdaProxyError;

/// Bearer token and API key attached to an invocation.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    bearer_token: Option<String>,
    api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Credentials {
    /// Credentials with neither a token nor an API key.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Sets the bearer token. Empty strings are treated as absent.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = non_empty(token.into());
        self
    }

    /// Sets the API key. Empty strings are treated as absent.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = non_empty(api_key.into());
        self
    }

    /// Builds credentials from a string map keyed by `bearer-token` and `x-api-key`.
    pub fn from_map(values: &HashMap<String, String>) -> Self {
        Self {
            bearer_token: values.get(keys::BEARER_TOKEN).cloned().and_then(non_empty),
            api_key: values.get(keys::API_KEY).cloned().and_then(non_empty),
        }
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Renders the credentials into envelope headers.
    ///
    /// Values that are not legal HTTP header values are rejected here, before
    /// anything is sent.
    pub(crate) fn to_headers(&self) -> Result<HashMap<String, String>, LambdaProxyError> {
        let mut result = HashMap::new();

        match &self.bearer_token {
            Some(token) => {
                let value = format!("Bearer {}", token);
                validate(headers::AUTHORIZATION, &value)?;
                result.insert(headers::AUTHORIZATION.to_string(), value);
            }
            None => tracing::warn!(
                "Bearer token not provided, sending request without Authorization header"
            ),
        }

        match &self.api_key {
            Some(api_key) => {
                validate(headers::API_KEY, api_key)?;
                result.insert(headers::API_KEY.to_string(), api_key.clone());
            }
            None => tracing::warn!(
                "API key not provided, sending request without x-api-key header"
            ),
        }

        Ok(result)
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn validate(header: &'static str, value: &str) -> Result<(), LambdaProxyError> {
    HeaderValue::from_str(value)
        .map(|_| ())
        .map_err(|source| {
            tracing::error!(header, "Rejecting credential with invalid header value");
            LambdaProxyError::InvalidCredential { header, source }
        })
}
