//! Unwrapping of invocation results into typed values.

use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use crate::constants::NO_CONTENT;
use crate::envelope::ProxyResponse;
use crate::invoker::Invocation;
use crate::LambdaProxyError;

/// Result of a successful invocation, decoded lazily into `R`.
///
/// Holding the raw invocation lets callers inspect the status code or payload
/// before (or instead of) decoding it.
#[derive(Debug, Clone)]
pub struct LambdaResponse<R> {
    invocation: Invocation,
    _marker: PhantomData<fn() -> R>,
}

impl<R> LambdaResponse<R> {
    pub(crate) fn new(invocation: Invocation) -> Self {
        Self {
            invocation,
            _marker: PhantomData,
        }
    }

    /// Status code of the invoke call.
    pub fn status_code(&self) -> i32 {
        self.invocation.status_code
    }

    pub fn executed_version(&self) -> Option<&str> {
        self.invocation.executed_version.as_deref()
    }

    /// Raw payload returned by the function.
    pub fn payload(&self) -> &[u8] {
        &self.invocation.payload
    }

    /// Decodes the outer proxy envelope without looking at its body.
    pub fn decode_envelope(&self) -> Result<ProxyResponse, LambdaProxyError> {
        serde_json::from_slice(&self.invocation.payload).map_err(|e| {
            tracing::error!(error = %e, "Failed to decode Lambda response payload");
            LambdaProxyError::DecodeEnvelope(e)
        })
    }
}

impl<R: DeserializeOwned> LambdaResponse<R> {
    /// Decodes the response into `R`.
    ///
    /// Returns `Ok(None)` for a 204, either from the invoke call or from the
    /// function's own status code. A status outside `[200, 300)` is returned as
    /// [`LambdaProxyError::UnexpectedStatus`] carrying the body verbatim.
    pub fn decode(&self) -> Result<Option<R>, LambdaProxyError> {
        if self.invocation.status_code == i32::from(NO_CONTENT) {
            tracing::debug!("Lambda returned status code 204 (No Content)");
            return Ok(None);
        }

        let envelope = self.decode_envelope()?;

        if envelope.status_code == NO_CONTENT {
            tracing::debug!("Function returned status code 204 (No Content)");
            return Ok(None);
        }

        if !envelope.is_success() {
            tracing::error!(
                status_code = envelope.status_code,
                body = envelope.body(),
                "Function returned a non-success status code"
            );
            return Err(LambdaProxyError::UnexpectedStatus {
                status_code: envelope.status_code,
                body: envelope.body().to_string(),
            });
        }

        let body = envelope.body_bytes().map_err(|e| {
            tracing::error!(error = %e, "Failed to decode base64 response body");
            e
        })?;

        serde_json::from_slice(&body).map(Some).map_err(|e| {
            tracing::error!(error = %e, "Failed to decode Lambda response body");
            LambdaProxyError::DecodeBody(e)
        })
    }
}
