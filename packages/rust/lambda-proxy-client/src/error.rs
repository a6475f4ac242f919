//! Error type shared by the invocation client and the response unwrapper.

use thiserror::Error;

/// Errors that can occur while invoking a function or decoding its response
#[derive(Error, Debug)]
pub enum LambdaProxyError {
    #[error("Failed to serialize request body: {0}")]
    SerializeBody(#[source] serde_json::Error),

    #[error("Failed to serialize request envelope: {0}")]
    SerializeEnvelope(#[source] serde_json::Error),

    #[error("Invalid value for {header} header: {source}")]
    InvalidCredential {
        header: &'static str,
        #[source]
        source: http::header::InvalidHeaderValue,
    },

    /// The Lambda API rejected the invoke call.
    #[error("Service error: {message} ({code})")]
    Service { code: String, message: String },

    /// The invoke call failed before a service response was received.
    #[error("SDK error: {0}")]
    Transport(String),

    /// The function ran but reported an unhandled or handled error.
    #[error("Function error ({function_error}): {payload}")]
    FunctionError {
        function_error: String,
        payload: String,
    },

    #[error("Failed to decode response envelope: {0}")]
    DecodeEnvelope(#[source] serde_json::Error),

    #[error("Failed to decode base64 response body: {0}")]
    DecodeBase64(#[from] base64::DecodeError),

    #[error("Failed to decode response body: {0}")]
    DecodeBody(#[source] serde_json::Error),

    /// The function answered outside the 2xx range.
    #[error("Function returned status code {status_code}: {body}")]
    UnexpectedStatus { status_code: u16, body: String },

    #[error("Function name not provided")]
    MissingFunctionName,

    #[error("Invoker not provided")]
    MissingInvoker,
}

impl LambdaProxyError {
    /// Returns true when the failure happened on the way to or from the Lambda API,
    /// as opposed to inside the function or while encoding/decoding payloads.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Service { .. } | Self::Transport(_))
    }
}
