//! Transport used to deliver a payload to a named function.
//!
//! The client only needs "send these bytes to that function and hand back
//! what came out", so that is all [`Invoker`] asks for. The AWS SDK client
//! implements it for real calls, tests provide their own.

use async_trait::async_trait;
use aws_sdk_lambda::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::InvocationType;
use bytes::Bytes;

use crate::LambdaProxyError;

/// Raw outcome of a synchronous invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    /// Status code of the invoke call itself (200 for a completed request/response call).
    pub status_code: i32,
    /// Set when the function raised an error during execution.
    pub function_error: Option<String>,
    /// Version of the function that ran.
    pub executed_version: Option<String>,
    pub payload: Bytes,
}

#[async_trait]
pub trait Invoker: Send + Sync {
    /// Invokes `function_name` with `payload` and waits for the result.
    ///
    /// Only transport and service failures are errors here. A function that
    /// ran and failed is reported through [`Invocation::function_error`].
    async fn invoke_function(
        &self,
        function_name: &str,
        payload: Vec<u8>,
    ) -> Result<Invocation, LambdaProxyError>;
}

#[async_trait]
impl Invoker for aws_sdk_lambda::Client {
    async fn invoke_function(
        &self,
        function_name: &str,
        payload: Vec<u8>,
    ) -> Result<Invocation, LambdaProxyError> {
        let output = self
            .invoke()
            .function_name(function_name)
            .invocation_type(InvocationType::RequestResponse)
            .payload(Blob::new(payload))
            .send()
            .await
            .map_err(|err| match err {
                SdkError::ServiceError(context) => LambdaProxyError::Service {
                    code: context.err().code().unwrap_or_default().to_string(),
                    message: context.err().message().unwrap_or_default().to_string(),
                },
                other_err => LambdaProxyError::Transport(other_err.to_string()),
            })?;

        Ok(Invocation {
            status_code: output.status_code(),
            function_error: output.function_error().map(str::to_string),
            executed_version: output.executed_version().map(str::to_string),
            payload: output
                .payload()
                .map(|blob| Bytes::copy_from_slice(blob.as_ref()))
                .unwrap_or_default(),
        })
    }
}

