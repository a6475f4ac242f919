//! Builder pattern implementation for LambdaProxyClient

use std::env;

use crate::constants::{defaults, env_vars};
use crate::{LambdaProxyClient, LambdaProxyError};

/// Builder for configuring and creating a LambdaProxyClient
///
/// Values set on the builder take precedence over the environment:
/// - function name: `LAMBDA_PROXY_FUNCTION_NAME` (required if not set)
/// - path: `LAMBDA_PROXY_PATH`, then `"/"`
#[derive(Debug)]
pub struct LambdaProxyClientBuilder<I> {
    invoker: Option<I>,
    function_name: Option<String>,
    path: Option<String>,
}

impl<I> Default for LambdaProxyClientBuilder<I> {
    fn default() -> Self {
        Self {
            invoker: None,
            function_name: None,
            path: None,
        }
    }
}

impl<I> LambdaProxyClientBuilder<I> {
    /// Creates a new LambdaProxyClientBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the transport used to reach the function
    pub fn with_invoker(mut self, invoker: I) -> Self {
        self.invoker = Some(invoker);
        self
    }

    /// Sets the function name, ARN or partial ARN to invoke
    pub fn with_function_name(mut self, function_name: impl Into<String>) -> Self {
        self.function_name = Some(function_name.into());
        self
    }

    /// Sets the logical path sent as the envelope's resource and path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Builds the LambdaProxyClient with the configured parameters
    ///
    /// # Errors
    ///
    /// Returns a `LambdaProxyError` if:
    /// - The invoker is not provided
    /// - No function name is configured, neither on the builder nor in the environment
    pub fn build<T, R>(self) -> Result<LambdaProxyClient<T, R, I>, LambdaProxyError> {
        let invoker = self.invoker.ok_or(LambdaProxyError::MissingInvoker)?;
        let function_name = self
            .function_name
            .or_else(|| env::var(env_vars::FUNCTION_NAME).ok())
            .filter(|name| !name.trim().is_empty())
            .ok_or(LambdaProxyError::MissingFunctionName)?;
        let path = self
            .path
            .or_else(|| env::var(env_vars::PATH).ok())
            .unwrap_or_else(|| defaults::PATH.to_string());

        tracing::debug!(
            function_name = %function_name,
            path = %path,
            "Configured Lambda proxy client"
        );

        Ok(LambdaProxyClient::new(invoker, function_name, path))
    }
}
