//! Constants for the lambda-proxy-client package.
//!
//! Header names, credential keys and configuration variables live here so the
//! envelope, credential and builder modules agree on a single spelling.

/// Environment variable names for configuration.
pub mod env_vars {
    /// Name, ARN or partial ARN of the function to invoke.
    pub const FUNCTION_NAME: &str = "LAMBDA_PROXY_FUNCTION_NAME";

    /// Logical path placed in the `resource` and `path` fields of the envelope.
    pub const PATH: &str = "LAMBDA_PROXY_PATH";
}

/// Default values for configuration parameters.
pub mod defaults {
    /// Path used when neither the builder nor the environment provides one.
    pub const PATH: &str = "/";
}

/// Keys under which credentials are looked up in a key/value bag.
pub mod keys {
    /// Bearer token forwarded as `Authorization: Bearer <token>`.
    pub const BEARER_TOKEN: &str = "bearer-token";

    /// API key forwarded as `x-api-key: <key>`.
    pub const API_KEY: &str = "x-api-key";
}

/// Header names written into the outbound envelope.
pub mod headers {
    pub const AUTHORIZATION: &str = "Authorization";
    pub const API_KEY: &str = "x-api-key";
}

/// Status code returned when there is nothing to decode.
pub const NO_CONTENT: u16 = 204;
