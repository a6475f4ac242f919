//! A typed client for invoking AWS Lambda functions that speak the API Gateway proxy format.
//!
//! Functions written for an API Gateway REST proxy integration expect an event
//! describing an HTTP request and answer with a `statusCode`/`body` envelope.
//! This crate lets another service call such a function directly through the
//! Lambda `Invoke` API, without going through API Gateway:
//!
//! - The request body of type `T` is serialized to JSON and wrapped in a proxy
//!   event, together with the caller's bearer token and API key.
//! - The function is invoked synchronously (`RequestResponse`).
//! - The response envelope is unwrapped and its JSON body decoded into `R`.
//!
//! # Example
//!
//! ```no_run
//! use lambda_proxy_client::{Credentials, LambdaProxyClientBuilder};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! struct NewOrder {
//!     item: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct Order {
//!     id: u64,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = aws_config::load_from_env().await;
//!
//!     let client = LambdaProxyClientBuilder::new()
//!         .with_invoker(aws_sdk_lambda::Client::new(&config))
//!         .with_function_name("orders-api")
//!         .with_path("/orders")
//!         .build::<NewOrder, Order>()?;
//!
//!     let credentials = Credentials::anonymous()
//!         .with_bearer_token("eyJhbGciOi...")
//!         .with_api_key("my-api-key");
//!
//!     let order = client
//!         .post(Some(&NewOrder { item: "book".into() }), &credentials)
//!         .await?
//!         .decode()?;
//!
//!     if let Some(order) = order {
//!         println!("created order {}", order.id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Behavior notes
//!
//! - Only `POST` and `PUT` forward the request body. Other verbs send an empty body.
//! - A missing credential is logged as a warning and its header is omitted.
//! - A function error (`FunctionError` set on the invoke output) is returned as
//!   [`LambdaProxyError::FunctionError`], separate from transport failures.
//! - A response status outside `2xx` is returned as
//!   [`LambdaProxyError::UnexpectedStatus`]. A `204` decodes to `None`.
//! - Nothing is retried.

mod builder;
mod client;
pub mod constants;
mod credentials;
pub mod envelope;
mod error;
pub mod invoker;
mod response;

pub use builder::LambdaProxyClientBuilder;
pub use client::LambdaProxyClient;
pub use credentials::Credentials;
pub use envelope::{MultiValueHeaders, ProxyRequest, ProxyResponse, RequestContext};
pub use error::LambdaProxyError;
pub use invoker::{Invocation, Invoker};
pub use response::LambdaResponse;
