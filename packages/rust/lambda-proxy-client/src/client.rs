//! Invocation client.
//!
//! Every verb funnels into [`LambdaProxyClient::request`], which serializes
//! the body, wraps it in a [`ProxyRequest`] envelope together with the
//! caller's credentials, and hands the result to the configured [`Invoker`].
//!
//! Only `POST` and `PUT` forward the serialized body. `GET`, `PATCH` and
//! `DELETE` always send an empty body string, even when one is passed.

use http::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;

use crate::envelope::ProxyRequest;
use crate::invoker::Invoker;
use crate::response::LambdaResponse;
use crate::{Credentials, LambdaProxyClientBuilder, LambdaProxyError};

/// Client that invokes a function as if it were behind an API Gateway proxy integration.
///
/// `T` is the request body type and `R` the type the response body decodes into.
/// The client holds no per-call state and can be shared across tasks.
pub struct LambdaProxyClient<T, R, I = aws_sdk_lambda::Client> {
    invoker: I,
    function_name: String,
    path: String,
    _marker: PhantomData<fn(T) -> R>,
}

impl<T, R, I: std::fmt::Debug> std::fmt::Debug for LambdaProxyClient<T, R, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LambdaProxyClient")
            .field("invoker", &self.invoker)
            .field("function_name", &self.function_name)
            .field("path", &self.path)
            .finish()
    }
}

impl<T, R, I: Clone> Clone for LambdaProxyClient<T, R, I> {
    fn clone(&self) -> Self {
        Self {
            invoker: self.invoker.clone(),
            function_name: self.function_name.clone(),
            path: self.path.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, R> LambdaProxyClient<T, R> {
    /// Creates a client backed by the AWS SDK, configured from the environment.
    ///
    /// AWS credentials and region come from `aws_config::load_from_env`. The
    /// target function and path come from `LAMBDA_PROXY_FUNCTION_NAME` and
    /// `LAMBDA_PROXY_PATH`.
    pub async fn from_env() -> Result<Self, LambdaProxyError> {
        let config = aws_config::load_from_env().await;
        LambdaProxyClientBuilder::new()
            .with_invoker(aws_sdk_lambda::Client::new(&config))
            .build()
    }
}

impl<T, R, I> LambdaProxyClient<T, R, I> {
    pub(crate) fn new(invoker: I, function_name: String, path: String) -> Self {
        Self {
            invoker,
            function_name,
            path,
            _marker: PhantomData,
        }
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl<T, R, I> LambdaProxyClient<T, R, I>
where
    T: Serialize,
    R: DeserializeOwned,
    I: Invoker,
{
    pub async fn get(
        &self,
        credentials: &Credentials,
    ) -> Result<LambdaResponse<R>, LambdaProxyError> {
        self.request(Method::GET, None, credentials).await
    }

    pub async fn post(
        &self,
        body: Option<&T>,
        credentials: &Credentials,
    ) -> Result<LambdaResponse<R>, LambdaProxyError> {
        self.request(Method::POST, body, credentials).await
    }

    pub async fn put(
        &self,
        body: Option<&T>,
        credentials: &Credentials,
    ) -> Result<LambdaResponse<R>, LambdaProxyError> {
        self.request(Method::PUT, body, credentials).await
    }

    pub async fn patch(
        &self,
        body: Option<&T>,
        credentials: &Credentials,
    ) -> Result<LambdaResponse<R>, LambdaProxyError> {
        self.request(Method::PATCH, body, credentials).await
    }

    pub async fn delete(
        &self,
        body: Option<&T>,
        credentials: &Credentials,
    ) -> Result<LambdaResponse<R>, LambdaProxyError> {
        self.request(Method::DELETE, body, credentials).await
    }

    /// Builds the envelope for `method` without invoking anything.
    pub fn build_envelope(
        &self,
        method: &Method,
        body: Option<&T>,
        credentials: &Credentials,
    ) -> Result<ProxyRequest, LambdaProxyError> {
        let payload = serde_json::to_string(&body).map_err(|e| {
            tracing::error!(error = %e, "Failed to serialize request body");
            LambdaProxyError::SerializeBody(e)
        })?;

        let body = if carries_body(method) {
            payload
        } else {
            if body.is_some() {
                tracing::debug!(
                    method = %method,
                    "Dropping request body for method without payload"
                );
            }
            String::new()
        };

        let headers = credentials.to_headers()?;

        Ok(ProxyRequest::new(self.path.clone(), method, headers, body))
    }

    /// Sends one request and waits for the function to answer.
    ///
    /// Dropping the returned future cancels the in-flight invocation, so a
    /// caller-side `tokio::time::timeout` bounds the whole call.
    #[tracing::instrument(
        skip_all,
        fields(
            function_name = %self.function_name,
            path = %self.path,
            method = %method,
        ),
    )]
    pub async fn request(
        &self,
        method: Method,
        body: Option<&T>,
        credentials: &Credentials,
    ) -> Result<LambdaResponse<R>, LambdaProxyError> {
        let envelope = self.build_envelope(&method, body, credentials)?;

        let payload = serde_json::to_vec(&envelope).map_err(|e| {
            tracing::error!(error = %e, "Failed to serialize request envelope");
            LambdaProxyError::SerializeEnvelope(e)
        })?;

        tracing::debug!(
            payload = %loggable_payload(&envelope),
            "Invoking Lambda function"
        );

        let mut invocation = self
            .invoker
            .invoke_function(&self.function_name, payload)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to invoke Lambda function");
                e
            })?;

        if let Some(function_error) = invocation.function_error.take() {
            let payload = String::from_utf8_lossy(&invocation.payload).into_owned();
            tracing::error!(
                function_error = %function_error,
                payload = %payload,
                "Lambda function returned an error"
            );
            return Err(LambdaProxyError::FunctionError {
                function_error,
                payload,
            });
        }

        tracing::debug!(status_code = invocation.status_code, "Lambda response status code");
        tracing::debug!(
            payload = %String::from_utf8_lossy(&invocation.payload),
            "Lambda response payload"
        );

        Ok(LambdaResponse::new(invocation))
    }
}

fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT
}

/// Serialized envelope with credential headers masked.
fn loggable_payload(envelope: &ProxyRequest) -> String {
    serde_json::to_string(&envelope.redacted()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::Invocation;
    use async_trait::async_trait;
    use bytes::Bytes;
    use serde::{Deserialize, Serializer};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Order {
        id: u32,
        item: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        x: i32,
    }

    type Reply = fn() -> Result<Invocation, LambdaProxyError>;

    // Records every payload and answers with a canned reply
    #[derive(Clone)]
    struct MockInvoker {
        calls: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
        reply: Reply,
    }

    impl MockInvoker {
        fn new(reply: Reply) -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                reply,
            }
        }

        fn ok() -> Self {
            Self::new(|| {
                Ok(Invocation {
                    status_code: 200,
                    payload: Bytes::from(
                        json!({"statusCode": 200, "body": "{\"x\":1}"}).to_string(),
                    ),
                    ..Default::default()
                })
            })
        }

        fn envelopes(&self) -> Vec<ProxyRequest> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(_, payload)| serde_json::from_slice(payload).unwrap())
                .collect()
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Invoker for MockInvoker {
        async fn invoke_function(
            &self,
            function_name: &str,
            payload: Vec<u8>,
        ) -> Result<Invocation, LambdaProxyError> {
            self.calls
                .lock()
                .unwrap()
                .push((function_name.to_string(), payload));
            (self.reply)()
        }
    }

    // Never answers
    struct PendingInvoker;

    #[async_trait]
    impl Invoker for PendingInvoker {
        async fn invoke_function(
            &self,
            _function_name: &str,
            _payload: Vec<u8>,
        ) -> Result<Invocation, LambdaProxyError> {
            std::future::pending().await
        }
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot serialize"))
        }
    }

    fn client<I>(invoker: I) -> LambdaProxyClient<Order, Point, I> {
        LambdaProxyClient::new(invoker, "orders-fn".to_string(), "/orders".to_string())
    }

    fn order() -> Order {
        Order {
            id: 7,
            item: "book".to_string(),
        }
    }

    fn full_credentials() -> Credentials {
        Credentials::anonymous()
            .with_bearer_token("tok")
            .with_api_key("key")
    }

    #[tokio::test]
    async fn test_post_and_put_send_body() {
        let invoker = MockInvoker::ok();
        let client = client(invoker.clone());

        client.post(Some(&order()), &full_credentials()).await.unwrap();
        client.put(Some(&order()), &full_credentials()).await.unwrap();

        let expected = serde_json::to_string(&order()).unwrap();
        let envelopes = invoker.envelopes();
        assert_eq!(envelopes.len(), 2);
        assert_eq!(envelopes[0].http_method, "POST");
        assert_eq!(envelopes[0].body, expected);
        assert_eq!(envelopes[1].http_method, "PUT");
        assert_eq!(envelopes[1].body, expected);
    }

    #[tokio::test]
    async fn test_other_methods_send_empty_body() {
        let invoker = MockInvoker::ok();
        let client = client(invoker.clone());

        client.get(&full_credentials()).await.unwrap();
        client.patch(Some(&order()), &full_credentials()).await.unwrap();
        client.delete(Some(&order()), &full_credentials()).await.unwrap();

        let envelopes = invoker.envelopes();
        let methods: Vec<_> = envelopes.iter().map(|e| e.http_method.as_str()).collect();
        assert_eq!(methods, vec!["GET", "PATCH", "DELETE"]);
        assert!(envelopes.iter().all(|e| e.body.is_empty()));
    }

    #[tokio::test]
    async fn test_post_without_body_sends_null() {
        let invoker = MockInvoker::ok();
        client(invoker.clone())
            .post(None, &full_credentials())
            .await
            .unwrap();

        assert_eq!(invoker.envelopes()[0].body, "null");
    }

    #[tokio::test]
    async fn test_envelope_paths_and_target() {
        let invoker = MockInvoker::ok();
        client(invoker.clone()).get(&full_credentials()).await.unwrap();

        let (function_name, _) = invoker.calls.lock().unwrap()[0].clone();
        assert_eq!(function_name, "orders-fn");

        let envelope = &invoker.envelopes()[0];
        assert_eq!(envelope.resource, "/orders");
        assert_eq!(envelope.path, "/orders");
        assert_eq!(envelope.request_context.resource_path, "/orders");
        assert_eq!(envelope.request_context.path, "/orders");
        assert_eq!(envelope.request_context.http_method, "GET");
        assert!(envelope.multi_value_headers.is_empty());
        assert!(envelope.path_parameters.is_none());
        assert!(envelope.query_string_parameters.is_none());
        assert_eq!(envelope.headers.get("Authorization").unwrap(), "Bearer tok");
        assert_eq!(envelope.headers.get("x-api-key").unwrap(), "key");
    }

    #[tokio::test]
    async fn test_missing_credentials_still_invokes() {
        let invoker = MockInvoker::ok();
        let result = client(invoker.clone())
            .get(&Credentials::anonymous())
            .await;

        assert!(result.is_ok());
        let envelope = &invoker.envelopes()[0];
        assert!(!envelope.headers.contains_key("Authorization"));
        assert!(!envelope.headers.contains_key("x-api-key"));
    }

    #[tokio::test]
    async fn test_invalid_credential_skips_invocation() {
        let invoker = MockInvoker::ok();
        let credentials = Credentials::anonymous().with_bearer_token("line\nbreak");

        let result = client(invoker.clone()).get(&credentials).await;

        assert!(matches!(
            result,
            Err(LambdaProxyError::InvalidCredential {
                header: "Authorization",
                ..
            })
        ));
        assert_eq!(invoker.call_count(), 0);
    }

    #[tokio::test]
    async fn test_body_serialization_failure_skips_invocation() {
        let invoker = MockInvoker::ok();
        let client: LambdaProxyClient<Unserializable, Point, _> =
            LambdaProxyClient::new(invoker.clone(), "fn".to_string(), "/".to_string());

        let result = client.post(Some(&Unserializable), &full_credentials()).await;

        assert!(matches!(result, Err(LambdaProxyError::SerializeBody(_))));
        assert_eq!(invoker.call_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_is_returned() {
        let invoker = MockInvoker::new(|| {
            Err(LambdaProxyError::Transport("dispatch failure".to_string()))
        });

        let result = client(invoker).get(&full_credentials()).await;

        match result {
            Err(err) => {
                assert!(err.is_transport());
                assert_eq!(err.to_string(), "SDK error: dispatch failure");
            }
            Ok(_) => panic!("Expected transport error"),
        }
    }

    #[tokio::test]
    async fn test_function_error_carries_detail() {
        let invoker = MockInvoker::new(|| {
            Ok(Invocation {
                status_code: 200,
                function_error: Some("Unhandled".to_string()),
                payload: Bytes::from_static(br#"{"errorMessage":"boom"}"#),
                ..Default::default()
            })
        });

        let result = client(invoker).get(&full_credentials()).await;

        match result {
            Err(LambdaProxyError::FunctionError {
                function_error,
                payload,
            }) => {
                assert_eq!(function_error, "Unhandled");
                assert_eq!(payload, r#"{"errorMessage":"boom"}"#);
            }
            other => panic!("Expected FunctionError, got {:?}", other.map(|r| r.status_code())),
        }
    }

    #[tokio::test]
    async fn test_response_decodes_end_to_end() {
        let response = client(MockInvoker::ok())
            .get(&full_credentials())
            .await
            .unwrap();

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.decode().unwrap(), Some(Point { x: 1 }));
    }

    #[tokio::test]
    async fn test_dropping_future_cancels_call() {
        let client = client(PendingInvoker);

        let result = tokio::time::timeout(
            Duration::from_millis(20),
            client.get(&full_credentials()),
        )
        .await;

        assert!(result.is_err());
    }

    #[test]
    fn test_build_envelope_without_invoking() {
        let invoker = MockInvoker::ok();
        let client = client(invoker.clone());

        let envelope = client
            .build_envelope(&Method::PATCH, Some(&order()), &Credentials::anonymous())
            .unwrap();

        assert_eq!(envelope.http_method, "PATCH");
        assert_eq!(envelope.body, "");
        assert!(envelope.headers.is_empty());
        assert_eq!(invoker.call_count(), 0);
    }

    #[test]
    fn test_logged_payload_hides_credentials() {
        let client = client(MockInvoker::ok());
        let envelope = client
            .build_envelope(&Method::POST, Some(&order()), &full_credentials())
            .unwrap();

        let logged = loggable_payload(&envelope);

        assert!(!logged.contains("Bearer tok"));
        assert!(!logged.contains("\"key\""));
        assert!(logged.contains("<redacted>"));
        assert!(logged.contains("book"));
    }

    #[test]
    fn test_client_is_send_and_sync() {
        fn assert_send_sync<C: Send + Sync>() {}
        assert_send_sync::<LambdaProxyClient<std::rc::Rc<u8>, std::rc::Rc<u8>, MockInvoker>>();
    }
}
