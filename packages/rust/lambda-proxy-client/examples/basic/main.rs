use lambda_proxy_client::{Credentials, LambdaProxyClient, LambdaProxyError};
use serde::{Deserialize, Serialize};
use std::env;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct Greeting {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Reply {
    message: String,
}

#[tokio::main]
async fn main() -> Result<(), LambdaProxyError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Reads LAMBDA_PROXY_FUNCTION_NAME and LAMBDA_PROXY_PATH
    let client: LambdaProxyClient<Greeting, Reply> = LambdaProxyClient::from_env().await?;

    let mut credentials = Credentials::anonymous();
    if let Ok(token) = env::var("BEARER_TOKEN") {
        credentials = credentials.with_bearer_token(token);
    }
    if let Ok(api_key) = env::var("API_KEY") {
        credentials = credentials.with_api_key(api_key);
    }

    let greeting = Greeting {
        name: "world".to_string(),
    };

    match client.post(Some(&greeting), &credentials).await?.decode()? {
        Some(reply) => println!("{}", reply.message),
        None => println!("No content"),
    }

    Ok(())
}
