//! Unit tests for gateway adapters that need no network.

use super::{
    adapters::{ChatCompletionsGateway, ScriptedModelGateway},
    ports::{ChatOptions, ModelGateway, ModelGatewayError},
};
use crate::config::ModelProviderConfig;
use rstest::rstest;
use secrecy::SecretString;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn chat_gateway_without_key_fails_fast() {
    let gateway = ChatCompletionsGateway::new(
        ModelProviderConfig::new(None).with_base_url("http://127.0.0.1:9"),
    );

    let result = gateway.send("system", "user", ChatOptions::default()).await;

    assert!(!gateway.is_configured());
    assert!(matches!(result, Err(ModelGatewayError::ProviderUnavailable)));
}

#[rstest]
fn chat_gateway_with_key_is_configured() {
    let gateway = ChatCompletionsGateway::new(
        ModelProviderConfig::new(Some(SecretString::from("key")))
            .with_base_url("https://api.example.com/v4/"),
    );
    assert!(gateway.is_configured());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn scripted_gateway_replays_in_order_and_records_exchanges() -> eyre::Result<()> {
    let gateway = ScriptedModelGateway::new()
        .with_reply("first")
        .with_failure(ModelGatewayError::ProviderError {
            status: 503,
            body: "busy".to_owned(),
        });
    let options = ChatOptions::new(0.3, 1000);

    let first = gateway.send("sys", "one", options).await?;
    let second = gateway.send("sys", "two", options).await;
    let third = gateway.send("sys", "three", options).await;

    eyre::ensure!(first == "first");
    eyre::ensure!(matches!(
        second,
        Err(ModelGatewayError::ProviderError { status: 503, .. })
    ));
    eyre::ensure!(matches!(
        third,
        Err(ModelGatewayError::ProviderEmptyResponse)
    ));
    let sent: Vec<String> = gateway
        .exchanges()
        .into_iter()
        .map(|exchange| exchange.user_message)
        .collect();
    eyre::ensure!(sent == vec!["one", "two", "three"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unconfigured_scripted_gateway_records_nothing() {
    let gateway = ScriptedModelGateway::unconfigured().with_reply("unused");

    let result = gateway.send("sys", "user", ChatOptions::default()).await;

    assert!(matches!(result, Err(ModelGatewayError::ProviderUnavailable)));
    assert!(gateway.exchanges().is_empty());
}

#[rstest]
fn default_options_match_provider_defaults() {
    let options = ChatOptions::default();
    assert_eq!(options.max_tokens, 2000);
    assert_eq!(options, ChatOptions::new(0.7, 2000).with_top_p(0.9));
}
