//! HTTP adapter tests against local mock servers.
//!
//! Covers the chat-completions gateway, the Vercel deployment provider, and
//! a full pipeline run wired through [`factoria::bootstrap`].

use factoria::bootstrap::build_pipeline;
use factoria::config::{DeploymentProviderConfig, FactoriaConfig, ModelProviderConfig};
use factoria::deployment::adapters::VercelDeploymentProvider;
use factoria::deployment::domain::{BuildSpec, DeploymentState};
use factoria::deployment::ports::{DeploymentProvider, DeploymentProviderError};
use factoria::gateway::adapters::ChatCompletionsGateway;
use factoria::gateway::ports::{ChatOptions, ModelGateway, ModelGatewayError};
use factoria::job::services::GenerateRequest;
use factoria::synthesis::SynthesisStrategy;
use rstest::rstest;
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORCHESTRATION: &str = r#"{"intent":"Record daily water intake","app_name":"Hydrate","type":"tracker","abilities":["form-input","add","storage","list-display"]}"#;

fn chat_reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    }))
}

fn gateway_for(server: &MockServer) -> ChatCompletionsGateway {
    ChatCompletionsGateway::new(
        ModelProviderConfig::new(Some(SecretString::from("sk-test"))).with_base_url(server.uri()),
    )
}

fn provider_for(server: &MockServer) -> VercelDeploymentProvider {
    VercelDeploymentProvider::new(
        DeploymentProviderConfig::new(Some(SecretString::from("vc-test")))
            .with_org_id("team_1")
            .with_project_id("prj_1")
            .with_base_url(server.uri()),
    )
}

fn pipeline_config(model: &MockServer, deployment: &MockServer) -> eyre::Result<FactoriaConfig> {
    let model_uri = model.uri();
    let deployment_uri = deployment.uri();
    Ok(FactoriaConfig::from_lookup(move |key| match key {
        "LLM_API_KEY" => Some("sk-test".to_owned()),
        "LLM_BASE_URL" => Some(model_uri.clone()),
        "VERCEL_TOKEN" => Some("vc-test".to_owned()),
        "VERCEL_API_BASE" => Some(deployment_uri.clone()),
        _ => None,
    })?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn chat_gateway_sends_both_messages_with_bearer_token() -> eyre::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "glm-4", "max_tokens": 1200 })))
        .respond_with(chat_reply("hello"))
        .expect(1)
        .mount(&server)
        .await;

    let reply = gateway_for(&server)
        .send("be brief", "say hello", ChatOptions::new(0.5, 1200))
        .await?;

    eyre::ensure!(reply == "hello");
    let requests = server.received_requests().await.unwrap_or_default();
    let body: Value = requests
        .first()
        .map(|request| serde_json::from_slice(&request.body))
        .transpose()?
        .unwrap_or_default();
    eyre::ensure!(body["messages"][0]["role"] == "system");
    eyre::ensure!(body["messages"][0]["content"] == "be brief");
    eyre::ensure!(body["messages"][1]["role"] == "user");
    eyre::ensure!(body["messages"][1]["content"] == "say hello");
    eyre::ensure!(body.get("top_p").is_some());
    Ok(())
}

#[rstest]
#[case("/v4")]
#[case("/v4/")]
#[tokio::test(flavor = "multi_thread")]
async fn chat_gateway_appends_completions_path(#[case] suffix: &str) -> eyre::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v4/chat/completions"))
        .respond_with(chat_reply("ok"))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = ChatCompletionsGateway::new(
        ModelProviderConfig::new(Some(SecretString::from("sk-test")))
            .with_base_url(format!("{}{suffix}", server.uri())),
    );

    let reply = gateway.send("system", "user", ChatOptions::default()).await?;

    eyre::ensure!(reply == "ok");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn chat_gateway_reports_provider_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let result = gateway_for(&server)
        .send("system", "user", ChatOptions::default())
        .await;

    assert!(matches!(
        result,
        Err(ModelGatewayError::ProviderError { status: 429, ref body }) if body == "slow down"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn chat_gateway_rejects_reply_without_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let result = gateway_for(&server)
        .send("system", "user", ChatOptions::default())
        .await;

    assert!(matches!(result, Err(ModelGatewayError::ProviderEmptyResponse)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn vercel_provider_posts_build_spec() -> eyre::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v10/deployments"))
        .and(header("authorization", "Bearer vc-test"))
        .and(body_partial_json(json!({
            "name": "water-tracker",
            "project": "prj_1",
            "teamId": "team_1",
            "framework": "vite",
            "buildCommand": "npm run build",
            "outputDirectory": "dist"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "dpl_1",
            "url": "water-tracker-abc.vercel.app",
            "alias": ["water-tracker.vercel.app"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let spec = BuildSpec::for_app("Water Tracker", "export default function App() {}");

    let deployment = provider_for(&server).create_deployment(&spec).await?;

    eyre::ensure!(deployment.url() == "https://water-tracker-abc.vercel.app");
    eyre::ensure!(deployment.deploy_id() == "dpl_1");
    eyre::ensure!(deployment.aliases() == ["water-tracker.vercel.app"]);

    let requests = server.received_requests().await.unwrap_or_default();
    let body: Value = requests
        .first()
        .map(|request| serde_json::from_slice(&request.body))
        .transpose()?
        .unwrap_or_default();
    let paths: Vec<&str> = body["files"]
        .as_array()
        .map(|files| files.iter().filter_map(|file| file["file"].as_str()).collect())
        .unwrap_or_default();
    eyre::ensure!(paths.contains(&"src/App.tsx"));
    eyre::ensure!(paths.contains(&"package.json"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn vercel_provider_surfaces_rejections() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;
    let spec = BuildSpec::for_app("Water Tracker", "export default function App() {}");

    let result = provider_for(&server).create_deployment(&spec).await;

    assert!(matches!(
        result,
        Err(DeploymentProviderError::Rejected { status: 403, .. })
    ));
}

#[rstest]
#[case("BUILDING", DeploymentState::Building)]
#[case("READY", DeploymentState::Ready)]
#[case("CANCELED", DeploymentState::Error)]
#[tokio::test(flavor = "multi_thread")]
async fn vercel_provider_maps_ready_state(
    #[case] ready_state: &str,
    #[case] expected: DeploymentState,
) -> eyre::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v10/deployments/dpl_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "readyState": ready_state,
            "url": "water-tracker-abc.vercel.app"
        })))
        .mount(&server)
        .await;

    let status = provider_for(&server).deployment_status("dpl_1").await?;

    eyre::ensure!(status.state == expected);
    eyre::ensure!(status.url.as_deref() == Some("https://water-tracker-abc.vercel.app"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_pipeline_deploys_through_provider() -> eyre::Result<()> {
    let model = MockServer::start().await;
    let deployment = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(chat_reply(ORCHESTRATION))
        .expect(1)
        .mount(&model)
        .await;
    Mock::given(method("POST"))
        .and(path("/v10/deployments"))
        .and(body_partial_json(json!({ "name": "hydrate" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "dpl_live",
            "url": "hydrate-live.vercel.app"
        })))
        .expect(1)
        .mount(&deployment)
        .await;
    let pipeline = build_pipeline(pipeline_config(&model, &deployment)?);

    let result = pipeline
        .generate(GenerateRequest::new("track daily water intake"))
        .await?;

    eyre::ensure!(!result.degraded);
    eyre::ensure!(result.url == "https://hydrate-live.vercel.app");
    eyre::ensure!(result.abilities.iter().any(|ability| ability == "chart"));
    let health = pipeline.health();
    eyre::ensure!(health.model_provider_configured && health.deployment_provider_configured);
    eyre::ensure!(health.synthesis_strategy == SynthesisStrategy::Template);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_provider_degrades_to_mock_url() -> eyre::Result<()> {
    let model = MockServer::start().await;
    let deployment = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(chat_reply(ORCHESTRATION))
        .mount(&model)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("build cluster down"))
        .expect(1)
        .mount(&deployment)
        .await;
    let pipeline = build_pipeline(pipeline_config(&model, &deployment)?);

    let result = pipeline
        .generate(GenerateRequest::new("track daily water intake"))
        .await?;

    eyre::ensure!(result.degraded);
    eyre::ensure!(result.url.starts_with("https://hydrate-"));
    eyre::ensure!(result.url.ends_with(".vercel.app"));
    let job = pipeline.get_job(result.app_id).await?;
    eyre::ensure!(job.is_some_and(|stored| stored.deployed_url() == Some(result.url.as_str())));
    Ok(())
}
