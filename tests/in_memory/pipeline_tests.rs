//! End-to-end generation without network access.

use super::helpers::{WATER_REPLY, offline_pipeline, reply_for};
use factoria::gateway::adapters::ScriptedModelGateway;
use factoria::job::domain::JobStatus;
use factoria::job::services::{FailureCode, GenerateRequest};
use factoria::orchestration::domain::AppKind;
use factoria::synthesis::{SynthesisOptions, SynthesisStrategy};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn water_tracker_reaches_ready_with_chart() -> eyre::Result<()> {
    let gateway = ScriptedModelGateway::new().with_reply(WATER_REPLY);
    let pipeline = offline_pipeline(&gateway, SynthesisStrategy::Template);

    let result = pipeline
        .generate(GenerateRequest::new("track daily water intake"))
        .await?;

    eyre::ensure!(result.abilities.iter().any(|ability| ability == "chart"));
    eyre::ensure!(result.degraded);
    eyre::ensure!(result.url.starts_with("https://water-tracker-"));
    eyre::ensure!(result.url.ends_with(".vercel.app"));
    eyre::ensure!(result.code.contains("export default function WaterTracker"));
    eyre::ensure!(result.code.contains("chartPoints"));
    eyre::ensure!(result.deploy_time_seconds >= 0.0);

    let job = pipeline
        .get_job(result.app_id)
        .await?
        .ok_or_else(|| eyre::eyre!("job {} not stored", result.app_id))?;
    eyre::ensure!(job.status() == JobStatus::Ready);
    eyre::ensure!(job.deployed_url() == Some(result.url.as_str()));
    Ok(())
}

#[rstest]
#[case("todo", "Chores", &["form-input", "add", "list-display", "toggle", "delete"], "toggleEntry")]
#[case("calculator", "Tip Split", &["form-input"], "Save Calculation")]
#[case("countdown", "Launch Day", &["form-input", "list-display"], "DAY_MS")]
#[case("notes", "Scratchpad", &["form-input", "add", "edit"], "startEdit")]
#[tokio::test(flavor = "multi_thread")]
async fn each_kind_renders_its_template(
    #[case] kind: &str,
    #[case] name: &str,
    #[case] abilities: &[&str],
    #[case] marker: &str,
) -> eyre::Result<()> {
    let gateway = ScriptedModelGateway::new().with_reply(reply_for(kind, name, abilities));
    let pipeline = offline_pipeline(&gateway, SynthesisStrategy::Template);

    let result = pipeline
        .generate(GenerateRequest::new(format!("make me a {kind} app")))
        .await?;

    eyre::ensure!(result.orchestration.kind().map(AppKind::as_str) == Some(kind));
    eyre::ensure!(
        result.code.contains(marker),
        "{kind} source lacks {marker}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn model_assisted_synthesis_strips_fences() -> eyre::Result<()> {
    let source = "export default function App() {\n  return <main>Hydrate</main>;\n}";
    let gateway = ScriptedModelGateway::new()
        .with_reply(WATER_REPLY)
        .with_reply(format!("Sure!\n```tsx\n{source}\n```\nEnjoy."));
    let pipeline = offline_pipeline(&gateway, SynthesisStrategy::Template);
    let options = SynthesisOptions::default().with_strategy(SynthesisStrategy::ModelAssisted);

    let result = pipeline
        .generate(GenerateRequest::new("track daily water intake").with_options(options))
        .await?;

    eyre::ensure!(result.code == source);
    eyre::ensure!(gateway.exchanges().len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn chinese_prompt_gets_mandatory_abilities() -> eyre::Result<()> {
    let gateway = ScriptedModelGateway::new()
        .with_reply(reply_for("todo", "待办清单", &["form-input", "add", "list-display"]));
    let pipeline = offline_pipeline(&gateway, SynthesisStrategy::Template);

    let result = pipeline
        .generate(GenerateRequest::new("一个待办事项应用，可以删除和导出"))
        .await?;

    for required in ["toggle", "delete", "export"] {
        eyre::ensure!(
            result.abilities.iter().any(|ability| ability == required),
            "missing {required} in {:?}",
            result.abilities
        );
    }
    eyre::ensure!(result.url.starts_with("https://app-"));
    Ok(())
}

#[rstest]
#[case::at_bound(500, true)]
#[case::over_bound(501, false)]
#[tokio::test(flavor = "multi_thread")]
async fn prompt_bound_is_inclusive(#[case] length: usize, #[case] accepted: bool) {
    let gateway = ScriptedModelGateway::new().with_reply(WATER_REPLY);
    let pipeline = offline_pipeline(&gateway, SynthesisStrategy::Template);

    let outcome = pipeline
        .generate(GenerateRequest::new("水".repeat(length)))
        .await;

    match outcome {
        Ok(_) => assert!(accepted, "{length} characters should be rejected"),
        Err(failure) => {
            assert!(!accepted, "{length} characters should be accepted: {failure}");
            assert_eq!(failure.code, FailureCode::InvalidInput);
            assert!(gateway.exchanges().is_empty());
        }
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unconfigured_model_reports_provider_not_configured() -> eyre::Result<()> {
    let gateway = ScriptedModelGateway::unconfigured();
    let pipeline = offline_pipeline(&gateway, SynthesisStrategy::Template);

    let failure = pipeline
        .generate(GenerateRequest::new("track daily water intake"))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("generation should fail"))?;

    eyre::ensure!(failure.code == FailureCode::ProviderNotConfigured);
    let stats = pipeline.statistics().await?;
    eyre::ensure!(stats.by_status.get(&JobStatus::Failed) == Some(&1));
    eyre::ensure!(!stats.by_status.contains_key(&JobStatus::Deploying));
    eyre::ensure!(!stats.by_status.contains_key(&JobStatus::Ready));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failure_serializes_with_wire_code() -> eyre::Result<()> {
    let gateway = ScriptedModelGateway::new().with_reply("{\"intent\":\"\"}");
    let pipeline = offline_pipeline(&gateway, SynthesisStrategy::Template);

    let failure = pipeline
        .generate(GenerateRequest::new("a notes app"))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("incomplete reply should fail"))?;

    let value = serde_json::to_value(&failure)?;
    eyre::ensure!(value["code"] == "INTERNAL_ERROR");
    eyre::ensure!(value["message"].as_str().is_some_and(|message| !message.is_empty()));
    Ok(())
}
