//! Job queries, statistics, and expiry over an offline pipeline.

use super::helpers::{WATER_REPLY, offline_pipeline};
use factoria::deployment::domain::DeploymentState;
use factoria::gateway::adapters::ScriptedModelGateway;
use factoria::job::domain::{Job, JobId, JobStatus, UserId};
use factoria::job::ports::JobStoreError;
use factoria::job::services::GenerateRequest;
use factoria::synthesis::SynthesisStrategy;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn jobs_are_listed_per_user() -> eyre::Result<()> {
    let gateway = ScriptedModelGateway::new()
        .with_reply(WATER_REPLY)
        .with_reply(WATER_REPLY)
        .with_reply(WATER_REPLY);
    let pipeline = offline_pipeline(&gateway, SynthesisStrategy::Template);
    let mut alice_jobs = Vec::new();
    for prompt in ["track water", "track sleep"] {
        let result = pipeline
            .generate(GenerateRequest::new(prompt).with_user_id("alice"))
            .await?;
        alice_jobs.push(result.app_id);
    }
    pipeline
        .generate(GenerateRequest::new("track steps").with_user_id("bob"))
        .await?;

    let listed: Vec<JobId> = pipeline
        .list_jobs_for_user(&UserId::new("alice")?, 10, 0)
        .await?
        .iter()
        .map(Job::id)
        .collect();

    eyre::ensure!(listed.len() == 2);
    eyre::ensure!(alice_jobs.iter().all(|id| listed.contains(id)));
    let empty = pipeline
        .list_jobs_for_user(&UserId::new("carol")?, 10, 0)
        .await?;
    eyre::ensure!(empty.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn statistics_count_every_outcome() -> eyre::Result<()> {
    let gateway = ScriptedModelGateway::new()
        .with_reply(WATER_REPLY)
        .with_reply("not json at all");
    let pipeline = offline_pipeline(&gateway, SynthesisStrategy::Template);
    pipeline
        .generate(GenerateRequest::new("track daily water intake"))
        .await?;
    let failed = pipeline.generate(GenerateRequest::new("a notes app")).await;
    eyre::ensure!(failed.is_err());

    let stats = pipeline.statistics().await?;

    eyre::ensure!(stats.total == 2);
    eyre::ensure!(stats.by_status.get(&JobStatus::Ready) == Some(&1));
    eyre::ensure!(stats.by_status.get(&JobStatus::Failed) == Some(&1));
    let value = serde_json::to_value(&stats)?;
    eyre::ensure!(value["byStatus"]["ready"] == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn expiry_only_applies_to_ready_jobs() -> eyre::Result<()> {
    let gateway = ScriptedModelGateway::new().with_reply(WATER_REPLY);
    let pipeline = offline_pipeline(&gateway, SynthesisStrategy::Template);
    let result = pipeline
        .generate(GenerateRequest::new("track daily water intake"))
        .await?;

    let expired = pipeline.expire_job(result.app_id).await?;
    eyre::ensure!(expired.status() == JobStatus::Expired);
    eyre::ensure!(matches!(
        pipeline.expire_job(result.app_id).await,
        Err(JobStoreError::Domain(_))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mock_deployment_status_is_ready() {
    let gateway = ScriptedModelGateway::new();
    let pipeline = offline_pipeline(&gateway, SynthesisStrategy::Template);

    let status = pipeline.deployment_status("42").await;

    assert_eq!(status.state, DeploymentState::Ready);
    assert_eq!(status.url.as_deref(), Some("https://mock-42.vercel.app"));
}

#[rstest]
fn health_reflects_offline_configuration() {
    let gateway = ScriptedModelGateway::new();
    let pipeline = offline_pipeline(&gateway, SynthesisStrategy::ModelAssisted);

    let report = pipeline.health();

    assert!(report.model_provider_configured);
    assert!(!report.deployment_provider_configured);
    assert_eq!(report.synthesis_strategy, SynthesisStrategy::ModelAssisted);
}
