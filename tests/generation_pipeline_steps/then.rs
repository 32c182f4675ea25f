//! Then steps for generation pipeline BDD scenarios.

use super::world::{PipelineWorld, run_async};
use factoria::job::domain::JobStatus;
use factoria::job::services::FailureCode;
use rstest_bdd_macros::then;

#[then(r#"the job status is "{status}""#)]
fn job_status_is(world: &PipelineWorld, status: String) -> Result<(), eyre::Report> {
    let expected = JobStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let job = world
        .last_job
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing job in scenario world"))?;

    if job.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            job.status()
        ));
    }
    Ok(())
}

#[then(r#"the abilities include "{ability}""#)]
fn abilities_include(world: &PipelineWorld, ability: String) -> Result<(), eyre::Report> {
    let result = world.generated()?;
    if !result.abilities.contains(&ability) {
        return Err(eyre::eyre!(
            "expected {ability} in {:?}",
            result.abilities
        ));
    }
    Ok(())
}

#[then("the app URL is a mock deployment URL")]
fn url_is_mock(world: &PipelineWorld) -> Result<(), eyre::Report> {
    let result = world.generated()?;
    if !result.degraded || !result.url.starts_with("https://") || !result.url.ends_with(".vercel.app") {
        return Err(eyre::eyre!("expected a mock deployment URL, got {}", result.url));
    }
    Ok(())
}

#[then(r#"generation fails with code "{code}""#)]
fn generation_fails_with(world: &PipelineWorld, code: String) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(failure)) if failure.code.as_str() == code => Ok(()),
        Some(Err(failure)) => Err(eyre::eyre!("expected {code}, got {}", failure.code)),
        Some(Ok(result)) => Err(eyre::eyre!("expected failure, got app {}", result.app_id)),
        None => Err(eyre::eyre!("no generation has run in this scenario")),
    }
}

#[then("the model was not called")]
fn model_not_called(world: &PipelineWorld) -> Result<(), eyre::Report> {
    let exchanges = world.gateway.exchanges();
    if !exchanges.is_empty() {
        return Err(eyre::eyre!("expected no model calls, saw {}", exchanges.len()));
    }
    Ok(())
}

#[then("the store holds {count:usize} jobs")]
fn store_holds(world: &PipelineWorld, count: usize) -> Result<(), eyre::Report> {
    let stats = run_async(world.pipeline().statistics())?;
    if stats.total != count {
        return Err(eyre::eyre!("expected {count} jobs, found {}", stats.total));
    }
    Ok(())
}

#[then(r#"no job reached "{status}""#)]
fn no_job_reached(world: &PipelineWorld, status: String) -> Result<(), eyre::Report> {
    let unexpected = JobStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let stats = run_async(world.pipeline().statistics())?;
    let past: Vec<JobStatus> = match unexpected {
        JobStatus::Deploying => vec![JobStatus::Deploying, JobStatus::Ready, JobStatus::Expired],
        other => vec![other],
    };
    if let Some(found) = past.iter().find(|candidate| stats.by_status.contains_key(candidate)) {
        return Err(eyre::eyre!("a job is {found}, so it passed {unexpected}"));
    }
    Ok(())
}
