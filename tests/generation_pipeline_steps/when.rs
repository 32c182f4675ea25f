//! When steps for generation pipeline BDD scenarios.

use super::world::{PipelineWorld, run_async};
use factoria::job::services::GenerateRequest;
use rstest_bdd_macros::when;

fn generate(world: &mut PipelineWorld, prompt: String) -> Result<(), eyre::Report> {
    let result = run_async(world.pipeline().generate(GenerateRequest::new(prompt)));
    if let Ok(ref generated) = result {
        world.last_job = Some(run_async(world.store_job(generated.app_id))?);
    }
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"the user generates an app from "{prompt}""#)]
fn user_generates(world: &mut PipelineWorld, prompt: String) -> Result<(), eyre::Report> {
    generate(world, prompt)
}

#[when("the user generates an app from a prompt of {length:usize} characters")]
fn user_generates_sized(world: &mut PipelineWorld, length: usize) -> Result<(), eyre::Report> {
    generate(world, "x".repeat(length))
}

#[when("the job is expired")]
fn job_is_expired(world: &mut PipelineWorld) -> Result<(), eyre::Report> {
    let app_id = world.generated()?.app_id;
    let expired = run_async(world.pipeline().expire_job(app_id))?;
    world.last_job = Some(expired);
    Ok(())
}
