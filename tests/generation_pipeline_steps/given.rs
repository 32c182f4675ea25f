//! Given steps for generation pipeline BDD scenarios.

use super::world::{PipelineWorld, run_async};
use factoria::gateway::adapters::ScriptedModelGateway;
use factoria::job::services::GenerateRequest;
use rstest_bdd_macros::given;
use serde_json::json;

#[given(r#"a model that plans a "{kind}" app named "{name}""#)]
fn model_plans_app(world: &mut PipelineWorld, kind: String, name: String) {
    let reply = json!({
        "intent": format!("A {kind} called {name}"),
        "app_name": name,
        "type": kind,
        "abilities": ["form-input", "add", "storage", "list-display"],
    });
    world.gateway = ScriptedModelGateway::new().with_reply(format!("```json\n{reply}\n```"));
}

#[given("a model provider without credentials")]
fn model_without_credentials(world: &mut PipelineWorld) {
    world.gateway = ScriptedModelGateway::unconfigured();
}

#[given("no deployment credentials are configured")]
fn no_deployment_credentials(world: &mut PipelineWorld) {
    let _ = world;
}

#[given(r#"the user has generated an app from "{prompt}""#)]
fn user_has_generated(world: &mut PipelineWorld, prompt: String) -> Result<(), eyre::Report> {
    let result = run_async(world.pipeline().generate(GenerateRequest::new(prompt)))?;
    let job = run_async(world.store_job(result.app_id))?;
    world.last_job = Some(job);
    world.last_result = Some(Ok(result));
    Ok(())
}
