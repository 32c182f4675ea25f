//! Shared helpers for offline pipeline integration tests.

use factoria::config::DeploymentProviderConfig;
use factoria::deployment::adapters::VercelDeploymentProvider;
use factoria::gateway::adapters::ScriptedModelGateway;
use factoria::job::adapters::InMemoryJobStore;
use factoria::job::services::JobLifecycleService;
use factoria::synthesis::SynthesisStrategy;
use mockable::DefaultClock;
use std::sync::Arc;

/// Pipeline type used by offline tests.
pub type OfflinePipeline = JobLifecycleService<
    InMemoryJobStore,
    ScriptedModelGateway,
    VercelDeploymentProvider,
    DefaultClock,
>;

/// Orchestration reply for a water intake tracker.
pub const WATER_REPLY: &str = r#"Here is the plan:
```json
{"intent":"Record daily water intake","app_name":"Water Tracker","type":"tracker",
 "abilities":["form-input","add","storage","persistence","list-display"],
 "fields":[{"name":"amount","type":"number","required":true}],
 "description":"Entries are captured by a form and stored locally."}
```"#;

/// Builds an orchestration reply for `kind` named `name`.
#[must_use]
pub fn reply_for(kind: &str, name: &str, abilities: &[&str]) -> String {
    serde_json::json!({
        "intent": format!("A {kind} application"),
        "appName": name,
        "type": kind,
        "abilities": abilities,
    })
    .to_string()
}

/// Builds an offline pipeline over `gateway`. The deployment provider has
/// no token, so every deployment takes the mock path.
#[must_use]
pub fn offline_pipeline(
    gateway: &ScriptedModelGateway,
    strategy: SynthesisStrategy,
) -> OfflinePipeline {
    JobLifecycleService::new(
        Arc::new(InMemoryJobStore::new()),
        Arc::new(gateway.clone()),
        Arc::new(VercelDeploymentProvider::new(DeploymentProviderConfig::new(
            None,
        ))),
        Arc::new(DefaultClock),
        strategy,
    )
}
