//! Model instructions for ability orchestration.

use crate::gateway::ports::ChatOptions;
use crate::orchestration::domain::{AbilityTier, Prompt};

/// Sampling options for orchestration. Low temperature favours repeatable
/// ability lists.
pub const ORCHESTRATION_OPTIONS: ChatOptions = ChatOptions::new(0.3, 2000);

const PREAMBLE: &str = "\
You are an ability orchestrator for a generator of small single-page web applications.
Your task is to identify which abilities the user's application needs and to put them in a sensible order.
Do not pick an application template. Work only from the ability catalog below.";

const EXAMPLES: &str = r#"Examples:

Request: "Help me track how much water I drink every day"
{"intent":"Record daily water intake and show the trend","app_name":"Water Tracker","type":"tracker","abilities":["form-input","add","storage","persistence","list-display","chart"],"fields":[{"name":"amount","type":"number","required":true},{"name":"date","type":"date","required":true}],"description":"Entries are captured by a form, stored locally and listed; tracking over time needs a chart."}

Request: "A todo list where I can mark tasks complete and delete them"
{"intent":"Manage a list of tasks","app_name":"Todo List","type":"todo","abilities":["form-input","add","storage","persistence","list-display","toggle","delete"],"fields":[{"name":"title","type":"text","required":true}],"description":"Tasks are added through a form; 'mark complete' requires toggle and 'delete' requires delete."}

Request: "Log my expenses, visualize them by category and export to CSV"
{"intent":"Record expenses and analyse spending","app_name":"Expense Log","type":"tracker","abilities":["form-input","add","storage","persistence","list-display","chart","export"],"fields":[{"name":"amount","type":"number","required":true},{"name":"category","type":"select","required":true}],"description":"'visualize' requires chart and 'export to CSV' requires export."}"#;

const OUTPUT_FORMAT: &str = r#"Output format:
{"intent":"...","app_name":"...","type":"tracker|todo|calculator|countdown|notes","abilities":["..."],"fields":[{"name":"...","type":"text|number|date|select|textarea","required":true}],"description":"..."}"#;

const RULES: &str = "\
Rules:
- Phrases such as visualize, chart, graph, trend or track require \"chart\".
- Phrases such as export, CSV or download require \"export\".
- Phrases such as delete or remove require \"delete\".
- Phrases such as mark complete, done or check off require \"toggle\".
- Phrases such as edit or modify require \"edit\"; filter or search require \"filter\"; sort requires \"sort\".
- Use only abilities from the catalog.
- Answer with the JSON object only, without explanations or Markdown.";

/// Builds the fixed system instruction.
#[must_use]
pub fn system_prompt() -> String {
    [
        PREAMBLE.to_owned(),
        catalog_section(),
        EXAMPLES.to_owned(),
        OUTPUT_FORMAT.to_owned(),
        RULES.to_owned(),
    ]
    .join("\n\n")
}

/// Builds the user message for `prompt`.
#[must_use]
pub fn user_message(prompt: &Prompt) -> String {
    format!("User request:\n\"\"\"{prompt}\"\"\"")
}

fn catalog_section() -> String {
    let mut lines = vec!["Ability catalog:".to_owned()];
    for tier in AbilityTier::ALL {
        lines.push(format!("{tier} tier:"));
        lines.extend(
            tier.abilities()
                .map(|ability| format!("- {ability}: {}", ability.description())),
        );
    }
    lines.join("\n")
}
