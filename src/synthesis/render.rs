//! Template rendering for the five application kinds.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;

use super::{SynthesisError, SynthesisResult};
use crate::naming::{humanize, pascal_case, slugify};
use crate::orchestration::domain::{Ability, AppKind, FieldSpec, FieldType, OrchestrationRecord};

const PARTIALS: &[(&str, &str)] = &[
    (
        "partials/prelude.tsx",
        include_str!("templates/partials/prelude.tsx"),
    ),
    (
        "partials/state.tsx",
        include_str!("templates/partials/state.tsx"),
    ),
    ("partials/form.tsx", include_str!("templates/partials/form.tsx")),
    (
        "partials/chart.tsx",
        include_str!("templates/partials/chart.tsx"),
    ),
    (
        "partials/toolbar.tsx",
        include_str!("templates/partials/toolbar.tsx"),
    ),
    (
        "partials/actions.tsx",
        include_str!("templates/partials/actions.tsx"),
    ),
];

/// Returns the template file name for `kind`.
#[must_use]
pub const fn template_name(kind: AppKind) -> &'static str {
    match kind {
        AppKind::Tracker => "tracker.tsx",
        AppKind::Todo => "todo.tsx",
        AppKind::Calculator => "calculator.tsx",
        AppKind::Countdown => "countdown.tsx",
        AppKind::Notes => "notes.tsx",
    }
}

const fn template_source(kind: AppKind) -> &'static str {
    match kind {
        AppKind::Tracker => include_str!("templates/tracker.tsx"),
        AppKind::Todo => include_str!("templates/todo.tsx"),
        AppKind::Calculator => include_str!("templates/calculator.tsx"),
        AppKind::Countdown => include_str!("templates/countdown.tsx"),
        AppKind::Notes => include_str!("templates/notes.tsx"),
    }
}

const fn submit_label(kind: AppKind) -> &'static str {
    match kind {
        AppKind::Tracker => "Add Entry",
        AppKind::Todo => "Add Task",
        AppKind::Calculator => "Save Calculation",
        AppKind::Countdown => "Add Event",
        AppKind::Notes => "Add Note",
    }
}

fn default_fields(kind: AppKind) -> Vec<FieldSpec> {
    match kind {
        AppKind::Tracker => vec![
            FieldSpec::new("value", FieldType::Number, true),
            FieldSpec::new("note", FieldType::Text, false),
        ],
        AppKind::Todo => vec![FieldSpec::new("title", FieldType::Text, true)],
        AppKind::Calculator => vec![
            FieldSpec::new("first", FieldType::Number, true),
            FieldSpec::new("second", FieldType::Number, true),
        ],
        AppKind::Countdown => vec![
            FieldSpec::new("event", FieldType::Text, true),
            FieldSpec::new("date", FieldType::Date, true),
        ],
        AppKind::Notes => vec![
            FieldSpec::new("title", FieldType::Text, true),
            FieldSpec::new("body", FieldType::Textarea, false),
        ],
    }
}

/// Values exposed to templates. String members holding JavaScript are
/// already valid literals.
#[derive(Debug, Serialize)]
struct TemplateContext {
    app_name: String,
    component: String,
    storage_key: String,
    fields: String,
    chart_field: String,
    submit_label: &'static str,
    abilities: BTreeMap<String, bool>,
}

impl TemplateContext {
    fn new(record: &OrchestrationRecord, kind: AppKind) -> Self {
        let mut fields = if record.fields().is_empty() {
            default_fields(kind)
        } else {
            record.fields().to_vec()
        };
        if kind == AppKind::Countdown
            && !fields
                .iter()
                .any(|field| field.field_type() == FieldType::Date)
        {
            fields.push(FieldSpec::new("date", FieldType::Date, true));
        }

        let chart_field = fields
            .iter()
            .find(|field| field.field_type() == FieldType::Number)
            .map_or(Value::Null, |field| Value::from(field.name()));
        let field_literals: Vec<Value> = fields
            .iter()
            .map(|field| {
                let input = if field.field_type() == FieldType::Textarea {
                    "textarea"
                } else {
                    field.field_type().input_type()
                };
                json!({
                    "name": field.name(),
                    "label": humanize(field.name()),
                    "type": input,
                    "required": field.required(),
                })
            })
            .collect();

        let abilities = Ability::ALL
            .into_iter()
            .map(|ability| {
                (
                    ability.as_str().replace('-', "_"),
                    record.has_ability(ability),
                )
            })
            .collect();

        Self {
            app_name: Value::from(record.app_name()).to_string(),
            component: pascal_case(record.app_name(), "App"),
            storage_key: Value::from(slugify(record.app_name(), "app") + "-data").to_string(),
            fields: Value::Array(field_literals).to_string(),
            chart_field: chart_field.to_string(),
            submit_label: submit_label(kind),
            abilities,
        }
    }
}

/// Renders the template for `kind` with the record's name, fields, and
/// abilities.
///
/// # Errors
///
/// Returns [`SynthesisError::Template`] when a template fails to parse or
/// render.
pub fn render(record: &OrchestrationRecord, kind: AppKind) -> SynthesisResult<String> {
    let name = template_name(kind);
    let mut environment = Environment::new();
    environment.set_auto_escape_callback(|_| AutoEscape::None);
    environment.set_undefined_behavior(UndefinedBehavior::Strict);
    environment.set_trim_blocks(true);
    environment.set_lstrip_blocks(true);
    environment.set_keep_trailing_newline(true);

    for &(partial, source) in PARTIALS {
        environment
            .add_template(partial, source)
            .map_err(|err| SynthesisError::template(partial, &err))?;
    }
    environment
        .add_template(name, template_source(kind))
        .map_err(|err| SynthesisError::template(name, &err))?;

    let context = TemplateContext::new(record, kind);
    environment
        .get_template(name)
        .and_then(|template| template.render(&context))
        .map_err(|err| SynthesisError::template(name, &err))
}
