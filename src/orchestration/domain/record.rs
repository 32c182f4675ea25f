//! Orchestration record and the values it carries.

use super::{Ability, ParseAppKindError, ParseFieldTypeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application family used for template dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppKind {
    /// Records values over time.
    #[default]
    Tracker,
    /// Task list.
    Todo,
    /// Form-driven calculation.
    Calculator,
    /// Countdown to a date.
    Countdown,
    /// Free-form notes.
    Notes,
}

impl AppKind {
    /// Every kind, tracker first.
    pub const ALL: [Self; 5] = [
        Self::Tracker,
        Self::Todo,
        Self::Calculator,
        Self::Countdown,
        Self::Notes,
    ];

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tracker => "tracker",
            Self::Todo => "todo",
            Self::Calculator => "calculator",
            Self::Countdown => "countdown",
            Self::Notes => "notes",
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AppKind {
    type Error = ParseAppKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "tracker" => Ok(Self::Tracker),
            "todo" | "to-do" => Ok(Self::Todo),
            "calculator" => Ok(Self::Calculator),
            "countdown" => Ok(Self::Countdown),
            "notes" | "note" => Ok(Self::Notes),
            _ => Err(ParseAppKindError(value.to_owned())),
        }
    }
}

/// Input type of a generated form field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Single-line text.
    #[default]
    Text,
    /// Numeric input.
    Number,
    /// Date picker.
    Date,
    /// Choice list.
    Select,
    /// Multi-line text.
    Textarea,
}

impl FieldType {
    /// Returns the HTML input type used by templates.
    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Date => "date",
            Self::Text | Self::Select | Self::Textarea => "text",
        }
    }
}

impl TryFrom<&str> for FieldType {
    type Error = ParseFieldTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "text" | "string" => Ok(Self::Text),
            "number" | "integer" | "float" => Ok(Self::Number),
            "date" => Ok(Self::Date),
            "select" => Ok(Self::Select),
            "textarea" => Ok(Self::Textarea),
            _ => Err(ParseFieldTypeError(value.to_owned())),
        }
    }
}

/// One data field the generated application records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    required: bool,
}

impl FieldSpec {
    /// Creates a field.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field type.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns whether the field must be filled in.
    #[must_use]
    pub const fn required(&self) -> bool {
        self.required
    }
}

/// Structured result of ability orchestration.
///
/// Ability tags are stored as emitted; [`Self::known_abilities`] filters
/// them against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationRecord {
    intent: String,
    app_name: String,
    abilities: Vec<String>,
    description: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<AppKind>,
    #[serde(default)]
    fields: Vec<FieldSpec>,
    confidence: f64,
}

impl OrchestrationRecord {
    /// Display name used when the model supplies none.
    pub const DEFAULT_APP_NAME: &'static str = "My App";

    /// Creates a record with an empty description and no kind or fields.
    #[must_use]
    pub fn new(
        intent: impl Into<String>,
        app_name: impl Into<String>,
        abilities: impl IntoIterator<Item = String>,
        confidence: f64,
    ) -> Self {
        Self {
            intent: intent.into(),
            app_name: app_name.into(),
            abilities: abilities.into_iter().collect(),
            description: String::new(),
            kind: None,
            fields: Vec::new(),
            confidence,
        }
    }

    /// Placeholder recorded on a job before orchestration completes.
    #[must_use]
    pub fn pending() -> Self {
        Self::new("Generating...", Self::DEFAULT_APP_NAME, Vec::new(), 0.0)
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the application kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: AppKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Sets the data fields.
    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields = fields.into_iter().collect();
        self
    }

    /// Returns the intent description.
    #[must_use]
    pub fn intent(&self) -> &str {
        &self.intent
    }

    /// Returns the display name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Returns ability tags in orchestration order.
    #[must_use]
    pub fn abilities(&self) -> &[String] {
        &self.abilities
    }

    /// Returns the explanation of the ordering.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the classified kind, if the model supplied one.
    #[must_use]
    pub const fn kind(&self) -> Option<AppKind> {
        self.kind
    }

    /// Returns the data fields.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns the assigned confidence.
    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Returns catalog abilities in orchestration order, skipping unknown
    /// tags.
    #[must_use]
    pub fn known_abilities(&self) -> Vec<Ability> {
        self.abilities
            .iter()
            .filter_map(|tag| Ability::try_from(tag.as_str()).ok())
            .collect()
    }

    /// Returns tags that are not in the catalog.
    #[must_use]
    pub fn unknown_abilities(&self) -> Vec<&str> {
        self.abilities
            .iter()
            .map(String::as_str)
            .filter(|tag| Ability::try_from(*tag).is_err())
            .collect()
    }

    /// Returns whether `ability` is part of the orchestration.
    #[must_use]
    pub fn has_ability(&self, ability: Ability) -> bool {
        self.abilities
            .iter()
            .any(|tag| Ability::try_from(tag.as_str()) == Ok(ability))
    }

    /// Appends `ability` unless already present. Returns whether it was
    /// added.
    pub fn ensure_ability(&mut self, ability: Ability) -> bool {
        if self.has_ability(ability) {
            return false;
        }
        self.abilities.push(ability.as_str().to_owned());
        true
    }

    /// Removes repeated tags, keeping each first occurrence.
    pub fn dedupe_abilities(&mut self) {
        let mut seen: Vec<String> = Vec::with_capacity(self.abilities.len());
        self.abilities.retain(|tag| {
            let key = Ability::try_from(tag.as_str())
                .map_or_else(|_| tag.trim().to_ascii_lowercase(), |a| a.as_str().to_owned());
            if seen.contains(&key) {
                false
            } else {
                seen.push(key);
                true
            }
        });
    }
}
