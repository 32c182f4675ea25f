//! The closed ability catalog.

use super::ParseAbilityError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog tier an ability belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityTier {
    /// Storing, persisting, and exporting records.
    Data,
    /// Rendering records.
    Presentation,
    /// Acting on records.
    Interaction,
}

impl AbilityTier {
    /// Every tier, in catalog order.
    pub const ALL: [Self; 3] = [Self::Data, Self::Presentation, Self::Interaction];

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Presentation => "presentation",
            Self::Interaction => "interaction",
        }
    }

    /// Returns the abilities of this tier in catalog order.
    pub fn abilities(self) -> impl Iterator<Item = Ability> {
        Ability::ALL
            .into_iter()
            .filter(move |ability| ability.tier() == self)
    }
}

impl fmt::Display for AbilityTier {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Capability tag the orchestrator may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ability {
    /// Record storage and management.
    Storage,
    /// Persistence across sessions in browser storage.
    Persistence,
    /// CSV or JSON export.
    Export,
    /// Form input.
    FormInput,
    /// List display.
    ListDisplay,
    /// Card display.
    CardDisplay,
    /// Chart visualisation.
    Chart,
    /// Adding records.
    Add,
    /// Editing records.
    Edit,
    /// Deleting records.
    Delete,
    /// Toggling a completed flag.
    Toggle,
    /// Filtering records.
    Filter,
    /// Sorting records.
    Sort,
}

impl Ability {
    /// The complete catalog, grouped by tier.
    pub const ALL: [Self; 13] = [
        Self::Storage,
        Self::Persistence,
        Self::Export,
        Self::FormInput,
        Self::ListDisplay,
        Self::CardDisplay,
        Self::Chart,
        Self::Add,
        Self::Edit,
        Self::Delete,
        Self::Toggle,
        Self::Filter,
        Self::Sort,
    ];

    /// Returns the catalog tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::Persistence => "persistence",
            Self::Export => "export",
            Self::FormInput => "form-input",
            Self::ListDisplay => "list-display",
            Self::CardDisplay => "card-display",
            Self::Chart => "chart",
            Self::Add => "add",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Toggle => "toggle",
            Self::Filter => "filter",
            Self::Sort => "sort",
        }
    }

    /// Returns the tier.
    #[must_use]
    pub const fn tier(self) -> AbilityTier {
        match self {
            Self::Storage | Self::Persistence | Self::Export => AbilityTier::Data,
            Self::FormInput | Self::ListDisplay | Self::CardDisplay | Self::Chart => {
                AbilityTier::Presentation
            }
            Self::Add | Self::Edit | Self::Delete | Self::Toggle | Self::Filter | Self::Sort => {
                AbilityTier::Interaction
            }
        }
    }

    /// Returns the one-line description used in model instructions.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Storage => "store and manage records",
            Self::Persistence => "persist records in localStorage",
            Self::Export => "export records as CSV or JSON",
            Self::FormInput => "form input",
            Self::ListDisplay => "list display",
            Self::CardDisplay => "card display",
            Self::Chart => "chart visualisation",
            Self::Add => "add a record",
            Self::Edit => "edit a record",
            Self::Delete => "delete a record",
            Self::Toggle => "toggle a record between done and not done",
            Self::Filter => "filter records",
            Self::Sort => "sort records",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Ability {
    type Error = ParseAbilityError;

    /// Parses a tag, tolerating case and `_`/camelCase spellings such as
    /// `form_input` or `formInput`.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let key: String = value
            .trim()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|ability| ability.as_str().replace('-', "") == key)
            .ok_or_else(|| ParseAbilityError(value.to_owned()))
    }
}
