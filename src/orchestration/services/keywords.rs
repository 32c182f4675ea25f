//! Mandatory keyword-to-ability rules applied after parsing.

use crate::orchestration::domain::{Ability, OrchestrationRecord};

/// Phrases that force an ability into the orchestration.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    ability: Ability,
    stems: &'static [&'static str],
    words: &'static [&'static str],
}

impl KeywordRule {
    /// Returns the ability the rule enforces.
    #[must_use]
    pub const fn ability(&self) -> Ability {
        self.ability
    }

    /// Returns whether the normalized prompt triggers the rule.
    fn matches(&self, normalized: &str) -> bool {
        self.stems
            .iter()
            .any(|stem| mentions(normalized, stem, Boundary::Start))
            || self
                .words
                .iter()
                .any(|word| mentions(normalized, word, Boundary::Whole))
    }
}

/// Keyword rules in evaluation order.
///
/// ASCII stems match at the start of a word, so `track` covers `tracking`
/// but not `racetrack`. ASCII words must match a whole word, so `tick` does
/// not fire on `ticket`. Non-ASCII needles match anywhere.
pub const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        ability: Ability::Chart,
        stems: &["visuali", "chart", "graph", "trend", "track", "图表", "可视化", "趋势", "追踪"],
        words: &["plot", "plots", "plotted", "plotting"],
    },
    KeywordRule {
        ability: Ability::Export,
        stems: &["export", "download", "导出"],
        words: &["csv"],
    },
    KeywordRule {
        ability: Ability::Delete,
        stems: &["delet", "remov", "删除", "移除"],
        words: &[],
    },
    KeywordRule {
        ability: Ability::Toggle,
        stems: &["complet", "待办", "完成", "勾选"],
        words: &[
            "mark complete",
            "mark done",
            "check off",
            "tick",
            "ticks",
            "ticked",
            "done",
            "todo",
            "todos",
            "to-do",
        ],
    },
    KeywordRule {
        ability: Ability::Edit,
        stems: &["modif", "编辑", "修改"],
        words: &["edit", "edits", "edited", "editing", "editable"],
    },
    KeywordRule {
        ability: Ability::Filter,
        stems: &["filter", "search", "筛选", "过滤", "搜索"],
        words: &[],
    },
    KeywordRule {
        ability: Ability::Sort,
        stems: &["排序"],
        words: &["sort", "sorts", "sorted", "sorting", "sortable", "order by"],
    },
];

/// Returns the abilities the prompt makes mandatory, in rule order.
#[must_use]
pub fn mandatory_abilities(prompt: &str) -> Vec<Ability> {
    let normalized = normalize(prompt);
    KEYWORD_RULES
        .iter()
        .filter(|rule| rule.matches(&normalized))
        .map(KeywordRule::ability)
        .collect()
}

/// Adds every mandatory ability missing from `record` and removes repeated
/// tags. Returns the abilities that were added.
pub fn enforce_mandatory_abilities(prompt: &str, record: &mut OrchestrationRecord) -> Vec<Ability> {
    record.dedupe_abilities();
    mandatory_abilities(prompt)
        .into_iter()
        .filter(|ability| record.ensure_ability(*ability))
        .collect()
}

fn normalize(prompt: &str) -> String {
    prompt
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Start,
    Whole,
}

fn mentions(text: &str, needle: &str, boundary: Boundary) -> bool {
    if !needle.is_ascii() {
        return text.contains(needle);
    }
    text.match_indices(needle).any(|(at, _)| {
        let starts_word = text
            .get(..at)
            .and_then(|before| before.chars().next_back())
            .is_none_or(|previous| !previous.is_alphanumeric());
        let ends_word = boundary == Boundary::Start
            || text
                .get(at + needle.len()..)
                .and_then(|after| after.chars().next())
                .is_none_or(|next| !next.is_alphanumeric());
        starts_word && ends_word
    })
}
