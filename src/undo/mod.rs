//! Undo advisor: derives a reversal hint for a command that just ran.
//!
//! Unlike the safety classifier, rules are tried in order and the first match
//! wins. Suggestions are heuristics; a `cp` or `ln` over an existing
//! destination is not reversible by deleting that destination.

mod patterns;

use std::sync::LazyLock;

use crossterm::style::Stylize;
use regex::{Captures, Regex};
use serde::Serialize;

use patterns::UNDO_RULES;

const NO_UNDO_DESCRIPTION: &str = "No automatic undo available for this command";

/// A compiled undo rule.
pub struct UndoPattern {
    pub pattern: Regex,
    /// Builds the inverse command from the pattern's capture groups.
    pub derive: fn(&Captures) -> String,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndoSuggestion {
    pub original: String,
    /// Empty when `can_undo` is false.
    pub undo_command: String,
    pub description: String,
    pub can_undo: bool,
}

// Literal table; `patterns::tests::every_rule_compiles` guards the `expect`.
static UNDO_PATTERNS: LazyLock<Vec<UndoPattern>> = LazyLock::new(|| {
    UNDO_RULES
        .iter()
        .map(|&(pattern, derive, description)| UndoPattern {
            pattern: Regex::new(pattern).expect("undo pattern table must compile"),
            derive,
            description,
        })
        .collect()
});

/// The process-wide undo table, in match-priority order.
pub fn undo_patterns() -> &'static [UndoPattern] {
    &UNDO_PATTERNS
}

/// Suggest a command that reverses `command`, if a rule recognises it.
pub fn suggest_undo(command: &str) -> UndoSuggestion {
    let command = command.trim();

    for rule in undo_patterns() {
        if let Some(caps) = rule.pattern.captures(command) {
            return UndoSuggestion {
                original: command.to_string(),
                undo_command: (rule.derive)(&caps),
                description: rule.description.to_string(),
                can_undo: true,
            };
        }
    }

    UndoSuggestion {
        original: command.to_string(),
        undo_command: String::new(),
        description: NO_UNDO_DESCRIPTION.to_string(),
        can_undo: false,
    }
}

/// Two-line post-execution hint. Empty when there is nothing to suggest.
pub fn format_suggestion(suggestion: &UndoSuggestion) -> String {
    if !suggestion.can_undo {
        return String::new();
    }

    format!(
        "{}{}\n{}",
        "💡 To undo: ".dim(),
        suggestion.undo_command.as_str().cyan(),
        format!("   ({})", suggestion.description).dim(),
    )
}
