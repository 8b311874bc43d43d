//! Safety classifier: grades shell commands by destructive potential.
//!
//! Classification is a best-effort heuristic over regular expressions, not a
//! security boundary. Every pattern in the table is tested (no short-circuit);
//! the reported level is the maximum among all matches.

mod patterns;

use std::fmt;
use std::sync::LazyLock;

use crossterm::style::Stylize;
use regex::{Regex, RegexSet};
use serde::Serialize;

use patterns::DANGEROUS_PATTERNS;

/// Token the user must type to confirm a dangerous command, unless configured otherwise.
pub const DEFAULT_CONFIRM_TOKEN: &str = "yes";

/// Ordinal risk classification. Ordering is significant: `Safe < Caution < Dangerous < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DangerLevel {
    #[default]
    Safe,
    Caution,
    Dangerous,
    Critical,
}

impl fmt::Display for DangerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(level_name(*self))
    }
}

/// A compiled pattern that marks a command as risky.
#[derive(Debug)]
pub struct DangerousPattern {
    pub pattern: Regex,
    pub description: &'static str,
    pub level: DangerLevel,
}

/// Outcome of classifying a single command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub level: DangerLevel,
    /// One description per matched pattern, in table order.
    pub warnings: Vec<String>,
    pub is_dangerous: bool,
}

struct PatternTable {
    set: RegexSet,
    entries: Vec<DangerousPattern>,
}

// Literal table; `patterns::tests::every_pattern_compiles` guards the `expect`s.
static TABLE: LazyLock<PatternTable> = LazyLock::new(|| {
    let set = RegexSet::new(DANGEROUS_PATTERNS.iter().map(|(p, _, _)| *p))
        .expect("dangerous pattern table must compile");
    let entries = DANGEROUS_PATTERNS
        .iter()
        .map(|&(pattern, description, level)| DangerousPattern {
            pattern: Regex::new(pattern).expect("dangerous pattern table must compile"),
            description,
            level,
        })
        .collect();
    PatternTable { set, entries }
});

/// The process-wide dangerous-pattern table, in evaluation order.
pub fn dangerous_patterns() -> &'static [DangerousPattern] {
    &TABLE.entries
}

/// Classify `command` against every dangerous pattern.
///
/// Total over all inputs: the empty string is `Safe` with no warnings.
pub fn analyze(command: &str) -> AnalysisResult {
    let table = &*TABLE;
    let mut level = DangerLevel::Safe;
    let mut warnings = Vec::new();

    // SetMatches iterates indices in ascending order, i.e. table order.
    for index in table.set.matches(command).iter() {
        let entry = &table.entries[index];
        warnings.push(entry.description.to_string());
        level = level.max(entry.level);
    }

    AnalysisResult {
        level,
        warnings,
        is_dangerous: level >= DangerLevel::Dangerous,
    }
}

/// Whether `command` must be explicitly confirmed before it runs.
pub fn requires_confirmation(command: &str) -> bool {
    analyze(command).level >= DangerLevel::Dangerous
}

/// Human-readable name for a level, as shown in warning banners.
pub fn level_name(level: DangerLevel) -> &'static str {
    match level {
        DangerLevel::Safe => "Safe",
        DangerLevel::Caution => "Caution",
        DangerLevel::Dangerous => "Dangerous",
        DangerLevel::Critical => "CRITICAL",
    }
}

/// Pre-execution warning banner using the default confirmation token.
///
/// Empty when the command is below `Caution`.
pub fn format_warning(command: &str) -> String {
    format_warning_with_token(command, DEFAULT_CONFIRM_TOKEN)
}

/// Pre-execution warning banner that names `token` as the confirmation word.
pub fn format_warning_with_token(command: &str, token: &str) -> String {
    format_analysis(&analyze(command), Some(token))
}

/// Render an existing analysis as a warning banner.
///
/// Empty below `Caution`. The confirmation line naming `confirm_token` is
/// only added for `Dangerous` and above, and is left out when `confirm_token`
/// is `None` (the run is already approved).
pub fn format_analysis(result: &AnalysisResult, confirm_token: Option<&str>) -> String {
    if result.level < DangerLevel::Caution {
        return String::new();
    }

    let paint = |text: String| match result.level {
        DangerLevel::Safe => text.green().to_string(),
        DangerLevel::Caution => text.yellow().to_string(),
        DangerLevel::Dangerous => text.red().to_string(),
        DangerLevel::Critical => text.red().bold().to_string(),
    };

    let mut out = paint(format!("⚠️  {} Warning", level_name(result.level)));
    out.push('\n');
    for warning in &result.warnings {
        out.push_str("   • ");
        out.push_str(warning);
        out.push('\n');
    }

    if let Some(token) = confirm_token.filter(|_| result.is_dangerous) {
        out.push('\n');
        out.push_str(&paint(format!(
            "   Type '{token}' to confirm execution, or any other key to cancel."
        )));
    }

    out
}
