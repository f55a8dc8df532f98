// src/compiler/diagnostics.rs
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::invoker::EngineRun;

/// Failure categories surfaced to callers. Serialized names are part of the
/// API and must stay stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
    Timeout,
    SyntaxMisplacedLineBreak,
    UndefinedCommand,
    MathModeError,
    EngineReportedError,
    UnknownFailure,
}

/// A categorized, human-readable description of a failed compilation.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub category: ErrorCategory,
    pub message: String,
}

/// One entry in the classification table: a pattern matched against the
/// engine log, the category it maps to, and a message builder that may look
/// back at the full log text (e.g. to extract an offending command name).
struct LogRule {
    pattern: Regex,
    category: ErrorCategory,
    message: fn(log: &str, caps: &regex::Captures) -> String,
}

/// Classification rules in priority order. The table is data, not control
/// flow: new engine patterns are added here without touching `classify`.
static LOG_RULES: Lazy<Vec<LogRule>> = Lazy::new(|| {
    vec![
        LogRule {
            pattern: Regex::new(r"There's no line here to end").unwrap(),
            category: ErrorCategory::SyntaxMisplacedLineBreak,
            message: |_, _| {
                "LaTeX syntax error: a line-break command (\\\\) was used where no line can end. \
                 Check for \\\\ at the start of a paragraph, on an empty line, or at the start of \
                 an environment."
                    .to_string()
            },
        },
        LogRule {
            pattern: Regex::new(r"Undefined control sequence").unwrap(),
            category: ErrorCategory::UndefinedCommand,
            message: |log, _| {
                static COMMAND: Lazy<Regex> = Lazy::new(|| {
                    Regex::new(r"Undefined control sequence\.\s+[^\n]*\\([a-zA-Z0-9@]+)").unwrap()
                });
                let command = COMMAND
                    .captures(log)
                    .map(|caps| caps[1].to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                format!(
                    "LaTeX undefined command: \\{}. Check the command's spelling, or whether a \
                     required package is missing.",
                    command
                )
            },
        },
        LogRule {
            pattern: Regex::new(r"Missing \$ inserted").unwrap(),
            category: ErrorCategory::MathModeError,
            message: |_, _| {
                "LaTeX math mode error: a math symbol may have been used in plain text, or an \
                 opening ($) and closing math delimiter do not match."
                    .to_string()
            },
        },
        LogRule {
            pattern: Regex::new(r"!.*Error:(.*)").unwrap(),
            category: ErrorCategory::EngineReportedError,
            message: |_, caps| format!("LaTeX error: {}", caps[1].trim()),
        },
    ]
});

/// Classifies a failed run (no output file was produced).
///
/// A timed-out run short-circuits to `Timeout` regardless of whatever the
/// engine managed to write to its log before being killed. Otherwise the
/// rules are tried in priority order against the log text; when nothing
/// matches, or no log exists, the captured stderr is surfaced verbatim.
pub fn classify(run: &EngineRun, log_text: Option<&str>) -> Diagnostic {
    if run.timed_out {
        return Diagnostic {
            category: ErrorCategory::Timeout,
            message: "LaTeX compilation exceeded its time budget and was terminated.".to_string(),
        };
    }

    if let Some(log) = log_text {
        for rule in LOG_RULES.iter() {
            if let Some(caps) = rule.pattern.captures(log) {
                return Diagnostic {
                    category: rule.category,
                    message: (rule.message)(log, &caps),
                };
            }
        }
    }

    Diagnostic {
        category: ErrorCategory::UnknownFailure,
        message: format!("PDF generation failed: {}", run.stderr.trim()),
    }
}
