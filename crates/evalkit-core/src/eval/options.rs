//! Options for a single evaluation run

use serde::{Deserialize, Serialize};

/// Output format used when none is given
pub const DEFAULT_OUTPUT_FORMAT: &str = "json";

/// Options handed to the evaluation collaborator.
///
/// Built once per invocation and moved into the call. `output_format` is
/// forwarded as given; `"json"` and `"csv"` are the documented values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvalRunOptions {
    /// Destination file for the results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Comma-separated evaluator ids, unsplit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluators: Option<String>,

    /// Accept all interactive prompts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,

    /// Result serialization format
    pub output_format: String,

    /// Whether prompts may be shown; always the negation of `force`
    pub interactive: bool,
}

impl EvalRunOptions {
    /// Build options, deriving `interactive` from `force`
    pub fn new(
        output: Option<String>,
        evaluators: Option<String>,
        force: Option<bool>,
        output_format: impl Into<String>,
    ) -> Self {
        Self {
            output,
            evaluators,
            force,
            output_format: output_format.into(),
            interactive: !force.unwrap_or(false),
        }
    }
}

impl Default for EvalRunOptions {
    fn default() -> Self {
        Self::new(None, None, None, DEFAULT_OUTPUT_FORMAT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interactive_is_negated_force() {
        for force in [None, Some(false), Some(true)] {
            let options = EvalRunOptions::new(None, None, force, "json");
            assert_eq!(options.interactive, !force.unwrap_or(false));
        }
    }

    #[test]
    fn test_default_format_is_json() {
        let options = EvalRunOptions::default();
        assert_eq!(options.output_format, "json");
        assert!(options.interactive);
        assert!(options.force.is_none());
    }

    #[test]
    fn test_serializes_camel_case_without_absent_fields() {
        let options = EvalRunOptions::new(None, Some("a,b".to_string()), None, "csv");
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "evaluators": "a,b",
                "outputFormat": "csv",
                "interactive": true
            })
        );
    }

    #[test]
    fn test_unknown_format_is_kept() {
        let options = EvalRunOptions::new(None, None, Some(true), "xml");
        assert_eq!(options.output_format, "xml");
        assert!(!options.interactive);
    }
}
