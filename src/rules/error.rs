use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Shared handle to a user supplied error.
pub type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

/// Errors raised while configuring or applying rules.
#[derive(Error, Debug, Clone)]
pub enum RuleError {
    #[error("Rule '{rule}' was already configured in RuleSet '{set}'")]
    DuplicateRule { set: String, rule: String },

    #[error("Rule '{rule}' is duplicated in the given rules")]
    DuplicateRuleInBatch { rule: String },

    #[error("Rule '{rule}' doesn't have a predicate")]
    MissingPredicate { rule: String },

    #[error("RuleSet '{set}' was already configured on the ruler")]
    DuplicateSet { set: String },

    #[error("RuleSet '{set}' is duplicated in the given rule sets")]
    DuplicateSetInBatch { set: String },

    #[error("Rule '{rule}' failed")]
    RuleFailed { set: String, rule: String },

    #[error("Rules [{}] failed", quoted(.rules))]
    RulesFailed { set: String, rules: Vec<String> },

    /// The custom error configured on the failing rule, shown verbatim.
    #[error("{error}")]
    Custom { rule: String, error: SharedError },

    #[error("Rule '{rule}' could not be evaluated: {source}")]
    Predicate {
        rule: String,
        #[source]
        source: SharedError,
    },

    #[error("RuleSet '{set}' not found on the ruler")]
    SetNotFound { set: String },

    #[error("No rules configured on rule set {set}")]
    EmptySet { set: String },
}

/// Broad category of a [`RuleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Building or mutating a container went wrong
    Configuration,
    /// One or more rules rejected the data
    Evaluation,
    /// A predicate could not produce a verdict
    Predicate,
    /// A requested rule set is not registered
    Lookup,
    /// The rule set cannot be applied in its current shape
    Structural,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration"),
            ErrorKind::Evaluation => write!(f, "evaluation"),
            ErrorKind::Predicate => write!(f, "predicate"),
            ErrorKind::Lookup => write!(f, "lookup"),
            ErrorKind::Structural => write!(f, "structural"),
        }
    }
}

impl RuleError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuleError::DuplicateRule { .. }
            | RuleError::DuplicateRuleInBatch { .. }
            | RuleError::MissingPredicate { .. }
            | RuleError::DuplicateSet { .. }
            | RuleError::DuplicateSetInBatch { .. } => ErrorKind::Configuration,
            RuleError::RuleFailed { .. }
            | RuleError::RulesFailed { .. }
            | RuleError::Custom { .. } => ErrorKind::Evaluation,
            RuleError::Predicate { .. } => ErrorKind::Predicate,
            RuleError::SetNotFound { .. } => ErrorKind::Lookup,
            RuleError::EmptySet { .. } => ErrorKind::Structural,
        }
    }

    /// Names of the rules that rejected the data, in evaluation order.
    pub fn failed_rules(&self) -> Vec<&str> {
        match self {
            RuleError::RuleFailed { rule, .. } | RuleError::Custom { rule, .. } => {
                vec![rule.as_str()]
            }
            RuleError::RulesFailed { rules, .. } => rules.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// The custom error object a failing rule was configured with, if any.
    pub fn custom_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            RuleError::Custom { error, .. } => Some(error.as_ref()),
            _ => None,
        }
    }
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{}'", n))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Error, Debug)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn test_error_messages() {
        let err = RuleError::DuplicateRule {
            set: "set1".to_string(),
            rule: "rule1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Rule 'rule1' was already configured in RuleSet 'set1'"
        );

        let err = RuleError::RulesFailed {
            set: "set1".to_string(),
            rules: vec!["rule1".to_string(), "rule2".to_string()],
        };
        assert_eq!(err.to_string(), "Rules ['rule1', 'rule2'] failed");

        let err = RuleError::EmptySet {
            set: "set1".to_string(),
        };
        assert_eq!(err.to_string(), "No rules configured on rule set set1");
    }

    #[test]
    fn test_error_kinds() {
        let lookup = RuleError::SetNotFound {
            set: "X".to_string(),
        };
        assert_eq!(lookup.kind(), ErrorKind::Lookup);
        assert!(lookup.to_string().contains("'X'"));

        let batch = RuleError::DuplicateSetInBatch {
            set: "s".to_string(),
        };
        assert_eq!(batch.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_custom_error_is_verbatim() {
        let err = RuleError::Custom {
            rule: "r1".to_string(),
            error: Arc::new(Boom),
        };

        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.kind(), ErrorKind::Evaluation);
        assert_eq!(err.failed_rules(), vec!["r1"]);
        assert!(err.custom_error().unwrap().downcast_ref::<Boom>().is_some());
    }

    #[test]
    fn test_predicate_error_source() {
        let err = RuleError::Predicate {
            rule: "r1".to_string(),
            source: Arc::new(Boom),
        };

        assert_eq!(err.kind(), ErrorKind::Predicate);
        assert!(err.failed_rules().is_empty());
        assert_eq!(err.source().unwrap().to_string(), "boom");
    }
}
