use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use super::error::{RuleError, SharedError};
use super::traits::{BoxError, Fallible, Predicate};

/// Identity of a rule inside a rule set.
///
/// Two rules are the same rule when they carry the same name and share
/// the same predicate instance. A different predicate under the same
/// name is a different rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleKey {
    name: String,
    predicate: usize,
}

impl RuleKey {
    /// Rule name part of the key.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named predicate with an optional custom error.
///
/// Rules are immutable once built. Cloning a rule keeps its identity,
/// so a clone added next to the original is rejected as a duplicate.
pub struct Rule<T: ?Sized> {
    name: String,
    predicate: Option<Arc<dyn Predicate<T>>>,
    error: Option<SharedError>,
}

impl<T: ?Sized> Rule<T> {
    /// Create a rule from an infallible closure.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Rule::from_predicate(name, Arc::new(predicate))
    }

    /// Create a rule from a closure that may fail to reach a verdict.
    pub fn fallible<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        Rule::from_predicate(name, Arc::new(Fallible(predicate)))
    }

    /// Create a rule around a shared predicate.
    pub fn from_predicate(name: impl Into<String>, predicate: Arc<dyn Predicate<T>>) -> Self {
        Rule {
            name: name.into(),
            predicate: Some(predicate),
            error: None,
        }
    }

    /// Create a rule with no predicate. Executing it is a configuration error.
    pub fn without_predicate(name: impl Into<String>) -> Self {
        Rule {
            name: name.into(),
            predicate: None,
            error: None,
        }
    }

    /// Raise `error` instead of the generic failure when this rule rejects
    /// the data under fail-fast evaluation.
    pub fn with_error<E>(mut self, error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.error = Some(Arc::new(error));
        self
    }

    /// Rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The configured custom error, if any.
    pub fn error(&self) -> Option<&SharedError> {
        self.error.as_ref()
    }

    /// Identity used for duplicate detection.
    pub fn key(&self) -> RuleKey {
        let predicate = self
            .predicate
            .as_ref()
            .map_or(0, |p| Arc::as_ptr(p) as *const () as usize);

        RuleKey {
            name: self.name.clone(),
            predicate,
        }
    }

    /// Run the predicate against the data.
    pub fn execute(&self, data: &T) -> Result<bool, RuleError> {
        let predicate = self
            .predicate
            .as_ref()
            .ok_or_else(|| RuleError::MissingPredicate {
                rule: self.name.clone(),
            })?;

        predicate
            .evaluate(data)
            .map_err(|source| RuleError::Predicate {
                rule: self.name.clone(),
                source: Arc::from(source),
            })
    }
}

impl<T: ?Sized> Clone for Rule<T> {
    fn clone(&self) -> Self {
        Rule {
            name: self.name.clone(),
            predicate: self.predicate.clone(),
            error: self.error.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("has_predicate", &self.predicate.is_some())
            .field("error", &self.error.as_ref().map(|e| e.to_string()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::error::ErrorKind;
    use serde_json::{json, Value};
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error("custom error")]
    struct Custom;

    #[test]
    fn test_rule_name_and_execution() {
        let rule = Rule::new("test-rule", |_: &Value| true);

        assert_eq!(rule.name(), "test-rule");
        assert!(rule.execute(&json!({"some": 1})).unwrap());
    }

    #[test]
    fn test_missing_predicate() {
        let rule: Rule<Value> = Rule::without_predicate("test-rule");

        let err = rule.execute(&json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.to_string(), "Rule 'test-rule' doesn't have a predicate");
    }

    #[test]
    fn test_custom_error_is_kept() {
        let rule = Rule::new("test-rule", |_: &Value| false).with_error(Custom);

        assert!(!rule.execute(&json!({})).unwrap());
        let error = rule.error().unwrap();
        assert!(error.downcast_ref::<Custom>().is_some());
        assert_eq!(error.to_string(), "custom error");
    }

    #[test]
    fn test_predicate_failure_propagates() {
        let rule = Rule::fallible("age", |v: &Value| -> Result<bool, BoxError> {
            let age = v["age"].as_u64().ok_or("age is not a number")?;
            Ok(age >= 18)
        });

        assert!(rule.execute(&json!({"age": 20})).unwrap());
        assert!(!rule.execute(&json!({"age": 3})).unwrap());

        let err = rule.execute(&json!({"age": "old"})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Predicate);
        assert!(err.to_string().contains("age is not a number"));
    }

    #[test]
    fn test_identity() {
        let rule = Rule::new("r1", |_: &Value| true);
        let same_name_other_predicate = Rule::new("r1", |_: &Value| true);

        assert_eq!(rule.key(), rule.clone().key());
        assert_ne!(rule.key(), same_name_other_predicate.key());

        let shared: Arc<dyn Predicate<Value>> = Arc::new(|_: &Value| true);
        let a = Rule::from_predicate("r2", shared.clone());
        let b = Rule::from_predicate("r2", shared.clone());
        let c = Rule::from_predicate("r3", shared);

        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
        assert_eq!(c.key().name(), "r3");
    }
}
