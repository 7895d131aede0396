use ahash::AHashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::domain::Strategy;

use super::error::RuleError;
use super::rule::{Rule, RuleKey};

static NEXT_SET_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_SET_ID.fetch_add(1, Ordering::Relaxed)
}

/// Identity of a rule set inside a ruler.
///
/// A rule set gets a fresh instance id when it is created and whenever
/// its rules change. Clones share the id until one of them changes. Two
/// separately built sets are different sets even when they have the same
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetKey {
    name: String,
    id: u64,
}

impl SetKey {
    /// Rule set name part of the key.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered, duplicate-free collection of rules applied together.
///
/// Rules are evaluated in insertion order.
pub struct RuleSet<T: ?Sized> {
    id: u64,
    name: String,
    rules: Vec<Rule<T>>,
    keys: AHashSet<RuleKey>,
}

impl<T: ?Sized> RuleSet<T> {
    /// Create an empty rule set.
    pub fn new(name: impl Into<String>) -> Self {
        RuleSet {
            id: next_id(),
            name: name.into(),
            rules: Vec::new(),
            keys: AHashSet::new(),
        }
    }

    /// Rule set name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity used for duplicate detection.
    pub fn key(&self) -> SetKey {
        SetKey {
            name: self.name.clone(),
            id: self.id,
        }
    }

    /// Append a rule to the end of the set.
    pub fn add_rule(&mut self, rule: Rule<T>) -> Result<(), RuleError> {
        let key = rule.key();

        if self.keys.contains(&key) {
            return Err(self.duplicate(&rule));
        }

        debug!(set = %self.name, rule = %rule.name(), "Rule added");
        self.keys.insert(key);
        self.rules.push(rule);
        self.id = next_id();
        Ok(())
    }

    /// Append a batch of rules.
    ///
    /// The whole batch is checked against the stored rules and against
    /// itself first. On any conflict nothing is added.
    pub fn add_many(&mut self, rules: impl IntoIterator<Item = Rule<T>>) -> Result<(), RuleError> {
        let rules: Vec<Rule<T>> = rules.into_iter().collect();
        let mut batch = AHashSet::with_capacity(rules.len());

        for rule in &rules {
            let key = rule.key();

            if self.keys.contains(&key) {
                return Err(self.duplicate(rule));
            }

            if !batch.insert(key) {
                return Err(RuleError::DuplicateRuleInBatch {
                    rule: rule.name().to_string(),
                });
            }
        }

        debug!(set = %self.name, count = rules.len(), "Rules added");
        self.keys.extend(batch);
        self.rules.extend(rules);
        self.id = next_id();
        Ok(())
    }

    /// Number of rules in the set.
    pub fn count_rules(&self) -> usize {
        self.rules.len()
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(Rule::name).collect()
    }

    /// Iterate over the rules in evaluation order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule<T>> {
        self.rules.iter()
    }

    /// Returns true if the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule to the data.
    ///
    /// Applying never changes the set, so repeated calls with the same
    /// data give the same result.
    pub fn apply(&self, data: &T, strategy: Strategy) -> Result<(), RuleError> {
        if self.rules.is_empty() {
            return Err(RuleError::EmptySet {
                set: self.name.clone(),
            });
        }

        match strategy {
            Strategy::FailFast => self.apply_fail_fast(data),
            Strategy::CollectAll => self.apply_collect_all(data),
        }
    }

    /// Stop at the first rule that rejects the data.
    fn apply_fail_fast(&self, data: &T) -> Result<(), RuleError> {
        for rule in &self.rules {
            if rule.execute(data)? {
                continue;
            }

            debug!(set = %self.name, rule = %rule.name(), "Rule failed");

            return Err(match rule.error() {
                Some(error) => RuleError::Custom {
                    rule: rule.name().to_string(),
                    error: error.clone(),
                },
                None => RuleError::RuleFailed {
                    set: self.name.clone(),
                    rule: rule.name().to_string(),
                },
            });
        }

        Ok(())
    }

    /// Run every rule and report all that rejected the data.
    fn apply_collect_all(&self, data: &T) -> Result<(), RuleError> {
        let mut failed = Vec::new();

        for rule in &self.rules {
            if !rule.execute(data)? {
                debug!(set = %self.name, rule = %rule.name(), "Rule failed");
                failed.push(rule.name().to_string());
            }
        }

        if failed.is_empty() {
            return Ok(());
        }

        Err(RuleError::RulesFailed {
            set: self.name.clone(),
            rules: failed,
        })
    }

    fn duplicate(&self, rule: &Rule<T>) -> RuleError {
        RuleError::DuplicateRule {
            set: self.name.clone(),
            rule: rule.name().to_string(),
        }
    }
}

impl<T: ?Sized> Clone for RuleSet<T> {
    fn clone(&self) -> Self {
        RuleSet {
            id: self.id,
            name: self.name.clone(),
            rules: self.rules.clone(),
            keys: self.keys.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for RuleSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("name", &self.name)
            .field("rules", &self.rule_names())
            .finish()
    }
}
