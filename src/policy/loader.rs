use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::domain::{Policy, RuleDef, SetDef};
use crate::rules::{FieldCheck, Rule, RuleError, RuleSet, Violation};
use crate::ruler::Ruler;

/// Errors that can occur during policy loading.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Rule configuration error: {0}")]
    Rules(#[from] RuleError),
}

/// Load a policy from a YAML file.
pub fn load_policy(path: impl AsRef<Path>) -> Result<Policy, PolicyError> {
    let content = fs::read_to_string(path)?;
    parse_policy(&content)
}

/// Parse and validate a policy from YAML text.
pub fn parse_policy(content: &str) -> Result<Policy, PolicyError> {
    let policy: Policy = serde_yaml::from_str(content)?;

    validate_policy(&policy)?;

    Ok(policy)
}

/// Validate policy configuration.
fn validate_policy(policy: &Policy) -> Result<(), PolicyError> {
    if policy.version.is_empty() {
        return Err(PolicyError::Validation(
            "Policy version cannot be empty".to_string(),
        ));
    }

    let mut seen_sets = HashSet::new();
    for set in &policy.rule_sets {
        if set.name.is_empty() {
            return Err(PolicyError::Validation(
                "Rule set name cannot be empty".to_string(),
            ));
        }

        if !seen_sets.insert(&set.name) {
            return Err(PolicyError::Validation(format!(
                "Duplicate rule set name: {}",
                set.name
            )));
        }

        validate_set(set)?;
    }

    Ok(())
}

fn validate_set(set: &SetDef) -> Result<(), PolicyError> {
    if set.rules.is_empty() {
        return Err(PolicyError::Validation(format!(
            "Rule set '{}' has no rules",
            set.name
        )));
    }

    let mut seen_rules = HashSet::new();
    for rule in &set.rules {
        if !seen_rules.insert(&rule.name) {
            return Err(PolicyError::Validation(format!(
                "Duplicate rule name '{}' in rule set '{}'",
                rule.name, set.name
            )));
        }

        if !rule.field.is_empty() && !rule.field.starts_with('/') {
            return Err(PolicyError::Validation(format!(
                "Field of rule '{}' must be a JSON pointer starting with '/': {}",
                rule.name, rule.field
            )));
        }
    }

    Ok(())
}

/// Build a rule from its definition.
fn build_rule(def: &RuleDef) -> Rule<Value> {
    let rule = Rule::from_predicate(
        def.name.clone(),
        Arc::new(FieldCheck::new(def.field.clone(), def.check.clone())),
    );

    match &def.message {
        Some(message) => rule.with_error(Violation {
            rule: def.name.clone(),
            message: message.clone(),
        }),
        None => rule,
    }
}

/// Build a ruler holding every rule set of the policy.
pub fn build_ruler(policy: &Policy) -> Result<Ruler<Value>, PolicyError> {
    let mut sets = Vec::with_capacity(policy.rule_sets.len());

    for def in &policy.rule_sets {
        let mut set = RuleSet::new(def.name.clone());
        set.add_many(def.rules.iter().map(build_rule))?;

        debug!(set = %def.name, rules = set.count_rules(), "Built rule set");
        sets.push(set);
    }

    let mut ruler = Ruler::new();
    ruler.add_many(sets)?;

    Ok(ruler)
}

/// Policy loader bound to a policy file.
pub struct PolicyLoader {
    policy_path: PathBuf,
}

impl PolicyLoader {
    /// Create a new policy loader.
    pub fn new(policy_path: impl Into<PathBuf>) -> Self {
        PolicyLoader {
            policy_path: policy_path.into(),
        }
    }

    /// Load the policy, returning it along with a ruler built from it.
    pub fn load(&self) -> Result<(Policy, Ruler<Value>), PolicyError> {
        let policy = load_policy(&self.policy_path)?;
        let ruler = build_ruler(&policy)?;

        Ok((policy, ruler))
    }

    /// Load only the policy (without building rules).
    pub fn load_policy(&self) -> Result<Policy, PolicyError> {
        load_policy(&self.policy_path)
    }

    /// Get the policy file path.
    pub fn policy_path(&self) -> &Path {
        &self.policy_path
    }
}
