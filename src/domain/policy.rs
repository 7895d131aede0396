use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declarative description of rule sets built from field checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Policy version identifier
    #[serde(rename = "policy_version")]
    pub version: String,

    /// Rule set definitions, in registration order
    #[serde(default)]
    pub rule_sets: Vec<SetDef>,
}

impl Policy {
    /// Create an empty policy.
    pub fn empty() -> Self {
        Policy {
            version: "0.0.0".to_string(),
            rule_sets: Vec::new(),
        }
    }

    /// Total number of rule definitions across all sets.
    pub fn rule_count(&self) -> usize {
        self.rule_sets.iter().map(|s| s.rules.len()).sum()
    }
}

/// Definition of a rule set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDef {
    /// Unique rule set name
    pub name: String,

    /// Rules in evaluation order
    #[serde(default)]
    pub rules: Vec<RuleDef>,
}

/// Definition of a single rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDef {
    /// Rule name, unique inside its set
    pub name: String,

    /// JSON pointer to the checked value ("" is the whole document)
    #[serde(default)]
    pub field: String,

    /// Check applied to the value, written as `required` or `min: 18`
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub check: Check,

    /// Message raised instead of the generic failure (fail-fast only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Built-in checks on a JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// The field exists
    Required,
    /// The field exists and is not null
    NotNull,
    /// The field is not null, "", [] or {}
    NonEmpty,
    /// The field equals the value
    Equals(Value),
    /// The field equals one of the values
    OneOf(Vec<Value>),
    /// Numeric lower bound (inclusive)
    Min(f64),
    /// Numeric upper bound (inclusive)
    Max(f64),
    /// Minimum string length in characters, or array length
    MinLength(usize),
    /// Maximum string length in characters, or array length
    MaxLength(usize),
}

impl Check {
    /// Short name of the check.
    pub fn kind(&self) -> &'static str {
        match self {
            Check::Required => "required",
            Check::NotNull => "not_null",
            Check::NonEmpty => "non_empty",
            Check::Equals(_) => "equals",
            Check::OneOf(_) => "one_of",
            Check::Min(_) => "min",
            Check::Max(_) => "max",
            Check::MinLength(_) => "min_length",
            Check::MaxLength(_) => "max_length",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_policy_deserialization() {
        let yaml = r#"
policy_version: "2025-01-01.1"
rule_sets:
  - name: user
    rules:
      - name: has_email
        field: /email
        check: required
        message: email is required
      - name: adult
        field: /age
        check:
          min: 18
      - name: role
        field: /role
        check:
          one_of: [admin, member]
  - name: document
    rules:
      - name: object
        check: non_empty
"#;

        let policy: Policy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.version, "2025-01-01.1");
        assert_eq!(policy.rule_sets.len(), 2);
        assert_eq!(policy.rule_count(), 4);

        let user = &policy.rule_sets[0];
        assert_eq!(user.rules[0].check, Check::Required);
        assert_eq!(user.rules[0].message.as_deref(), Some("email is required"));
        assert_eq!(user.rules[1].check, Check::Min(18.0));
        assert_eq!(
            user.rules[2].check,
            Check::OneOf(vec![json!("admin"), json!("member")])
        );
        assert_eq!(policy.rule_sets[1].rules[0].field, "");
    }

    #[test]
    fn test_check_map_form() {
        let yaml = r#"
name: bio
field: /bio
check: { max_length: 10 }
"#;

        let rule: RuleDef = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rule.check, Check::MaxLength(10));

        let written = serde_yaml::to_string(&rule).unwrap();
        assert!(written.contains("max_length: 10"));
        assert!(!written.contains('!'));

        let unit: RuleDef = serde_yaml::from_str("name: r\ncheck: not_null\n").unwrap();
        assert_eq!(unit.check, Check::NotNull);
        assert_eq!(unit.field, "");
    }

    #[test]
    fn test_check_kind() {
        assert_eq!(Check::MaxLength(3).kind(), "max_length");
        assert_eq!(Check::Equals(json!(1)).kind(), "equals");
    }
}
