use serde::{Deserialize, Serialize};
use std::fmt;

/// How a rule set treats failing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Stop at the first failing rule and raise its error
    FailFast,
    /// Evaluate every rule and report all failing rule names
    CollectAll,
}

impl Strategy {
    /// Map a `fail_fast` flag onto a strategy.
    #[inline]
    pub fn from_fail_fast(fail_fast: bool) -> Self {
        if fail_fast {
            Strategy::FailFast
        } else {
            Strategy::CollectAll
        }
    }

    /// Returns true for fail-fast evaluation.
    #[inline]
    pub fn is_fail_fast(&self) -> bool {
        *self == Strategy::FailFast
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::FailFast
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::FailFast => write!(f, "fail_fast"),
            Strategy::CollectAll => write!(f, "collect_all"),
        }
    }
}
