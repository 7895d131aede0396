pub mod config;
pub mod domain;
pub mod observability;
pub mod policy;
pub mod ruler;
pub mod rules;

pub use config::Config;
pub use domain::{Report, SetSelection, Strategy};
pub use rules::{ErrorKind, Predicate, Rule, RuleError, RuleSet};
pub use ruler::Ruler;
