pub mod builtin;
pub mod error;
pub mod rule;
pub mod set;
pub mod traits;

pub use builtin::{CheckError, FieldCheck, Violation};
pub use error::{ErrorKind, RuleError, SharedError};
pub use rule::{Rule, RuleKey};
pub use set::{RuleSet, SetKey};
pub use traits::{BoxError, Fallible, Predicate};
