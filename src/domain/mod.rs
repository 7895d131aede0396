pub mod policy;
pub mod report;
pub mod selection;
pub mod strategy;

pub use policy::{Check, Policy, RuleDef, SetDef};
pub use report::{Report, ReportError};
pub use selection::SetSelection;
pub use strategy::Strategy;
