pub mod loader;

pub use loader::{build_ruler, load_policy, parse_policy, PolicyError, PolicyLoader};
