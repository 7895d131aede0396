use std::path::PathBuf;

use clap::Parser;

use crate::domain::{SetSelection, Strategy};

/// Command line configuration for the `ruler` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "ruler")]
#[command(about = "Validate a JSON document against rule sets from a policy file")]
pub struct Config {
    /// Path to policy YAML file
    #[arg(long, default_value = "policy.yaml", env = "RULER_POLICY_PATH")]
    pub policy_path: PathBuf,

    /// Path to the JSON document to validate (reads stdin if not set)
    #[arg(long, env = "RULER_DATA_PATH")]
    pub data_path: Option<PathBuf>,

    /// Rule set to apply; repeat for several (applies all sets if not set)
    #[arg(long = "set", value_name = "NAME")]
    pub sets: Vec<String>,

    /// Evaluate every rule and report all failures instead of stopping at the first
    #[arg(long)]
    pub collect_all: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    pub log_level: String,
}

impl Config {
    /// Evaluation strategy selected on the command line.
    pub fn strategy(&self) -> Strategy {
        Strategy::from_fail_fast(!self.collect_all)
    }

    /// Rule sets selected on the command line.
    pub fn selection(&self) -> SetSelection {
        if self.sets.is_empty() {
            SetSelection::All
        } else {
            SetSelection::Many(self.sets.clone())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            policy_path: PathBuf::from("policy.yaml"),
            data_path: None,
            sets: Vec::new(),
            collect_all: false,
            json: false,
            log_level: "warn".to_string(),
        }
    }
}
