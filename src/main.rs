use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde_json::Value;
use tracing::info;

use ruler::config::Config;
use ruler::domain::Report;
use ruler::observability::init_tracing;
use ruler::policy::PolicyLoader;

fn main() -> anyhow::Result<ExitCode> {
    // Parse configuration
    let config = Config::parse();

    // Initialize tracing
    init_tracing(&config.log_level);

    // Load policy and build the ruler
    let loader = PolicyLoader::new(&config.policy_path);
    let (policy, ruler) = loader
        .load()
        .with_context(|| format!("Failed to load policy {}", config.policy_path.display()))?;

    info!(
        version = %policy.version,
        sets = ruler.count_sets(),
        rules = policy.rule_count(),
        "Loaded policy"
    );

    let data = read_data(config.data_path.as_deref())?;

    let selection = config.selection();
    let strategy = config.strategy();
    let sets: Vec<String> = match selection.names() {
        Some(names) => names.into_iter().map(str::to_string).collect(),
        None => ruler.rule_set_names().into_iter().map(str::to_string).collect(),
    };

    let result = ruler.apply(&data, selection, strategy);
    let report = Report::new(sets, strategy, &result);

    if config.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }

    info!(passed = report.passed, "Validation finished");

    Ok(if report.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Read the JSON document from a file, or stdin when no path is given.
fn read_data(path: Option<&Path>) -> anyhow::Result<Value> {
    let content = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read data from stdin")?;
            buf
        }
    };

    serde_json::from_str(&content).context("Data is not valid JSON")
}
