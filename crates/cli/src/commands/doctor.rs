//! `parley doctor` — Diagnose config and knowledge source.

use std::path::Path;

use parley_config::{AppConfig, ConfigError};
use parley_knowledge::{CsvFileLoader, KnowledgeLoader};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Parley Doctor — System Diagnostics");
    println!("=====================================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_path();
    let config = match resolve_config(&config_path, |key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            println!("  ❌ Config file invalid: {e}");
            println!("\n  ⚠️  Cannot continue without a valid config.");
            return Ok(());
        }
    };

    if config_path.exists() {
        println!("  ✅ Config file valid");
    } else {
        println!("  ⚠️  No config file — using defaults (run `parley onboard`)");
        issues += 1;
    }

    for rule in config.unreachable_rules() {
        println!(
            "  ⚠️  Context rule for topic '{}' can never fire (no trigger sets that topic)",
            rule.topic
        );
        issues += 1;
    }

    issues += check_knowledge(&config);

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}

/// The configuration `chat` and `ask` would run with, env overrides included,
/// whether or not the config file exists.
fn resolve_config(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig, ConfigError> {
    AppConfig::load_with_env(path, env)
}

/// Report on the configured knowledge source. Returns the number of issues.
fn check_knowledge(config: &AppConfig) -> usize {
    let loader = CsvFileLoader::new(&config.knowledge.source);
    match loader.load() {
        Ok(table) if table.is_empty() => {
            println!("  ⚠️  Knowledge source {} has no entries", loader.describe());
            1
        }
        Ok(table) => {
            println!(
                "  ✅ Knowledge source {} — {} entries",
                loader.describe(),
                table.len()
            );
            if table.skipped_rows() > 0 {
                println!(
                    "  ⚠️  {} malformed row(s) skipped (need pattern,response)",
                    table.skipped_rows()
                );
                1
            } else {
                0
            }
        }
        Err(e) => {
            println!("  ❌ {e}");
            println!("     Every utterance will get the fallback response.");
            1
        }
    }
}
