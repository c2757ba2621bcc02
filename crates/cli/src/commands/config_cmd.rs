//! `parley config` — Configuration management commands.

use parley_config::AppConfig;

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();

            if !config.knowledge.source.exists() {
                warnings.push(format!(
                    "Knowledge source {} does not exist (fallback only)",
                    config.knowledge.source.display()
                ));
            }

            for rule in config.unreachable_rules() {
                warnings.push(format!(
                    "Context rule for topic '{}' has no trigger",
                    rule.topic
                ));
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Knowledge: {}", config.knowledge.source.display());
            println!("   Language:  {}", config.speech.language);
            println!("   Triggers:  {}", config.context.triggers.len());
            println!("   Rules:     {}", config.context.rules.len());
            println!("   Fallback:  {}", config.fallback_response);
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}
