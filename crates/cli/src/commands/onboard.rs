//! `parley onboard` — First-time setup.

use parley_config::AppConfig;

const SAMPLE_DATASET: &str = concat!(
    "hello,Hi there! How can I help you?\n",
    "hi,Hello! What would you like to know?\n",
    "bye,Goodbye! Have a great day.\n",
    "\"how are you\",\"I'm just a program, but I'm doing fine. Thanks for asking!\"\n",
    "weather,I can't look outside, but I can tell you about the temperature if you ask.\n",
    "name,I'm Parley.\n",
    "thanks,You're welcome!\n",
);

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = AppConfig::config_path();
    let dataset_path = config_dir.join("dataset.csv");

    println!("💬 Parley — First-Time Setup");
    println!("============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if dataset_path.exists() {
        println!("  Knowledge file exists: {}", dataset_path.display());
    } else {
        std::fs::write(&dataset_path, SAMPLE_DATASET)?;
        println!("✅ Created sample knowledge file: {}", dataset_path.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        let mut config = AppConfig::default();
        config.knowledge.source = dataset_path.clone();
        std::fs::write(&config_path, toml::to_string_pretty(&config)?)?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Add (pattern, response) rows to {}", dataset_path.display());
        println!("   2. Run: parley chat");
        println!("   3. Start chatting!\n");
    }

    println!("🎉 Setup complete! Run `parley chat` to start.\n");

    Ok(())
}
