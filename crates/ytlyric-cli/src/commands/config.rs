use anyhow::Result;
use std::path::Path;
use ytlyric_core::config::Config;

pub async fn run(config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    println!("ytlyric configuration\n");
    print!("{}", config.to_toml_string()?);

    if config.lyrics.output_directory.is_none() {
        println!("\n# lyrics.output_directory = (next to each subtitle file)");
    }

    // Show config file locations
    println!("\nConfig sources (later entries override earlier ones):");
    if let Some(default_config) = Config::default_config_file() {
        println!("  1. {}", default_config.display());
    }
    if let Some(p) = config_path {
        println!("  2. {} (specified)", p.display());
    }
    println!("  3. Environment variables (YTLYRIC_*, e.g. YTLYRIC_BATCH__MAX_PARALLEL)");

    Ok(())
}
