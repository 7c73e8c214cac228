use anyhow::Result;
use std::path::Path;
use studybuddy_infrastructure::{ConfigService, SecretService};

pub fn init(home: Option<&Path>) -> Result<()> {
    let path = ConfigService::new(home)?.ensure_config_file()?;
    println!("📝 Config: {}", path.display());
    Ok(())
}

pub fn set_api_key(home: Option<&Path>, key: &str) -> Result<()> {
    SecretService::new(home)?.set_gemini_api_key(key)?;
    println!("🔑 Gemini API key saved");
    Ok(())
}
