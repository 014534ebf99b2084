use anyhow::{Context, Result};
use std::path::Path;

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");

/// Writes the example configuration to `path`, refusing to overwrite.
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    println!("Created configuration at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AppConfig;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_setup_creates_config_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.yaml");

        setup_at_path(&config_path)?;

        let content = fs::read_to_string(&config_path)?;
        assert!(content.contains("# Example configuration file for pfolio"));
        assert!(content.contains("providers:"));
        assert!(content.contains("static_fallback: false"));

        Ok(())
    }

    #[test]
    fn test_setup_fails_if_config_exists() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "test")?;

        let result = setup_at_path(&config_path);
        assert!(result.unwrap_err().to_string().contains("already exists"));
        assert_eq!(fs::read_to_string(&config_path)?, "test");

        Ok(())
    }

    #[test]
    fn test_example_config_is_valid() -> Result<()> {
        let config: AppConfig = serde_yaml::from_str(EXAMPLE_CONFIG)
            .context("Failed to parse example config as YAML")?;

        assert_eq!(config.user, "default");
        assert!(!config.static_fallback);
        assert_eq!(config.refresh.max_concurrent_lookups, 4);
        assert_eq!(config.providers.binance_url(), "https://api.binance.com");

        Ok(())
    }

    #[test]
    fn test_example_deadline_can_be_disabled_as_documented() -> Result<()> {
        assert!(EXAMPLE_CONFIG.contains("Set to null to wait indefinitely"));

        let disabled = EXAMPLE_CONFIG.replace("deadline_secs: 30", "deadline_secs: null");
        let config: AppConfig = serde_yaml::from_str(&disabled)?;
        assert_eq!(config.refresh.options().deadline, None);

        let omitted = EXAMPLE_CONFIG.replace("deadline_secs: 30", "");
        let config: AppConfig = serde_yaml::from_str(&omitted)?;
        assert_eq!(
            config.refresh.options().deadline,
            Some(std::time::Duration::from_secs(30))
        );

        Ok(())
    }
}
