use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::cli::CliArgs;
use crate::pymod;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Config {
    pub version: u32,
    /// Marker file that switches the search from ascent to a subtree scan.
    pub marker: String,
    /// Submodules a project package must contain, by short name.
    pub submodules: Vec<String>,
    /// Extensions probed for module sources.
    pub extensions: Vec<String>,
    pub manage: ManageConfig,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct ManageConfig {
    /// Management tool the discovered root is handed to.
    pub command: String,
    /// Prepend the project's parent directory to PYTHONPATH for the child.
    pub set_pythonpath: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            marker: ".djroot".to_string(),
            submodules: vec!["settings".to_string(), "urls".to_string()],
            extensions: pymod::DEFAULT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            manage: ManageConfig::default(),
        }
    }
}

impl Default for ManageConfig {
    fn default() -> Self {
        Self {
            command: "django-admin".to_string(),
            set_pythonpath: true,
        }
    }
}

pub fn get_default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", "djrun")
        .context("Failed to determine project directories")?;

    let config_dir = proj_dirs.config_dir();
    Ok(config_dir.join("djrun.toml"))
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p,
            None => get_default_config_path()?,
        };

        if !path.exists() {
            let default_config = Config::default();
            // Create directory if it doesn't exist
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .context("Failed to create config directory")?;
            }
            default_config.save(&path)?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    pub fn from_cli_and_file(cli_args: &CliArgs, config_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load(config_path)?;

        // CLI args override config file
        if let Some(marker) = &cli_args.marker {
            config.marker = marker.clone();
        }
        if let Some(command) = &cli_args.command {
            config.manage.command = command.clone();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.marker, ".djroot");
        assert_eq!(config.submodules, vec!["settings", "urls"]);
        assert_eq!(config.extensions, vec!["py", "pyc", "pyo"]);
        assert_eq!(config.manage.command, "django-admin");
        assert!(config.manage.set_pythonpath);
    }

    #[test]
    fn test_config_serialization_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.marker = ".anchor".to_string();
        config.submodules.push("wsgi".to_string());
        config.manage.set_pythonpath = false;

        let toml_str = toml::to_string(&config)?;
        let parsed_config: Config = toml::from_str(&toml_str)?;

        assert_eq!(config, parsed_config);
        Ok(())
    }

    #[test]
    fn test_config_load_nonexistent_creates_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load(Some(config_path.clone()))?;

        // Should create default config
        assert_eq!(config.version, 1);
        assert_eq!(config.marker, ".djroot");

        // Should have created the file
        assert!(config_path.exists());

        Ok(())
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("test.toml");

        let mut config = Config::default();
        config.marker = ".custom-marker".to_string();
        config.extensions = vec!["py".to_string()];

        config.save(&config_path)?;
        let loaded_config = Config::load(Some(config_path))?;

        assert_eq!(config.marker, loaded_config.marker);
        assert_eq!(config.extensions, loaded_config.extensions);

        Ok(())
    }

    #[test]
    fn test_cli_override() -> Result<()> {
        let cli_args = CliArgs {
            chdir: None,
            config: None,
            marker: Some(".override".to_string()),
            command: Some("./manage.py".to_string()),
            locate: false,
            args: vec![],
        };

        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("test.toml");

        // Create a config file with different values
        let original_config = Config {
            marker: ".original".to_string(),
            ..Config::default()
        };
        original_config.save(&config_path)?;

        // CLI should override
        let final_config = Config::from_cli_and_file(&cli_args, Some(config_path))?;
        assert_eq!(final_config.marker, ".override");
        assert_eq!(final_config.manage.command, "./manage.py");

        Ok(())
    }

    #[test]
    fn test_get_default_config_path() -> Result<()> {
        let path = get_default_config_path()?;
        assert!(path.ends_with("djrun.toml"));
        Ok(())
    }
}
