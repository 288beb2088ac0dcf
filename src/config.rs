use ai_tokenizer::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_CONFIG: &str = ".ai-tokenizer.toml";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub model: Option<String>,
    pub encoding: Option<String>,
    pub budget: Option<usize>,
    pub chunk_size: Option<usize>,
    pub format: Option<String>,
    pub no_color: Option<bool>,
    pub heuristic: Option<bool>,
}

impl Config {
    pub fn merge(&mut self, other: Config) {
        if other.model.is_some() {
            self.model = other.model;
        }
        if other.encoding.is_some() {
            self.encoding = other.encoding;
        }
        if other.budget.is_some() {
            self.budget = other.budget;
        }
        if other.chunk_size.is_some() {
            self.chunk_size = other.chunk_size;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
        if other.no_color.is_some() {
            self.no_color = other.no_color;
        }
        if other.heuristic.is_some() {
            self.heuristic = other.heuristic;
        }
    }

    /// Read a config file. Missing files give `None`; files that fail to parse
    /// are reported and skipped.
    pub fn from_file(path: &Path) -> Option<Config> {
        let content = fs::read_to_string(path).ok()?;
        match toml::from_str::<Config>(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Config files in load order, later files overriding earlier ones.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. Global config: ~/.ai-tokenizer/config.toml
    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".ai-tokenizer").join("config.toml"));
    }

    // 2. Local config: ./.ai-tokenizer.toml
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(LOCAL_CONFIG));
    }

    paths
}

pub fn load_from(paths: &[PathBuf]) -> Config {
    let mut config = Config::default();
    for path in paths {
        if let Some(layer) = Config::from_file(path) {
            config.merge(layer);
        }
    }
    config
}

pub fn load_config() -> Config {
    load_from(&config_paths())
}

/// Settings shared by every subcommand once flags and config are combined.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: Config,
    pub format: OutputFormat,
    pub color: bool,
}

impl Settings {
    pub fn resolve(
        config: Config,
        format_flag: Option<&str>,
        no_color_flag: bool,
    ) -> Result<Self, String> {
        let format = match format_flag.or(config.format.as_deref()) {
            Some(fmt) => fmt.parse::<OutputFormat>()?,
            None => OutputFormat::Text,
        };
        let color = !(no_color_flag || config.no_color.unwrap_or(false));

        Ok(Settings {
            config,
            format,
            color,
        })
    }

    pub fn model(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.config.model.clone())
            .unwrap_or_else(|| ai_tokenizer::models::DEFAULT_MODEL.to_string())
    }

    pub fn encoding(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.config.encoding.clone())
    }

    pub fn budget(&self, flag: Option<usize>) -> Option<usize> {
        flag.or(self.config.budget)
    }

    pub fn heuristic(&self, flag: bool) -> bool {
        flag || self.config.heuristic.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_parsing() {
        let toml_str = r#"
            model = "gpt-4o"
            budget = 2000
            heuristic = true
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.budget, Some(2000));
        assert_eq!(config.heuristic, Some(true));
        assert_eq!(config.encoding, None);
    }

    #[test]
    fn test_config_merge() {
        let mut c1 = Config {
            model: Some("gpt-4".to_string()),
            budget: Some(100),
            ..Config::default()
        };
        let c2 = Config {
            model: Some("gpt-4o".to_string()),
            ..Config::default()
        };
        c1.merge(c2);
        assert_eq!(c1.model.as_deref(), Some("gpt-4o"));
        assert_eq!(c1.budget, Some(100));
    }

    #[test]
    fn test_load_layers() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let local = dir.path().join("local.toml");
        let broken = dir.path().join("broken.toml");
        fs::write(&global, "model = \"gpt-4\"\nbudget = 100\n").unwrap();
        fs::write(&local, "budget = 50\n").unwrap();
        fs::write(&broken, "budget = [").unwrap();

        let config = load_from(&[
            global,
            dir.path().join("missing.toml"),
            broken,
            local,
        ]);
        assert_eq!(config.model.as_deref(), Some("gpt-4"));
        assert_eq!(config.budget, Some(50));
    }

    #[test]
    fn test_settings_precedence() {
        let config = Config {
            model: Some("gpt-4o".to_string()),
            format: Some("json".to_string()),
            no_color: Some(true),
            ..Config::default()
        };
        let settings = Settings::resolve(config, Some("xml"), false).unwrap();
        assert_eq!(settings.format, OutputFormat::Xml);
        assert!(!settings.color);
        assert_eq!(settings.model(None), "gpt-4o");
        assert_eq!(settings.model(Some("ada".to_string())), "ada");
        assert_eq!(settings.budget(None), None);
        assert!(!settings.heuristic(false));

        let defaults = Settings::resolve(Config::default(), None, false).unwrap();
        assert_eq!(defaults.format, OutputFormat::Text);
        assert!(defaults.color);
        assert_eq!(defaults.model(None), "gpt-4");

        assert!(Settings::resolve(Config::default(), Some("yaml"), false).is_err());
    }
}
