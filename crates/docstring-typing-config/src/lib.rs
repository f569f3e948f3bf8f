use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// How far an argument-taking annotation extends on a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketMatching {
    /// Up to the last `]` on the line
    #[default]
    Greedy,
    /// Up to the `]` closing the first bracket
    Balanced,
}

/// Adjustments to the standard type-hint vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    pub extra_argument_types: Vec<String>,
    pub extra_bare_types: Vec<String>,
    pub excluded: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    pub role: String,
    pub module: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            role: "py:obj".to_string(),
            module: "typing".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub bracket_matching: BracketMatching,
    pub decorations: String,
    pub vocabulary: VocabularyConfig,
    pub markup: MarkupConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bracket_matching: BracketMatching::default(),
            decorations: "*".to_string(),
            vocabulary: VocabularyConfig::default(),
            markup: MarkupConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/docstring-typing");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Expand `~` and environment variables in a user-supplied path.
    /// Paths that fail to expand are returned unchanged.
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => PathBuf::from(expanded.as_ref()),
            Err(_) => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/docstring-typing/config.toml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.decorations, "*");
        assert_eq!(config.markup.role, "py:obj");
    }

    #[test]
    fn test_full_config() {
        let config_content = r#"
bracket_matching = "balanced"
decorations = "*|"

[vocabulary]
extra_argument_types = ["Shaped"]
extra_bare_types = ["Never"]
excluded = ["Text"]

[markup]
role = "class"
"#;

        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(config.bracket_matching, BracketMatching::Balanced);
        assert_eq!(config.decorations, "*|");
        assert_eq!(config.vocabulary.extra_argument_types, vec!["Shaped"]);
        assert_eq!(config.vocabulary.extra_bare_types, vec!["Never"]);
        assert_eq!(config.vocabulary.excluded, vec!["Text"]);
        assert_eq!(config.markup.role, "class");
        assert_eq!(config.markup.module, "typing");
    }

    #[test]
    fn test_unknown_bracket_matching_is_rejected() {
        let result: Result<Config, _> = toml::from_str(r#"bracket_matching = "lazy""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(Path::new("~/test/path"));

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("DOCSTRING_TYPING_TEST_DIR", "/test/env/path");
        }

        let expanded = Config::expand_path(Path::new("$DOCSTRING_TYPING_TEST_DIR/config.toml"));
        assert_eq!(expanded, PathBuf::from("/test/env/path/config.toml"));

        unsafe {
            env::remove_var("DOCSTRING_TYPING_TEST_DIR");
        }
    }

    #[test]
    fn test_expand_path_with_unset_var_is_unchanged() {
        let path = Path::new("$DOCSTRING_TYPING_SURELY_UNSET/config.toml");
        assert_eq!(Config::expand_path(path), path.to_path_buf());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "decorations = [").unwrap();

        let error = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(error, ConfigError::ConfigParseError { .. }));
        assert!(error.to_string().starts_with("Failed to parse config file at"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            bracket_matching: BracketMatching::Balanced,
            vocabulary: VocabularyConfig {
                excluded: vec!["Text".to_string()],
                ..VocabularyConfig::default()
            },
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
