use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::ValueEnum;
use serde::Deserialize;
use tally::{ChainMode, DEFAULT_HISTORY_LIMIT};
use tracing::debug;

use crate::style::ColorChoice;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Values and annotated diagnostics
    #[default]
    Pretty,
    /// One JSON document per result
    Json,
}

/// Contents of `config.toml`, every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub format: Option<OutputFormat>,
    pub color: Option<ColorChoice>,
    pub chain: Option<ChainMode>,
    pub history_limit: Option<usize>,
}

/// Final settings after command line flags were applied on top of the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub format: OutputFormat,
    pub color: ColorChoice,
    pub chain: ChainMode,
    pub history_limit: usize,
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tally").join("config.toml"))
}

impl Config {
    /// Reads an explicitly given file, or the default one if it exists.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => match default_path() {
                Some(path) if path.is_file() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Error reading config file: {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn settings(
        &self,
        format: Option<OutputFormat>,
        color: Option<ColorChoice>,
        chain: Option<ChainMode>,
    ) -> Settings {
        Settings {
            format: format.or(self.format).unwrap_or_default(),
            color: color.or(self.color).unwrap_or_default(),
            chain: chain.or(self.chain).unwrap_or_default(),
            history_limit: self.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.settings(None, None, None),
            Settings {
                format: OutputFormat::Pretty,
                color: ColorChoice::Auto,
                chain: ChainMode::Continue,
                history_limit: DEFAULT_HISTORY_LIMIT,
            }
        );
    }

    #[test]
    fn all_keys() {
        let config = Config::parse(
            r#"
format = "json"
color = "never"
chain = "fresh"
history_limit = 5
"#,
        )
        .unwrap();
        let settings = config.settings(None, None, None);
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.color, ColorChoice::Never);
        assert_eq!(settings.chain, ChainMode::Fresh);
        assert_eq!(settings.history_limit, 5);
    }

    #[test]
    fn flags_override_file() {
        let config = Config::parse("format = \"json\"\nchain = \"fresh\"").unwrap();
        let settings = config.settings(Some(OutputFormat::Pretty), None, Some(ChainMode::Continue));
        assert_eq!(settings.format, OutputFormat::Pretty);
        assert_eq!(settings.chain, ChainMode::Continue);
    }

    #[test]
    fn unknown_key() {
        assert!(Config::parse("colour = \"never\"").is_err());
        assert!(Config::parse("format = \"xml\"").is_err());
    }

    #[test]
    fn missing_explicit_file() {
        assert!(Config::load(Some(Path::new("/nonexistent/tally.toml"))).is_err());
    }
}
