use config::{Config, ConfigError, File, FileFormat};
use extractors::ExtractorSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"
[extraction]
# Longest name accepted, in characters
max_name_length = 50
# Phone candidates need at least this many digits
min_phone_digits = 10
# Addresses must be strictly longer than min and strictly shorter than max
min_address_length = 10
max_address_length = 200
# Extra words that mark a line as a section header rather than a name
# extra_exclusions = ["department", "office"]

[extraction.extra_patterns]
# Additional regex alternatives, tried after the built-in ones
# email = []
# phone = ['ext\.\s*\d{4,}']
# address = []

[output]
# Characters of input text echoed back in the report
preview_chars = 500
pretty = true
"#;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CliConfig {
    pub extraction: Option<ExtractorSettings>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub preview_chars: usize,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            preview_chars: 500,
            pretty: true,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or from the per-user config file when none is given.
    /// The per-user file is created with commented defaults on first use.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let config_path = get_config_path();
                write_default_config(&config_path)?;
                config_path
            }
        };

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .build()?;

        let config: CliConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(content, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn extraction(&self) -> ExtractorSettings {
        self.extraction.clone().unwrap_or_default()
    }

    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }
}

fn write_default_config(config_path: &Path) -> Result<(), ConfigError> {
    if config_path.exists() {
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::Message(format!("Failed to create config directory: {e}"))
        })?;
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .map_err(|e| ConfigError::Message(format!("Failed to write default config: {e}")))
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("fieldscan").join("fieldscan.toml")
    } else {
        PathBuf::from("fieldscan.toml")
    }
}
