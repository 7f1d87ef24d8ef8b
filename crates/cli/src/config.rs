use groovyscope_groovy::InferenceOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// `~/.groovyscope/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".groovyscope").join("config.json"))
}

/// Contents of the configuration file.
///
/// ```json
/// { "groovy_version": "2.4", "extra_imports": "groovy.transform.*", "sources": ["src/Model.groovy"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    #[serde(flatten)]
    pub options: InferenceOptions,
    /// Units added to every analysis, before those given with `--source`.
    pub sources: Vec<PathBuf>,
}

impl CliConfig {
    /// Reads `path`, or the default file when no path is given.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };
        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        let config: CliConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
