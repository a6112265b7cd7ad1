use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct AutocropToolConfig {
    pub input: InputConfig,
    /// Elements must be strictly greater than this value to be kept.
    #[serde(default)]
    pub threshold: u8,
    pub output: AutocropOutputConfig,
}

/// A single image (2-D crop) or an ordered list of slices (3-D crop).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InputConfig {
    Image(PathBuf),
    Stack(Vec<PathBuf>),
}

#[derive(Debug, Deserialize)]
pub struct AutocropOutputConfig {
    /// Image file for 2-D input, slice directory for stacks.
    pub cropped: PathBuf,
    #[serde(rename = "report_json")]
    pub report_json: PathBuf,
    #[serde(default)]
    pub allow_overwrite: bool,
    #[serde(default = "default_file_ext")]
    pub file_ext: String,
}

fn default_file_ext() -> String {
    "png".to_string()
}

pub fn load_config(path: &Path) -> Result<AutocropToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<AutocropToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}
