use crate::viz::LabelMaskOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct LabelReportConfig {
    /// Label slices in stacking order.
    pub inputs: Vec<PathBuf>,
    #[serde(default)]
    pub labels: LabelMaskOptions,
    #[serde(default)]
    pub animation: AnimationConfig,
    pub output: LabelReportOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub frames: usize,
    pub bounce: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: 18,
            bounce: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LabelReportOutputConfig {
    #[serde(rename = "report_json")]
    pub report_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<LabelReportConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn parse_config(data: &str) -> Result<LabelReportConfig, serde_json::Error> {
    serde_json::from_str(data)
}
