//! JSON configuration for the `gradient_tool` binary.
use crate::gradient::GradientConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ToolConfig {
    /// Grayscale image to differentiate.
    pub input: PathBuf,
    /// Physical pixel size `[column, row]`; unit spacing when omitted.
    #[serde(default)]
    pub spacing: Option<[f64; 2]>,
    #[serde(default)]
    pub gradient: GradientConfig,
    /// Number of disjoint regions; one per worker thread when omitted.
    #[serde(default)]
    pub pieces: Option<usize>,
    pub output: ToolOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct ToolOutputConfig {
    pub magnitude_image: PathBuf,
    pub summary_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<ToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(data: &str) -> Result<ToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}
