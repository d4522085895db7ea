use crate::analysis::AnalysisMode;
use crate::record::DateRange;
/// Configuration module for the Trend analysis system
///
/// Settings are grouped per component and every optional field carries a
/// default, so a minimal file only needs the analysis date range. The
/// embedding application owns the loaded instance and passes the pieces to
/// the components that need them.
use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisConfig {
    pub range: DateRange,

    #[serde(default)]
    pub mode: AnalysisMode,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "ExportConfig::default_target")]
    pub target: String,
}

impl ExportConfig {
    fn default_target() -> String {
        "analysis-report.xlsx".to_string()
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            target: Self::default_target(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    pub fn from_toml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path))?;
        Self::from_toml_str(&content)
    }
}
