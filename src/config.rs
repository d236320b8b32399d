/// Configuration resolution module
///
/// This module handles:
/// - The report's branding and page setup (`ReportConfig`)
/// - Locating an optional TOML config file (flag, environment, user config dir)
/// - Validating that the page geometry leaves room for content
///
/// Every key is optional; an absent file or key keeps the built-in default.
use crate::error::{ReportError, Result};
use crate::layout::PageGeometry;
use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "CHEMVIZ_REPORT_CONFIG";

/// Branding and page setup shared by both report formats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Title page headline
    pub product_name: String,
    pub subtitle: String,
    /// Product/version line on the title page
    pub version_label: String,
    /// Detailed report filenames are `<prefix>_<YYYYMMDD>_<HHMMSS>.pdf`
    pub filename_prefix: String,
    /// Draw "Page N" on every page after the first
    pub page_numbers: bool,
    pub page: PageGeometry,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            product_name: "CHEMVIZ".to_string(),
            subtitle: "Equipment Analysis Report".to_string(),
            version_label: "ChemViz Systems v2.0.5".to_string(),
            filename_prefix: "ChemViz_Report".to_string(),
            page_numbers: true,
            page: PageGeometry::default(),
        }
    }
}

impl ReportConfig {
    /// Check that the configuration can produce a document
    pub fn validate(&self) -> Result<()> {
        if self.filename_prefix.trim().is_empty() {
            return Err(ReportError::Config("filename_prefix must not be empty".to_string()));
        }
        if self.filename_prefix.contains(['/', '\\']) {
            return Err(ReportError::Config(format!(
                "filename_prefix '{}' must not contain path separators",
                self.filename_prefix
            )));
        }
        let page = &self.page;
        if page.frame_width() <= 0.0 || page.frame_height() <= 0.0 {
            return Err(ReportError::Config(format!(
                "page margins leave no room for content ({}x{} pt page)",
                page.width, page.height
            )));
        }
        Ok(())
    }
}

/// Parse a TOML config document
pub fn parse_config(text: &str) -> Result<ReportConfig> {
    let config: ReportConfig = toml::from_str(text).map_err(|e| ReportError::Config(format!("Failed to parse TOML: {}", e)))?;
    config.validate()?;
    Ok(config)
}

/// Resolve the configuration.
///
/// Lookup order: explicit path, `CHEMVIZ_REPORT_CONFIG`, then
/// `<user config dir>/chemviz-report/config.toml`. An explicit path that
/// does not exist is an error; the implicit locations are skipped when absent.
pub fn load_config(explicit: Option<&Path>) -> Result<ReportConfig> {
    if let Some(path) = explicit {
        debug!("Using config from --config: {:?}", path);
        return read_config(path);
    }

    if let Ok(env_path) = env::var(CONFIG_ENV) {
        debug!("Using config from {}: {}", CONFIG_ENV, env_path);
        return read_config(Path::new(&env_path));
    }

    if let Some(path) = default_config_path()
        && path.exists()
    {
        debug!("Using config from {:?}", path);
        return read_config(&path);
    }

    debug!("No config file found, using defaults");
    Ok(ReportConfig::default())
}

/// Platform config location, e.g. `~/.config/chemviz-report/config.toml` on Linux
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("chemviz-report").join("config.toml"))
}

fn read_config(path: &Path) -> Result<ReportConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| ReportError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    parse_config(&text)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
