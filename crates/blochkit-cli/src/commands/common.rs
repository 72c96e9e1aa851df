//! Shared helpers for CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use blochkit_codegen::CodeFormat;
use blochkit_engine::EngineConfig;

/// Return the default Blochkit configuration file (~/.blochkit/config.json).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".blochkit").join("config.json"))
}

/// Load the engine configuration.
///
/// An explicit path must exist. Without one, the default file is used if
/// present and built-in defaults otherwise.
pub fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    if let Some(path) = path {
        return EngineConfig::from_path(path)
            .with_context(|| format!("Failed to load config: {path}"));
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "loading default config");
            EngineConfig::from_path(&path)
                .with_context(|| format!("Failed to load config: {}", path.display()))
        }
        _ => Ok(EngineConfig::default()),
    }
}

/// Parse a code format name.
pub fn parse_format(name: &str) -> Result<CodeFormat> {
    name.parse::<CodeFormat>().map_err(|e| anyhow::anyhow!("{e}"))
}

/// Read a text file with a friendly error.
pub fn read_text(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}

/// Format an angle as a multiple of π where it is a simple fraction.
pub fn format_angle(angle: f64) -> String {
    use std::f64::consts::PI;

    if angle == 0.0 {
        return "0".to_string();
    }
    let sign = if angle < 0.0 { "-" } else { "" };
    let ratio = angle.abs() / PI;
    for denom in [1_u32, 2, 4, 8] {
        let scaled = ratio * f64::from(denom);
        if (scaled - scaled.round()).abs() < 1e-9 {
            let numer = scaled.round() as u32;
            return match (numer, denom) {
                (1, 1) => format!("{sign}π"),
                (n, 1) => format!("{sign}{n}π"),
                (1, d) => format!("{sign}π/{d}"),
                (n, d) => format!("{sign}{n}π/{d}"),
            };
        }
    }
    format!("{angle:.4}")
}
