//! Configuration for truthlens.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (TRUTHLENS_HOME, TRUTHLENS_REPORTS)
//! 2. Config file (.truthlens/config.yaml)
//! 3. Defaults (~/.truthlens, reports under ~/.truthlens/reports)
//!
//! Config file discovery:
//! - Searches current directory and parents for .truthlens/config.yaml
//! - Paths in config file are relative to the .truthlens/ directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::generator::DEFAULT_LABEL;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub reveal: RevealSettings,
    #[serde(default)]
    pub default_label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .truthlens/)
    pub home: Option<String>,
    /// Report output directory (relative to .truthlens/)
    pub reports: Option<String>,
}

/// Reveal sequence timing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RevealSettings {
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_analysis_timeout")]
    pub analysis_timeout_seconds: u64,
}

fn default_initial_delay_ms() -> u64 {
    650
}
fn default_interval_ms() -> u64 {
    350
}
fn default_analysis_timeout() -> u64 {
    30
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            interval_ms: default_interval_ms(),
            analysis_timeout_seconds: default_analysis_timeout(),
        }
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to truthlens home
    pub home: PathBuf,
    /// Directory exported reports are written to
    pub reports: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Reveal timing
    pub reveal: RevealSettings,
    /// Label used when analyzing without a selected file
    pub default_label: String,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".truthlens").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn parse_config(content: &str) -> Result<ConfigFile> {
    Ok(serde_yaml::from_str(content)?)
}

/// Resolve a path that may be relative to the config directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Merge a parsed config file (if any) with environment overrides
fn resolve(
    config: Option<ConfigFile>,
    config_file: Option<PathBuf>,
    env_home: Option<String>,
    env_reports: Option<String>,
    default_home: PathBuf,
) -> ResolvedConfig {
    let config_dir = config_file
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or(Path::new("."))
        .to_path_buf();

    let paths = config
        .as_ref()
        .map(|c| c.paths.clone())
        .unwrap_or_default();

    let home = match (env_home, &paths.home) {
        (Some(env), _) => PathBuf::from(env),
        (None, Some(home)) => resolve_path(&config_dir, home),
        (None, None) => default_home,
    };

    let reports = match (env_reports, &paths.reports) {
        (Some(env), _) => PathBuf::from(env),
        (None, Some(reports)) => resolve_path(&config_dir, reports),
        (None, None) => home.join("reports"),
    };

    let (reveal, default_label) = match config {
        Some(c) => (
            c.reveal,
            c.default_label
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| DEFAULT_LABEL.to_string()),
        ),
        None => (RevealSettings::default(), DEFAULT_LABEL.to_string()),
    };

    ResolvedConfig {
        home,
        reports,
        config_file,
        reveal,
        default_label,
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".truthlens");

    let config_file = find_config_file();
    let config = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    Ok(resolve(
        config,
        config_file,
        std::env::var("TRUTHLENS_HOME").ok(),
        std::env::var("TRUTHLENS_REPORTS").ok(),
        default_home,
    ))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Get the directory exported reports are written to
pub fn reports_dir() -> Result<PathBuf> {
    Ok(config()?.reports.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file_or_env() {
        let home = PathBuf::from("/home/user/.truthlens");
        let config = resolve(None, None, None, None, home.clone());

        assert_eq!(config.home, home);
        assert_eq!(config.reports, home.join("reports"));
        assert_eq!(config.reveal, RevealSettings::default());
        assert_eq!(config.default_label, "uploaded_document.pdf");
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".truthlens");
        std::fs::create_dir_all(&dir).unwrap();

        let config_path = dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
paths:
  reports: /tmp/truthlens-reports
reveal:
  initial_delay_ms: 100
default_label: input
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.reports.as_deref(), Some("/tmp/truthlens-reports"));
        assert_eq!(config.reveal.initial_delay_ms, 100);
        // Unset keys fall back to defaults
        assert_eq!(config.reveal.interval_ms, 350);
        assert_eq!(config.reveal.analysis_timeout_seconds, 30);
        assert_eq!(config.default_label.as_deref(), Some("input"));
    }

    #[test]
    fn test_env_overrides_config_paths() {
        let config = parse_config(
            r#"
version: "1.0"
paths:
  home: /srv/truthlens
  reports: /srv/truthlens/out
"#,
        )
        .unwrap();

        let resolved = resolve(
            Some(config),
            Some(PathBuf::from("/project/.truthlens/config.yaml")),
            None,
            Some("/override/reports".to_string()),
            PathBuf::from("/home/user/.truthlens"),
        );

        assert_eq!(resolved.home, PathBuf::from("/srv/truthlens"));
        assert_eq!(resolved.reports, PathBuf::from("/override/reports"));
    }

    #[test]
    fn test_empty_default_label_is_ignored() {
        let config = parse_config("version: \"1.0\"\ndefault_label: \"\"\n").unwrap();
        let resolved = resolve(Some(config), None, None, None, PathBuf::from("/h"));

        assert_eq!(resolved.default_label, DEFAULT_LABEL);
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        assert!(parse_config("version: [unterminated").is_err());
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project/.truthlens");

        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
        assert_eq!(
            resolve_path(&base, "../reports"),
            PathBuf::from("/home/user/project/.truthlens/../reports")
        );
    }
}
