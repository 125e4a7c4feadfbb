use std::path::{Path, PathBuf};

/// Env var overriding the config directory
pub const CONFIG_DIR_ENV: &str = "PROPBOX_CONFIG_DIR";

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Create PathConfig from CLI arguments and environment variables
    ///
    /// Priority: CLI args → ENV var (PROPBOX_CONFIG_DIR) → None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from));

        Self { config_dir }
    }
}

/// Get path to a configuration file
///
/// Priority:
/// 1. CLI --config-dir argument
/// 2. PROPBOX_CONFIG_DIR environment variable
/// 3. Local folder IF a config file exists there (propbox.json)
/// 4. Platform-specific config directory from dirs-next (default)
///
/// Platform paths:
/// - Linux: ~/.config/propbox/{name}
/// - macOS: ~/Library/Application Support/propbox/{name}
/// - Windows: %APPDATA%\propbox\{name}
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    let cwd = std::env::current_dir().ok();
    resolve_config_dir(config, cwd.as_deref()).join(name)
}

/// Check if a config file exists in the given directory
fn has_local_config_files(dir: &Path) -> bool {
    dir.join(crate::config::CONFIG_FILE).exists()
}

/// Resolve the configuration directory, `cwd` being the candidate local folder
fn resolve_config_dir(config: &PathConfig, cwd: Option<&Path>) -> PathBuf {
    // Priority 1: Custom directory from CLI or ENV
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }

    // Priority 2: Local folder IF config files exist there
    if let Some(dir) = cwd.filter(|d| has_local_config_files(d)) {
        return dir.to_path_buf();
    }

    // Priority 3: Platform-specific config directory
    if let Some(dir) = dirs_next::config_dir() {
        return dir.join("propbox");
    }

    // Fallback: "." if everything else fails
    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_with_custom_dir() {
        let config = PathConfig {
            config_dir: Some(PathBuf::from("/custom")),
        };

        let path = config_file("test.json", &config);
        assert_eq!(path, PathBuf::from("/custom/test.json"));
    }

    #[test]
    fn test_cli_dir_wins_over_env() {
        let config = PathConfig::from_env_and_cli(Some(PathBuf::from("/from-cli")));
        assert_eq!(config.config_dir, Some(PathBuf::from("/from-cli")));
    }

    #[test]
    fn test_local_files_priority() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = PathConfig { config_dir: None };

        // No local file - platform default (or ".")
        let without_local = resolve_config_dir(&config, Some(temp_dir.path()));
        assert_ne!(without_local, temp_dir.path());

        // Local file present - use that folder
        std::fs::write(temp_dir.path().join(crate::config::CONFIG_FILE), "{}").unwrap();
        let with_local = resolve_config_dir(&config, Some(temp_dir.path()));
        assert_eq!(with_local, temp_dir.path());
    }
}
