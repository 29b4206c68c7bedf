//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::Path,
};

use directories::ProjectDirs;
use log::{debug, info};

use vhdlfmt_core::config::FormatterConfig;

use crate::error::CliError;

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (`vhdlfmt.toml`)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to config file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<FormatterConfig, CliError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("vhdlfmt.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "vhdlfmt", "vhdlfmt") {
        let config_dir = proj_dirs.config_dir();
        let system_config = config_dir.join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    // 4. If no config is found, return default config
    debug!("No configuration file found, using default configuration");
    Ok(FormatterConfig::default())
}

/// Load configuration from a TOML file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
fn load_config_file(path: impl AsRef<Path>) -> Result<FormatterConfig, CliError> {
    let path = path.as_ref();

    // Check if file exists
    if !path.exists() {
        return Err(CliError::MissingConfig(path.to_path_buf()));
    }

    // Read file content
    let content = fs::read_to_string(path)?;

    // Parse TOML content
    let config: FormatterConfig =
        toml::from_str(&content).map_err(|e| CliError::ConfigParse(e.to_string()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use vhdlfmt_core::config::{CaseMode, NewlineMode};

    #[test]
    fn test_explicit_config_is_loaded() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp config file");
        writeln!(
            file,
            "keyword_case = \"uppercase\"\nnew_line_after_port = \"new_line\"\nindentation = \"    \""
        )
        .unwrap();

        let config = load_config(Some(file.path())).expect("config should load");
        assert_eq!(config.keyword_case, CaseMode::Uppercase);
        assert_eq!(config.new_line_after_port, NewlineMode::NewLine);
        assert_eq!(config.indentation, "    ");
        // untouched fields keep their defaults
        assert_eq!(config.name_case, CaseMode::Lowercase);
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let result = load_config(Some("/definitely/not/here.toml"));
        assert!(matches!(result, Err(CliError::MissingConfig(_))));
    }

    #[test]
    fn test_malformed_config_fails() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp config file");
        writeln!(file, "keyword_case = \"sideways\"").unwrap();

        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(CliError::ConfigParse(_))));
    }
}
