//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments. Configuration is loaded once at startup
//! and passed down by value; nothing here is process-global.

use serde::{Deserialize, Serialize};

use crate::core::constants::{browser, config_files, output_formats, scanning};
use crate::core::error::{DokkupError, Result};
use crate::core::types::SecurityPolicy;
use crate::discovery::ScanOptions;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scan subdirectories of the root
    pub recursive: Option<bool>,

    /// Directory levels below the root that will be visited
    pub max_depth: Option<usize>,

    /// File extensions to process (without the dot)
    pub file_types: Option<Vec<String>>,

    /// URL schemes accepted by validation
    pub allowed_schemes: Option<Vec<String>>,

    /// Optional host allow-list for validation
    pub allowed_hosts: Option<Vec<String>>,

    /// Output format (text, json, markdown)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,

    /// Browser binary used to open links (None = system default)
    pub browser: Option<String>,

    /// Delay between consecutive browser opens in milliseconds
    pub open_delay_ms: Option<u64>,

    /// Cap on how many links one open-all may launch
    pub max_concurrent_opens: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recursive: Some(true),
            max_depth: Some(scanning::DEFAULT_MAX_DEPTH),
            file_types: None, // Will default to the standard extension
            allowed_schemes: None,
            allowed_hosts: None,
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
            browser: None,
            open_delay_ms: Some(browser::DEFAULT_OPEN_DELAY_MS),
            max_concurrent_opens: Some(browser::DEFAULT_MAX_CONCURRENT_OPENS),
        }
    }
}

/// CLI argument values relevant to configuration, merged over file values.
#[derive(Debug, Default, Clone)]
pub struct CliConfig {
    pub recursive: Option<bool>,
    pub max_depth: Option<usize>,
    pub file_types: Option<Vec<String>>,
    pub allowed_hosts: Option<Vec<String>>,
    pub output_format: Option<String>,
    pub browser: Option<String>,
    pub verbose: bool,
    pub quiet: bool,
    pub config_file: Option<String>,
    pub no_config: bool,
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DokkupError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            DokkupError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        // Check for .dokkup.toml in current directory
        if let Ok(config) = Self::load_from_file(config_files::FILE_NAME) {
            return config;
        }

        // Check in parent directories (up to a few levels)
        for i in 1..=config_files::PARENT_LEVELS {
            let path = format!("{}{}", "../".repeat(i), config_files::FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(recursive) = cli_config.recursive {
            self.recursive = Some(recursive);
        }
        if let Some(max_depth) = cli_config.max_depth {
            self.max_depth = Some(max_depth);
        }
        if let Some(ref file_types) = cli_config.file_types {
            self.file_types = Some(file_types.clone());
        }
        if let Some(ref allowed_hosts) = cli_config.allowed_hosts {
            self.allowed_hosts = Some(allowed_hosts.clone());
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if let Some(ref browser) = cli_config.browser {
            self.browser = Some(browser.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Recognized extensions as a lowercase set
    pub fn file_types_as_set(&self) -> HashSet<String> {
        match &self.file_types {
            Some(types) => types.iter().map(|t| t.to_ascii_lowercase()).collect(),
            None => {
                let mut set = HashSet::new();
                set.insert(scanning::DEFAULT_EXTENSION.to_string());
                set
            }
        }
    }

    /// The security policy validation runs under
    pub fn security_policy(&self) -> SecurityPolicy {
        let mut policy = SecurityPolicy::default();
        if let Some(ref schemes) = self.allowed_schemes {
            policy.allowed_schemes = schemes.clone();
        }
        policy.allowed_hosts = self.allowed_hosts.clone();
        policy
    }

    /// Scanner parameters derived from this configuration
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            recursive: self.recursive.unwrap_or(true),
            max_depth: self.max_depth.unwrap_or(scanning::DEFAULT_MAX_DEPTH),
            extensions: self.file_types_as_set(),
            policy: self.security_policy(),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(max_depth) = self.max_depth {
            if max_depth == 0 {
                return Err(DokkupError::Config(
                    "max_depth cannot be 0. Expected a positive number of directory levels."
                        .to_string(),
                ));
            }
            if max_depth > scanning::MAX_MAX_DEPTH {
                return Err(DokkupError::Config(format!(
                    "max_depth of {max_depth} is too large (limit {}).",
                    scanning::MAX_MAX_DEPTH
                )));
            }
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(DokkupError::Config(format!(
                "Unknown output_format '{}'. Expected one of: {}",
                format,
                output_formats::ALL.join(", ")
            )));
        }

        if let Some(ref file_types) = self.file_types {
            if file_types.is_empty() {
                return Err(DokkupError::Config(
                    "file_types cannot be an empty list.".to_string(),
                ));
            }
            for file_type in file_types {
                if file_type.trim().is_empty() || file_type.starts_with('.') {
                    return Err(DokkupError::Config(format!(
                        "Invalid file type '{file_type}'. Use bare extensions like 'dokk'."
                    )));
                }
            }
        }

        if let Some(ref schemes) = self.allowed_schemes
            && schemes.is_empty()
        {
            return Err(DokkupError::Config(
                "allowed_schemes cannot be an empty list.".to_string(),
            ));
        }

        if let Some(max_opens) = self.max_concurrent_opens
            && max_opens == 0
        {
            return Err(DokkupError::Config(
                "max_concurrent_opens cannot be 0.".to_string(),
            ));
        }

        Ok(())
    }
}
