//! Command-line interface definition

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::config::CliConfig;

#[derive(Debug, Parser)]
#[command(
    name = "dokkup",
    version,
    about = "Catalog, validate and open documentation links kept in .dokk files",
    long_about = "dokkup scans a directory tree for .dokk files, aggregates their\n\
                  \"description\" -> \"url\" entries into a catalog, and lists,\n\
                  validates, exports or opens them."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory to scan for link files
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub path: String,

    /// Show catalog statistics instead of the link list
    #[arg(long)]
    pub stats: bool,

    /// Check every cataloged URL for structural problems
    #[arg(long)]
    pub validate: bool,

    /// Open the links at these 1-based positions in the list
    #[arg(short, long, num_args = 1.., value_name = "INDEX", conflicts_with = "open_all")]
    pub open: Vec<usize>,

    /// Open every cataloged link
    #[arg(short = 'a', long)]
    pub open_all: bool,

    /// Only show links whose description contains this term
    #[arg(short, long, value_name = "TERM")]
    pub search: Option<String>,

    /// Output format for listing and export
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Write the listing to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<String>,

    /// Do not scan subdirectories
    #[arg(long)]
    pub no_recursive: bool,

    /// Directory levels below the root to visit
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// File extensions to process (comma separated, without the dot)
    #[arg(long = "include", value_delimiter = ',', value_name = "EXTENSIONS")]
    pub include: Option<Vec<String>>,

    /// Restrict validation to these hosts (comma separated)
    #[arg(long = "allow-host", value_delimiter = ',', value_name = "HOSTS")]
    pub allow_host: Option<Vec<String>>,

    /// Browser binary used to open links
    #[arg(short, long, value_name = "BROWSER")]
    pub browser: Option<String>,

    /// Disable colors in output
    #[arg(long)]
    pub no_color: bool,

    /// Only print the requested data, no diagnostics
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Use this config file instead of the discovered one
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Ignore any config file and use built-in defaults
    #[arg(long)]
    pub no_config: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a shell completion script on stdout
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Extract the configuration-relevant CLI values for merging
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        recursive: cli.no_recursive.then_some(false),
        max_depth: cli.max_depth,
        file_types: cli.include.clone(),
        allowed_hosts: cli.allow_host.clone(),
        output_format: cli.format.clone(),
        browser: cli.browser.clone(),
        verbose: cli.verbose,
        quiet: cli.quiet,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["dokkup"]);

        assert_eq!(cli.path, ".");
        assert!(cli.format.is_none());
        assert!(!cli.stats);
        assert!(!cli.validate);
        assert!(cli.open.is_empty());
        assert!(!cli.open_all);
        assert!(cli.search.is_none());
        assert!(!cli.no_recursive);
    }

    #[test]
    fn test_open_accepts_multiple_indices() {
        let cli = Cli::parse_from(["dokkup", "--open", "1", "3", "5"]);
        assert_eq!(cli.open, vec![1, 3, 5]);
    }

    #[test]
    fn test_open_conflicts_with_open_all() {
        let result = Cli::try_parse_from(["dokkup", "--open", "1", "--open-all"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_include_splits_on_commas() {
        let cli = Cli::parse_from(["dokkup", "--include", "dokk,links"]);
        assert_eq!(
            cli.include,
            Some(vec!["dokk".to_string(), "links".to_string()])
        );
    }

    #[test]
    fn test_cli_to_config__no_recursive_flag() {
        let cli = Cli::parse_from(["dokkup", "--no-recursive"]);
        let config = cli_to_config(&cli);
        assert_eq!(config.recursive, Some(false));

        let cli = Cli::parse_from(["dokkup"]);
        let config = cli_to_config(&cli);
        assert_eq!(config.recursive, None);
    }

    #[test]
    fn test_cli_to_config__carries_values() {
        let cli = Cli::parse_from([
            "dokkup",
            "--max-depth",
            "4",
            "--format",
            "json",
            "--allow-host",
            "docs.example.com",
            "--browser",
            "firefox",
            "--verbose",
        ]);
        let config = cli_to_config(&cli);

        assert_eq!(config.max_depth, Some(4));
        assert_eq!(config.output_format, Some("json".to_string()));
        assert_eq!(
            config.allowed_hosts,
            Some(vec!["docs.example.com".to_string()])
        );
        assert_eq!(config.browser, Some("firefox".to_string()));
        assert!(config.verbose);
    }

    #[test]
    fn test_completions_subcommand() {
        let cli = Cli::parse_from(["dokkup", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Completions { shell: Shell::Bash })
        ));
    }
}
