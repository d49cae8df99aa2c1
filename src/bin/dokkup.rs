use clap::{CommandFactory, Parser};
use dokkup::browser::BrowserOpener;
use dokkup::catalog::Catalog;
use dokkup::config::{CliConfig, Config};
use dokkup::core::constants::{browser, output_formats};
use dokkup::discovery::Scanner;
use dokkup::export::ExportFormat;
use dokkup::logging;
use dokkup::ui::color::supports_formatting;
use dokkup::ui::output;
use dokkup::ui::{Cli, Commands, cli_to_config};

use std::fs;
use std::path::Path;

fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run_dokkup_logic(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if one was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut app = Cli::command();
            let name = app.get_name().to_string();
            clap_complete::generate(shell, &mut app, name, &mut std::io::stdout());
            Some(0)
        }
        None => None,
    }
}

/// Main catalog logic extracted from main() for testing
pub fn run_dokkup_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    logging::init_logger(config.verbose.unwrap_or(false), cli.quiet);

    let format: ExportFormat = config
        .output_format
        .as_deref()
        .unwrap_or(output_formats::DEFAULT)
        .parse()?;
    let color = !cli.no_color && supports_formatting();

    let catalog = scan_catalog(cli, &config)?;

    if cli.stats {
        run_stats_mode(&catalog, color);
        return Ok(0);
    }
    if cli.validate {
        return Ok(run_validate_mode(&catalog, color));
    }
    if cli.open_all || !cli.open.is_empty() {
        return Ok(run_open_mode(cli, &config, &catalog));
    }
    run_list_mode(cli, &catalog, format, color)
}

/// Load configuration from file or standard locations and merge with CLI
pub fn load_and_merge_config(
    cli_config: &CliConfig,
) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // CLI arguments take precedence over file values
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Run one scan pass and log its outcome
pub fn scan_catalog(cli: &Cli, config: &Config) -> Result<Catalog, Box<dyn std::error::Error>> {
    let options = config.scan_options();
    let root = Path::new(&cli.path);
    logging::log_scan_start(root, options.recursive, options.max_depth);

    let start = std::time::Instant::now();
    let catalog = Scanner::new(options).scan(root)?;
    let stats = catalog.statistics();
    logging::log_scan_complete(
        stats.total_entries,
        stats.total_files,
        stats.total_errors,
        start.elapsed().as_millis(),
    );

    Ok(catalog)
}

/// Show catalog statistics
pub fn run_stats_mode(catalog: &Catalog, color: bool) {
    output::display_statistics(&catalog.statistics(), color);
}

/// Check every cataloged URL; issues make the run fail
pub fn run_validate_mode(catalog: &Catalog, color: bool) -> i32 {
    let issues = catalog.validate();
    logging::log_validation(catalog.all().len(), issues.len());
    output::display_validation_issues(&issues, color);

    if issues.is_empty() { 0 } else { 1 }
}

/// Open selected links (or all of them) in a browser
pub fn run_open_mode(cli: &Cli, config: &Config, catalog: &Catalog) -> i32 {
    let opener = BrowserOpener::new(
        config.browser.clone(),
        config
            .open_delay_ms
            .unwrap_or(browser::DEFAULT_OPEN_DELAY_MS),
        config
            .max_concurrent_opens
            .unwrap_or(browser::DEFAULT_MAX_CONCURRENT_OPENS),
    );

    let (targets, invalid) = if cli.open_all {
        (catalog.all().to_vec(), Vec::new())
    } else {
        catalog.select_indices(&cli.open)
    };

    for index in &invalid {
        eprintln!(
            "Invalid link number: {index} (expected 1..={})",
            catalog.all().len()
        );
    }

    let urls: Vec<&str> = targets.iter().map(|entry| entry.url()).collect();
    let opened = opener.open_many(&urls);
    if !cli.quiet {
        println!("Opened {opened} of {} link(s)", urls.len());
    }

    if invalid.is_empty() && opened == urls.len() {
        0
    } else {
        1
    }
}

/// List (or export) the catalog, reporting parse errors alongside results
pub fn run_list_mode(
    cli: &Cli,
    catalog: &Catalog,
    format: ExportFormat,
    color: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    let entries = match &cli.search {
        Some(term) => catalog.search(term),
        None => catalog.all().to_vec(),
    };

    if catalog.is_empty() {
        if !cli.quiet {
            println!("No link files found under '{}'", cli.path);
        }
        return Ok(0);
    }

    // Write the serialized form to a file when requested
    if let Some(ref output_path) = cli.output {
        let content = catalog.export(format, Some(&entries))?;
        fs::write(output_path, content)?;
        logging::log_export(format.as_str(), entries.len(), Some(Path::new(output_path)));
        if !cli.quiet {
            println!("Exported {} link(s) to {output_path}", entries.len());
        }
        return Ok(0);
    }

    match format {
        ExportFormat::Text => {
            if !cli.quiet {
                output::display_scan_summary(catalog, color);
            }
            output::display_entries(catalog, &entries, color);
            if !cli.quiet {
                output::display_parse_errors(catalog.errors(), color);
            }
        }
        ExportFormat::Json | ExportFormat::Markdown => {
            // Keep stdout machine-consumable; diagnostics go to stderr
            print!("{}", catalog.export(format, Some(&entries))?);
            if !cli.quiet {
                output::display_parse_errors(catalog.errors(), color);
            }
        }
    }

    Ok(0)
}
