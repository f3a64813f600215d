//! Templar CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Browse interactively (default command)
//! templar
//! templar browse --url 'q=slack&sort=setup_time'
//!
//! # Search once and print the results
//! templar search slack
//! templar search -u sales -c crm --sort complexity --json
//!
//! # List the option lists the browser shows
//! templar list use-cases
//! templar list categories -u marketing
//!
//! # Build a large synthetic catalog for testing
//! templar generate -n 2000 -o /tmp/templates.json
//! templar --dataset /tmp/templates.json
//! ```
//!
//! # Configuration
//!
//! Settings live in `~/.config/templar/config.toml` on Linux. Run
//! `templar config init` to write the defaults.

use colored::Colorize;
use std::path::Path;
use std::sync::Arc;
use templar::{
    TemplarError,
    cli::{Cli, Commands, ConfigCommands, ListVariant},
    config::TemplarConfig,
    dataset::{
        AnySource, DataSource, DatasetLoader, EmbeddedSource, JsonFileSource,
        generate::{expand, write_json},
    },
    logging::{self, LogTarget, Verbosity},
    model::TemplateRef,
    output,
    query::{
        FileLocation, Location, MemoryLocation, QueryEngine, QueryParams, SortKey, SystemClock,
        pipeline::{partition_by_use_case, unique_categories, unique_use_cases},
    },
    ui::{self, BrowseOptions},
};
use tracing::{debug, warn};

type Result<T> = std::result::Result<T, TemplarError>;

/// Run the interactive browser against `location`
fn handle_browse_command<L: Location>(
    loader: &DatasetLoader<AnySource>,
    location: L,
    options: BrowseOptions,
    quiet: bool,
) -> Result<()> {
    let mut last_selected: Option<TemplateRef> = None;
    ui::run(loader, location, options, |record| {
        if let Some(record) = record {
            debug!(id = %record.id, "selected template");
            last_selected = Some(Arc::clone(record));
        }
    })?;

    if let Some(record) = last_selected {
        println!("{}", output::template_line(&record, quiet));
    }
    Ok(())
}

struct SearchArgs<'a> {
    query: Option<&'a str>,
    use_case: Option<&'a str>,
    categories: &'a [String],
    sort: SortKey,
    limit: Option<usize>,
    json: bool,
}

fn handle_search_command(
    loader: &DatasetLoader<AnySource>,
    config: &TemplarConfig,
    args: &SearchArgs<'_>,
    quiet: bool,
) -> Result<()> {
    let records = loader.load()?;
    let seed = QueryParams::new(args.query.unwrap_or_default().to_string(), args.sort).encode();
    let mut engine = QueryEngine::mount(
        records,
        MemoryLocation::new(&seed),
        SystemClock,
        config.engine_options(),
    )?;

    if let Some(use_case) = args.use_case {
        if !engine.available_use_cases().iter().any(|uc| uc == use_case) {
            warn!(use_case, "no template has this use case");
        }
        engine.select_use_case(Some(use_case.to_string()));
    }
    for category in args.categories {
        engine.toggle_category(category);
    }
    engine.flush();

    let matched = engine.results();
    let shown = &matched[..args.limit.unwrap_or(matched.len()).min(matched.len())];

    if args.json {
        println!("{}", output::results_json(shown)?);
        return Ok(());
    }

    if matched.is_empty() {
        if !quiet {
            println!("No templates found");
        }
        return Ok(());
    }

    for record in shown {
        println!("{}", output::template_line(record, quiet));
    }
    if !quiet {
        println!();
        println!(
            "{}",
            output::result_summary(shown.len(), matched.len(), engine.total())
        );
    }
    Ok(())
}

fn handle_list_command(
    loader: &DatasetLoader<AnySource>,
    variant: ListVariant,
    use_case: Option<&str>,
    quiet: bool,
) -> Result<()> {
    let records = loader.load()?;
    let values = match variant {
        ListVariant::UseCases => unique_use_cases(&records),
        ListVariant::Categories => unique_categories(&partition_by_use_case(&records, use_case)),
    };

    if values.is_empty() && !quiet {
        println!("(none)");
    }
    for value in &values {
        println!("{}", output::option_line(value, quiet));
    }
    Ok(())
}

fn handle_generate_command(
    count: usize,
    out: &Path,
    base: Option<&Path>,
    seed: u64,
    quiet: bool,
) -> Result<()> {
    let base_records = match base {
        Some(path) => JsonFileSource::new(path).fetch()?,
        None => EmbeddedSource.fetch()?,
    };
    let records = expand(&base_records, count, seed)?;
    write_json(&records, out)?;

    if !quiet {
        println!(
            "{} Wrote {} templates to {}",
            "✓".green(),
            records.len(),
            out.display()
        );
    }
    Ok(())
}

fn handle_config_command(config: &TemplarConfig, command: ConfigCommands, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            println!("{}", TemplarConfig::config_path()?.display());
        }
        ConfigCommands::Show => {
            let rendered = toml::to_string_pretty(config).map_err(|e| {
                ::config::ConfigError::Message(format!("Failed to serialize config: {e}"))
            })?;
            print!("{rendered}");
        }
        ConfigCommands::Init { force } => {
            let path = TemplarConfig::config_path()?;
            if path.exists() && !force {
                if !quiet {
                    println!(
                        "Config already exists at {} (use --force to overwrite)",
                        path.display()
                    );
                }
                return Ok(());
            }
            TemplarConfig::default().save_to(&path)?;
            if !quiet {
                println!("{} Wrote {}", "✓".green(), path.display());
            }
        }
    }
    Ok(())
}

/// Parse arguments, set up logging and configuration, and dispatch
///
/// # Errors
///
/// Returns `TemplarError` if configuration loading fails, the dataset cannot
/// be loaded, or any command handler returns an error.
fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let command = cli.get_command();
    let quiet = cli.quiet;

    // The browser owns the terminal, so its logs go to a file
    let target = match command {
        Commands::Browse { .. } => TemplarConfig::log_path().map_or(LogTarget::Stderr, LogTarget::File),
        _ => LogTarget::Stderr,
    };
    logging::init(Verbosity::from_flags(cli.verbose, cli.quiet), &target);

    let config = TemplarConfig::load()?;
    let dataset = cli.dataset.clone().or_else(|| config.dataset.clone());
    let loader = DatasetLoader::new(AnySource::from_path(dataset.as_deref()));
    debug!(source = %loader.describe(), "dataset source");

    match &command {
        Commands::Browse { url } => {
            let options = BrowseOptions {
                engine: config.engine_options(),
                row_height: config.row_height(),
            };
            match (url, config.location_path()) {
                (Some(url), _) => {
                    handle_browse_command(&loader, MemoryLocation::new(url), options, quiet)?;
                }
                (None, Some(path)) => {
                    handle_browse_command(&loader, FileLocation::new(path), options, quiet)?;
                }
                (None, None) => {
                    handle_browse_command(&loader, MemoryLocation::default(), options, quiet)?;
                }
            }
        }
        Commands::Search {
            query,
            use_case,
            categories,
            sort,
            limit,
            json,
        } => {
            let args = SearchArgs {
                query: query.as_deref(),
                use_case: use_case.as_deref(),
                categories,
                sort: sort.unwrap_or(config.default_sort),
                limit: *limit,
                json: *json,
            };
            handle_search_command(&loader, &config, &args, quiet)?;
        }
        Commands::List { variant, use_case } => {
            handle_list_command(&loader, *variant, use_case.as_deref(), quiet)?;
        }
        Commands::Generate {
            count,
            out,
            base,
            seed,
        } => {
            handle_generate_command(*count, out, base.as_deref(), *seed, quiet)?;
        }
        Commands::Config { command } => {
            handle_config_command(&config, *command, quiet)?;
        }
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "error:".red().bold());
        std::process::exit(1);
    }
}
