//! RigForge - command-line front end for the PC build configurator

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use rigforge::app::{Action, App, NoticeLevel, Outcome};
use rigforge::catalog::{Catalog, CatalogQuery, CatalogSource};
use rigforge::cli::{Cli, Commands};
use rigforge::config::ForgeConfig;
use rigforge::{presets, report};

/// Initialize the logger. `RUST_LOG` overrides the default level.
fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logger(cli.verbose);
    debug!("CLI arguments parsed");

    if let Some(Commands::ConfigCheck { path }) = &cli.command {
        return check_config(path);
    }

    let mut config = match &cli.config {
        Some(path) => match ForgeConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load configuration file: {:#}", e);
                eprintln!("✗ Failed to load configuration file: {:#}", e);
                return ExitCode::FAILURE;
            }
        },
        None => ForgeConfig::default(),
    };
    if let Some(store) = cli.store {
        config.storage_dir = Some(store);
    }
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }
    if let Err(e) = config.validate() {
        eprintln!("✗ Configuration validation failed: {}", e);
        return ExitCode::FAILURE;
    }

    let catalog = Arc::new(Catalog::load(&config.catalog_source()));
    if catalog.is_empty() {
        eprintln!("! The parts catalog is empty. Nothing can be selected.");
    }
    let mut app = App::new(config, catalog);
    info!("Using storage directory {:?}", app.store().dir());

    for notice in app.restore() {
        eprintln!("{}", report::render_notice(&notice));
    }

    let action = match cli.command {
        None | Some(Commands::Show) => {
            print_summary(&app);
            return ExitCode::SUCCESS;
        }
        Some(Commands::Presets) => {
            print!("{}", report::render_presets(presets::ALL));
            return ExitCode::SUCCESS;
        }
        Some(Commands::Catalog {
            category,
            brand,
            min_price,
            max_price,
            search,
            sort,
            brands,
        }) => {
            let catalog = app.builder().catalog();
            if brands {
                print!("{}", report::render_brands(category, &catalog.brands(category)));
                return ExitCode::SUCCESS;
            }
            let query = CatalogQuery {
                brand,
                min_price,
                max_price,
                search,
                sort,
            };
            let currency = &app.config().currency;
            let items = catalog.browse(category, &query, currency);
            let selected = app.builder().build().get(category).map(|c| c.id.as_str());
            print!("{}", report::render_listing(category, &items, selected, currency));
            return ExitCode::SUCCESS;
        }
        Some(Commands::Select { category, id }) => Action::Select { category, id },
        Some(Commands::Clear { category, all }) => match category {
            Some(category) if !all => Action::Clear(category),
            _ => Action::ClearAll,
        },
        Some(Commands::Preset { name }) => Action::LoadPreset(name),
        Some(Commands::Export { path }) => Action::Export(path),
        Some(Commands::Import { path }) => Action::Import(path),
        Some(Commands::Share) => Action::Share,
        Some(Commands::OpenShare { token }) => Action::OpenShare(token),
        Some(Commands::Quote { send, draft }) => Action::RequestQuote { send, draft },
        Some(Commands::ConfigCheck { path }) => return check_config(&path),
    };

    let shows_summary = action.mutates();
    let outcome = app.handle(action);
    finish(&app, outcome, shows_summary)
}

fn finish(app: &App, outcome: Outcome, shows_summary: bool) -> ExitCode {
    for notice in &outcome.notices {
        eprintln!("{}", report::render_notice(notice));
    }
    if let Some(output) = &outcome.output {
        println!("{}", output);
    }
    if shows_summary {
        print!(
            "{}",
            report::render_summary(app.builder().build(), &outcome.summary, &app.config().currency)
        );
    }

    if outcome.has_level(NoticeLevel::Error) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_summary(app: &App) {
    let build = app.builder().build();
    print!(
        "{}",
        report::render_summary(build, &app.builder().summary(), &app.config().currency)
    );
}

fn check_config(path: &Path) -> ExitCode {
    info!("Validating configuration file: {:?}", path);
    let config = match ForgeConfig::load_from_file(path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration file: {:#}", e);
            eprintln!("✗ Failed to load configuration file: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("✗ Configuration validation failed: {}", e);
        return ExitCode::FAILURE;
    }

    if let CatalogSource::File(catalog_path) = config.catalog_source() {
        if let Err(e) = Catalog::load_from_file(&catalog_path) {
            eprintln!("✗ Catalog {:?} cannot be used: {:#}", catalog_path, e);
            return ExitCode::FAILURE;
        }
    }

    println!("✓ Configuration file is valid: {:?}", path);
    ExitCode::SUCCESS
}
