//! CLI entrypoint for Verse Tutor
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tutor_application::{
    ContentCatalog, ConversationController, Dictionary, ProfileStore, ProgressNotifier,
    TutorService,
};
use tutor_domain::Topology;
use tutor_infrastructure::{
    ApiClient, ConfigLoader, FileConfig, HttpContentCatalog, HttpDictionary, HttpProfileStore,
    HttpTutorService, JsonFileProfileStore, JsonlConversationLogger, ProfileStoreKind,
    TsvContentCatalog,
};
use tutor_presentation::{
    Cli, ConsoleFormatter, OutputConfig, ProgressReporter, ReplConfig, TutorRepl,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    info!("Starting Verse Tutor");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    check_config(&config)?;

    OutputConfig {
        color: config.output.color,
    }
    .apply();

    let topology: Topology = match cli.topology {
        Some(arg) => arg.into(),
        None => config.session.parse_topology().0,
    };
    let base_url = cli
        .tutor_url
        .clone()
        .unwrap_or_else(|| config.tutor.base_url.clone());

    // === Dependency Injection ===
    let api = ApiClient::new(base_url, config.tutor.timeout())?;

    let catalog: Arc<dyn ContentCatalog> =
        match cli.catalog.clone().or_else(|| config.catalog.resolved_path()) {
            Some(path) => {
                info!("Using TSV catalog at {}", path.display());
                Arc::new(TsvContentCatalog::new(path))
            }
            None => Arc::new(HttpContentCatalog::new(api.clone())),
        };

    let profiles: Arc<dyn ProfileStore> = match config.profile.parse_store().0 {
        ProfileStoreKind::Http => Arc::new(HttpProfileStore::new(api.clone())),
        ProfileStoreKind::File => {
            let Some(path) = config.profile.resolved_path() else {
                bail!("No location for the profile file; set [profile] path");
            };
            Arc::new(JsonFileProfileStore::new(path))
        }
    };

    let dictionary: Arc<dyn Dictionary> = Arc::new(HttpDictionary::new(api.clone()));
    let tutor: Arc<dyn TutorService> = Arc::new(HttpTutorService::new(api));

    let mut controller = ConversationController::new(topology, catalog, profiles, tutor);

    let show_progress = config.repl.show_progress && !cli.quiet;
    if show_progress {
        let progress: Arc<dyn ProgressNotifier> = Arc::new(ProgressReporter::new());
        controller = controller.with_progress(progress);
    }

    if let Some(dir) = config.log.resolved_dir()
        && let Some(logger) = JsonlConversationLogger::in_dir(&dir)
    {
        info!("Conversation log: {}", logger.path().display());
        controller = controller.with_conversation_logger(Arc::new(logger));
    }

    let controller = Arc::new(controller);

    let count = controller.bootstrap().await?;
    if count == 0 {
        warn!("The poem catalog is empty");
    }

    if cli.list {
        println!("{}", ConsoleFormatter::poem_list(&controller.contents()));
        return Ok(());
    }

    let repl = TutorRepl::new(controller)
        .with_dictionary(dictionary)
        .with_config(ReplConfig {
            show_progress,
            history_file: config.repl.history_file.clone(),
        });
    repl.run().await?;

    Ok(())
}

/// Print configuration issues; fail on errors, keep going on warnings.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        eprintln!("{}", issue);
    }
    if issues.iter().any(|issue| issue.is_error()) {
        bail!("Invalid configuration");
    }
    Ok(())
}
