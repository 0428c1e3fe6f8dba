use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cah_client::application::services::{ConnectionManager, RecoveryChain, Scheduler, deferred_queue};
use cah_client::domain::ViewKind;
use cah_client::domain::ports::{AudioPort, ConfiguratorPort, TranslatorPort, keys};
use cah_client::infrastructure::{
    AppConfig, CatalogTranslator, CliArgs, PassiveProtocol, SoundBank, SoundPlayer,
    StorageManager, TcpConnector, TomlConfigurator,
};
use cah_client::presentation::ui::{
    ClientState, LoginView, MessageView, ViewContext, ViewRegistry, ViewStateMachine,
    builtin_registry,
};
use cah_client::presentation::{RunLoop, RunLoopParts, TerminalDisplay, TerminalInput};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<(AppConfig, Arc<StorageManager>)> {
    let args = CliArgs::parse();
    let storage = StorageManager::new().wrap_err("no configuration directory")?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok((config, Arc::new(storage)))
}

fn views() -> ViewRegistry {
    ViewRegistry::new()
        .with(ViewKind::Login, |context| Box::new(LoginView::new(context)))
        .with(ViewKind::Message, |context| Box::new(MessageView::new(context)))
}

async fn run(config: AppConfig, storage: Arc<StorageManager>) -> Result<()> {
    let scheduler = Scheduler::try_current()?;
    let (queue, events) = deferred_queue::channel();
    let assets = config.effective_assets_dir();

    let settings: Arc<dyn ConfiguratorPort> = Arc::new(TomlConfigurator::load(storage));
    let translator: Arc<dyn TranslatorPort> =
        Arc::new(CatalogTranslator::new(assets.join("translations")));
    if let Some(language) = settings.get(keys::LANGUAGE) {
        translator.set_language(&language);
    }
    let audio: Arc<dyn AudioPort> =
        Arc::new(SoundPlayer::new(SoundBank::load(&assets.join("sound"))));

    let connection = ConnectionManager::new(
        scheduler.clone(),
        Arc::new(TcpConnector::new()),
        Arc::new(PassiveProtocol::new(scheduler.clone(), queue.clone())),
        RecoveryChain::standard(Arc::clone(&translator)),
        queue.clone(),
    );

    let context = ViewContext {
        queue: queue.clone(),
        translator: Arc::clone(&translator),
        audio: Arc::clone(&audio),
        settings: Arc::clone(&settings),
        accessibility: config.accessibility,
    };
    let state = ClientState::new(
        ViewStateMachine::new(views(), context),
        connection,
        settings,
        translator,
        audio,
        queue.clone(),
    );

    let display = TerminalDisplay::init(config.width, config.height)?;

    let mut run_loop = RunLoop::new(RunLoopParts {
        state,
        calls: builtin_registry(),
        events,
        input: Box::new(TerminalInput::new()),
        display: Box::new(display),
        scheduler,
        tick_rate_hz: config.effective_tick_rate(),
    });

    queue.request_view_change(ViewKind::Login);
    run_loop.run().await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let (config, storage) = load_config()?;
    init_logging(&config)?;

    info!(version = cah_client::VERSION, "Starting {}", cah_client::NAME);

    let result = run(config, storage).await;

    info!("Client exiting");
    result
}
