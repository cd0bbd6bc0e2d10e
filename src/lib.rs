pub mod app;
pub mod breathing;
pub mod concentration;
pub mod console;
pub mod error;
pub mod i18n;
pub mod models;
pub mod settings;
pub mod store;
pub mod timer;
pub mod tips;
mod utils;

pub use app::{MindWell, Update};
pub use error::MindWellError;

use concentration::RandomDelays;
use settings::AppConfig;
use timer::TokioScheduler;

/// Console entry point: logging, config, then the command loop.
pub fn run() -> anyhow::Result<()> {
    // The logger comes up before the config is read so start-up problems are
    // visible. The configured level is applied once known, unless RUST_LOG
    // already chose one.
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Debug)
        .parse_default_env()
        .init();
    let level_from_env = std::env::var_os("RUST_LOG").is_some();
    if !level_from_env {
        log::set_max_level(log::LevelFilter::Info);
    }

    let config = AppConfig::load()?;
    if !level_from_env {
        log::set_max_level(config.log_level());
    }

    log::info!("MindWell starting up (language: {})", config.language().code());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let (scheduler, fired) = TokioScheduler::new();
        let app = MindWell::new(scheduler, RandomDelays::from_entropy(), config.language());
        console::run_console(app, fired).await
    })
}
