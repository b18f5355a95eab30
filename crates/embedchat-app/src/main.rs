mod app_state;
mod cli;

use std::process::ExitCode;

use embedchat_common::{ConfigError, LanguageTag};
use embedchat_config::EmbedConfig;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use app_state::{EmbedChatApp, UserEvent};

fn load(args: &cli::Args) -> Result<EmbedConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Using config override: {}", path.display());
            embedchat_config::load_from_path(path)?
        }
        None => embedchat_config::load_default()?,
    };
    args.apply(&mut config);
    embedchat_config::validate(&config)?;
    Ok(config)
}

fn main() -> ExitCode {
    let args = cli::parse();

    // Initialize logging
    let log_directive = args.log_level.as_deref().unwrap_or("embedchat=info");
    let directive: tracing_subscriber::filter::Directive = log_directive.parse().unwrap_or_else(|_| {
        eprintln!("invalid --log-level '{log_directive}', using info");
        tracing_subscriber::filter::LevelFilter::INFO.into()
    });
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    tracing::info!("EmbedChat v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match load(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        api_host = ?config.agent.api_host,
        persistence = ?config.agent.persistence_mode,
        "Config loaded"
    );

    if args.print_url {
        let locale = LanguageTag::from_env();
        return match embedchat_webview::build_launch_url(&config.agent, &config.chat, &locale) {
            Ok(url) => {
                println!("{url}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!("Could not build launch URL: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let event_loop = match EventLoop::<UserEvent>::with_user_event().build() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut app = EmbedChatApp::new(config, args.dark, event_loop.create_proxy());

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
        return ExitCode::FAILURE;
    }
    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
