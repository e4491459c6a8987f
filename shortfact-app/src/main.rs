use anyhow::Result;
use clap::Parser;
use shortfact_actors::{ActorSystem, spawn_actor};
use shortfact_common::observability::{LogConfig, init_logging};
use shortfact_config::{ShortfactConfig, ShortfactConfigLoader};
use shortfact_llm::{FactChecker, GeminiClient};
use shortfact_tui::{TuiActor, spawn_tui_feeders};
use std::sync::Arc;

/// Fact-check claims from YouTube Shorts in your terminal.
#[derive(Debug, Parser)]
#[command(name = "shortfact", version)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(long, default_value = "shortfact.yaml")]
    config: std::path::PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1) Load config (env wins) and fail fast on missing credentials,
    //    before the terminal enters raw mode.
    let cfg: ShortfactConfig = ShortfactConfigLoader::new()
        .with_file(&args.config)
        .load()?;
    cfg.validate()?;

    init_logging(LogConfig {
        log_dir: cfg.log.dir.clone(),
        ..LogConfig::default()
    })?;

    let client = GeminiClient::new(cfg.gemini.api_key.clone(), cfg.gemini.model.clone())?
        .with_generation(cfg.gemini.temperature, cfg.gemini.max_output_tokens);
    let checker = Arc::new(FactChecker::new(Arc::new(client)));

    let mut system = ActorSystem::new();
    let shutdown = system.shutdown_handle();

    let tui = TuiActor::new(checker, shutdown.clone())?;
    let handle = spawn_actor(tui, 256, Some(system.shutdown_notifier()));
    let tui_addr = handle.addr.clone();
    system.track(async move {
        handle.task.await??;
        Ok(())
    });
    spawn_tui_feeders(tui_addr, shutdown);

    system.run_until_shutdown().await
}
