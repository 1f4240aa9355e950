use clap::Parser;
use folio::config::Command;
use folio::ui::UiEvent;
use folio::utils::{logger, validation::Validate};
use folio::{CliConfig, FolioError, InteractionController, PageConfig, RelayConfig};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 不存在時直接使用行程環境變數
    dotenvy::dotenv().ok();

    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    match config.command {
        Command::Serve { host, port } => serve(&host, port).await,
        Command::Inspect { page, hash, events } => inspect(&page, &hash, events.as_deref()),
    }
}

fn exit_with(e: FolioError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

async fn serve(host: &str, port: Option<u16>) -> anyhow::Result<()> {
    let mut relay_config = RelayConfig::from_env().unwrap_or_else(|e| exit_with(e));
    if let Some(port) = port {
        relay_config.port = port;
    }
    if let Err(e) = relay_config.validate() {
        exit_with(e);
    }

    let relay = relay_config.build_relay().unwrap_or_else(|e| exit_with(e));
    folio::server::serve(relay, host, relay_config.port).await
}

fn inspect(page_path: &Path, hash: &str, events_path: Option<&Path>) -> anyhow::Result<()> {
    tracing::info!("📁 Loading page manifest from: {}", page_path.display());
    let page = PageConfig::from_file(page_path).unwrap_or_else(|e| exit_with(e));
    if let Err(e) = page.validate() {
        exit_with(e);
    }

    let mut controller = InteractionController::from_page(&page);

    println!("Features:");
    for (feature, enabled) in controller.features() {
        println!("  {:<14} {}", feature, if enabled { "enabled" } else { "disabled" });
    }

    let ready = controller.dispatch(UiEvent::Ready {
        hash: hash.to_string(),
    });
    println!("\nOn load:");
    println!("{}", serde_json::to_string_pretty(&ready)?);

    if let Some(path) = events_path {
        let content = std::fs::read_to_string(path)?;
        let events: Vec<UiEvent> = serde_json::from_str(&content)?;
        tracing::info!("🔁 Replaying {} events", events.len());

        for event in events {
            let effects = controller.dispatch(event.clone());
            println!("\n{}", serde_json::to_string(&event)?);
            println!("{}", serde_json::to_string_pretty(&effects)?);
        }
    }

    println!("\nFinal view:");
    println!("{}", serde_json::to_string_pretty(&controller.view())?);
    Ok(())
}
