use clap::Parser;
use lists_counter::utils::{logger, validation::Validate};
use lists_counter::{CliArgs, ConfigProvider, CounterWidget, HttpCountSource, TerminalDisplay};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 解析設定 (預設值 -> 設定檔 -> 命令列)
    let config = match args.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting lists-counter against {}", config.base_url);
    tracing::debug!("Resolved config: {:?}", config);

    let source = HttpCountSource::from_config(&config)?;
    let display = TerminalDisplay::new(config.element_id.clone(), config.initial.clone());
    let widget = CounterWidget::from_config(source, display, &config);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let value = widget.run(config.refresh_interval(), shutdown).await;
    widget.display().finish()?;

    tracing::info!("Counter settled at {}", value);
    Ok(())
}
