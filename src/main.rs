use clap::Parser;
use deepsearch_gateway::core::ConfigProvider;
use deepsearch_gateway::utils::{logger, validation::Validate};
use deepsearch_gateway::{server, CliConfig, GatewayError, TomlConfig};

fn exit_on_config_error(e: &GatewayError) -> ! {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

async fn serve<C: ConfigProvider + Validate>(config: C) -> deepsearch_gateway::Result<()> {
    // 驗證配置
    if let Err(e) = config.validate() {
        exit_on_config_error(&e);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    tracing::info!(
        "🔧 Model: {} | Max results: {} | Timeout: {}s",
        config.model(),
        config.max_results(),
        config.request_timeout_seconds()
    );

    server::run_serve(&config).await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting deepsearch-gateway");

    let config_path = config.config.clone();
    let result = match config_path {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let toml_config = match TomlConfig::from_file(&path) {
                Ok(c) => c.with_service_secret_fallback(config.service_secret.clone()),
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            serve(toml_config).await
        }
        None => serve(config).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Gateway stopped with error: {} (Category: {:?})",
            e,
            e.category()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    Ok(())
}
