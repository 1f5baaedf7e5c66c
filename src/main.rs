use clap::Parser;
use cookconvert::utils::error::SiteError;
use cookconvert::utils::{logger, validation::Validate};
use cookconvert::{BuildEngine, CliConfig, LocalStorage, Registry, SitePipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting cookconvert site build");

    // 補齊環境變數預設值並驗證
    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => exit_on_config_error(e),
    };
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }
    if let Err(e) = config.validate() {
        exit_on_config_error(e);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let registry = match Registry::builtin() {
        Ok(registry) => registry,
        Err(e) => report_and_exit(e),
    };

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = SitePipeline::new(storage, config, registry);
    let engine = BuildEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Site build completed successfully!");
            println!("✅ Site build completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => report_and_exit(e),
    }

    Ok(())
}

fn exit_on_config_error(e: SiteError) -> ! {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

fn report_and_exit(e: SiteError) -> ! {
    tracing::error!(
        "❌ Site build failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
