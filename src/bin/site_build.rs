use clap::Parser;
use cookconvert::core::routes;
use cookconvert::core::ConfigProvider;
use cookconvert::utils::{logger, validation::Validate};
use cookconvert::{BuildEngine, LocalStorage, Registry, SiteConfig, SitePipeline};

#[derive(Parser)]
#[command(name = "site-build")]
#[command(about = "Build the CookConvert site artifacts from a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "cookconvert.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override output.path from config
    #[arg(long)]
    output_path: Option<String>,

    /// Override site.url from config
    #[arg(long)]
    site_url: Option<String>,

    /// Dry run - list what would be generated without writing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match SiteConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(config.log_format(), args.verbose || config.verbose());
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(path) = &args.output_path {
        config.output.path = path.clone();
        tracing::info!("🔧 Output path overridden to: {}", path);
    }
    if let Some(url) = &args.site_url {
        config.site.url = Some(url.clone());
        tracing::info!("🔧 Site URL overridden to: {}", url);
    }

    let config = match config.resolve().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let registry = Registry::builtin()?;
    display_config_summary(&config, &registry, args.dry_run);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        perform_dry_run(&registry)?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = SitePipeline::new(storage, config, registry);
    let engine = BuildEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Site build completed successfully!");
            println!("✅ Site build completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Site build failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &SiteConfig, registry: &Registry, dry_run: bool) {
    println!("📋 Configuration Summary:");
    if let Some(name) = &config.site.name {
        println!("  Site: {}", name);
    }
    println!("  URL: {}", config.site_url());
    println!("  Build time: {}", config.build_time().to_rfc3339());
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output.formats.join(", "));
    println!("  Page files: {}", config.write_pages());
    if let Some(archive) = config.archive_filename() {
        println!("  Archive: {} (ZIP)", archive);
    }
    println!("  Ingredients: {}", registry.len());

    if dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
    println!();
}

fn perform_dry_run(registry: &Registry) -> Result<(), Box<dyn std::error::Error>> {
    let route_set = routes::enumerate(registry)?;

    println!("🧭 Routes by family:");
    for (family, count) in route_set.count_by_family() {
        println!("  {:<22} {}", family, count);
    }
    println!("  {:<22} {}", "total", route_set.len());

    Ok(())
}
