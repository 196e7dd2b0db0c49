use clap::Parser;
use ocean_directory::config::LogFormat;
use ocean_directory::core::ConfigProvider;
use ocean_directory::utils::error::{DirectoryError, ErrorSeverity};
use ocean_directory::utils::{logger, validation::Validate};
use ocean_directory::{CliConfig, DirectoryPipeline, EtlEngine, LocalStorage, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Text => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("🌊 Starting ocean-directory");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let storage = LocalStorage::new(cli.base_dir.clone());

    let outcome = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            config.apply_overrides(cli.output, cli.format, cli.search, cli.select);
            tracing::info!("📋 Directory: {}", config.directory_name());
            run_cycle(storage, config).await
        }
        None => run_cycle(storage, cli).await,
    };

    match outcome {
        Ok(output) => {
            tracing::info!("✅ Directory loaded successfully ({})", output);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Directory load failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            if let DirectoryError::HttpStatusError { body_preview, .. } = &e {
                tracing::debug!("Response: {}", body_preview);
            }
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}

async fn run_cycle<C>(storage: LocalStorage, config: C) -> ocean_directory::Result<String>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;
    tracing::info!("🔗 Source: {}", config.source_location());

    let pipeline = DirectoryPipeline::new(storage, config)?;
    EtlEngine::new(pipeline).run().await
}
