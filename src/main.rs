use clap::Parser;
use race_results::app;
use race_results::utils::error::ErrorSeverity;
use race_results::utils::{logger, validation::Validate};
use race_results::{CliConfig, TomlConfig};

fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();

    // 載入 TOML 配置 (若有指定)
    if let Some(config_path) = config.config.clone() {
        let toml = match TomlConfig::from_file(&config_path) {
            Ok(toml) => toml,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", config_path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        };
        if let Err(e) = toml.validate() {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
        config.merge_toml(&toml);
    }

    // 初始化日誌
    let log_level = config.log_level.as_deref();
    if config.json_logs {
        logger::init_json_logger(config.verbose, log_level);
    } else {
        logger::init_cli_logger(config.verbose, log_level);
    }

    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if let Err(e) = app::run(&config, &mut std::io::stdout().lock()) {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4, // 查無資料
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}
