use anyhow::Context;
use clap::Parser;
use cv_etl::core::ConfigProvider;
use cv_etl::utils::error::ErrorSeverity;
use cv_etl::utils::{logger, validation::Validate};
use cv_etl::{CliConfig, CvPipeline, EtlEngine, GeminiStructurer, LocalStorage, RunOutcome, TomlConfig};

const EXIT_STRUCTURING_FAILED: i32 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting cv-etl");
    tracing::debug!("CLI config: {:?}", cli);

    let exit_code = match cli.config.clone() {
        Some(path) => {
            let config = TomlConfig::from_file(&path)
                .with_context(|| format!("failed to load configuration from {}", path))?;
            run(config).await?
        }
        None => run(cli).await?,
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

async fn run<C: ConfigProvider + Validate + 'static>(config: C) -> anyhow::Result<i32> {
    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());
        return Ok(1);
    }

    tracing::info!("Input: {}, output: {}", config.input_path(), config.output_path());

    let structurer = GeminiStructurer::from_config(&config)?;
    let pipeline = CvPipeline::new(LocalStorage::default(), structurer, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(RunOutcome::Completed { output_path, .. }) => {
            tracing::info!("Run completed, output: {}", output_path);
            Ok(0)
        }
        Ok(RunOutcome::StructuringFailed(e)) => {
            tracing::warn!("No CSV written ({:?} error)", e.category());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            Ok(EXIT_STRUCTURING_FAILED)
        }
        Err(e) => {
            tracing::error!(
                "Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium | ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            Ok(exit_code)
        }
    }
}
