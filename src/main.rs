use clap::Parser;
use docs_scraper::utils::error::ErrorSeverity;
use docs_scraper::utils::logger;
use docs_scraper::{
    build_pipeline, CachedClient, CliConfig, LocalStorage, ReportEmitter, ResponseCache,
    ScrapeEngine, ScrapeError,
};

async fn run(cli: &CliConfig) -> Result<Option<String>, ScrapeError> {
    let config = cli.resolve()?;
    tracing::debug!("Resolved settings: {:?}", config);

    let cache = config
        .cache_dir()
        .map(|dir| ResponseCache::new(dir.display().to_string()));
    if cli.clear_cache {
        match &cache {
            Some(cache) => {
                let removed = cache.clear().await?;
                tracing::info!(
                    "🧹 HTTP cache cleared: {} files removed from {}",
                    removed,
                    cache.dir()
                );
            }
            None => tracing::debug!("Cache disabled; nothing to clear"),
        }
    }

    let fetcher = CachedClient::build(config.timeout(), &config.http.user_agent, cache)?;
    let pipeline = build_pipeline(cli.mode, fetcher, &config)?;

    let results = LocalStorage::new(config.results_dir().display().to_string());
    let emitter = ReportEmitter::new(cli.output_mode(), results, &config.output.datetime_format);

    ScrapeEngine::new(pipeline, emitter).run().await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Parser started");
    tracing::debug!("Command line arguments: {:?}", cli);

    match run(&cli).await {
        Ok(saved) => {
            if let Some(path) = saved {
                println!("📁 Output saved to: {}", path);
            }
            tracing::info!("✅ Parser finished");
        }
        Err(e) => {
            tracing::error!(
                "❌ {} parser failed: {} (Category: {:?}, Severity: {:?})",
                cli.mode,
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
