use address_book::utils::{logger, validation::Validate};
use address_book::{AppConfig, Reader, Report};
use anyhow::Context;

const CONFIG_ENV: &str = "ADDRESS_BOOK_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "address-book.toml";

fn main() -> anyhow::Result<()> {
    let config_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let config = AppConfig::from_file(&config_path)
        .with_context(|| format!("failed to load configuration from {}", config_path))?;
    logger::init_logger(&config.logging);

    tracing::info!("Starting address-book with config {}", config_path);
    tracing::debug!("Config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e.into());
    }

    let reader = Reader::from_settings(&config)?;
    let book = match reader.read(config.source_path()) {
        Ok(book) => book,
        Err(e) => {
            tracing::error!("❌ Loading address book failed: {} (kind: {:?})", e, e.kind());
            return Err(e).context("failed to load address book");
        }
    };

    let report = Report::build(&book, config.age_difference_queries());
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
