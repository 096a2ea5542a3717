use listino::Listino;
use listino_demos::common::{get_catalog, get_provider};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,listino=trace,listino_cardkingdom=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let listino = Listino::builder().with_provider(get_provider()?).build()?;
    let catalog = get_catalog()?;
    tracing::info!(records = catalog.len(), "catalog ready");

    let report = listino.today_prices(&catalog).await?;
    tracing::info!(cards = report.card_count(), failures = report.failures.len(), "done");

    Ok(())
}
