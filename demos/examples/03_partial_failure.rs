use std::sync::Arc;
use std::time::Duration;

use listino::Listino;
use listino_mock::{MockMode, MockProvider};

// One provider succeeds, one fails, one is too slow: the report keeps what worked.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let listino = Listino::builder()
        .with_provider(Arc::new(MockProvider::named("healthy")))
        .with_provider(Arc::new(MockProvider::named("broken").with_mode(MockMode::Fail)))
        .with_provider(Arc::new(MockProvider::named("sluggish").with_mode(MockMode::Slow)))
        .provider_timeout(Duration::from_millis(50))
        .build()?;

    let report = listino.today_prices(&listino_mock::catalog()).await?;

    println!("priced {} cards", report.card_count());
    for failure in &report.failures {
        println!("  failed: {failure}");
    }
    Ok(())
}
