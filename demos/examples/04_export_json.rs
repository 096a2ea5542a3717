use listino::Listino;
use listino_demos::common::{get_catalog, get_provider};

// Write the day's report as JSON, keyed uuid -> provider -> finish.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let listino = Listino::builder().with_provider(get_provider()?).build()?;
    let report = listino.today_prices(&get_catalog()?).await?;

    let out = std::env::temp_dir().join(format!("listino-{}.json", listino.date()));
    let file = std::fs::File::create(&out)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), &report)?;
    println!("wrote {} cards to {}", report.card_count(), out.display());
    Ok(())
}
