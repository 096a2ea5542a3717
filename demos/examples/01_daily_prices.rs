use listino::{Finish, Listino};
use listino_demos::common::{get_catalog, get_provider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let provider = get_provider()?;
    let name = provider.name();
    let listino = Listino::builder().with_provider(provider).build()?;

    let catalog = get_catalog()?;
    let report = listino.today_prices(&catalog).await?;

    println!(
        "{} prices for {} cards on {}",
        name,
        report.card_count(),
        listino.date()
    );
    for (uuid, by_provider) in report.prices.iter().take(10) {
        let Some(by_finish) = by_provider.get(name) else {
            continue;
        };
        for finish in [Finish::NonFoil, Finish::Foil, Finish::Etched] {
            if let Some(p) = by_finish.get(&finish) {
                let show = |v: Option<listino::Price>| v.map_or_else(|| "-".to_string(), |p| p.to_string());
                println!(
                    "  {uuid} {finish:<8} retail {:>10}  buy {:>10}  {}",
                    show(p.retail()),
                    show(p.buy()),
                    p.currency()
                );
            }
        }
    }

    Ok(())
}
