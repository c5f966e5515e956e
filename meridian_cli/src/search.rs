use clap::Args;
use comfy_table::Table;
use meridian_providers::{NominatimPlaceResolver, PlaceResolver, ProviderConfig};

#[derive(Args)]
pub struct SearchArgs {
    query: String,

    /// ISO 3166-1 alpha-2 country code
    #[arg(short, long)]
    country: Option<String>,

    #[arg(short, long, default_value_t = 5)]
    limit: usize,
}

pub async fn run(args: SearchArgs) -> Result<(), anyhow::Error> {
    let resolver = NominatimPlaceResolver::new(&ProviderConfig::from_env()?)?;
    let places = resolver
        .search(&args.query, args.country.as_deref(), args.limit)
        .await;

    if places.is_empty() {
        println!("No places found for \"{}\"", args.query);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Address", "Position"]);
    for place in places {
        table.add_row(vec![place.name, place.address, place.location.to_string()]);
    }
    println!("{table}");

    Ok(())
}
