use clap::Args;
use meridian_core::Coordinate;
use meridian_providers::{NominatimPlaceResolver, PlaceResolver, ProviderConfig};

use crate::parsers;

#[derive(Args)]
pub struct ReverseArgs {
    /// Position as lat,lng
    #[arg(value_parser = parsers::parse_coordinate)]
    at: Coordinate,
}

pub async fn run(args: ReverseArgs) -> Result<(), anyhow::Error> {
    let resolver = NominatimPlaceResolver::new(&ProviderConfig::from_env()?)?;
    let result = resolver.reverse_geocode(args.at).await;

    println!(
        "{} (confidence {:.1}, {:?})",
        result.address, result.confidence, result.provenance
    );

    Ok(())
}
