//! Validates every feature of a GeoJSON file as a subdivision of the country given in a second file.
//!
//! ```shell
//! cargo run --example validate_features -- subdivisions.geojson country.geojson
//! ```

use anyhow::{anyhow, Result};
use ixmaps::ixmaps_types::FeatureCollection;
use ixmaps::validation::{GeometryKind, SpatialValidator, ValidationContext};

fn read_collection(path: &str) -> Result<FeatureCollection> {
    Ok(std::fs::read_to_string(path)?.parse()?)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [features, country] = args.as_slice() else {
        return Err(anyhow!(
            "This example must be run with two arguments - the features file and the country file"
        ));
    };

    let features = read_collection(features)?;
    let country = read_collection(country)?;
    let boundary = country
        .features
        .first()
        .ok_or_else(|| anyhow!("Country file has no features"))?;

    let validator = SpatialValidator::default();
    for (index, feature) in features.features.iter().enumerate() {
        let others: Vec<_> = features
            .features
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, f)| f.clone())
            .collect();

        let report = validator.validate_geometry(
            feature,
            GeometryKind::Subdivision,
            ValidationContext {
                country_boundary: Some(boundary),
                existing_features: &others,
            },
        );

        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
