//! Loads all layers from a directory of `<layer>.geojson` files and projects them into every supported projection.
//!
//! ```shell
//! cargo run --example project_layers -- ./data/layers
//! ```

use anyhow::{anyhow, Result};
use ixmaps::ixmaps_types::geo::ProjectionKind;
use ixmaps::layer::{FileLayerSource, LayerCache, LayerName};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let directory = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("This example must be run with one argument - the layer directory"))?;

    let cache = LayerCache::new(FileLayerSource::new(directory).with_dateline_split(true));

    for projection in ProjectionKind::ALL {
        for layer in LayerName::ALL {
            let collection = cache.fetch_transformed_geojson(layer, projection).await;
            log::info!("{projection}:{layer} - {} features", collection.len());
        }
    }

    let stats = cache.cache_stats();
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}
